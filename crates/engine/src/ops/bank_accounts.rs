use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    AccountType, BankAccount, BankAccountNew, BankAccountPatch, Currency, ResultEngine,
    account_types, bank_accounts, currencies, transactions,
};

use super::{
    Engine, currencies::find_currency, ensure_no_dependents, not_found, require_text,
    with_tx,
};

const NOT_FOUND: &str = "Conta não encontrada";
const FIELDS_REQUIRED: &str = "Nome da conta e o ID do tipo de conta são obrigatórios.";
const ACCOUNT_TYPE_NOT_FOUND: &str = "ID do tipo de conta não encontrado.";

/// A bank account with its account type and currency resolved.
///
/// `account_type` is only `None` if the row was removed behind the engine's
/// back; the schema does not allow it otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankAccountDetail {
    pub account: BankAccount,
    pub account_type: Option<AccountType>,
    pub currency: Option<Currency>,
}

pub(super) async fn find_bank_account(
    db: &impl ConnectionTrait,
    id: i32,
) -> ResultEngine<BankAccount> {
    bank_accounts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(NOT_FOUND))
}

async fn ensure_account_type(db: &impl ConnectionTrait, id: i32) -> ResultEngine<()> {
    account_types::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(ACCOUNT_TYPE_NOT_FOUND))?;
    Ok(())
}

async fn detail(db: &impl ConnectionTrait, account: BankAccount) -> ResultEngine<BankAccountDetail> {
    let account_type = account_types::Entity::find_by_id(account.account_type_id)
        .one(db)
        .await?;
    let currency = match account.currency_id {
        Some(currency_id) => currencies::Entity::find_by_id(currency_id).one(db).await?,
        None => None,
    };
    Ok(BankAccountDetail {
        account,
        account_type,
        currency,
    })
}

impl Engine {
    /// All bank accounts with their type and currency.
    ///
    /// Account types and currencies are fetched with `find_also_related`, so
    /// the list costs two queries regardless of its length.
    pub async fn list_bank_accounts(&self) -> ResultEngine<Vec<BankAccountDetail>> {
        with_tx!(self, |db_tx| {
            let rows = bank_accounts::Entity::find()
                .order_by_asc(bank_accounts::Column::Id)
                .find_also_related(account_types::Entity)
                .all(&db_tx)
                .await?;

            let currency_ids: Vec<i32> = rows
                .iter()
                .filter_map(|(account, _)| account.currency_id)
                .collect();
            let currencies = currencies::Entity::find()
                .filter(currencies::Column::Id.is_in(currency_ids))
                .all(&db_tx)
                .await?;

            let details = rows
                .into_iter()
                .map(|(account, account_type)| {
                    let currency = account
                        .currency_id
                        .and_then(|id| currencies.iter().find(|c| c.id == id).cloned());
                    BankAccountDetail {
                        account,
                        account_type,
                        currency,
                    }
                })
                .collect();
            Ok(details)
        })
    }

    pub async fn bank_account(&self, id: i32) -> ResultEngine<BankAccountDetail> {
        with_tx!(self, |db_tx| {
            let account = find_bank_account(&db_tx, id).await?;
            detail(&db_tx, account).await
        })
    }

    pub async fn create_bank_account(&self, new: BankAccountNew) -> ResultEngine<i32> {
        let name = require_text(&new.name, FIELDS_REQUIRED)?;
        with_tx!(self, |db_tx| {
            ensure_account_type(&db_tx, new.account_type_id).await?;
            if let Some(currency_id) = new.currency_id {
                find_currency(&db_tx, currency_id).await?;
            }

            let model = bank_accounts::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                account_type_id: ActiveValue::Set(new.account_type_id),
                initial_balance: ActiveValue::Set(new.initial_balance.map(i64::from)),
                initial_balance_date: ActiveValue::Set(new.initial_balance_date),
                currency_id: ActiveValue::Set(new.currency_id),
                credit_limit: ActiveValue::Set(new.credit_limit.map(i64::from)),
                liquidity: ActiveValue::Set(new.liquidity),
                closing_day: ActiveValue::Set(new.closing_day),
                debit_day: ActiveValue::Set(new.debit_day),
                ignore_balance: ActiveValue::Set(new.ignore_balance),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_bank_account(&self, id: i32, patch: BankAccountPatch) -> ResultEngine<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_text(n, FIELDS_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: bank_accounts::ActiveModel =
                find_bank_account(&db_tx, id).await?.into();

            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(account_type_id) = patch.account_type_id {
                ensure_account_type(&db_tx, account_type_id).await?;
                active.account_type_id = ActiveValue::Set(account_type_id);
            }
            if let Some(currency_id) = patch.currency_id {
                find_currency(&db_tx, currency_id).await?;
                active.currency_id = ActiveValue::Set(Some(currency_id));
            }
            if let Some(balance) = patch.initial_balance {
                active.initial_balance = ActiveValue::Set(Some(balance.cents()));
            }
            if let Some(date) = patch.initial_balance_date {
                active.initial_balance_date = ActiveValue::Set(Some(date));
            }
            if let Some(limit) = patch.credit_limit {
                active.credit_limit = ActiveValue::Set(Some(limit.cents()));
            }
            if let Some(liquidity) = patch.liquidity {
                active.liquidity = ActiveValue::Set(liquidity);
            }
            if let Some(day) = patch.closing_day {
                active.closing_day = ActiveValue::Set(Some(day));
            }
            if let Some(day) = patch.debit_day {
                active.debit_day = ActiveValue::Set(Some(day));
            }
            if let Some(ignore) = patch.ignore_balance {
                active.ignore_balance = ActiveValue::Set(ignore);
            }

            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a bank account. Refused while transactions are posted to it.
    pub async fn delete_bank_account(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_bank_account(&db_tx, id).await?;
            let used_by = transactions::Entity::find()
                .filter(transactions::Column::AccountId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(used_by, "Conta possui lançamentos vinculados")?;

            bank_accounts::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
