use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    BankAccount, Category, ResultEngine, Subcategory, Transaction, TransactionNew,
    TransactionPatch, bank_accounts, categories, recurrence_rules, subcategories, transactions,
};

use super::{
    Engine,
    bank_accounts::find_bank_account,
    cards::{find_card, find_statement},
    categories::find_subcategory,
    ensure_no_dependents, not_found, require_text,
    transaction_types::find_transaction_type,
    with_tx,
};

const NOT_FOUND: &str = "Lançamento não encontrado";
const FIELDS_REQUIRED: &str = "Dados incompletos";

/// A transaction with the rows it points at for display.
///
/// `category` is the parent of `subcategory`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub account: Option<BankAccount>,
    pub subcategory: Option<Subcategory>,
    pub category: Option<Category>,
}

pub(super) async fn find_transaction(
    db: &impl ConnectionTrait,
    id: i32,
) -> ResultEngine<Transaction> {
    transactions::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(NOT_FOUND))
}

/// Resolve accounts, subcategories and categories for `rows` with one query
/// per table.
async fn details(
    db: &impl ConnectionTrait,
    rows: Vec<Transaction>,
) -> ResultEngine<Vec<TransactionDetail>> {
    let account_ids: Vec<i32> = rows.iter().map(|t| t.account_id).collect();
    let subcategory_ids: Vec<i32> = rows.iter().map(|t| t.subcategory_id).collect();

    let accounts: HashMap<i32, BankAccount> = bank_accounts::Entity::find()
        .filter(bank_accounts::Column::Id.is_in(account_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let subcategories: HashMap<i32, Subcategory> = subcategories::Entity::find()
        .filter(subcategories::Column::Id.is_in(subcategory_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let category_ids: Vec<i32> = subcategories.values().map(|s| s.category_id).collect();
    let categories: HashMap<i32, Category> = categories::Entity::find()
        .filter(categories::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(rows
        .into_iter()
        .map(|transaction| {
            let subcategory = subcategories.get(&transaction.subcategory_id).cloned();
            let category = subcategory
                .as_ref()
                .and_then(|s| categories.get(&s.category_id))
                .cloned();
            TransactionDetail {
                account: accounts.get(&transaction.account_id).cloned(),
                subcategory,
                category,
                transaction,
            }
        })
        .collect())
}

/// Optional links shared by create and update.
struct Links {
    statement_id: Option<i32>,
    card_id: Option<i32>,
    transfer_id: Option<i32>,
}

async fn ensure_links(db: &impl ConnectionTrait, links: &Links) -> ResultEngine<()> {
    if let Some(statement_id) = links.statement_id {
        find_statement(db, statement_id).await?;
    }
    if let Some(card_id) = links.card_id {
        find_card(db, card_id).await?;
    }
    if let Some(transfer_id) = links.transfer_id {
        find_transaction(db, transfer_id).await?;
    }
    Ok(())
}

impl Engine {
    /// All transactions ordered by id, with account and classification.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<TransactionDetail>> {
        with_tx!(self, |db_tx| {
            let rows = transactions::Entity::find()
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;
            details(&db_tx, rows).await
        })
    }

    pub async fn transaction(&self, id: i32) -> ResultEngine<TransactionDetail> {
        with_tx!(self, |db_tx| {
            let transaction = find_transaction(&db_tx, id).await?;
            let mut found = details(&db_tx, vec![transaction]).await?;
            found.pop().ok_or_else(|| not_found(NOT_FOUND))
        })
    }

    /// Insert a transaction after checking every referenced row exists.
    pub async fn create_transaction(&self, new: TransactionNew) -> ResultEngine<i32> {
        let description = require_text(&new.description, FIELDS_REQUIRED)?;
        with_tx!(self, |db_tx| {
            find_bank_account(&db_tx, new.account_id).await?;
            find_transaction_type(&db_tx, new.type_id).await?;
            find_subcategory(&db_tx, new.subcategory_id).await?;
            ensure_links(
                &db_tx,
                &Links {
                    statement_id: new.statement_id,
                    card_id: new.card_id,
                    transfer_id: new.transfer_id,
                },
            )
            .await?;

            let model = transactions::ActiveModel {
                id: ActiveValue::NotSet,
                posting_date: ActiveValue::Set(new.posting_date),
                description: ActiveValue::Set(description),
                account_id: ActiveValue::Set(new.account_id),
                amount: ActiveValue::Set(new.amount.cents()),
                type_id: ActiveValue::Set(new.type_id),
                transfer_id: ActiveValue::Set(new.transfer_id),
                subcategory_id: ActiveValue::Set(new.subcategory_id),
                installment: ActiveValue::Set(new.installment),
                statement_id: ActiveValue::Set(new.statement_id),
                card_id: ActiveValue::Set(new.card_id),
                recurrence_id: ActiveValue::Set(new.recurrence_id),
                project_id: ActiveValue::Set(new.project_id),
                effective_date: ActiveValue::Set(new.effective_date),
                effective: ActiveValue::Set(new.effective),
                validated: ActiveValue::Set(new.validated),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_transaction(&self, id: i32, patch: TransactionPatch) -> ResultEngine<()> {
        let description = patch
            .description
            .as_deref()
            .map(|d| require_text(d, FIELDS_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: transactions::ActiveModel = find_transaction(&db_tx, id).await?.into();

            if let Some(account_id) = patch.account_id {
                find_bank_account(&db_tx, account_id).await?;
                active.account_id = ActiveValue::Set(account_id);
            }
            if let Some(type_id) = patch.type_id {
                find_transaction_type(&db_tx, type_id).await?;
                active.type_id = ActiveValue::Set(type_id);
            }
            if let Some(subcategory_id) = patch.subcategory_id {
                find_subcategory(&db_tx, subcategory_id).await?;
                active.subcategory_id = ActiveValue::Set(subcategory_id);
            }
            ensure_links(
                &db_tx,
                &Links {
                    statement_id: patch.statement_id,
                    card_id: patch.card_id,
                    transfer_id: patch.transfer_id,
                },
            )
            .await?;
            if let Some(statement_id) = patch.statement_id {
                active.statement_id = ActiveValue::Set(Some(statement_id));
            }
            if let Some(card_id) = patch.card_id {
                active.card_id = ActiveValue::Set(Some(card_id));
            }
            if let Some(transfer_id) = patch.transfer_id {
                active.transfer_id = ActiveValue::Set(Some(transfer_id));
            }

            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(posting_date) = patch.posting_date {
                active.posting_date = ActiveValue::Set(posting_date);
            }
            if let Some(amount) = patch.amount {
                active.amount = ActiveValue::Set(amount.cents());
            }
            if let Some(installment) = patch.installment {
                active.installment = ActiveValue::Set(Some(installment));
            }
            if let Some(recurrence_id) = patch.recurrence_id {
                active.recurrence_id = ActiveValue::Set(Some(recurrence_id));
            }
            if let Some(project_id) = patch.project_id {
                active.project_id = ActiveValue::Set(Some(project_id));
            }
            if let Some(effective_date) = patch.effective_date {
                active.effective_date = ActiveValue::Set(Some(effective_date));
            }
            if let Some(effective) = patch.effective {
                active.effective = ActiveValue::Set(effective);
            }
            if let Some(validated) = patch.validated {
                active.validated = ActiveValue::Set(validated);
            }

            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a transaction.
    ///
    /// Refused while a recurrence rule is built on it or another transaction
    /// points at it as its transfer counterpart.
    pub async fn delete_transaction(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_transaction(&db_tx, id).await?;

            let rules = recurrence_rules::Entity::find()
                .filter(recurrence_rules::Column::TransactionId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(rules, "Lançamento possui regras de recorrência vinculadas")?;

            let counterparts = transactions::Entity::find()
                .filter(transactions::Column::TransferId.eq(id))
                .filter(transactions::Column::Id.ne(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(counterparts, "Lançamento possui transferências vinculadas")?;

            transactions::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
