use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{Currency, CurrencyNew, CurrencyPatch, ResultEngine, bank_accounts, currencies};

use super::{Engine, ensure_no_dependents, not_found, require_text, with_tx};

const NOT_FOUND: &str = "Moeda não encontrada";
const FIELDS_REQUIRED: &str = "O nome e o símbolo da moeda são obrigatórios";

pub(super) async fn find_currency(db: &impl ConnectionTrait, id: i32) -> ResultEngine<Currency> {
    currencies::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(NOT_FOUND))
}

impl Engine {
    pub async fn list_currencies(&self) -> ResultEngine<Vec<Currency>> {
        with_tx!(self, |db_tx| {
            let currencies = currencies::Entity::find()
                .order_by_asc(currencies::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(currencies)
        })
    }

    pub async fn currency(&self, id: i32) -> ResultEngine<Currency> {
        with_tx!(self, |db_tx| find_currency(&db_tx, id).await)
    }

    pub async fn create_currency(&self, new: CurrencyNew) -> ResultEngine<i32> {
        let name = require_text(&new.name, FIELDS_REQUIRED)?;
        let symbol = require_text(&new.symbol, FIELDS_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let model = currencies::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                symbol: ActiveValue::Set(symbol),
                exchange_rate: ActiveValue::Set(new.exchange_rate.map(|r| r.raw())),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_currency(&self, id: i32, patch: CurrencyPatch) -> ResultEngine<()> {
        let name = patch
            .name
            .as_deref()
            .map(|n| require_text(n, FIELDS_REQUIRED))
            .transpose()?;
        let symbol = patch
            .symbol
            .as_deref()
            .map(|s| require_text(s, FIELDS_REQUIRED))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: currencies::ActiveModel = find_currency(&db_tx, id).await?.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(symbol) = symbol {
                active.symbol = ActiveValue::Set(symbol);
            }
            if let Some(rate) = patch.exchange_rate {
                active.exchange_rate = ActiveValue::Set(Some(rate.raw()));
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a currency. Refused while bank accounts are denominated in it.
    pub async fn delete_currency(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_currency(&db_tx, id).await?;
            let accounts = bank_accounts::Entity::find()
                .filter(bank_accounts::Column::CurrencyId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(accounts, "Moeda possui contas bancárias vinculadas")?;

            currencies::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
