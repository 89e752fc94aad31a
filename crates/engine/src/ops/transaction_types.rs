use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{ResultEngine, TransactionType, transaction_types, transactions};

use super::{Engine, ensure_no_dependents, not_found, require_text, with_tx};

const NOT_FOUND: &str = "Tipo de lançamento não encontrado";
const NAME_REQUIRED: &str = "O nome do tipo de lançamento é obrigatório";

pub(super) async fn find_transaction_type(
    db: &impl ConnectionTrait,
    id: i32,
) -> ResultEngine<TransactionType> {
    transaction_types::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(NOT_FOUND))
}

impl Engine {
    pub async fn list_transaction_types(&self) -> ResultEngine<Vec<TransactionType>> {
        with_tx!(self, |db_tx| {
            let types = transaction_types::Entity::find()
                .order_by_asc(transaction_types::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(types)
        })
    }

    pub async fn transaction_type(&self, id: i32) -> ResultEngine<TransactionType> {
        with_tx!(self, |db_tx| find_transaction_type(&db_tx, id).await)
    }

    pub async fn create_transaction_type(&self, name: &str) -> ResultEngine<i32> {
        let name = require_text(name, NAME_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let model = transaction_types::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn rename_transaction_type(&self, id: i32, name: &str) -> ResultEngine<()> {
        let name = require_text(name, NAME_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let mut active: transaction_types::ActiveModel =
                find_transaction_type(&db_tx, id).await?.into();
            active.name = ActiveValue::Set(name);
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Delete a transaction type. Refused while transactions use it.
    pub async fn delete_transaction_type(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_transaction_type(&db_tx, id).await?;

            let used_by = transactions::Entity::find()
                .filter(transactions::Column::TypeId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(used_by, "Tipo de lançamento possui lançamentos vinculados")?;

            transaction_types::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
