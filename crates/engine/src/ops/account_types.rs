use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use crate::{AccountType, ResultEngine, account_types, bank_accounts};

use super::{Engine, ensure_no_dependents, not_found, require_text, with_tx};

const NOT_FOUND: &str = "Tipo de conta não encontrado";
const NAME_REQUIRED: &str = "O nome do tipo de conta é obrigatório";

impl Engine {
    /// All account types ordered by id.
    pub async fn list_account_types(&self) -> ResultEngine<Vec<AccountType>> {
        with_tx!(self, |db_tx| {
            let types = account_types::Entity::find()
                .order_by_asc(account_types::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(types)
        })
    }

    pub async fn account_type(&self, id: i32) -> ResultEngine<AccountType> {
        with_tx!(self, |db_tx| {
            account_types::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(NOT_FOUND))
        })
    }

    /// Insert a new account type and return its id.
    pub async fn create_account_type(&self, name: &str) -> ResultEngine<i32> {
        let name = require_text(name, NAME_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let model = account_types::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn rename_account_type(&self, id: i32, name: &str) -> ResultEngine<()> {
        let name = require_text(name, NAME_REQUIRED)?;
        with_tx!(self, |db_tx| {
            let model = account_types::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(NOT_FOUND))?;

            let mut active: account_types::ActiveModel = model.into();
            active.name = ActiveValue::Set(name);
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete an account type.
    ///
    /// Refused while any bank account still uses it.
    pub async fn delete_account_type(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            account_types::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(NOT_FOUND))?;

            let accounts = bank_accounts::Entity::find()
                .filter(bank_accounts::Column::AccountTypeId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(accounts, "Tipo de conta possui contas bancárias vinculadas")?;

            account_types::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
