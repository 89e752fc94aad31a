//! Currency registry. Bank accounts may point at one of these.

use sea_orm::entity::prelude::*;

use crate::ExchangeRate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub symbol: String,
    /// Rate in ten-thousandths, see [`ExchangeRate`].
    pub exchange_rate: Option<i64>,
}

impl Model {
    pub fn rate(&self) -> Option<ExchangeRate> {
        self.exchange_rate.map(ExchangeRate::new)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bank_accounts::Entity")]
    BankAccounts,
}

impl Related<super::bank_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
