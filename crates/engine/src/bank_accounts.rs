//! Bank accounts.
//!
//! A bank account is anywhere money is kept: a checking account, a savings
//! account, a wallet. Its balance is a stored opening snapshot
//! (`initial_balance` at `initial_balance_date`), never derived from
//! transactions.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bank_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub account_type_id: i32,
    /// Opening balance in cents.
    pub initial_balance: Option<i64>,
    pub initial_balance_date: Option<NaiveDate>,
    pub currency_id: Option<i32>,
    /// Credit limit in cents.
    pub credit_limit: Option<i64>,
    pub liquidity: bool,
    /// Day of month the statement closes.
    pub closing_day: Option<i32>,
    /// Day of month the debit is expected.
    pub debit_day: Option<i32>,
    pub ignore_balance: bool,
}

impl Model {
    pub fn initial_balance(&self) -> Option<MoneyCents> {
        self.initial_balance.map(MoneyCents::new)
    }

    pub fn credit_limit(&self) -> Option<MoneyCents> {
        self.credit_limit.map(MoneyCents::new)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_types::Entity",
        from = "Column::AccountTypeId",
        to = "super::account_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    AccountType,
    #[sea_orm(
        belongs_to = "super::currencies::Entity",
        from = "Column::CurrencyId",
        to = "super::currencies::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Currency,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::account_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountType.def()
    }
}

impl Related<super::currencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Currency.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
