//! Transactions ("lançamentos"): the central fact table.
//!
//! A transaction is a single dated monetary movement against a bank account,
//! classified by a subcategory and a transaction type. Card purchases also
//! point at the card and the statement they belong to.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub posting_date: NaiveDate,
    pub description: String,
    pub account_id: i32,
    /// Signed amount in cents.
    pub amount: i64,
    pub type_id: i32,
    /// Counterpart transaction when this one is half of a transfer.
    pub transfer_id: Option<i32>,
    pub subcategory_id: i32,
    pub installment: Option<i32>,
    pub statement_id: Option<i32>,
    pub card_id: Option<i32>,
    pub recurrence_id: Option<i32>,
    pub project_id: Option<i32>,
    pub effective_date: Option<NaiveDate>,
    pub effective: bool,
    pub validated: bool,
}

impl Model {
    pub fn amount(&self) -> MoneyCents {
        MoneyCents::new(self.amount)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_accounts::Entity",
        from = "Column::AccountId",
        to = "super::bank_accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::transaction_types::Entity",
        from = "Column::TypeId",
        to = "super::transaction_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Type,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::TransferId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Transfer,
    #[sea_orm(
        belongs_to = "super::subcategories::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Subcategory,
    #[sea_orm(
        belongs_to = "super::card_statements::Entity",
        from = "Column::StatementId",
        to = "super::card_statements::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Statement,
    #[sea_orm(
        belongs_to = "super::cards::Entity",
        from = "Column::CardId",
        to = "super::cards::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Card,
}

impl Related<super::bank_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::transaction_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Type.def()
    }
}

impl Related<super::subcategories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl Related<super::card_statements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statement.def()
    }
}

impl Related<super::cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
