//! Recurring transaction templates.
//!
//! A template is a standalone blueprint for a repeating transaction. The ids
//! it stores (account, type, category, statement) are plain values without
//! foreign keys.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recurring_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub posting_date: Option<NaiveDate>,
    pub description: String,
    pub account_id: Option<i32>,
    pub amount: i64,
    pub type_id: i32,
    pub category_id: i32,
    pub statement_id: Option<i32>,
    /// Days in advance the transaction should be announced.
    pub lead_time: Option<i32>,
    pub validated: bool,
}

impl Model {
    pub fn amount(&self) -> MoneyCents {
        MoneyCents::new(self.amount)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
