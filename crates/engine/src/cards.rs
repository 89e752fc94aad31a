use sea_orm::entity::prelude::*;

/// A credit or debit card. Statements hang off it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Last four digits, kept as text so leading zeros survive.
    pub last_digits: String,
    pub linked_account: bool,
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::card_statements::Entity")]
    Statements,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::card_statements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statements.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
