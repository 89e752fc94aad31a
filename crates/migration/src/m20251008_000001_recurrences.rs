//! Recurring transactions.
//!
//! Two independent tables: `recurrence_rules` describe how often an existing
//! transaction repeats, `recurring_templates` hold a standalone transaction
//! blueprint. Nothing posts transactions from either of them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
}

#[derive(Iden)]
enum RecurrenceRules {
    Table,
    Id,
    TransactionId,
    Description,
    Frequency,
    StartDate,
    EndDate,
    Status,
    LastPostedDate,
    BusinessDays,
}

#[derive(Iden)]
enum RecurringTemplates {
    Table,
    Id,
    PostingDate,
    Description,
    AccountId,
    Amount,
    TypeId,
    CategoryId,
    StatementId,
    LeadTime,
    Validated,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecurrenceRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecurrenceRules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecurrenceRules::TransactionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurrenceRules::Description).string())
                    .col(
                        ColumnDef::new(RecurrenceRules::Frequency)
                            .string_len(45)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurrenceRules::StartDate).date().not_null())
                    .col(ColumnDef::new(RecurrenceRules::EndDate).date())
                    .col(
                        ColumnDef::new(RecurrenceRules::Status)
                            .string_len(20)
                            .not_null()
                            .default("Ativo"),
                    )
                    .col(ColumnDef::new(RecurrenceRules::LastPostedDate).date())
                    .col(
                        ColumnDef::new(RecurrenceRules::BusinessDays)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recurrence_rules-transaction_id")
                            .from(RecurrenceRules::Table, RecurrenceRules::TransactionId)
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecurringTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecurringTemplates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecurringTemplates::PostingDate).date())
                    .col(
                        ColumnDef::new(RecurringTemplates::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTemplates::AccountId).integer())
                    .col(
                        ColumnDef::new(RecurringTemplates::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTemplates::TypeId).integer().not_null())
                    .col(
                        ColumnDef::new(RecurringTemplates::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RecurringTemplates::StatementId).integer())
                    .col(ColumnDef::new(RecurringTemplates::LeadTime).integer())
                    .col(
                        ColumnDef::new(RecurringTemplates::Validated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecurringTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecurrenceRules::Table).to_owned())
            .await?;
        Ok(())
    }
}
