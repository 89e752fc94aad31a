//! Initial schema migration - creates the bookkeeping tables.
//!
//! - `account_types`, `transaction_types`: lookup tables
//! - `categories` / `subcategories`: two-level classification of transactions
//! - `currencies`: currency registry (exchange rate stored, never applied)
//! - `bank_accounts`: places where money is kept
//! - `cards` / `card_statements`: credit cards and their billing periods
//! - `projects`: optional grouping referenced loosely by transactions
//! - `transactions`: the central fact table
//! - `login_accounts`: reserved for a future login feature, no API uses it
//!
//! Monetary columns hold integer cents. Every foreign key is `RESTRICT` on
//! delete; the engine refuses deletes with dependents before the store does.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum AccountTypes {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum TransactionTypes {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Class,
}

#[derive(Iden)]
enum Subcategories {
    Table,
    Id,
    Name,
    Class,
    CategoryId,
}

#[derive(Iden)]
enum Currencies {
    Table,
    Id,
    Name,
    Symbol,
    ExchangeRate,
}

#[derive(Iden)]
enum BankAccounts {
    Table,
    Id,
    Name,
    AccountTypeId,
    InitialBalance,
    InitialBalanceDate,
    CurrencyId,
    CreditLimit,
    Liquidity,
    ClosingDay,
    DebitDay,
    IgnoreBalance,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    Name,
    LastDigits,
    LinkedAccount,
    Kind,
}

#[derive(Iden)]
enum CardStatements {
    Table,
    Id,
    CardId,
    DueDate,
    ClosingDate,
    Closed,
    Amount,
    MonthYear,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    Color,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    PostingDate,
    Description,
    AccountId,
    Amount,
    TypeId,
    TransferId,
    SubcategoryId,
    Installment,
    StatementId,
    CardId,
    RecurrenceId,
    ProjectId,
    EffectiveDate,
    Effective,
    Validated,
}

#[derive(Iden)]
enum LoginAccounts {
    Table,
    Id,
    Name,
    Email,
    AccessLevel,
    AccessString,
    Password,
}

fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn restrict_fk(
    name: &str,
    from: (impl IntoIden + 'static, impl IntoIden + 'static),
    to: (impl IntoIden + 'static, impl IntoIden + 'static),
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(ForeignKeyAction::Restrict)
        .on_update(ForeignKeyAction::NoAction)
        .to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Lookup tables
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(AccountTypes::Table)
                    .if_not_exists()
                    .col(&mut id_column(AccountTypes::Id))
                    .col(ColumnDef::new(AccountTypes::Name).string_len(45).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionTypes::Table)
                    .if_not_exists()
                    .col(&mut id_column(TransactionTypes::Id))
                    .col(
                        ColumnDef::new(TransactionTypes::Name)
                            .string_len(45)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(&mut id_column(Categories::Id))
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Class).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subcategories::Table)
                    .if_not_exists()
                    .col(&mut id_column(Subcategories::Id))
                    .col(ColumnDef::new(Subcategories::Name).string().not_null())
                    .col(ColumnDef::new(Subcategories::Class).integer())
                    .col(
                        ColumnDef::new(Subcategories::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(&mut restrict_fk(
                        "fk-subcategories-category_id",
                        (Subcategories::Table, Subcategories::CategoryId),
                        (Categories::Table, Categories::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-subcategories-category_id")
                    .table(Subcategories::Table)
                    .col(Subcategories::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Currencies and bank accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(&mut id_column(Currencies::Id))
                    .col(ColumnDef::new(Currencies::Name).string_len(45).not_null())
                    .col(ColumnDef::new(Currencies::Symbol).string_len(10).not_null())
                    .col(ColumnDef::new(Currencies::ExchangeRate).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(&mut id_column(BankAccounts::Id))
                    .col(ColumnDef::new(BankAccounts::Name).string().not_null())
                    .col(
                        ColumnDef::new(BankAccounts::AccountTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BankAccounts::InitialBalance).big_integer())
                    .col(ColumnDef::new(BankAccounts::InitialBalanceDate).date())
                    .col(ColumnDef::new(BankAccounts::CurrencyId).integer())
                    .col(ColumnDef::new(BankAccounts::CreditLimit).big_integer())
                    .col(
                        ColumnDef::new(BankAccounts::Liquidity)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(BankAccounts::ClosingDay).integer())
                    .col(ColumnDef::new(BankAccounts::DebitDay).integer())
                    .col(
                        ColumnDef::new(BankAccounts::IgnoreBalance)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(&mut restrict_fk(
                        "fk-bank_accounts-account_type_id",
                        (BankAccounts::Table, BankAccounts::AccountTypeId),
                        (AccountTypes::Table, AccountTypes::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-bank_accounts-currency_id",
                        (BankAccounts::Table, BankAccounts::CurrencyId),
                        (Currencies::Table, Currencies::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Cards and statements
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(&mut id_column(Cards::Id))
                    .col(ColumnDef::new(Cards::Name).string().not_null())
                    .col(ColumnDef::new(Cards::LastDigits).string_len(4).not_null())
                    .col(
                        ColumnDef::new(Cards::LinkedAccount)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cards::Kind).string_len(45).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CardStatements::Table)
                    .if_not_exists()
                    .col(&mut id_column(CardStatements::Id))
                    .col(ColumnDef::new(CardStatements::CardId).integer().not_null())
                    .col(ColumnDef::new(CardStatements::DueDate).date().not_null())
                    .col(ColumnDef::new(CardStatements::ClosingDate).date().not_null())
                    .col(
                        ColumnDef::new(CardStatements::Closed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CardStatements::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CardStatements::MonthYear).string_len(7))
                    .foreign_key(&mut restrict_fk(
                        "fk-card_statements-card_id",
                        (CardStatements::Table, CardStatements::CardId),
                        (Cards::Table, Cards::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-card_statements-card_id")
                    .table(CardStatements::Table)
                    .col(CardStatements::CardId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Projects
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(&mut id_column(Projects::Id))
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::StartDate).date())
                    .col(ColumnDef::new(Projects::EndDate).date())
                    .col(ColumnDef::new(Projects::Color).string_len(20))
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(&mut id_column(Transactions::Id))
                    .col(ColumnDef::new(Transactions::PostingDate).date().not_null())
                    .col(ColumnDef::new(Transactions::Description).string().not_null())
                    .col(ColumnDef::new(Transactions::AccountId).integer().not_null())
                    .col(ColumnDef::new(Transactions::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::TypeId).integer().not_null())
                    .col(ColumnDef::new(Transactions::TransferId).integer())
                    .col(
                        ColumnDef::new(Transactions::SubcategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Installment).integer())
                    .col(ColumnDef::new(Transactions::StatementId).integer())
                    .col(ColumnDef::new(Transactions::CardId).integer())
                    .col(ColumnDef::new(Transactions::RecurrenceId).integer())
                    .col(ColumnDef::new(Transactions::ProjectId).integer())
                    .col(ColumnDef::new(Transactions::EffectiveDate).date())
                    .col(
                        ColumnDef::new(Transactions::Effective)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Transactions::Validated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(&mut restrict_fk(
                        "fk-transactions-account_id",
                        (Transactions::Table, Transactions::AccountId),
                        (BankAccounts::Table, BankAccounts::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-transactions-type_id",
                        (Transactions::Table, Transactions::TypeId),
                        (TransactionTypes::Table, TransactionTypes::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-transactions-transfer_id",
                        (Transactions::Table, Transactions::TransferId),
                        (Transactions::Table, Transactions::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-transactions-subcategory_id",
                        (Transactions::Table, Transactions::SubcategoryId),
                        (Subcategories::Table, Subcategories::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-transactions-statement_id",
                        (Transactions::Table, Transactions::StatementId),
                        (CardStatements::Table, CardStatements::Id),
                    ))
                    .foreign_key(&mut restrict_fk(
                        "fk-transactions-card_id",
                        (Transactions::Table, Transactions::CardId),
                        (Cards::Table, Cards::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-account_id")
                    .table(Transactions::Table)
                    .col(Transactions::AccountId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-subcategory_id")
                    .table(Transactions::Table)
                    .col(Transactions::SubcategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Login accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(LoginAccounts::Table)
                    .if_not_exists()
                    .col(&mut id_column(LoginAccounts::Id))
                    .col(ColumnDef::new(LoginAccounts::Name).string().not_null())
                    .col(ColumnDef::new(LoginAccounts::Email).string().not_null())
                    .col(ColumnDef::new(LoginAccounts::AccessLevel).integer())
                    .col(ColumnDef::new(LoginAccounts::AccessString).string())
                    .col(ColumnDef::new(LoginAccounts::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(LoginAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CardStatements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subcategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}
