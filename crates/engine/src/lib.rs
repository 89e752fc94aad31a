//! Persistence layer for FinOrg.
//!
//! [`Engine`] owns the database connection and exposes one group of
//! operations per resource family (list/create/get/update/delete). Every
//! operation runs inside its own database transaction.

pub use account_types::Model as AccountType;
pub use bank_accounts::Model as BankAccount;
pub use card_statements::Model as CardStatement;
pub use cards::Model as Card;
pub use categories::Model as Category;
pub use commands::{
    BankAccountNew, BankAccountPatch, CardNew, CardPatch, CardStatementNew, CardStatementPatch,
    CategoryNew, CategoryPatch, CurrencyNew, CurrencyPatch, ProjectNew, ProjectPatch,
    RecurrenceRuleNew, RecurrenceRulePatch, RecurringTemplateNew, RecurringTemplatePatch,
    SubcategoryNew, SubcategoryPatch, TransactionNew, TransactionPatch,
};
pub use currencies::Model as Currency;
pub use error::EngineError;
pub use money::{ExchangeRate, MoneyCents};
pub use ops::{
    BankAccountDetail, CardWithStatements, CategoryWithSubcategories, Engine, EngineBuilder,
    TransactionDetail,
};
pub use projects::Model as Project;
pub use recurrence_rules::Model as RecurrenceRule;
pub use recurring_templates::Model as RecurringTemplate;
pub use subcategories::Model as Subcategory;
pub use transaction_types::Model as TransactionType;
pub use transactions::Model as Transaction;

mod account_types;
mod bank_accounts;
mod card_statements;
mod cards;
mod categories;
mod commands;
mod currencies;
mod error;
mod money;
mod ops;
mod projects;
mod recurrence_rules;
mod recurring_templates;
mod subcategories;
mod transaction_types;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
