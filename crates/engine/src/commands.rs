//! Command structs for engine write operations.
//!
//! `*New` types carry everything needed to insert a row; the HTTP layer has
//! already checked that required values are present. `*Patch` types follow
//! merge-patch semantics: `None` keeps the stored value.

use chrono::NaiveDate;

use crate::{ExchangeRate, MoneyCents};

#[derive(Clone, Debug)]
pub struct CategoryNew {
    pub name: String,
    pub class: i32,
}

#[derive(Clone, Debug, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub class: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct SubcategoryNew {
    pub name: String,
    pub class: Option<i32>,
}

#[derive(Clone, Debug, Default)]
pub struct SubcategoryPatch {
    pub name: Option<String>,
    pub class: Option<i32>,
    /// Moves the subcategory under another category.
    pub category_id: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct CurrencyNew {
    pub name: String,
    pub symbol: String,
    pub exchange_rate: Option<ExchangeRate>,
}

#[derive(Clone, Debug, Default)]
pub struct CurrencyPatch {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub exchange_rate: Option<ExchangeRate>,
}

/// Create a bank account.
#[derive(Clone, Debug)]
pub struct BankAccountNew {
    pub name: String,
    pub account_type_id: i32,
    pub initial_balance: Option<MoneyCents>,
    pub initial_balance_date: Option<NaiveDate>,
    pub currency_id: Option<i32>,
    pub credit_limit: Option<MoneyCents>,
    pub liquidity: bool,
    pub closing_day: Option<i32>,
    pub debit_day: Option<i32>,
    pub ignore_balance: bool,
}

impl BankAccountNew {
    #[must_use]
    pub fn new(name: impl Into<String>, account_type_id: i32) -> Self {
        Self {
            name: name.into(),
            account_type_id,
            initial_balance: None,
            initial_balance_date: None,
            currency_id: None,
            credit_limit: None,
            liquidity: false,
            closing_day: None,
            debit_day: None,
            ignore_balance: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BankAccountPatch {
    pub name: Option<String>,
    pub account_type_id: Option<i32>,
    pub initial_balance: Option<MoneyCents>,
    pub initial_balance_date: Option<NaiveDate>,
    pub currency_id: Option<i32>,
    pub credit_limit: Option<MoneyCents>,
    pub liquidity: Option<bool>,
    pub closing_day: Option<i32>,
    pub debit_day: Option<i32>,
    pub ignore_balance: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct CardNew {
    pub name: String,
    pub last_digits: String,
    pub kind: String,
    pub linked_account: bool,
}

#[derive(Clone, Debug, Default)]
pub struct CardPatch {
    pub name: Option<String>,
    pub last_digits: Option<String>,
    pub kind: Option<String>,
    pub linked_account: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct CardStatementNew {
    pub due_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub amount: MoneyCents,
    pub closed: bool,
    pub month_year: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CardStatementPatch {
    pub due_date: Option<NaiveDate>,
    pub closing_date: Option<NaiveDate>,
    pub amount: Option<MoneyCents>,
    pub closed: Option<bool>,
    pub month_year: Option<String>,
}

/// Create a transaction.
///
/// The first six fields are mandatory; the rest are optional links and
/// flags and can be set with the builder methods.
#[derive(Clone, Debug)]
pub struct TransactionNew {
    pub posting_date: NaiveDate,
    pub description: String,
    pub account_id: i32,
    pub amount: MoneyCents,
    pub type_id: i32,
    pub subcategory_id: i32,
    pub transfer_id: Option<i32>,
    pub installment: Option<i32>,
    pub statement_id: Option<i32>,
    pub card_id: Option<i32>,
    pub recurrence_id: Option<i32>,
    pub project_id: Option<i32>,
    pub effective_date: Option<NaiveDate>,
    pub effective: bool,
    pub validated: bool,
}

impl TransactionNew {
    #[must_use]
    pub fn new(
        posting_date: NaiveDate,
        description: impl Into<String>,
        account_id: i32,
        amount: MoneyCents,
        type_id: i32,
        subcategory_id: i32,
    ) -> Self {
        Self {
            posting_date,
            description: description.into(),
            account_id,
            amount,
            type_id,
            subcategory_id,
            transfer_id: None,
            installment: None,
            statement_id: None,
            card_id: None,
            recurrence_id: None,
            project_id: None,
            effective_date: None,
            effective: false,
            validated: false,
        }
    }

    #[must_use]
    pub fn card(mut self, card_id: i32, statement_id: Option<i32>) -> Self {
        self.card_id = Some(card_id);
        self.statement_id = statement_id;
        self
    }

    #[must_use]
    pub fn transfer_of(mut self, transaction_id: i32) -> Self {
        self.transfer_id = Some(transaction_id);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub posting_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub account_id: Option<i32>,
    pub amount: Option<MoneyCents>,
    pub type_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub transfer_id: Option<i32>,
    pub installment: Option<i32>,
    pub statement_id: Option<i32>,
    pub card_id: Option<i32>,
    pub recurrence_id: Option<i32>,
    pub project_id: Option<i32>,
    pub effective_date: Option<NaiveDate>,
    pub effective: Option<bool>,
    pub validated: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct RecurrenceRuleNew {
    pub transaction_id: i32,
    pub frequency: String,
    pub start_date: NaiveDate,
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
    /// Defaults to `"Ativo"`.
    pub status: Option<String>,
    pub last_posted_date: Option<NaiveDate>,
    pub business_days: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RecurrenceRulePatch {
    pub transaction_id: Option<i32>,
    pub frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub last_posted_date: Option<NaiveDate>,
    pub business_days: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct RecurringTemplateNew {
    pub description: String,
    pub amount: MoneyCents,
    pub type_id: i32,
    pub category_id: i32,
    pub posting_date: Option<NaiveDate>,
    pub account_id: Option<i32>,
    pub statement_id: Option<i32>,
    pub lead_time: Option<i32>,
    pub validated: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RecurringTemplatePatch {
    pub description: Option<String>,
    pub amount: Option<MoneyCents>,
    pub type_id: Option<i32>,
    pub category_id: Option<i32>,
    pub posting_date: Option<NaiveDate>,
    pub account_id: Option<i32>,
    pub statement_id: Option<i32>,
    pub lead_time: Option<i32>,
    pub validated: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ProjectNew {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub color: Option<String>,
}
