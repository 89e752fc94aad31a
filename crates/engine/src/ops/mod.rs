use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod account_types;
mod bank_accounts;
mod cards;
mod categories;
mod currencies;
mod projects;
mod recurrences;
mod transaction_types;
mod transactions;

pub use bank_accounts::BankAccountDetail;
pub use cards::CardWithStatements;
pub use categories::CategoryWithSubcategories;
pub use transactions::TransactionDetail;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Repository over the FinOrg schema.
///
/// Cheap to share behind an `Arc`: it only holds the connection pool.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Reject a blank `value` with `message`. The text is stored as sent.
fn require_text(value: &str, message: &str) -> ResultEngine<String> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidField(message.to_string()));
    }
    Ok(value.to_string())
}

fn not_found(message: &str) -> EngineError {
    EngineError::KeyNotFound(message.to_string())
}

/// Fail with [`EngineError::InUse`] when `dependents` is not zero.
fn ensure_no_dependents(dependents: u64, message: &str) -> ResultEngine<()> {
    if dependents > 0 {
        return Err(EngineError::InUse(message.to_string()));
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
