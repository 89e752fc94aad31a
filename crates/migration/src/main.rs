//! Schema tool for the FinOrg database.
//!
//! `cargo run -p migration -- [up|down|fresh|status]`, defaulting to `up`.
//! The target comes from `DATABASE_URI`, falling back to `./finorg.db`.
use std::str::FromStr;

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

const DEFAULT_DATABASE: &str = "sqlite:./finorg.db?mode=rwc";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "status" => Ok(Self::Status),
            other => Err(format!(
                "unknown command '{other}', expected one of: up, down, fresh, status"
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let command = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Command>()?,
        None => Command::Up,
    };
    let uri = std::env::var("DATABASE_URI").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
    let db = Database::connect(&uri).await?;

    match command {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, None).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!("up".parse::<Command>(), Ok(Command::Up));
        assert_eq!("status".parse::<Command>(), Ok(Command::Status));
        assert!("reset".parse::<Command>().is_err());
    }
}
