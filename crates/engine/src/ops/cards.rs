use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    Card, CardNew, CardPatch, CardStatement, CardStatementNew, CardStatementPatch, ResultEngine,
    card_statements, cards, transactions,
};

use super::{Engine, ensure_no_dependents, not_found, require_text, with_tx};

const CARD_NOT_FOUND: &str = "Cartão não encontrado";
const CARD_FIELDS_REQUIRED: &str = "O nome, final e tipo do cartão são obrigatórios";
const STATEMENT_NOT_FOUND: &str = "Fatura não encontrada";

/// A card with its statements, ordered by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardWithStatements {
    pub card: Card,
    pub statements: Vec<CardStatement>,
}

pub(super) async fn find_card(db: &impl ConnectionTrait, id: i32) -> ResultEngine<Card> {
    cards::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(CARD_NOT_FOUND))
}

pub(super) async fn find_statement(
    db: &impl ConnectionTrait,
    id: i32,
) -> ResultEngine<CardStatement> {
    card_statements::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(STATEMENT_NOT_FOUND))
}

async fn statements_of(db: &impl ConnectionTrait, card_id: i32) -> ResultEngine<Vec<CardStatement>> {
    let statements = card_statements::Entity::find()
        .filter(card_statements::Column::CardId.eq(card_id))
        .order_by_asc(card_statements::Column::Id)
        .all(db)
        .await?;
    Ok(statements)
}

fn required(value: &str) -> ResultEngine<String> {
    require_text(value, CARD_FIELDS_REQUIRED)
}

impl Engine {
    pub async fn list_cards(&self) -> ResultEngine<Vec<CardWithStatements>> {
        with_tx!(self, |db_tx| {
            let rows = cards::Entity::find()
                .order_by_asc(cards::Column::Id)
                .find_with_related(card_statements::Entity)
                .all(&db_tx)
                .await?;
            let cards = rows
                .into_iter()
                .map(|(card, mut statements)| {
                    statements.sort_by_key(|s| s.id);
                    CardWithStatements { card, statements }
                })
                .collect();
            Ok(cards)
        })
    }

    pub async fn card(&self, id: i32) -> ResultEngine<CardWithStatements> {
        with_tx!(self, |db_tx| {
            let card = find_card(&db_tx, id).await?;
            let statements = statements_of(&db_tx, id).await?;
            Ok(CardWithStatements { card, statements })
        })
    }

    pub async fn create_card(&self, new: CardNew) -> ResultEngine<i32> {
        let name = required(&new.name)?;
        let last_digits = required(&new.last_digits)?;
        let kind = required(&new.kind)?;
        with_tx!(self, |db_tx| {
            let model = cards::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                last_digits: ActiveValue::Set(last_digits),
                linked_account: ActiveValue::Set(new.linked_account),
                kind: ActiveValue::Set(kind),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn update_card(&self, id: i32, patch: CardPatch) -> ResultEngine<()> {
        let name = patch.name.as_deref().map(required).transpose()?;
        let last_digits = patch.last_digits.as_deref().map(required).transpose()?;
        let kind = patch.kind.as_deref().map(required).transpose()?;
        with_tx!(self, |db_tx| {
            let mut active: cards::ActiveModel = find_card(&db_tx, id).await?.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(last_digits) = last_digits {
                active.last_digits = ActiveValue::Set(last_digits);
            }
            if let Some(kind) = kind {
                active.kind = ActiveValue::Set(kind);
            }
            if let Some(linked) = patch.linked_account {
                active.linked_account = ActiveValue::Set(linked);
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a card. Refused while it has statements or transactions.
    pub async fn delete_card(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_card(&db_tx, id).await?;
            let statements = card_statements::Entity::find()
                .filter(card_statements::Column::CardId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(statements, "Cartão possui faturas vinculadas")?;
            let used_by = transactions::Entity::find()
                .filter(transactions::Column::CardId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(used_by, "Cartão possui lançamentos vinculados")?;

            cards::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }

    /// Statements of `card_id`. Fails when the card is missing.
    pub async fn card_statements(&self, card_id: i32) -> ResultEngine<Vec<CardStatement>> {
        with_tx!(self, |db_tx| {
            find_card(&db_tx, card_id).await?;
            statements_of(&db_tx, card_id).await
        })
    }

    pub async fn create_card_statement(
        &self,
        card_id: i32,
        new: CardStatementNew,
    ) -> ResultEngine<i32> {
        with_tx!(self, |db_tx| {
            find_card(&db_tx, card_id).await?;
            let model = card_statements::ActiveModel {
                id: ActiveValue::NotSet,
                card_id: ActiveValue::Set(card_id),
                due_date: ActiveValue::Set(new.due_date),
                closing_date: ActiveValue::Set(new.closing_date),
                closed: ActiveValue::Set(new.closed),
                amount: ActiveValue::Set(new.amount.cents()),
                month_year: ActiveValue::Set(new.month_year),
            }
            .insert(&db_tx)
            .await?;
            Ok(model.id)
        })
    }

    pub async fn card_statement(&self, id: i32) -> ResultEngine<CardStatement> {
        with_tx!(self, |db_tx| find_statement(&db_tx, id).await)
    }

    pub async fn update_card_statement(
        &self,
        id: i32,
        patch: CardStatementPatch,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let mut active: card_statements::ActiveModel =
                find_statement(&db_tx, id).await?.into();
            if let Some(due_date) = patch.due_date {
                active.due_date = ActiveValue::Set(due_date);
            }
            if let Some(closing_date) = patch.closing_date {
                active.closing_date = ActiveValue::Set(closing_date);
            }
            if let Some(amount) = patch.amount {
                active.amount = ActiveValue::Set(amount.cents());
            }
            if let Some(closed) = patch.closed {
                active.closed = ActiveValue::Set(closed);
            }
            if let Some(month_year) = patch.month_year {
                active.month_year = ActiveValue::Set(Some(month_year));
            }
            if active.is_changed() {
                active.update(&db_tx).await?;
            }
            Ok(())
        })
    }

    /// Delete a statement. Refused while transactions are billed on it.
    pub async fn delete_card_statement(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            find_statement(&db_tx, id).await?;
            let used_by = transactions::Entity::find()
                .filter(transactions::Column::StatementId.eq(id))
                .count(&db_tx)
                .await?;
            ensure_no_dependents(used_by, "Fatura possui lançamentos vinculados")?;

            card_statements::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
