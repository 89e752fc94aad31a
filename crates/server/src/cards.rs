//! Cards and card statements API endpoints.

use api_types::{
    Created, Message,
    card::{CardPayload, CardStatementPayload, CardStatementView, CardView, StatementRef},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{CardNew, CardPatch, CardStatementNew, CardStatementPatch};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::{parse_amount, parse_date, parse_optional_amount, parse_optional_date, required},
};

const STATEMENT_FIELDS_REQUIRED: &str = "Dados de fatura incompletos";

fn map_statement_ref(statement: engine::CardStatement) -> StatementRef {
    StatementRef {
        id: statement.id,
        vencimento: statement.due_date.to_string(),
    }
}

fn map_card(detail: engine::CardWithStatements) -> CardView {
    CardView {
        id: detail.card.id,
        nome: detail.card.name,
        last_digits: detail.card.last_digits,
        tipo: detail.card.kind,
        conta_vinculada: detail.card.linked_account,
        faturas: detail
            .statements
            .into_iter()
            .map(map_statement_ref)
            .collect(),
    }
}

fn map_statement(statement: engine::CardStatement) -> CardStatementView {
    CardStatementView {
        id: statement.id,
        cartao_id: statement.card_id,
        vencimento: statement.due_date.to_string(),
        fechamento: statement.closing_date.to_string(),
        valor: statement.amount().to_string(),
        fechada: statement.closed,
        mes_ano: statement.month_year,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CardView>>, ServerError> {
    let cards = state
        .engine
        .list_cards()
        .await?
        .into_iter()
        .map(map_card)
        .collect();
    Ok(Json(cards))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CardPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let new = CardNew {
        name: payload.name.unwrap_or_default(),
        last_digits: payload.last_digits.unwrap_or_default(),
        kind: payload.kind.unwrap_or_default(),
        linked_account: payload.linked_account.unwrap_or(false),
    };
    let id = state.engine.create_card(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Cartão criado com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<CardView>, ServerError> {
    let card = state.engine.card(id).await?;
    Ok(Json(map_card(card)))
}

pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<CardPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = CardPatch {
        name: payload.name,
        last_digits: payload.last_digits,
        kind: payload.kind,
        linked_account: payload.linked_account,
    };
    state.engine.update_card(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Cartão atualizado com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_card(id).await?;
    Ok(Json(Message {
        mensagem: "Cartão deletado com sucesso!".to_string(),
    }))
}

/// `GET /cartoes/{id}/faturas`
pub async fn list_statements(
    State(state): State<ServerState>,
    IdPath(card_id): IdPath<i32>,
) -> Result<Json<Vec<StatementRef>>, ServerError> {
    let statements = state
        .engine
        .card_statements(card_id)
        .await?
        .into_iter()
        .map(map_statement_ref)
        .collect();
    Ok(Json(statements))
}

/// `POST /cartoes/{id}/faturas`
pub async fn create_statement(
    State(state): State<ServerState>,
    IdPath(card_id): IdPath<i32>,
    AppJson(payload): AppJson<CardStatementPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let due_date = required(payload.due_date, STATEMENT_FIELDS_REQUIRED)?;
    let closing_date = required(payload.closing_date, STATEMENT_FIELDS_REQUIRED)?;
    let amount = required(payload.amount, STATEMENT_FIELDS_REQUIRED)?;

    let new = CardStatementNew {
        due_date: parse_date(&due_date)?,
        closing_date: parse_date(&closing_date)?,
        amount: parse_amount(&amount)?,
        closed: payload.closed.unwrap_or(false),
        month_year: payload.month_year,
    };
    let id = state.engine.create_card_statement(card_id, new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Fatura criada com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get_statement(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<CardStatementView>, ServerError> {
    let statement = state.engine.card_statement(id).await?;
    Ok(Json(map_statement(statement)))
}

pub async fn update_statement(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<CardStatementPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = CardStatementPatch {
        due_date: parse_optional_date(payload.due_date.as_deref())?,
        closing_date: parse_optional_date(payload.closing_date.as_deref())?,
        amount: parse_optional_amount(payload.amount.as_ref())?,
        closed: payload.closed,
        month_year: payload.month_year,
    };
    state.engine.update_card_statement(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Fatura atualizada com sucesso!".to_string(),
    }))
}

pub async fn delete_statement(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_card_statement(id).await?;
    Ok(Json(Message {
        mensagem: "Fatura deletada com sucesso!".to_string(),
    }))
}
