//! Transactions API endpoints (`/lancamentos`).

use api_types::{
    Created, Message, NamedRef,
    transaction::{SubcategoryRef, TransactionPayload, TransactionView},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{TransactionNew, TransactionPatch};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::{
        parse_amount, parse_date, parse_optional_amount, parse_optional_date, required,
        required_text,
    },
};

const FIELDS_REQUIRED: &str = "Dados incompletos";

fn map_transaction(detail: engine::TransactionDetail) -> TransactionView {
    let transaction = detail.transaction;
    let category_name = detail.category.map(|c| c.name);
    TransactionView {
        id: transaction.id,
        tipo: transaction.type_id,
        data: transaction.posting_date.to_string(),
        valor: transaction.amount().to_string(),
        descricao: transaction.description,
        conta: detail.account.map(|a| NamedRef {
            id: a.id,
            nome: a.name,
        }),
        subcategoria: detail.subcategory.map(|s| SubcategoryRef {
            id: s.id,
            nome: s.name,
            categoria: category_name,
        }),
        transferencia: transaction.transfer_id,
        parcela: transaction.installment,
        fatura_id: transaction.statement_id,
        cartao_id: transaction.card_id,
        recorrencia_id: transaction.recurrence_id,
        projeto_id: transaction.project_id,
        data_efetivacao: transaction.effective_date.map(|d| d.to_string()),
        efetivado: transaction.effective,
        validado: transaction.validated,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions()
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();
    Ok(Json(transactions))
}

/// All six core fields must be present before the date is parsed.
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<TransactionPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let type_id = required(payload.type_id, FIELDS_REQUIRED)?;
    let description = required_text(payload.description, FIELDS_REQUIRED)?;
    let posting_date = required(payload.posting_date, FIELDS_REQUIRED)?;
    let amount = required(payload.amount, FIELDS_REQUIRED)?;
    let account_id = required(payload.account_id, FIELDS_REQUIRED)?;
    let subcategory_id = required(payload.subcategory_id, FIELDS_REQUIRED)?;

    let mut new = TransactionNew::new(
        parse_date(&posting_date)?,
        description,
        account_id,
        parse_amount(&amount)?,
        type_id,
        subcategory_id,
    );
    if let Some(card_id) = payload.card_id {
        new = new.card(card_id, payload.statement_id);
    } else {
        new.statement_id = payload.statement_id;
    }
    if let Some(transfer_id) = payload.transfer_id {
        new = new.transfer_of(transfer_id);
    }
    new.installment = payload.installment;
    new.recurrence_id = payload.recurrence_id;
    new.project_id = payload.project_id;
    new.effective_date = parse_optional_date(payload.effective_date.as_deref())?;
    new.effective = payload.effective.unwrap_or(false);
    new.validated = payload.validated.unwrap_or(false);

    let id = state.engine.create_transaction(new).await?;
    tracing::info!(id, account_id, "transaction created");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Lançamento criado com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<TransactionView>, ServerError> {
    let transaction = state.engine.transaction(id).await?;
    Ok(Json(map_transaction(transaction)))
}

pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<TransactionPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = TransactionPatch {
        posting_date: parse_optional_date(payload.posting_date.as_deref())?,
        description: payload.description,
        account_id: payload.account_id,
        amount: parse_optional_amount(payload.amount.as_ref())?,
        type_id: payload.type_id,
        subcategory_id: payload.subcategory_id,
        transfer_id: payload.transfer_id,
        installment: payload.installment,
        statement_id: payload.statement_id,
        card_id: payload.card_id,
        recurrence_id: payload.recurrence_id,
        project_id: payload.project_id,
        effective_date: parse_optional_date(payload.effective_date.as_deref())?,
        effective: payload.effective,
        validated: payload.validated,
    };
    state.engine.update_transaction(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Lançamento atualizado com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_transaction(id).await?;
    tracing::info!(id, "transaction deleted");
    Ok(Json(Message {
        mensagem: "Lançamento deletado com sucesso!".to_string(),
    }))
}
