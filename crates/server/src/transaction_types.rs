//! Transaction types API endpoints (`/tipos-lancamentos`).

use api_types::{Created, Message, NamedRef, transaction_type::TransactionTypePayload};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::required_text,
};

const NAME_REQUIRED: &str = "O nome do tipo de lançamento é obrigatório";

fn map_transaction_type(transaction_type: engine::TransactionType) -> NamedRef {
    NamedRef {
        id: transaction_type.id,
        nome: transaction_type.name,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<NamedRef>>, ServerError> {
    let types = state
        .engine
        .list_transaction_types()
        .await?
        .into_iter()
        .map(map_transaction_type)
        .collect();
    Ok(Json(types))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<TransactionTypePayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let name = required_text(payload.name, NAME_REQUIRED)?;
    let id = state.engine.create_transaction_type(&name).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Tipo de lançamento criado com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<NamedRef>, ServerError> {
    let transaction_type = state.engine.transaction_type(id).await?;
    Ok(Json(map_transaction_type(transaction_type)))
}

pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<TransactionTypePayload>,
) -> Result<Json<Message>, ServerError> {
    let name = required_text(payload.name, NAME_REQUIRED)?;
    state.engine.rename_transaction_type(id, &name).await?;
    Ok(Json(Message {
        mensagem: "Tipo de lançamento atualizado com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_transaction_type(id).await?;
    Ok(Json(Message {
        mensagem: "Tipo de lançamento deletado com sucesso!".to_string(),
    }))
}
