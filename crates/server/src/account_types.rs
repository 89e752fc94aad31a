//! Account types API endpoints (`/tipos-contas`).

use api_types::{Created, Message, NamedRef, account_type::AccountTypePayload};
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::required_text,
};

const NAME_REQUIRED: &str = "O nome do tipo de conta é obrigatório";

fn map_account_type(account_type: engine::AccountType) -> NamedRef {
    NamedRef {
        id: account_type.id,
        nome: account_type.name,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<NamedRef>>, ServerError> {
    let types = state
        .engine
        .list_account_types()
        .await?
        .into_iter()
        .map(map_account_type)
        .collect();
    Ok(Json(types))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<AccountTypePayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let name = required_text(payload.name, NAME_REQUIRED)?;
    let id = state.engine.create_account_type(&name).await?;
    tracing::info!(id, "account type created");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Tipo de conta criado com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<NamedRef>, ServerError> {
    let account_type = state.engine.account_type(id).await?;
    Ok(Json(map_account_type(account_type)))
}

/// The name is the only field, so it is required here too.
pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<AccountTypePayload>,
) -> Result<Json<Message>, ServerError> {
    let name = required_text(payload.name, NAME_REQUIRED)?;
    state.engine.rename_account_type(id, &name).await?;
    Ok(Json(Message {
        mensagem: "Tipo de conta atualizado com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_account_type(id).await?;
    tracing::info!(id, "account type deleted");
    Ok(Json(Message {
        mensagem: "Tipo de conta deletado com sucesso!".to_string(),
    }))
}
