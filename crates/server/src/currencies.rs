//! Currencies API endpoints (`/moedas`).

use api_types::{
    Created, Message,
    currency::{CurrencyPayload, CurrencyView},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{CurrencyNew, CurrencyPatch};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::parse_rate,
};

fn map_currency(currency: engine::Currency) -> CurrencyView {
    CurrencyView {
        cotacao: currency.rate().map(|r| r.to_string()),
        id: currency.id,
        nome: currency.name,
        simbolo: currency.symbol,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CurrencyView>>, ServerError> {
    let currencies = state
        .engine
        .list_currencies()
        .await?
        .into_iter()
        .map(map_currency)
        .collect();
    Ok(Json(currencies))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CurrencyPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let new = CurrencyNew {
        name: payload.name.unwrap_or_default(),
        symbol: payload.symbol.unwrap_or_default(),
        exchange_rate: payload.exchange_rate.as_ref().map(parse_rate).transpose()?,
    };
    let id = state.engine.create_currency(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Moeda criada com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<CurrencyView>, ServerError> {
    let currency = state.engine.currency(id).await?;
    Ok(Json(map_currency(currency)))
}

pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<CurrencyPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = CurrencyPatch {
        name: payload.name,
        symbol: payload.symbol,
        exchange_rate: payload.exchange_rate.as_ref().map(parse_rate).transpose()?,
    };
    state.engine.update_currency(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Moeda atualizada com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_currency(id).await?;
    Ok(Json(Message {
        mensagem: "Moeda deletada com sucesso!".to_string(),
    }))
}
