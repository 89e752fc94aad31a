//! Bank accounts API endpoints (`/contas-bancarias`).

use api_types::{
    Created, Message, NamedRef,
    bank_account::{BankAccountPayload, BankAccountView},
    currency::CurrencyRef,
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{BankAccountNew, BankAccountPatch};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::{parse_optional_amount, parse_optional_date, required, required_text},
};

const FIELDS_REQUIRED: &str = "Nome da conta e o ID do tipo de conta são obrigatórios.";

fn map_bank_account(detail: engine::BankAccountDetail) -> BankAccountView {
    let account = detail.account;
    BankAccountView {
        id: account.id,
        saldo_inicial: account.initial_balance().map(|b| b.to_string()),
        data_saldo_inicial: account.initial_balance_date.map(|d| d.to_string()),
        limite_credito: account.credit_limit().map(|l| l.to_string()),
        nome: account.name,
        tipo_conta: detail.account_type.map(|t| NamedRef {
            id: t.id,
            nome: t.name,
        }),
        moeda: detail.currency.map(|c| CurrencyRef {
            id: c.id,
            nome: c.name,
            simbolo: c.symbol,
        }),
        liquidez: account.liquidity,
        dia_fechamento: account.closing_day,
        dia_previsao_debito: account.debit_day,
        ignorar_saldo: account.ignore_balance,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<BankAccountView>>, ServerError> {
    let accounts = state
        .engine
        .list_bank_accounts()
        .await?
        .into_iter()
        .map(map_bank_account)
        .collect();
    Ok(Json(accounts))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<BankAccountPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let name = required_text(payload.name, FIELDS_REQUIRED)?;
    let account_type_id = required(payload.account_type_id, FIELDS_REQUIRED)?;

    let mut new = BankAccountNew::new(name, account_type_id);
    new.initial_balance = parse_optional_amount(payload.initial_balance.as_ref())?;
    new.initial_balance_date = parse_optional_date(payload.initial_balance_date.as_deref())?;
    new.currency_id = payload.currency_id;
    new.credit_limit = parse_optional_amount(payload.credit_limit.as_ref())?;
    new.liquidity = payload.liquidity.unwrap_or(false);
    new.closing_day = payload.closing_day;
    new.debit_day = payload.debit_day;
    new.ignore_balance = payload.ignore_balance.unwrap_or(false);

    let id = state.engine.create_bank_account(new).await?;
    tracing::info!(id, "bank account created");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Conta criada com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<BankAccountView>, ServerError> {
    let account = state.engine.bank_account(id).await?;
    Ok(Json(map_bank_account(account)))
}

pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<BankAccountPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = BankAccountPatch {
        name: payload.name,
        account_type_id: payload.account_type_id,
        initial_balance: parse_optional_amount(payload.initial_balance.as_ref())?,
        initial_balance_date: parse_optional_date(payload.initial_balance_date.as_deref())?,
        currency_id: payload.currency_id,
        credit_limit: parse_optional_amount(payload.credit_limit.as_ref())?,
        liquidity: payload.liquidity,
        closing_day: payload.closing_day,
        debit_day: payload.debit_day,
        ignore_balance: payload.ignore_balance,
    };
    state.engine.update_bank_account(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Conta atualizada com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_bank_account(id).await?;
    Ok(Json(Message {
        mensagem: "Conta deletada com sucesso!".to_string(),
    }))
}
