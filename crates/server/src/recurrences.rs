//! Recurring templates (`/lancamentos-recorrentes`) and recurrence rules
//! (`/regras-recorrencia`).

use api_types::{
    Created, Message,
    recurrence::{
        RecurrenceRulePayload, RecurrenceRuleView, RecurringTemplatePayload, RecurringTemplateView,
    },
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{RecurrenceRuleNew, RecurrenceRulePatch, RecurringTemplateNew, RecurringTemplatePatch};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::{
        parse_amount, parse_date, parse_optional_amount, parse_optional_date, required,
        required_text,
    },
};

const FIELDS_REQUIRED: &str = "Campos obrigatórios incompletos";

fn map_template(template: engine::RecurringTemplate) -> RecurringTemplateView {
    RecurringTemplateView {
        id: template.id,
        valor: template.amount().to_string(),
        descricao: template.description,
        tipo: template.type_id,
        categoria: template.category_id,
        fatura: template.statement_id,
        data: template.posting_date.map(|d| d.to_string()),
        conta: template.account_id,
        antecedencia: template.lead_time,
        validado: template.validated,
    }
}

fn map_rule(rule: engine::RecurrenceRule) -> RecurrenceRuleView {
    RecurrenceRuleView {
        id: rule.id,
        operacao_id: rule.transaction_id,
        descricao: rule.description,
        frequencia: rule.frequency,
        data_inicio: rule.start_date.to_string(),
        data_fim: rule.end_date.map(|d| d.to_string()),
        status: rule.status,
        ultimo_lancamento: rule.last_posted_date.map(|d| d.to_string()),
        dias_uteis: rule.business_days,
    }
}

pub async fn list_templates(
    State(state): State<ServerState>,
) -> Result<Json<Vec<RecurringTemplateView>>, ServerError> {
    let templates = state
        .engine
        .list_recurring_templates()
        .await?
        .into_iter()
        .map(map_template)
        .collect();
    Ok(Json(templates))
}

pub async fn create_template(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<RecurringTemplatePayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let description = required_text(payload.description, FIELDS_REQUIRED)?;
    let amount = required(payload.amount, FIELDS_REQUIRED)?;
    let type_id = required(payload.type_id, FIELDS_REQUIRED)?;
    let category_id = required(payload.category_id, FIELDS_REQUIRED)?;

    let new = RecurringTemplateNew {
        description,
        amount: parse_amount(&amount)?,
        type_id,
        category_id,
        posting_date: parse_optional_date(payload.posting_date.as_deref())?,
        account_id: payload.account_id,
        statement_id: payload.statement_id,
        lead_time: payload.lead_time,
        validated: payload.validated.unwrap_or(false),
    };
    let id = state.engine.create_recurring_template(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Template de lançamento recorrente criado com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get_template(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<RecurringTemplateView>, ServerError> {
    let template = state.engine.recurring_template(id).await?;
    Ok(Json(map_template(template)))
}

pub async fn update_template(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<RecurringTemplatePayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = RecurringTemplatePatch {
        description: payload.description,
        amount: parse_optional_amount(payload.amount.as_ref())?,
        type_id: payload.type_id,
        category_id: payload.category_id,
        posting_date: parse_optional_date(payload.posting_date.as_deref())?,
        account_id: payload.account_id,
        statement_id: payload.statement_id,
        lead_time: payload.lead_time,
        validated: payload.validated,
    };
    state.engine.update_recurring_template(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Template de lançamento recorrente atualizado com sucesso!".to_string(),
    }))
}

pub async fn delete_template(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_recurring_template(id).await?;
    Ok(Json(Message {
        mensagem: "Template de lançamento recorrente deletado com sucesso!".to_string(),
    }))
}

pub async fn list_rules(
    State(state): State<ServerState>,
) -> Result<Json<Vec<RecurrenceRuleView>>, ServerError> {
    let rules = state
        .engine
        .list_recurrence_rules()
        .await?
        .into_iter()
        .map(map_rule)
        .collect();
    Ok(Json(rules))
}

pub async fn create_rule(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<RecurrenceRulePayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let transaction_id = required(payload.transaction_id, FIELDS_REQUIRED)?;
    let frequency = required_text(payload.frequency, FIELDS_REQUIRED)?;
    let start_date = required(payload.start_date, FIELDS_REQUIRED)?;

    let new = RecurrenceRuleNew {
        transaction_id,
        frequency,
        start_date: parse_date(&start_date)?,
        description: payload.description,
        end_date: parse_optional_date(payload.end_date.as_deref())?,
        status: payload.status,
        last_posted_date: parse_optional_date(payload.last_posted_date.as_deref())?,
        business_days: payload.business_days.unwrap_or(false),
    };
    let id = state.engine.create_recurrence_rule(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Regra de recorrência criada com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get_rule(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<RecurrenceRuleView>, ServerError> {
    let rule = state.engine.recurrence_rule(id).await?;
    Ok(Json(map_rule(rule)))
}

pub async fn update_rule(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<RecurrenceRulePayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = RecurrenceRulePatch {
        transaction_id: payload.transaction_id,
        frequency: payload.frequency,
        start_date: parse_optional_date(payload.start_date.as_deref())?,
        description: payload.description,
        end_date: parse_optional_date(payload.end_date.as_deref())?,
        status: payload.status,
        last_posted_date: parse_optional_date(payload.last_posted_date.as_deref())?,
        business_days: payload.business_days,
    };
    state.engine.update_recurrence_rule(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Regra de recorrência atualizada com sucesso!".to_string(),
    }))
}

pub async fn delete_rule(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_recurrence_rule(id).await?;
    Ok(Json(Message {
        mensagem: "Regra de recorrência deletada com sucesso!".to_string(),
    }))
}
