//! Projects API endpoints (`/projetos`).

use api_types::{
    Created, Message,
    project::{ProjectPayload, ProjectView},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{ProjectNew, ProjectPatch};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::parse_optional_date,
};

fn map_project(project: engine::Project) -> ProjectView {
    ProjectView {
        id: project.id,
        nome: project.name,
        data_inicio: project.start_date.map(|d| d.to_string()),
        data_fim: project.end_date.map(|d| d.to_string()),
        cor: project.color,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ProjectView>>, ServerError> {
    let projects = state
        .engine
        .list_projects()
        .await?
        .into_iter()
        .map(map_project)
        .collect();
    Ok(Json(projects))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ProjectPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let new = ProjectNew {
        name: payload.name.unwrap_or_default(),
        start_date: parse_optional_date(payload.start_date.as_deref())?,
        end_date: parse_optional_date(payload.end_date.as_deref())?,
        color: payload.color,
    };
    let id = state.engine.create_project(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Projeto criado com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<ProjectView>, ServerError> {
    let project = state.engine.project(id).await?;
    Ok(Json(map_project(project)))
}

pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<ProjectPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = ProjectPatch {
        name: payload.name,
        start_date: parse_optional_date(payload.start_date.as_deref())?,
        end_date: parse_optional_date(payload.end_date.as_deref())?,
        color: payload.color,
    };
    state.engine.update_project(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Projeto atualizado com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_project(id).await?;
    Ok(Json(Message {
        mensagem: "Projeto deletado com sucesso!".to_string(),
    }))
}
