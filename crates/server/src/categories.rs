//! Categories and subcategories API endpoints.

use api_types::{
    Created, Message, NamedRef,
    category::{CategoryPayload, CategoryView, SubcategoryPayload, SubcategoryView},
};
use axum::{Json, extract::State, http::StatusCode};
use engine::{CategoryNew, CategoryPatch, SubcategoryNew, SubcategoryPatch};

use crate::{
    ServerError,
    extract::{AppJson, IdPath},
    server::ServerState,
    validation::{required, required_text},
};

const CATEGORY_FIELDS_REQUIRED: &str = "O nome e a classe da categoria são obrigatórios";

fn map_subcategory_ref(subcategory: engine::Subcategory) -> NamedRef {
    NamedRef {
        id: subcategory.id,
        nome: subcategory.name,
    }
}

fn map_category(detail: engine::CategoryWithSubcategories) -> CategoryView {
    CategoryView {
        id: detail.category.id,
        nome: detail.category.name,
        classe: detail.category.class,
        subcategorias: detail
            .subcategories
            .into_iter()
            .map(map_subcategory_ref)
            .collect(),
    }
}

fn map_subcategory(subcategory: engine::Subcategory) -> SubcategoryView {
    SubcategoryView {
        id: subcategory.id,
        nome: subcategory.name,
        classe: subcategory.class,
        categoria_id: subcategory.category_id,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(map_category)
        .collect();
    Ok(Json(categories))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CategoryPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let new = CategoryNew {
        name: required_text(payload.name, CATEGORY_FIELDS_REQUIRED)?,
        class: required(payload.class, CATEGORY_FIELDS_REQUIRED)?,
    };
    let id = state.engine.create_category(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Categoria criada com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state.engine.category(id).await?;
    Ok(Json(map_category(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<CategoryPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = CategoryPatch {
        name: payload.name,
        class: payload.class,
    };
    state.engine.update_category(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Categoria atualizada com sucesso!".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(Json(Message {
        mensagem: "Categoria deletada com sucesso!".to_string(),
    }))
}

/// `GET /categorias/{id}/subcategorias`
pub async fn list_subcategories(
    State(state): State<ServerState>,
    IdPath(category_id): IdPath<i32>,
) -> Result<Json<Vec<NamedRef>>, ServerError> {
    let subcategories = state
        .engine
        .subcategories_of(category_id)
        .await?
        .into_iter()
        .map(map_subcategory_ref)
        .collect();
    Ok(Json(subcategories))
}

/// `POST /categorias/{id}/subcategorias`
///
/// The engine checks the category before the name, so a missing category
/// wins over an incomplete body.
pub async fn create_subcategory(
    State(state): State<ServerState>,
    IdPath(category_id): IdPath<i32>,
    AppJson(payload): AppJson<SubcategoryPayload>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let new = SubcategoryNew {
        name: payload.name.unwrap_or_default(),
        class: payload.class,
    };
    let id = state.engine.create_subcategory(category_id, new).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Subcategoria criada com sucesso!".to_string(),
            id,
        }),
    ))
}

pub async fn get_subcategory(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<SubcategoryView>, ServerError> {
    let subcategory = state.engine.subcategory(id).await?;
    Ok(Json(map_subcategory(subcategory)))
}

pub async fn update_subcategory(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
    AppJson(payload): AppJson<SubcategoryPayload>,
) -> Result<Json<Message>, ServerError> {
    let patch = SubcategoryPatch {
        name: payload.name,
        class: payload.class,
        category_id: payload.category_id,
    };
    state.engine.update_subcategory(id, patch).await?;
    Ok(Json(Message {
        mensagem: "Subcategoria atualizada com sucesso!".to_string(),
    }))
}

pub async fn delete_subcategory(
    State(state): State<ServerState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_subcategory(id).await?;
    Ok(Json(Message {
        mensagem: "Subcategoria deletada com sucesso!".to_string(),
    }))
}
