use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{router, run_with_listener};

mod account_types;
mod bank_accounts;
mod cards;
mod categories;
mod currencies;
mod extract;
mod projects;
mod recurrences;
mod server;
mod transaction_types;
mod transactions;
mod validation;

pub enum ServerError {
    Engine(EngineError),
    /// Missing or malformed request field.
    Generic(String),
    /// Body is not JSON or does not match the payload shape.
    Json(JsonRejection),
    /// Unknown route, or a path id that is not an integer.
    NotFound,
    MethodNotAllowed,
}

#[derive(Serialize)]
struct Error {
    erro: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detalhes: Option<String>,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidField(_) => StatusCode::BAD_REQUEST,
        EngineError::InUse(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> Error {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            Error {
                erro: "Erro interno do servidor".to_string(),
                detalhes: Some(db_err.to_string()),
            }
        }
        other => Error {
            erro: other.to_string(),
            detalhes: None,
        },
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(erro) => (
                StatusCode::BAD_REQUEST,
                Error {
                    erro,
                    detalhes: None,
                },
            ),
            ServerError::Json(rejection) => {
                tracing::debug!("rejected body: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    Error {
                        erro: "Erro ao processar JSON".to_string(),
                        detalhes: Some(rejection.body_text()),
                    },
                )
            }
            ServerError::NotFound => (
                StatusCode::NOT_FOUND,
                Error {
                    erro: "Recurso não encontrado".to_string(),
                    detalhes: None,
                },
            ),
            ServerError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Error {
                    erro: "Método não permitido".to_string(),
                    detalhes: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Json(value)
    }
}

impl From<PathRejection> for ServerError {
    fn from(_: PathRejection) -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_in_use_maps_to_409() {
        let res = ServerError::from(EngineError::InUse("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_invalid_field_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidField("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_database_maps_to_500() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("boom".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn fallbacks_map_to_404_and_405() {
        assert_eq!(ServerError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServerError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
