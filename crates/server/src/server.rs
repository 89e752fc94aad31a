use axum::{Router, routing::get};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use std::sync::Arc;

use crate::{
    ServerError, account_types, bank_accounts, cards, categories, currencies, projects,
    recurrences, transaction_types, transactions,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn home() -> &'static str {
    "Bem-vindo ao FinOrg - Administrador Financeiro"
}

async fn not_found() -> ServerError {
    ServerError::NotFound
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

/// Build the full API router around `engine`.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/", get(home))
        .route(
            "/tipos-contas",
            get(account_types::list).post(account_types::create),
        )
        .route(
            "/tipos-contas/{id}",
            get(account_types::get)
                .put(account_types::update)
                .delete(account_types::delete),
        )
        .route(
            "/categorias",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categorias/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route(
            "/categorias/{id}/subcategorias",
            get(categories::list_subcategories).post(categories::create_subcategory),
        )
        .route(
            "/subcategorias/{id}",
            get(categories::get_subcategory)
                .put(categories::update_subcategory)
                .delete(categories::delete_subcategory),
        )
        .route(
            "/moedas",
            get(currencies::list).post(currencies::create),
        )
        .route(
            "/moedas/{id}",
            get(currencies::get)
                .put(currencies::update)
                .delete(currencies::delete),
        )
        .route(
            "/contas-bancarias",
            get(bank_accounts::list).post(bank_accounts::create),
        )
        .route(
            "/contas-bancarias/{id}",
            get(bank_accounts::get)
                .put(bank_accounts::update)
                .delete(bank_accounts::delete),
        )
        .route(
            "/tipos-lancamentos",
            get(transaction_types::list).post(transaction_types::create),
        )
        .route(
            "/tipos-lancamentos/{id}",
            get(transaction_types::get)
                .put(transaction_types::update)
                .delete(transaction_types::delete),
        )
        .route(
            "/lancamentos",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/lancamentos/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        .route("/cartoes", get(cards::list).post(cards::create))
        .route(
            "/cartoes/{id}",
            get(cards::get).put(cards::update).delete(cards::delete),
        )
        .route(
            "/cartoes/{id}/faturas",
            get(cards::list_statements).post(cards::create_statement),
        )
        .route(
            "/faturas/{id}",
            get(cards::get_statement)
                .put(cards::update_statement)
                .delete(cards::delete_statement),
        )
        .route(
            "/lancamentos-recorrentes",
            get(recurrences::list_templates).post(recurrences::create_template),
        )
        .route(
            "/lancamentos-recorrentes/{id}",
            get(recurrences::get_template)
                .put(recurrences::update_template)
                .delete(recurrences::delete_template),
        )
        .route(
            "/regras-recorrencia",
            get(recurrences::list_rules).post(recurrences::create_rule),
        )
        .route(
            "/regras-recorrencia/{id}",
            get(recurrences::get_rule)
                .put(recurrences::update_rule)
                .delete(recurrences::delete_rule),
        )
        .route("/projetos", get(projects::list).post(projects::create))
        .route(
            "/projetos/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Serve the API on `listener` until the server stops.
pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}
