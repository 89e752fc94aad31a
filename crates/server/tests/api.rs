use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;

async fn app() -> Router {
    // One connection: every pooled connection would get its own in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::router(engine)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, res) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {res}");
    res["id"].as_i64().unwrap()
}

/// Account type, bank account, category, subcategory and transaction type.
struct Fixture {
    account_type: i64,
    account: i64,
    category: i64,
    subcategory: i64,
    transaction_type: i64,
}

async fn fixture(app: &Router) -> Fixture {
    let account_type = create(app, "/tipos-contas", json!({"tipos_contas": "Corrente"})).await;
    let account = create(
        app,
        "/contas-bancarias",
        json!({"nome_conta": "Banco X", "tipo_conta": account_type}),
    )
    .await;
    let category = create(
        app,
        "/categorias",
        json!({"categorias_nome": "Moradia", "categorias_classe": 1}),
    )
    .await;
    let subcategory = create(
        app,
        &format!("/categorias/{category}/subcategorias"),
        json!({"subcategorias_nome": "Aluguel"}),
    )
    .await;
    let transaction_type =
        create(app, "/tipos-lancamentos", json!({"tipos_operacoes": "Despesa"})).await;
    Fixture {
        account_type,
        account,
        category,
        subcategory,
        transaction_type,
    }
}

#[tokio::test]
async fn home_returns_banner() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], "Bem-vindo ao FinOrg - Administrador Financeiro".as_bytes());
}

#[tokio::test]
async fn account_type_round_trip() {
    let app = app().await;

    let (status, res) = send(&app, "POST", "/tipos-contas", Some(json!({"tipos_contas": "Poupança"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(res["mensagem"], "Tipo de conta criado com sucesso!");
    let id = res["id"].as_i64().unwrap();

    let (status, list) = send(&app, "GET", "/tipos-contas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"id": id, "nome": "Poupança"}]));

    let (status, res) = send(
        &app,
        "PUT",
        &format!("/tipos-contas/{id}"),
        Some(json!({"tipos_contas": "Investimento"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["mensagem"], "Tipo de conta atualizado com sucesso!");

    let (_, res) = send(&app, "GET", &format!("/tipos-contas/{id}"), None).await;
    assert_eq!(res["nome"], "Investimento");

    let (status, res) = send(&app, "DELETE", &format!("/tipos-contas/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["mensagem"], "Tipo de conta deletado com sucesso!");

    let (status, res) = send(&app, "GET", &format!("/tipos-contas/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["erro"], "Tipo de conta não encontrado");
}

#[tokio::test]
async fn missing_required_field_creates_nothing() {
    let app = app().await;

    let (status, res) = send(&app, "POST", "/tipos-contas", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "O nome do tipo de conta é obrigatório");

    let (status, res) = send(&app, "POST", "/categorias", Some(json!({"categorias_nome": "Lazer"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "O nome e a classe da categoria são obrigatórios");

    let (_, list) = send(&app, "GET", "/tipos-contas", None).await;
    assert_eq!(list, json!([]));
    let (_, list) = send(&app, "GET", "/categorias", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn zero_is_a_valid_required_number() {
    let app = app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/categorias",
        Some(json!({"categorias_nome": "Neutra", "categorias_classe": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn update_keeps_fields_not_sent() {
    let app = app().await;
    let id = create(
        &app,
        "/categorias",
        json!({"categorias_nome": "Transporte", "categorias_classe": 2}),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/categorias/{id}"),
        Some(json!({"categorias_nome": "Mobilidade", "categorias_classe": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, res) = send(&app, "GET", &format!("/categorias/{id}"), None).await;
    assert_eq!(res["nome"], "Mobilidade");
    assert_eq!(res["classe"], 2);
    assert_eq!(res["subcategorias"], json!([]));
}

#[tokio::test]
async fn deleting_referenced_account_type_is_refused() {
    let app = app().await;
    let f = fixture(&app).await;

    let (status, res) = send(&app, "DELETE", &format!("/tipos-contas/{}", f.account_type), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(res["erro"], "Tipo de conta possui contas bancárias vinculadas");

    let (status, res) = send(&app, "GET", &format!("/tipos-contas/{}", f.account_type), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["nome"], "Corrente");
}

#[tokio::test]
async fn padded_name_round_trips_exactly() {
    let app = app().await;
    let id = create(&app, "/tipos-contas", json!({"tipos_contas": " Corrente "})).await;

    let (status, res) = send(&app, "GET", &format!("/tipos-contas/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res, json!({"id": id, "nome": " Corrente "}));
}

#[tokio::test]
async fn create_without_json_body_reports_missing_field() {
    let app = app().await;

    let (status, res) = send(&app, "POST", "/tipos-contas", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res, json!({"erro": "O nome do tipo de conta é obrigatório"}));

    let request = Request::builder()
        .method("POST")
        .uri("/tipos-contas")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"tipos_contas": "Corrente"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/tipos-contas", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn bank_account_with_unknown_type_is_404() {
    let app = app().await;

    let (status, res) = send(
        &app,
        "POST",
        "/contas-bancarias",
        Some(json!({"nome_conta": "Fantasma", "tipo_conta": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["erro"], "ID do tipo de conta não encontrado.");

    let (_, list) = send(&app, "GET", "/contas-bancarias", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn bank_account_view_embeds_type_and_currency() {
    let app = app().await;
    let type_id = create(&app, "/tipos-contas", json!({"tipos_contas": "Corrente"})).await;
    let currency = create(
        &app,
        "/moedas",
        json!({"moedas_nome": "Real", "moedas_simbolo": "R$", "moedas_cotacao": "1"}),
    )
    .await;
    let id = create(
        &app,
        "/contas-bancarias",
        json!({
            "nome_conta": "Banco Y",
            "tipo_conta": type_id,
            "conta_saldo_inicial": "1500,5",
            "data_conta_saldo_incial": "2024-01-01",
            "moeda_id": currency
        }),
    )
    .await;

    let (status, res) = send(&app, "GET", &format!("/contas-bancarias/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["tipo_conta"], json!({"id": type_id, "nome": "Corrente"}));
    assert_eq!(res["saldo_inicial"], "1500.50");
    assert_eq!(res["data_saldo_inicial"], "2024-01-01");
    assert_eq!(res["moeda"]["simbolo"], "R$");
    assert_eq!(res["limite_credito"], Value::Null);
}

#[tokio::test]
async fn transaction_with_bad_date_is_rejected() {
    let app = app().await;
    let f = fixture(&app).await;

    let (status, res) = send(
        &app,
        "POST",
        "/lancamentos",
        Some(json!({
            "operacoes_tipo": f.transaction_type,
            "operacoes_descricao": "Aluguel janeiro",
            "operacoes_data": "15/01/2024",
            "operacoes_valor": 1200,
            "contas_bancarias_id": f.account,
            "subcategorias_id": f.subcategory
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "Formato de data inválido. Use AAAA-MM-DD");

    let (_, list) = send(&app, "GET", "/lancamentos", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn transaction_missing_fields_is_incomplete() {
    let app = app().await;
    let (status, res) = send(
        &app,
        "POST",
        "/lancamentos",
        Some(json!({"operacoes_descricao": "Sem conta"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "Dados incompletos");
}

#[tokio::test]
async fn transaction_view_resolves_account_and_category() {
    let app = app().await;
    let f = fixture(&app).await;

    let id = create(
        &app,
        "/lancamentos",
        json!({
            "operacoes_tipo": f.transaction_type,
            "operacoes_descricao": "Aluguel janeiro",
            "operacoes_data": "2024-01-15",
            "operacoes_valor": "12.34",
            "contas_bancarias_id": f.account,
            "subcategorias_id": f.subcategory
        }),
    )
    .await;

    let (status, list) = send(&app, "GET", "/lancamentos", None).await;
    assert_eq!(status, StatusCode::OK);
    let item = &list[0];
    assert_eq!(item["id"], id);
    assert_eq!(item["tipo"], f.transaction_type);
    assert_eq!(item["data"], "2024-01-15");
    assert_eq!(item["valor"], "12.34");
    assert_eq!(item["conta"], json!({"id": f.account, "nome": "Banco X"}));
    assert_eq!(
        item["subcategoria"],
        json!({"id": f.subcategory, "nome": "Aluguel", "categoria": "Moradia"})
    );

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/lancamentos/{id}"),
        Some(json!({"operacoes_valor": 99.9})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, res) = send(&app, "GET", &format!("/lancamentos/{id}"), None).await;
    assert_eq!(res["valor"], "99.90");

    // Past 2^53, where an f64 would round to ...992.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/lancamentos/{id}"),
        Some(json!({"operacoes_valor": 9_007_199_254_740_993_u64})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, res) = send(&app, "GET", &format!("/lancamentos/{id}"), None).await;
    assert_eq!(res["valor"], "9007199254740993.00");
    assert_eq!(res["descricao"], "Aluguel janeiro");

    let (status, res) = send(&app, "DELETE", &format!("/subcategorias/{}", f.subcategory), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(res["erro"], "Subcategoria possui lançamentos vinculados");

    let (status, _) = send(&app, "DELETE", &format!("/categorias/{}", f.category), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn transaction_with_unknown_subcategory_is_404() {
    let app = app().await;
    let f = fixture(&app).await;

    let (status, res) = send(
        &app,
        "POST",
        "/lancamentos",
        Some(json!({
            "operacoes_tipo": f.transaction_type,
            "operacoes_descricao": "Mercado",
            "operacoes_data": "2024-02-01",
            "operacoes_valor": 50,
            "contas_bancarias_id": f.account,
            "subcategorias_id": 999
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["erro"], "Subcategoria não encontrada");
}

#[tokio::test]
async fn subcategory_for_missing_category_is_404() {
    let app = app().await;
    let (status, res) = send(
        &app,
        "POST",
        "/categorias/999/subcategorias",
        Some(json!({"subcategorias_nome": "Órfã"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["erro"], "Categoria não encontrada");

    let (status, _) = send(&app, "GET", "/categorias/999/subcategorias", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn subcategory_listing_and_detail() {
    let app = app().await;
    let f = fixture(&app).await;

    let (_, list) = send(&app, "GET", &format!("/categorias/{}/subcategorias", f.category), None).await;
    assert_eq!(list, json!([{"id": f.subcategory, "nome": "Aluguel"}]));

    let (_, res) = send(&app, "GET", &format!("/subcategorias/{}", f.subcategory), None).await;
    assert_eq!(res["categoria_id"], f.category);

    let (_, res) = send(&app, "GET", &format!("/categorias/{}", f.category), None).await;
    assert_eq!(res["subcategorias"], json!([{"id": f.subcategory, "nome": "Aluguel"}]));
}

#[tokio::test]
async fn cards_embed_statements() {
    let app = app().await;
    let card = create(
        &app,
        "/cartoes",
        json!({"cartoes_nome": "Visa", "cartoes_final": "4321", "cartoes_tipo": "Crédito"}),
    )
    .await;

    let (status, res) = send(
        &app,
        "POST",
        &format!("/cartoes/{card}/faturas"),
        Some(json!({"faturasCartoesDtVencimento": "2024-03-10"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "Dados de fatura incompletos");

    let statement = create(
        &app,
        &format!("/cartoes/{card}/faturas"),
        json!({
            "faturasCartoesDtVencimento": "2024-03-10",
            "faturasCartoesFechamento": "2024-03-01",
            "faturasCartoesValor": 150.75
        }),
    )
    .await;

    let (_, res) = send(&app, "GET", &format!("/cartoes/{card}"), None).await;
    assert_eq!(res["final"], "4321");
    assert_eq!(res["faturas"], json!([{"id": statement, "vencimento": "2024-03-10"}]));

    let (_, res) = send(&app, "GET", &format!("/faturas/{statement}"), None).await;
    assert_eq!(res["valor"], "150.75");
    assert_eq!(res["cartao_id"], card);

    let (status, res) = send(&app, "DELETE", &format!("/cartoes/{card}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(res["erro"], "Cartão possui faturas vinculadas");

    let (status, _) = send(&app, "DELETE", &format!("/faturas/{statement}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/cartoes/{card}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn recurrence_rule_defaults_to_active() {
    let app = app().await;
    let f = fixture(&app).await;
    let transaction = create(
        &app,
        "/lancamentos",
        json!({
            "operacoes_tipo": f.transaction_type,
            "operacoes_descricao": "Internet",
            "operacoes_data": "2024-01-05",
            "operacoes_valor": 99.9,
            "contas_bancarias_id": f.account,
            "subcategorias_id": f.subcategory
        }),
    )
    .await;

    let (status, res) = send(
        &app,
        "POST",
        "/regras-recorrencia",
        Some(json!({"operacao_id": transaction, "frequencia": "Mensal"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "Campos obrigatórios incompletos");

    let rule = create(
        &app,
        "/regras-recorrencia",
        json!({"operacao_id": transaction, "frequencia": "Mensal", "data_inicio": "2024-01-05"}),
    )
    .await;
    let (_, res) = send(&app, "GET", &format!("/regras-recorrencia/{rule}"), None).await;
    assert_eq!(res["status"], "Ativo");
    assert_eq!(res["data_fim"], Value::Null);

    let (status, res) = send(&app, "DELETE", &format!("/lancamentos/{transaction}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(res["erro"], "Lançamento possui regras de recorrência vinculadas");

    let (status, res) = send(
        &app,
        "POST",
        "/regras-recorrencia",
        Some(json!({"operacao_id": 999, "frequencia": "Mensal", "data_inicio": "2024-01-05"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["erro"], "Lançamento não encontrado");
}

#[tokio::test]
async fn recurring_template_round_trip() {
    let app = app().await;
    let (status, res) = send(
        &app,
        "POST",
        "/lancamentos-recorrentes",
        Some(json!({
            "recorrencia_descricao": "Academia",
            "recorrencia_valor": "89,90",
            "recorrencia_tipo": 1,
            "recorrencia_categoria": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(res["mensagem"], "Template de lançamento recorrente criado com sucesso!");
    let id = res["id"].as_i64().unwrap();

    let (_, list) = send(&app, "GET", "/lancamentos-recorrentes", None).await;
    assert_eq!(list[0]["valor"], "89.90");
    assert_eq!(list[0]["fatura"], Value::Null);

    let (status, _) = send(&app, "DELETE", &format!("/lancamentos-recorrentes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, res) = send(&app, "GET", &format!("/lancamentos-recorrentes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["erro"], "Template de lançamento recorrente não encontrado");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/tipos-contas")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let res: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(res["erro"], "Erro ao processar JSON");
    assert!(res["detalhes"].is_string());
}

#[tokio::test]
async fn invalid_amount_is_400() {
    let app = app().await;
    let card = create(
        &app,
        "/cartoes",
        json!({"cartoes_nome": "Master", "cartoes_final": "0001", "cartoes_tipo": "Débito"}),
    )
    .await;
    let (status, res) = send(
        &app,
        "POST",
        &format!("/cartoes/{card}/faturas"),
        Some(json!({
            "faturasCartoesDtVencimento": "2024-03-10",
            "faturasCartoesFechamento": "2024-03-01",
            "faturasCartoesValor": "dez reais"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "Valor inválido: 'dez reais'");
}

#[tokio::test]
async fn routing_fallbacks() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/tipos-contas/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, res) = send(&app, "GET", "/nao-existe", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(res["erro"].is_string());

    let (status, res) = send(&app, "PATCH", "/tipos-contas", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res["erro"], "Método não permitido");
}

#[tokio::test]
async fn projects_and_currencies_crud() {
    let app = app().await;

    let project = create(
        &app,
        "/projetos",
        json!({"projetos_nome": "Reforma", "projetos_data_inicio": "2024-05-01", "projetos_cor": "#ff0000"}),
    )
    .await;
    let (_, res) = send(&app, "GET", &format!("/projetos/{project}"), None).await;
    assert_eq!(res["data_inicio"], "2024-05-01");
    assert_eq!(res["data_fim"], Value::Null);

    let (status, res) = send(&app, "POST", "/projetos", Some(json!({"projetos_nome": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["erro"], "O nome do projeto é obrigatório");

    let currency = create(
        &app,
        "/moedas",
        json!({"moedas_nome": "Dólar", "moedas_simbolo": "US$", "moedas_cotacao": 5.1234}),
    )
    .await;
    let (_, res) = send(&app, "GET", &format!("/moedas/{currency}"), None).await;
    assert_eq!(res["cotacao"], "5.1234");

    let (status, _) = send(&app, "DELETE", &format!("/moedas/{currency}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, res) = send(&app, "GET", &format!("/moedas/{currency}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["erro"], "Moeda não encontrada");
}
