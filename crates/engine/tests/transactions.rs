use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database};

use engine::{
    BankAccountNew, CardNew, CardStatementNew, CategoryNew, Engine, EngineError, MoneyCents,
    RecurrenceRuleNew, SubcategoryNew, TransactionNew, TransactionPatch,
};
use migration::MigratorTrait;

async fn engine() -> Engine {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Refs {
    account: i32,
    type_id: i32,
    subcategory: i32,
}

async fn refs(engine: &Engine) -> Refs {
    let account_type = engine.create_account_type("Corrente").await.unwrap();
    let account = engine
        .create_bank_account(BankAccountNew::new("Banco X", account_type))
        .await
        .unwrap();
    let category = engine
        .create_category(CategoryNew {
            name: "Alimentação".to_string(),
            class: 1,
        })
        .await
        .unwrap();
    let subcategory = engine
        .create_subcategory(
            category,
            SubcategoryNew {
                name: "Mercado".to_string(),
                class: None,
            },
        )
        .await
        .unwrap();
    let type_id = engine.create_transaction_type("Despesa").await.unwrap();
    Refs {
        account,
        type_id,
        subcategory,
    }
}

fn groceries(refs: &Refs, cents: i64) -> TransactionNew {
    TransactionNew::new(
        date(2024, 1, 15),
        "Compra do mês",
        refs.account,
        MoneyCents::new(cents),
        refs.type_id,
        refs.subcategory,
    )
}

#[tokio::test]
async fn create_and_read_transaction_detail() {
    let engine = engine().await;
    let refs = refs(&engine).await;

    let id = engine.create_transaction(groceries(&refs, -45_90)).await.unwrap();
    let detail = engine.transaction(id).await.unwrap();

    assert_eq!(detail.transaction.amount(), MoneyCents::new(-45_90));
    assert_eq!(detail.transaction.posting_date, date(2024, 1, 15));
    assert_eq!(detail.account.unwrap().name, "Banco X");
    assert_eq!(detail.subcategory.unwrap().name, "Mercado");
    assert_eq!(detail.category.unwrap().name, "Alimentação");
    assert!(!detail.transaction.effective);
}

#[tokio::test]
async fn list_resolves_every_row() {
    let engine = engine().await;
    let refs = refs(&engine).await;

    for cents in [100, 200, 300] {
        engine.create_transaction(groceries(&refs, cents)).await.unwrap();
    }

    let list = engine.list_transactions().await.unwrap();
    assert_eq!(list.len(), 3);
    assert!(list.windows(2).all(|w| w[0].transaction.id < w[1].transaction.id));
    assert!(list.iter().all(|d| d.account.is_some() && d.category.is_some()));
}

#[tokio::test]
async fn missing_references_are_not_found() {
    let engine = engine().await;
    let refs = refs(&engine).await;

    let mut bad_account = groceries(&refs, 100);
    bad_account.account_id = 999;
    assert_eq!(
        engine.create_transaction(bad_account).await.unwrap_err(),
        EngineError::KeyNotFound("Conta não encontrada".to_string())
    );

    let mut bad_type = groceries(&refs, 100);
    bad_type.type_id = 999;
    assert_eq!(
        engine.create_transaction(bad_type).await.unwrap_err(),
        EngineError::KeyNotFound("Tipo de lançamento não encontrado".to_string())
    );

    let with_card = groceries(&refs, 100).card(999, None);
    assert_eq!(
        engine.create_transaction(with_card).await.unwrap_err(),
        EngineError::KeyNotFound("Cartão não encontrado".to_string())
    );

    assert!(engine.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn card_purchase_links_statement() {
    let engine = engine().await;
    let refs = refs(&engine).await;
    let card = engine
        .create_card(CardNew {
            name: "Visa".to_string(),
            last_digits: "1234".to_string(),
            kind: "Crédito".to_string(),
            linked_account: false,
        })
        .await
        .unwrap();
    let statement = engine
        .create_card_statement(
            card,
            CardStatementNew {
                due_date: date(2024, 2, 10),
                closing_date: date(2024, 2, 1),
                amount: MoneyCents::new(0),
                closed: false,
                month_year: Some("02/2024".to_string()),
            },
        )
        .await
        .unwrap();

    let id = engine
        .create_transaction(groceries(&refs, 5_000).card(card, Some(statement)))
        .await
        .unwrap();
    let detail = engine.transaction(id).await.unwrap();
    assert_eq!(detail.transaction.card_id, Some(card));
    assert_eq!(detail.transaction.statement_id, Some(statement));

    assert!(matches!(
        engine.delete_card_statement(statement).await,
        Err(EngineError::InUse(_))
    ));
    assert!(matches!(engine.delete_card(card).await, Err(EngineError::InUse(_))));
}

#[tokio::test]
async fn patch_changes_only_given_fields() {
    let engine = engine().await;
    let refs = refs(&engine).await;
    let id = engine.create_transaction(groceries(&refs, 1_000)).await.unwrap();

    engine
        .update_transaction(
            id,
            TransactionPatch {
                amount: Some(MoneyCents::new(1_250)),
                validated: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let tx = engine.transaction(id).await.unwrap().transaction;
    assert_eq!(tx.amount(), MoneyCents::new(1_250));
    assert!(tx.validated);
    assert_eq!(tx.description, "Compra do mês");
    assert_eq!(tx.posting_date, date(2024, 1, 15));

    // Empty patch is a no-op.
    engine
        .update_transaction(id, TransactionPatch::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn transfer_counterpart_blocks_delete() {
    let engine = engine().await;
    let refs = refs(&engine).await;

    let outgoing = engine.create_transaction(groceries(&refs, -500)).await.unwrap();
    let incoming = engine
        .create_transaction(groceries(&refs, 500).transfer_of(outgoing))
        .await
        .unwrap();

    assert_eq!(
        engine.delete_transaction(outgoing).await.unwrap_err(),
        EngineError::InUse("Lançamento possui transferências vinculadas".to_string())
    );

    engine.delete_transaction(incoming).await.unwrap();
    engine.delete_transaction(outgoing).await.unwrap();
    assert!(matches!(
        engine.transaction(outgoing).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn recurrence_rule_defaults_and_blocks_delete() {
    let engine = engine().await;
    let refs = refs(&engine).await;
    let transaction = engine.create_transaction(groceries(&refs, 8_990)).await.unwrap();

    let rule = engine
        .create_recurrence_rule(RecurrenceRuleNew {
            transaction_id: transaction,
            frequency: "Mensal".to_string(),
            start_date: date(2024, 1, 15),
            description: None,
            end_date: None,
            status: None,
            last_posted_date: None,
            business_days: false,
        })
        .await
        .unwrap();
    assert_eq!(engine.recurrence_rule(rule).await.unwrap().status, "Ativo");

    assert!(matches!(
        engine.delete_transaction(transaction).await,
        Err(EngineError::InUse(_))
    ));

    engine.delete_recurrence_rule(rule).await.unwrap();
    engine.delete_transaction(transaction).await.unwrap();
}
