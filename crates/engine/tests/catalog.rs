use sea_orm::{ConnectOptions, Database};

use engine::{
    BankAccountNew, BankAccountPatch, CategoryNew, CategoryPatch, CurrencyNew, Engine,
    EngineError, ExchangeRate, MoneyCents, ProjectNew, RecurringTemplateNew, SubcategoryNew,
    SubcategoryPatch,
};
use migration::MigratorTrait;

async fn engine() -> Engine {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn category(name: &str, class: i32) -> CategoryNew {
    CategoryNew {
        name: name.to_string(),
        class,
    }
}

fn subcategory(name: &str) -> SubcategoryNew {
    SubcategoryNew {
        name: name.to_string(),
        class: None,
    }
}

#[tokio::test]
async fn account_type_names_are_stored_as_sent_and_required() {
    let engine = engine().await;

    let id = engine.create_account_type("  Poupança ").await.unwrap();
    assert_eq!(engine.account_type(id).await.unwrap().name, "  Poupança ");

    engine.rename_account_type(id, " Corrente").await.unwrap();
    assert_eq!(engine.account_type(id).await.unwrap().name, " Corrente");

    assert_eq!(
        engine.create_account_type("   ").await.unwrap_err(),
        EngineError::InvalidField("O nome do tipo de conta é obrigatório".to_string())
    );
    assert_eq!(engine.list_account_types().await.unwrap().len(), 1);
}

#[tokio::test]
async fn account_type_in_use_cannot_be_deleted() {
    let engine = engine().await;
    let type_id = engine.create_account_type("Corrente").await.unwrap();
    let account = engine
        .create_bank_account(BankAccountNew::new("Banco X", type_id))
        .await
        .unwrap();

    assert_eq!(
        engine.delete_account_type(type_id).await.unwrap_err(),
        EngineError::InUse("Tipo de conta possui contas bancárias vinculadas".to_string())
    );
    assert!(engine.account_type(type_id).await.is_ok());

    engine.delete_bank_account(account).await.unwrap();
    engine.delete_account_type(type_id).await.unwrap();
    assert!(matches!(
        engine.account_type(type_id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn bank_account_checks_type_and_currency() {
    let engine = engine().await;

    assert_eq!(
        engine
            .create_bank_account(BankAccountNew::new("Fantasma", 42))
            .await
            .unwrap_err(),
        EngineError::KeyNotFound("ID do tipo de conta não encontrado.".to_string())
    );

    let type_id = engine.create_account_type("Corrente").await.unwrap();
    let mut new = BankAccountNew::new("Banco Y", type_id);
    new.currency_id = Some(7);
    assert_eq!(
        engine.create_bank_account(new).await.unwrap_err(),
        EngineError::KeyNotFound("Moeda não encontrada".to_string())
    );
    assert!(engine.list_bank_accounts().await.unwrap().is_empty());
}

#[tokio::test]
async fn bank_account_detail_and_patch() {
    let engine = engine().await;
    let type_id = engine.create_account_type("Corrente").await.unwrap();
    let currency = engine
        .create_currency(CurrencyNew {
            name: "Real".to_string(),
            symbol: "R$".to_string(),
            exchange_rate: Some(ExchangeRate::new(10_000)),
        })
        .await
        .unwrap();

    let mut new = BankAccountNew::new("Banco Z", type_id);
    new.initial_balance = Some(MoneyCents::new(150_050));
    new.currency_id = Some(currency);
    let id = engine.create_bank_account(new).await.unwrap();

    engine
        .update_bank_account(
            id,
            BankAccountPatch {
                credit_limit: Some(MoneyCents::new(500_000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let detail = engine.bank_account(id).await.unwrap();
    assert_eq!(detail.account.name, "Banco Z");
    assert_eq!(detail.account.initial_balance(), Some(MoneyCents::new(150_050)));
    assert_eq!(detail.account.credit_limit(), Some(MoneyCents::new(500_000)));
    assert_eq!(detail.account_type.unwrap().name, "Corrente");
    assert_eq!(detail.currency.unwrap().symbol, "R$");

    let listed = engine.list_bank_accounts().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].currency.is_some());

    assert!(matches!(
        engine.delete_currency(currency).await,
        Err(EngineError::InUse(_))
    ));
}

#[tokio::test]
async fn categories_embed_their_subcategories() {
    let engine = engine().await;
    let home = engine.create_category(category("Moradia", 1)).await.unwrap();
    let leisure = engine.create_category(category("Lazer", 2)).await.unwrap();
    let rent = engine.create_subcategory(home, subcategory("Aluguel")).await.unwrap();
    let power = engine.create_subcategory(home, subcategory("Energia")).await.unwrap();

    let list = engine.list_categories().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].category.id, home);
    let ids: Vec<i32> = list[0].subcategories.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![rent, power]);
    assert!(list[1].subcategories.is_empty());

    engine
        .update_subcategory(
            power,
            SubcategoryPatch {
                category_id: Some(leisure),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(engine.subcategories_of(leisure).await.unwrap().len(), 1);
    assert_eq!(engine.subcategory(power).await.unwrap().name, "Energia");
}

#[tokio::test]
async fn subcategory_requires_existing_category() {
    let engine = engine().await;
    assert_eq!(
        engine
            .create_subcategory(99, subcategory(""))
            .await
            .unwrap_err(),
        EngineError::KeyNotFound("Categoria não encontrada".to_string())
    );

    let home = engine.create_category(category("Moradia", 1)).await.unwrap();
    assert_eq!(
        engine
            .update_subcategory(
                engine.create_subcategory(home, subcategory("Água")).await.unwrap(),
                SubcategoryPatch {
                    category_id: Some(99),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err(),
        EngineError::KeyNotFound("Categoria não encontrada".to_string())
    );
}

#[tokio::test]
async fn category_patch_keeps_missing_fields() {
    let engine = engine().await;
    let id = engine.create_category(category("Saúde", 3)).await.unwrap();

    engine
        .update_category(
            id,
            CategoryPatch {
                name: Some("Saúde e bem-estar".to_string()),
                class: None,
            },
        )
        .await
        .unwrap();
    let found = engine.category(id).await.unwrap().category;
    assert_eq!(found.name, "Saúde e bem-estar");
    assert_eq!(found.class, 3);

    assert!(matches!(
        engine
            .update_category(
                id,
                CategoryPatch {
                    name: Some(" ".to_string()),
                    class: None,
                },
            )
            .await,
        Err(EngineError::InvalidField(_))
    ));
}

#[tokio::test]
async fn category_with_subcategories_cannot_be_deleted() {
    let engine = engine().await;
    let id = engine.create_category(category("Moradia", 1)).await.unwrap();
    let sub = engine.create_subcategory(id, subcategory("Aluguel")).await.unwrap();

    assert_eq!(
        engine.delete_category(id).await.unwrap_err(),
        EngineError::InUse("Categoria possui subcategorias vinculadas".to_string())
    );
    engine.delete_subcategory(sub).await.unwrap();
    engine.delete_category(id).await.unwrap();
}

#[tokio::test]
async fn projects_and_templates_have_no_dependents() {
    let engine = engine().await;
    let project = engine
        .create_project(ProjectNew {
            name: "Reforma".to_string(),
            start_date: None,
            end_date: None,
            color: Some("#00ff00".to_string()),
        })
        .await
        .unwrap();
    let template = engine
        .create_recurring_template(RecurringTemplateNew {
            description: "Academia".to_string(),
            amount: MoneyCents::new(8_990),
            type_id: 1,
            category_id: 1,
            posting_date: None,
            account_id: None,
            statement_id: None,
            lead_time: Some(3),
            validated: false,
        })
        .await
        .unwrap();

    assert_eq!(
        engine.recurring_template(template).await.unwrap().amount(),
        MoneyCents::new(8_990)
    );

    engine.delete_project(project).await.unwrap();
    engine.delete_recurring_template(template).await.unwrap();
    assert_eq!(
        engine.project(project).await.unwrap_err(),
        EngineError::KeyNotFound("Projeto não encontrado".to_string())
    );
}
