use collection_actor::{DocumentRepository, KeyValueStore, MemoryStore, Repository};
use std::sync::Arc;
use stockroom::config::Settings;
use stockroom::lifecycle::{InventoryError, InventorySystem};
use stockroom::model::{
    AdjustmentRequest, Direction, Product, ProductDraft, TransactionKind, UserDraft,
    ValidationError,
};
use stockroom::notifications::Severity;
use stockroom::product_actor::{CatalogError, PRODUCTS_KEY};
use stockroom::user_actor::UserError;

fn quick_settings() -> Settings {
    Settings {
        notification_display_ms: 5,
        ..Settings::default()
    }
}

fn start() -> (InventorySystem, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let system = InventorySystem::new(store.clone(), &quick_settings());
    (system, store)
}

fn widget() -> ProductDraft {
    ProductDraft::new("Widget", "9.99", "W-1", "10")
}

fn validation(err: InventoryError) -> ValidationError {
    match err {
        InventoryError::Catalog(CatalogError::Validation(v)) => v,
        InventoryError::Users(UserError::Validation(v)) => v,
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_add_returns_parsed_values_and_grows_catalog() {
    let (system, _) = start();

    let product = system.add_product(widget()).await.expect("Failed to add product");
    assert_eq!(product.price, 9.99);
    assert_eq!(product.quantity, 10);
    assert_eq!(product.name, "Widget");
    assert_eq!(system.products().await.unwrap(), vec![product]);

    // Adding a product writes nothing to the ledger by default
    assert!(system.history().await.unwrap().is_empty());

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_duplicate_sku_differing_only_in_case_is_rejected() {
    let (system, _) = start();
    system.add_product(widget()).await.unwrap();

    let err = system
        .add_product(ProductDraft::new("Other", "1", "w-1", "1"))
        .await
        .unwrap_err();

    assert_eq!(validation(err), ValidationError::DuplicateSku);
    assert_eq!(system.products().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_oversized_decrease_changes_nothing() {
    let (system, _) = start();
    system.add_product(widget()).await.unwrap();

    let err = system
        .adjust_stock(AdjustmentRequest::new("W-1", "11", Direction::Decrease))
        .await
        .unwrap_err();

    assert!(matches!(validation(err), ValidationError::NegativeResult { .. }));
    assert_eq!(system.products().await.unwrap()[0].quantity, 10);
    assert!(system.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_increase_records_one_transaction() {
    let (system, _) = start();
    let product = system.add_product(widget()).await.unwrap();

    let outcome = system
        .adjust_stock(AdjustmentRequest::new("W-1", "5", Direction::Increase))
        .await
        .expect("Failed to adjust");
    assert_eq!(outcome.new_quantity, 15);
    assert_eq!(system.products().await.unwrap()[0].quantity, 15);

    let history = system.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_id, product.id);
    assert_eq!(history[0].sku, "W-1");
    assert_eq!(
        history[0].kind,
        TransactionKind::QuantityAdjusted {
            adjustment_type: Direction::Increase,
            adjustment_amount: 5,
            old_quantity: 10,
            new_quantity: 15,
        }
    );
}

#[tokio::test]
async fn test_edit_sku_uniqueness_excludes_self() {
    let (system, _) = start();
    let widget = system.add_product(widget()).await.unwrap();
    system
        .add_product(ProductDraft::new("Gadget", "5", "G-1", "3"))
        .await
        .unwrap();

    let err = system
        .edit_product(widget.id.clone(), ProductDraft::new("Widget", "9.99", "g-1", "10"))
        .await
        .unwrap_err();
    assert_eq!(validation(err), ValidationError::DuplicateSku);

    let edited = system
        .edit_product(widget.id.clone(), ProductDraft::new("Widget Pro", "12.50", "W-1", "10"))
        .await
        .expect("Failed to edit");
    assert_eq!(edited.id, widget.id);
    assert_eq!(edited.created_at, widget.created_at);
    assert_eq!(edited.name, "Widget Pro");

    // Order is preserved and the ledger is untouched
    let names: Vec<String> = system.products().await.unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Widget Pro", "Gadget"]);
    assert!(system.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_unknown_id_is_not_found() {
    let (system, _) = start();

    let err = system
        .edit_product(stockroom::model::ProductId("404".into()), widget())
        .await
        .unwrap_err();
    assert_eq!(validation(err), ValidationError::NotFound("404".into()));
}

#[tokio::test]
async fn test_product_collection_round_trips_through_store() {
    let (system, store) = start();
    system.add_product(widget()).await.unwrap();
    system
        .add_product(ProductDraft::new("Gadget", "0.5", "G-1", "3"))
        .await
        .unwrap();
    // Long mantissa: the stored value must parse back to the same f64
    let precise = system
        .add_product(ProductDraft::new("Gauge", "11.0000009122838461", "P-1", "1"))
        .await
        .unwrap();
    let stored = system.products().await.unwrap();

    let repo = DocumentRepository::<Product>::new(store.clone(), PRODUCTS_KEY);
    let loaded = repo.load_all().await.unwrap();
    assert_eq!(loaded, stored);
    assert_eq!(loaded[2], precise);

    repo.save_all(&loaded).await.unwrap();
    assert_eq!(repo.load_all().await.unwrap(), stored);

    let raw = store.get(PRODUCTS_KEY).await.unwrap().unwrap();
    assert!(raw.contains("\"createdAt\""));
}

#[tokio::test]
async fn test_end_to_end_widget_scenario() {
    let (system, _) = start();

    // 1. Add Widget with 10 in stock
    system.add_product(widget()).await.expect("Failed to add product");

    // 2. Sell 3
    let outcome = system
        .adjust_stock(AdjustmentRequest::new("W-1", "3", Direction::Decrease))
        .await
        .expect("Failed to adjust");
    assert_eq!(outcome.new_quantity, 7);
    let history = system.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0].kind,
        TransactionKind::QuantityAdjusted {
            adjustment_type: Direction::Decrease,
            adjustment_amount: 3,
            old_quantity: 10,
            new_quantity: 7,
        }
    );

    // 3. Try to sell 20: rejected, nothing changes
    let err = system
        .adjust_stock(AdjustmentRequest::new("W-1", "20", Direction::Decrease))
        .await
        .unwrap_err();
    assert!(matches!(validation(err), ValidationError::NegativeResult { .. }));
    assert_eq!(system.products().await.unwrap()[0].quantity, 7);
    assert_eq!(system.history().await.unwrap().len(), 1);

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_ledger_snapshot_survives_product_edit() {
    let (system, _) = start();
    let product = system.add_product(widget()).await.unwrap();
    system
        .adjust_stock(AdjustmentRequest::new("W-1", "2", Direction::Decrease))
        .await
        .unwrap();

    system
        .edit_product(product.id.clone(), ProductDraft::new("Sprocket", "9.99", "S-9", "8"))
        .await
        .expect("Failed to edit");

    let history = system.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_id, product.id);
    assert_eq!(history[0].product_name, "Widget");
    assert_eq!(history[0].sku, "W-1");
}

#[tokio::test]
async fn test_tap_reports_workflow_outcome_after_display_cleared() {
    let settings = Settings {
        notification_display_ms: 1,
        ..Settings::default()
    };
    let system = InventorySystem::new(Arc::new(MemoryStore::new()), &settings);
    let mut tap = system.notification_tap();

    system.add_product(widget()).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert!(system.notifications().borrow().is_none());
    let reported = tap.try_recv().expect("Expected the workflow notification");
    assert_eq!(reported.message, "Product added successfully!");
    assert_eq!(reported.severity, Severity::Success);
}

#[tokio::test]
async fn test_ledger_is_newest_first() {
    let (system, _) = start();
    system.add_product(widget()).await.unwrap();

    for amount in ["1", "2", "3"] {
        system
            .adjust_stock(AdjustmentRequest::new("W-1", amount, Direction::Increase))
            .await
            .unwrap();
    }

    let amounts: Vec<u32> = system
        .history()
        .await
        .unwrap()
        .into_iter()
        .map(|tx| match tx.kind {
            TransactionKind::QuantityAdjusted {
                adjustment_amount, ..
            } => adjustment_amount,
            other => panic!("unexpected record {other:?}"),
        })
        .collect();
    assert_eq!(amounts, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_product_additions_are_recorded_when_enabled() {
    let settings = Settings {
        record_product_additions: true,
        ..quick_settings()
    };
    let system = InventorySystem::new(Arc::new(MemoryStore::new()), &settings);

    let product = system.add_product(widget()).await.unwrap();

    let history = system.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_id, product.id);
    assert_eq!(
        history[0].kind,
        TransactionKind::ProductAdded {
            price: 9.99,
            quantity: 10
        }
    );
}

#[tokio::test]
async fn test_users_are_validated_and_listed_in_order() {
    let (system, _) = start();

    let err = system.add_user(UserDraft::new("Ann", "  ")).await.unwrap_err();
    assert_eq!(validation(err), ValidationError::MissingField("email"));

    system
        .add_user(UserDraft::new(" Ann ", "ann@example.com"))
        .await
        .expect("Failed to add user");
    system
        .add_user(UserDraft::new("Bob", "bob@example.com"))
        .await
        .expect("Failed to add user");

    let users = system.users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Ann");
    assert_eq!(users[1].email, "bob@example.com");
    assert!(users[0].id.0.parse::<i64>().unwrap() < users[1].id.0.parse::<i64>().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_workflows_notify_outcome() {
    let system = InventorySystem::new(Arc::new(MemoryStore::new()), &Settings::default());
    let mut shown = system.notifications();

    system.add_product(widget()).await.unwrap();
    shown.changed().await.unwrap();
    let first = shown.borrow_and_update().clone().expect("Expected a notification");
    assert_eq!(first.message, "Product added successfully!");
    assert_eq!(first.severity, Severity::Success);

    // Wait for the first message to clear before triggering the next one
    while shown.borrow().is_some() {
        shown.changed().await.unwrap();
    }

    system
        .adjust_stock(AdjustmentRequest::new("W-1", "5", Direction::Increase))
        .await
        .unwrap();
    let second = loop {
        shown.changed().await.unwrap();
        if let Some(n) = shown.borrow_and_update().clone() {
            break n;
        }
    };
    assert_eq!(second.message, "Quantity increased by 5. New quantity: 15");

    while shown.borrow().is_some() {
        shown.changed().await.unwrap();
    }

    let _ = system
        .add_product(ProductDraft::new("Widget", "abc", "W-9", "1"))
        .await;
    let third = loop {
        shown.changed().await.unwrap();
        if let Some(n) = shown.borrow_and_update().clone() {
            break n;
        }
    };
    assert_eq!(
        third.message,
        "Please enter a valid price (numbers only, decimals allowed)"
    );
    assert_eq!(third.severity, Severity::Error);
}
