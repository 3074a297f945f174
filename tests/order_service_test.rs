//! Order service tests - lifecycle, authorization, and the audit side effect.

mod support;

use rust_decimal::Decimal;
use uuid::Uuid;

use orderdesk::domain::{CreateOrderInput, OrderStatus, UserRole};
use orderdesk::errors::AppError;
use orderdesk::infra::ProductRepository;
use orderdesk::services::OrderService;

use support::{order_service, seed_product, seed_user, MemoryStore};

fn create_input(product_id: Uuid) -> CreateOrderInput {
    CreateOrderInput {
        product_id,
        quantity: 3,
        delivery_address: "Main St 42".to_string(),
        customer_id: None,
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_snapshots_price_and_logs_once() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();

    let order = store.order_by_id(order_id).unwrap();
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.unit_price, Decimal::new(1000, 2));
    assert_eq!(order.total(), Decimal::new(3000, 2)); // 30.00
    assert_eq!(order.customer_id, caller.id);

    let logs = store.logs.lock().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "CREATED");
    assert_eq!(logs[0].description, "Order created");
    assert_eq!(logs[0].actor_id, caller.id);
    assert_eq!(logs[0].order_id, Some(order_id));
    assert_eq!(logs[0].customer_ref.as_deref(), Some("John Doe"));
}

#[tokio::test]
async fn later_catalog_price_change_leaves_the_order_untouched() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();

    store
        .update(product_id, "Espresso Machine".to_string(), Decimal::new(9900, 2))
        .await
        .unwrap();

    let order = store.order_by_id(order_id).unwrap();
    assert_eq!(order.unit_price, Decimal::new(1000, 2));
    assert_eq!(order.total(), Decimal::new(3000, 2));
}

#[tokio::test]
async fn create_rejects_bad_quantity_and_address() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let mut input = create_input(product_id);
    input.quantity = 0;
    let err = service.create_order(&caller, input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut input = create_input(product_id);
    input.delivery_address = "  ab  ".to_string();
    let err = service.create_order(&caller, input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(store.orders.lock().unwrap().is_empty());
    assert_eq!(store.log_count(), 0);
}

#[tokio::test]
async fn create_with_unknown_product_is_not_found() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let service = order_service(&store);

    let err = service
        .create_order(&caller, create_input(Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("Product")));
    assert_eq!(store.log_count(), 0);
}

#[tokio::test]
async fn only_admins_may_choose_the_customer() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let other = seed_user(&store, "Jane Roe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let mut input = create_input(product_id);
    input.customer_id = Some(other.id);

    let err = service.create_order(&caller, input).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(store.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn admin_creates_on_behalf_of_a_customer() {
    let store = MemoryStore::new();
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let customer = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let mut input = create_input(product_id);
    input.customer_id = Some(customer.id);

    let order_id = service.create_order(&admin, input).await.unwrap();

    let order = store.order_by_id(order_id).unwrap();
    assert_eq!(order.customer_id, customer.id);

    let logs = store.logs.lock().unwrap();
    assert_eq!(logs[0].actor_id, admin.id);
    assert_eq!(logs[0].customer_ref.as_deref(), Some("John Doe"));
}

#[tokio::test]
async fn an_admin_account_cannot_be_the_customer() {
    let store = MemoryStore::new();
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let other_admin = seed_user(&store, "Bob Boss", UserRole::Admin);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let mut input = create_input(product_id);
    input.customer_id = Some(other_admin.id);

    let err = service.create_order(&admin, input).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn repeated_creates_yield_distinct_orders() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let first = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();
    let second = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(store.orders.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn create_still_succeeds_when_the_log_append_fails() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    store
        .fail_next_log_insert
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let order_id = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();

    assert!(store.order_by_id(order_id).is_some());
    assert_eq!(store.log_count(), 0);
}

#[tokio::test]
async fn created_order_reads_back_as_created() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();

    let row = service.get_order(&caller, order_id).await.unwrap();
    assert_eq!(row.quantity, 3);
    assert_eq!(row.delivery_address, "Main St 42");
    assert_eq!(row.status, OrderStatus::Created);
    assert_eq!(row.product, "Espresso Machine");
    assert_eq!(row.total, Decimal::new(3000, 2));
}

// =============================================================================
// Update details
// =============================================================================

#[tokio::test]
async fn update_details_overwrites_without_logging() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();
    let logs_after_create = store.log_count();

    service
        .update_details(&caller, order_id, 7, "Elm Street 13")
        .await
        .unwrap();

    let order = store.order_by_id(order_id).unwrap();
    assert_eq!(order.quantity, 7);
    assert_eq!(order.delivery_address, "Elm Street 13");
    assert_eq!(order.unit_price, Decimal::new(1000, 2));
    assert_eq!(order.status, OrderStatus::Created);

    // Detail edits must not produce activity entries
    assert_eq!(store.log_count(), logs_after_create);
}

#[tokio::test]
async fn update_details_by_a_stranger_does_not_resolve_the_order() {
    let store = MemoryStore::new();
    let owner = seed_user(&store, "John Doe", UserRole::User);
    let stranger = seed_user(&store, "Jane Roe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&owner, create_input(product_id))
        .await
        .unwrap();

    let err = service
        .update_details(&stranger, order_id, 9, "Elm Street 13")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("Order")));
    assert_eq!(store.order_by_id(order_id).unwrap().quantity, 3);
}

// =============================================================================
// Change status
// =============================================================================

#[tokio::test]
async fn change_status_requires_admin() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();
    let logs_after_create = store.log_count();

    let err = service
        .change_status(&caller, order_id, "SHIPPED")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(store.order_by_id(order_id).unwrap().status, OrderStatus::Created);
    assert_eq!(store.log_count(), logs_after_create);
}

#[tokio::test]
async fn any_status_may_move_to_any_other() {
    let store = MemoryStore::new();
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let customer = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let mut input = create_input(product_id);
    input.customer_id = Some(customer.id);
    let order_id = service.create_order(&admin, input).await.unwrap();

    // No adjacency constraint: DELIVERED back to CREATED is fine too
    for status in ["DELIVERED", "CREATED", "CANCELLED", "PROCESSING", "SHIPPED"] {
        service.change_status(&admin, order_id, status).await.unwrap();
        assert_eq!(
            store.order_by_id(order_id).unwrap().status,
            OrderStatus::from(status)
        );
    }
}

#[tokio::test]
async fn change_status_logs_the_old_and_new_value() {
    let store = MemoryStore::new();
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let customer = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let mut input = create_input(product_id);
    input.customer_id = Some(customer.id);
    let order_id = service.create_order(&admin, input).await.unwrap();

    service
        .change_status(&admin, order_id, "SHIPPED")
        .await
        .unwrap();

    let logs = store.logs.lock().unwrap();
    let entry = logs.last().unwrap();
    assert_eq!(entry.action, "STATUS_CHANGED");
    assert!(entry.description.contains("CREATED"));
    assert!(entry.description.contains("SHIPPED"));
    assert_eq!(entry.customer_ref.as_deref(), Some("John Doe"));
}

#[tokio::test]
async fn change_status_on_unknown_order_writes_no_log() {
    let store = MemoryStore::new();
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let service = order_service(&store);

    let err = service
        .change_status(&admin, Uuid::new_v4(), "SHIPPED")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("Order")));
    assert_eq!(store.log_count(), 0);
}

#[tokio::test]
async fn change_status_outside_the_enum_echoes_the_allowed_set() {
    let store = MemoryStore::new();
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let customer = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let mut input = create_input(product_id);
    input.customer_id = Some(customer.id);
    let order_id = service.create_order(&admin, input).await.unwrap();
    let logs_after_create = store.log_count();

    let err = service
        .change_status(&admin, order_id, "SENT")
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("CREATED, PROCESSING, SHIPPED, DELIVERED, CANCELLED"));
    assert_eq!(store.order_by_id(order_id).unwrap().status, OrderStatus::Created);
    assert_eq!(store.log_count(), logs_after_create);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn owner_delete_logs_the_final_state_and_removes_the_row() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&caller, create_input(product_id))
        .await
        .unwrap();
    let logs_after_create = store.log_count();

    service.delete_order(&caller, order_id).await.unwrap();

    assert!(store.order_by_id(order_id).is_none());
    assert_eq!(store.log_count(), logs_after_create + 1);

    let logs = store.logs.lock().unwrap();
    let entry = logs.last().unwrap();
    assert_eq!(entry.action, "DELETED");
    assert!(entry.description.contains("status: CREATED"));
    assert!(entry.description.contains("quantity: 3"));
    // Denormalized references survive the deleted row
    assert_eq!(entry.order_ref.as_deref(), Some(order_id.to_string().as_str()));
    assert_eq!(entry.customer_ref.as_deref(), Some("John Doe"));
}

#[tokio::test]
async fn stranger_delete_is_forbidden_and_writes_no_log() {
    let store = MemoryStore::new();
    let owner = seed_user(&store, "John Doe", UserRole::User);
    let stranger = seed_user(&store, "Jane Roe", UserRole::User);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&owner, create_input(product_id))
        .await
        .unwrap();
    let logs_after_create = store.log_count();

    let err = service.delete_order(&stranger, order_id).await.unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(store.order_by_id(order_id).is_some());
    assert_eq!(store.log_count(), logs_after_create);
}

#[tokio::test]
async fn admin_may_delete_any_order() {
    let store = MemoryStore::new();
    let owner = seed_user(&store, "John Doe", UserRole::User);
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&owner, create_input(product_id))
        .await
        .unwrap();

    service.delete_order(&admin, order_id).await.unwrap();
    assert!(store.order_by_id(order_id).is_none());
}

#[tokio::test]
async fn deleting_an_unknown_order_is_not_found() {
    let store = MemoryStore::new();
    let caller = seed_user(&store, "John Doe", UserRole::User);
    let service = order_service(&store);

    let err = service
        .delete_order(&caller, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("Order")));
    assert_eq!(store.log_count(), 0);
}

// =============================================================================
// Read scoping
// =============================================================================

#[tokio::test]
async fn non_admins_only_see_their_own_orders() {
    let store = MemoryStore::new();
    let owner = seed_user(&store, "John Doe", UserRole::User);
    let stranger = seed_user(&store, "Jane Roe", UserRole::User);
    let admin = seed_user(&store, "Ada Admin", UserRole::Admin);
    let product_id = seed_product(&store, "Espresso Machine", Decimal::new(1000, 2));
    let service = order_service(&store);

    let order_id = service
        .create_order(&owner, create_input(product_id))
        .await
        .unwrap();

    assert!(service.get_order(&stranger, order_id).await.is_err());
    assert!(service.list_orders(&stranger, None).await.unwrap().is_empty());

    assert!(service.get_order(&admin, order_id).await.is_ok());
    assert_eq!(service.list_orders(&admin, None).await.unwrap().len(), 1);
}
