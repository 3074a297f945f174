//! In-memory repository fakes backing the service-level tests.
//!
//! One `MemoryStore` implements every repository trait over plain
//! vectors, so the real service implementations run unchanged against
//! it. Failure flags let tests inject store faults at specific points.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use orderdesk::domain::{
    ActivityLogEntry, Credential, Identity, NewCredential, NewLogEntry, NewOrder, NewProduct,
    NewProfile, Order, OrderRow, OrderSnapshot, Product, User, UserRole,
};
use orderdesk::errors::{AppError, AppResult};
use orderdesk::infra::{
    ActivityLogRepository, CredentialRepository, OrderRepository, ProductRepository, UnitOfWork,
    UserRepository,
};
use orderdesk::services::{
    ActivityReader, OrderManager, ProductManager, UserManager,
};

/// Shared in-memory backing store for every repository fake.
#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<Vec<User>>,
    pub credentials: Mutex<Vec<Credential>>,
    pub products: Mutex<Vec<Product>>,
    pub orders: Mutex<Vec<Order>>,
    pub logs: Mutex<Vec<ActivityLogEntry>>,
    /// Make the next activity log insert fail
    pub fail_next_log_insert: AtomicBool,
    /// Make the next profile insert fail
    pub fail_next_profile_insert: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn log_count(&self) -> usize {
        self.logs.lock().unwrap().len()
    }

    pub fn order_by_id(&self, id: Uuid) -> Option<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn insert(&self, profile: NewProfile) -> AppResult<User> {
        if self.fail_next_profile_insert.swap(false, Ordering::SeqCst) {
            return Err(AppError::internal("injected profile insert failure"));
        }

        let now = Utc::now();
        let user = User {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            role: profile.role,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: String,
        email: String,
        role: Option<UserRole>,
    ) -> AppResult<u64> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.name = name;
                user.email = email;
                if let Some(role) = role {
                    user.role = role;
                }
                user.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<u64> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.role = role;
                user.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok((before - users.len()) as u64)
    }
}

#[async_trait]
impl CredentialRepository for MemoryStore {
    async fn insert(&self, credential: NewCredential) -> AppResult<Credential> {
        let record = Credential {
            id: credential.id,
            email: credential.email,
            password_hash: credential.password_hash,
            created_at: Utc::now(),
        };
        self.credentials.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn update_email(&self, id: Uuid, email: String) -> AppResult<u64> {
        let mut credentials = self.credentials.lock().unwrap();
        match credentials.iter_mut().find(|c| c.id == id) {
            Some(credential) => {
                credential.email = email;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let mut credentials = self.credentials.lock().unwrap();
        let before = credentials.len();
        credentials.retain(|c| c.id != id);
        Ok((before - credentials.len()) as u64)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let record = Product {
            id: Uuid::new_v4(),
            name: product.name,
            unit_price: product.unit_price,
            created_at: Utc::now(),
        };
        self.products.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let mut products = self.products.lock().unwrap().clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn update(&self, id: Uuid, name: String, unit_price: Decimal) -> AppResult<u64> {
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.name = name;
                product.unit_price = unit_price;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok((before - products.len()) as u64)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert(&self, new_order: NewOrder) -> AppResult<Order> {
        let order = Order {
            id: Uuid::new_v4(),
            product_id: new_order.product_id,
            customer_id: new_order.customer_id,
            quantity: new_order.quantity,
            unit_price: new_order.unit_price,
            delivery_address: new_order.delivery_address,
            status: new_order.status,
            created_at: Utc::now(),
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn find_snapshot(&self, id: Uuid) -> AppResult<Option<OrderSnapshot>> {
        let orders = self.orders.lock().unwrap();
        let Some(order) = orders.iter().find(|o| o.id == id) else {
            return Ok(None);
        };

        let customer_name = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == order.customer_id)
            .map(|u| u.name.clone());

        Ok(Some(OrderSnapshot {
            id: order.id,
            status: order.status,
            quantity: order.quantity,
            customer_id: order.customer_id,
            customer_name,
        }))
    }

    async fn find_row(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<Option<OrderRow>> {
        let orders = self.orders.lock().unwrap();
        let Some(order) = orders
            .iter()
            .find(|o| o.id == id && owner.map_or(true, |owner| o.customer_id == owner))
        else {
            return Ok(None);
        };

        Ok(Some(self.flatten(order)))
    }

    async fn list(&self, limit: u64, owner: Option<Uuid>) -> AppResult<Vec<OrderRow>> {
        let mut orders = self.orders.lock().unwrap().clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders
            .iter()
            .filter(|o| owner.map_or(true, |owner| o.customer_id == owner))
            .take(limit as usize)
            .map(|o| self.flatten(o))
            .collect())
    }

    async fn update_details(
        &self,
        id: Uuid,
        quantity: i32,
        address: String,
        owner: Option<Uuid>,
    ) -> AppResult<u64> {
        let mut orders = self.orders.lock().unwrap();
        match orders
            .iter_mut()
            .find(|o| o.id == id && owner.map_or(true, |owner| o.customer_id == owner))
        {
            Some(order) => {
                order.quantity = quantity;
                order.delivery_address = address;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: orderdesk::domain::OrderStatus,
    ) -> AppResult<u64> {
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<u64> {
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| !(o.id == id && owner.map_or(true, |owner| o.customer_id == owner)));
        Ok((before - orders.len()) as u64)
    }

    async fn count_for_product(&self, product_id: Uuid) -> AppResult<u64> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.product_id == product_id)
            .count() as u64)
    }
}

impl MemoryStore {
    fn flatten(&self, order: &Order) -> OrderRow {
        let product = self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == order.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let customer = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == order.customer_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();

        OrderRow {
            id: order.id,
            product,
            customer,
            quantity: order.quantity,
            unit_price: order.unit_price,
            total: order.total(),
            delivery_address: order.delivery_address.clone(),
            status: order.status,
            created_at: order.created_at,
        }
    }
}

#[async_trait]
impl ActivityLogRepository for MemoryStore {
    async fn insert(&self, entry: NewLogEntry) -> AppResult<ActivityLogEntry> {
        if self.fail_next_log_insert.swap(false, Ordering::SeqCst) {
            return Err(AppError::internal("injected log insert failure"));
        }

        let record = ActivityLogEntry {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            action: entry.action,
            description: entry.description,
            order_id: entry.order_id,
            order_ref: entry.order_ref,
            customer_ref: entry.customer_ref,
            created_at: Utc::now(),
        };
        self.logs.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_recent(
        &self,
        limit: u64,
        order_id: Option<Uuid>,
    ) -> AppResult<Vec<ActivityLogEntry>> {
        let mut logs = self.logs.lock().unwrap().clone();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(logs
            .into_iter()
            .filter(|l| order_id.map_or(true, |id| l.order_id == Some(id)))
            .take(limit as usize)
            .collect())
    }
}

/// Unit of Work over the shared in-memory store.
pub struct TestUnitOfWork {
    pub store: Arc<MemoryStore>,
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    fn credentials(&self) -> Arc<dyn CredentialRepository> {
        self.store.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.store.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.store.clone()
    }

    fn activity(&self) -> Arc<dyn ActivityLogRepository> {
        self.store.clone()
    }
}

// =============================================================================
// Seeding and construction helpers
// =============================================================================

pub fn seed_user(store: &Arc<MemoryStore>, name: &str, role: UserRole) -> Identity {
    let id = Uuid::new_v4();
    let now = Utc::now();
    store.users.lock().unwrap().push(User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        role,
        created_at: now,
        updated_at: now,
    });
    Identity::new(id)
}

pub fn seed_product(store: &Arc<MemoryStore>, name: &str, unit_price: Decimal) -> Uuid {
    let id = Uuid::new_v4();
    store.products.lock().unwrap().push(Product {
        id,
        name: name.to_string(),
        unit_price,
        created_at: Utc::now(),
    });
    id
}

pub fn order_service(store: &Arc<MemoryStore>) -> OrderManager<TestUnitOfWork> {
    OrderManager::new(Arc::new(TestUnitOfWork {
        store: store.clone(),
    }))
}

pub fn user_service(store: &Arc<MemoryStore>) -> UserManager<TestUnitOfWork> {
    UserManager::new(Arc::new(TestUnitOfWork {
        store: store.clone(),
    }))
}

pub fn product_service(store: &Arc<MemoryStore>) -> ProductManager<TestUnitOfWork> {
    ProductManager::new(Arc::new(TestUnitOfWork {
        store: store.clone(),
    }))
}

pub fn activity_service(store: &Arc<MemoryStore>) -> ActivityReader<TestUnitOfWork> {
    ActivityReader::new(Arc::new(TestUnitOfWork {
        store: store.clone(),
    }))
}
