//! In-memory store implementations for service tests.
//!
//! Each store mirrors the Postgres implementation's observable behavior,
//! including unique-index conflicts and timestamp bumping, so the services
//! can be exercised without a database. Stores are cheaply cloneable and
//! share state, letting one fixture hand the same catalog to several
//! services.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use bramble_core::{CartId, Email, Gender, OrderId, OrderStatus, ProductId, Quantity, UserId};

use crate::db::RepositoryError;
use crate::models::{
    Cart, CartItem, NewOrder, NewProduct, NewUser, Order, Product, ProductFilter, ProductPatch,
    ProductPayload, User, UserPatch,
};
use crate::services::carts::CartStore;
use crate::services::orders::OrderStore;
use crate::services::products::ProductStore;
use crate::services::users::UserStore;

/// A complete, valid product payload for tests to tweak.
pub fn sample_product_payload(name: &str, price: i64) -> ProductPayload {
    ProductPayload {
        product_image: Some("https://img.example.com/p.png".to_owned()),
        product_name: Some(name.to_owned()),
        category: Some("furniture".to_owned()),
        description: Some("A sample product".to_owned()),
        price: Some(Decimal::from(price)),
        ratings: Some(4.0),
        is_free_delivery: Some(false),
    }
}

struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

// Not derived: a derive would demand `T: Default` for no reason.
impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MemProducts {
    inner: Arc<Mutex<Table<Product>>>,
}

impl MemProducts {
    fn lock(&self) -> MutexGuard<'_, Table<Product>> {
        self.inner.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl ProductStore for MemProducts {
    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let table = self.lock();
        Ok(table
            .rows
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn find_one_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let table = self.lock();
        Ok(table
            .rows
            .iter()
            .find(|p| p.product_name == name)
            .cloned())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let table = self.lock();
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let mut table = self.lock();

        // the unique-index backstop
        if table
            .rows
            .iter()
            .any(|p| p.product_name == new.product_name)
        {
            return Err(RepositoryError::Conflict(
                "Product name already exists".to_owned(),
            ));
        }

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(table.next_id()),
            product_image: new.product_image,
            product_name: new.product_name,
            category: new.category,
            description: new.description,
            price: new.price,
            ratings: new.ratings,
            is_free_delivery: new.is_free_delivery,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(product.clone());
        Ok(product)
    }

    async fn find_by_id_and_update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut table = self.lock();

        if let Some(name) = &patch.product_name
            && table
                .rows
                .iter()
                .any(|p| p.id != id && &p.product_name == name)
        {
            return Err(RepositoryError::Conflict(
                "Product name already exists".to_owned(),
            ));
        }

        let Some(product) = table.rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(v) = patch.product_image {
            product.product_image = v;
        }
        if let Some(v) = patch.product_name {
            product.product_name = v;
        }
        if let Some(v) = patch.category {
            product.category = v;
        }
        if let Some(v) = patch.description {
            product.description = v;
        }
        if let Some(v) = patch.price {
            product.price = v;
        }
        if let Some(v) = patch.ratings {
            product.ratings = v;
        }
        if let Some(v) = patch.is_free_delivery {
            product.is_free_delivery = v;
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }

    async fn find_by_id_and_delete(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut table = self.lock();
        let pos = table.rows.iter().position(|p| p.id == id);
        Ok(pos.map(|i| table.rows.remove(i)))
    }
}

#[derive(Clone, Default)]
pub struct MemUsers {
    inner: Arc<Mutex<Table<User>>>,
}

impl MemUsers {
    fn lock(&self) -> MutexGuard<'_, Table<User>> {
        self.inner.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl UserStore for MemUsers {
    async fn find(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.lock().rows.clone())
    }

    async fn find_by_gender(&self, gender: Gender) -> Result<Vec<User>, RepositoryError> {
        let table = self.lock();
        Ok(table
            .rows
            .iter()
            .filter(|u| u.gender == gender)
            .cloned()
            .collect())
    }

    async fn find_one_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let table = self.lock();
        Ok(table.rows.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let table = self.lock();
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.lock();

        if table.rows.iter().any(|u| u.email == new.email) {
            return Err(RepositoryError::Conflict(
                "Email already registered".to_owned(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(table.next_id()),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            phone: new.phone,
            gender: new.gender,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id_and_update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, RepositoryError> {
        let mut table = self.lock();

        if let Some(email) = &patch.email
            && table.rows.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(RepositoryError::Conflict(
                "Email already registered".to_owned(),
            ));
        }

        let Some(user) = table.rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(v) = patch.name {
            user.name = v;
        }
        if let Some(v) = patch.email {
            user.email = v;
        }
        if let Some(v) = patch.password_hash {
            user.password_hash = v;
        }
        if let Some(v) = patch.phone {
            user.phone = v;
        }
        if let Some(v) = patch.gender {
            user.gender = v;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn find_by_id_and_delete(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let mut table = self.lock();
        let pos = table.rows.iter().position(|u| u.id == id);
        Ok(pos.map(|i| table.rows.remove(i)))
    }
}

#[derive(Clone, Default)]
pub struct MemCarts {
    inner: Arc<Mutex<Table<Cart>>>,
}

impl MemCarts {
    fn lock(&self) -> MutexGuard<'_, Table<Cart>> {
        self.inner.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl CartStore for MemCarts {
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let table = self.lock();
        Ok(table.rows.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let mut table = self.lock();

        if table.rows.iter().any(|c| c.user_id == user_id) {
            return Err(RepositoryError::Conflict(
                "Cart already exists".to_owned(),
            ));
        }

        let now = Utc::now();
        let cart = Cart {
            id: CartId::new(table.next_id()),
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        table.rows.push(cart.clone());
        Ok(cart)
    }

    async fn set_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let mut table = self.lock();
        let cart = table
            .rows
            .iter_mut()
            .find(|c| c.id == cart_id)
            .ok_or_else(|| RepositoryError::DataCorruption("unknown cart".to_owned()))?;

        match cart.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity = quantity,
            None => cart.items.push(CartItem {
                product_id,
                quantity,
            }),
        }
        cart.updated_at = Utc::now();
        Ok(())
    }

    async fn remove_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let mut table = self.lock();
        let Some(cart) = table.rows.iter_mut().find(|c| c.id == cart_id) else {
            return Ok(false);
        };

        let before = cart.items.len();
        cart.items.retain(|i| i.product_id != product_id);
        let removed = cart.items.len() < before;
        if removed {
            cart.updated_at = Utc::now();
        }
        Ok(removed)
    }

    async fn clear(&self, cart_id: CartId) -> Result<u64, RepositoryError> {
        let mut table = self.lock();
        let Some(cart) = table.rows.iter_mut().find(|c| c.id == cart_id) else {
            return Ok(0);
        };

        let removed = u64::try_from(cart.items.len()).unwrap_or(u64::MAX);
        cart.items.clear();
        cart.updated_at = Utc::now();
        Ok(removed)
    }
}

#[derive(Clone, Default)]
pub struct MemOrders {
    inner: Arc<Mutex<Table<Order>>>,
}

impl MemOrders {
    fn lock(&self) -> MutexGuard<'_, Table<Order>> {
        self.inner.lock().expect("lock poisoned")
    }
}

#[async_trait]
impl OrderStore for MemOrders {
    async fn create(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        let mut table = self.lock();
        let order = Order {
            id: OrderId::new(table.next_id()),
            user_id: new.user_id,
            status: OrderStatus::Placed,
            items: new.items,
            placed_at: Utc::now(),
            cancelled_at: None,
        };
        table.rows.push(order.clone());
        Ok(order)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let table = self.lock();
        let mut orders: Vec<Order> = table
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        // newest first; ids are monotonic within the fixture
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let table = self.lock();
        Ok(table.rows.iter().find(|o| o.id == id).cloned())
    }

    async fn cancel(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let mut table = self.lock();
        let Some(order) = table
            .rows
            .iter_mut()
            .find(|o| o.id == id && o.status == OrderStatus::Placed)
        else {
            return Ok(None);
        };

        order.status = OrderStatus::Cancelled;
        order.cancelled_at = Some(Utc::now());
        Ok(Some(order.clone()))
    }
}
