use diesel::RunQueryDsl;
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    cart::{Cart, CartItem, CheckoutCart, NewCartItem, UpdateCartItem},
    order::{NewOrder, Order, OrderListQuery},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct, UpsertCounts},
    user::{NewUser, User},
};

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

#[cfg(test)]
pub mod mock;

/// How long a connection waits on a locked SQLite database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        let mut conn = self.pool.get()?;
        diesel::sql_query(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))
            .execute(&mut conn)?;
        Ok(conn)
    }
}

/// Read-only access to shopper records.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
}

/// Write operations over shopper records.
pub trait UserWriter {
    /// Insert the user or refresh the name of the existing `(hub_id, email)` row.
    fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Delete the user together with their cart, cart items and orders.
    fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
}

/// Catalog lookups.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
    fn get_product_by_name(
        &self,
        name: &str,
        brand: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Catalog maintenance.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Insert or overwrite products keyed by `(hub_id, name, brand)` in one transaction.
    fn upsert_products(&self, products: &[NewProduct]) -> RepositoryResult<UpsertCounts>;
}

/// Read-only access to cart lines.
pub trait CartReader {
    fn get_cart_item(&self, item_id: i32) -> RepositoryResult<Option<CartItem>>;
}

/// Cart aggregate storage. Every method runs in a single immediate transaction,
/// so concurrent writers queue on the database lock instead of failing.
pub trait CartWriter {
    /// Return the user's cart, creating an empty one on first access.
    fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
    /// Like [`CartWriter::get_or_create_cart`], with every line joined to its current product.
    fn load_cart_for_checkout(&self, user_id: i32) -> RepositoryResult<CheckoutCart>;
    /// Insert the line, or add to the quantity of the existing `(cart, product)` line.
    fn upsert_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
    fn update_cart_item(
        &self,
        item_id: i32,
        cart_id: i32,
        updates: &UpdateCartItem,
    ) -> RepositoryResult<CartItem>;
    fn delete_cart_item(&self, item_id: i32, cart_id: i32) -> RepositoryResult<()>;
    /// Remove every line of the cart, returning how many were deleted.
    fn clear_cart(&self, cart_id: i32) -> RepositoryResult<usize>;
}

/// Read-only access to recorded orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over recorded orders.
pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
}
