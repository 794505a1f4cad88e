//! Repository double and fixtures shared by the service unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::{
    cart::{Cart, CartItem, CartLine, CheckoutCart, NewCartItem, UpdateCartItem},
    order::{NewOrder, Order, OrderListQuery},
    product::{NewProduct, Product, ProductListQuery, ProductType, UpdateProduct, UpsertCounts},
    user::{NewUser, User},
};
use crate::repository::mock::{
    MockCartReader, MockCartWriter, MockOrderReader, MockOrderWriter, MockProductReader,
    MockProductWriter, MockUserReader, MockUserWriter,
};
use crate::repository::{
    CartReader, CartWriter, OrderReader, OrderWriter, ProductReader, ProductWriter, UserReader,
    UserWriter,
};

pub const HUB_ID: i32 = 7;

pub fn datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

pub fn user(id: i32) -> User {
    User {
        id,
        hub_id: HUB_ID,
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
    }
}

pub fn identity(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "ana".to_string(),
        email: "Ana@Example.com".to_string(),
        hub_id: HUB_ID,
        name: "Ana".to_string(),
        roles: roles.iter().map(|role| role.to_string()).collect(),
        exp: 0,
    }
}

pub fn product(id: i32, name: &str, price_cents: i64, stock_quantity: i32) -> Product {
    Product {
        id,
        hub_id: HUB_ID,
        name: name.to_string(),
        brand: "Lattafa".to_string(),
        product_type: ProductType::Sealed,
        size_ml: 100,
        price_cents,
        stock_quantity,
        description: None,
        fragrance_family: None,
        notes_top: None,
        notes_heart: None,
        notes_base: None,
        image_url: None,
        is_active: true,
        created_at: datetime(),
        updated_at: datetime(),
    }
}

pub fn cart_item(id: i32, cart_id: i32, product_id: i32, quantity: i32, price: i64) -> CartItem {
    CartItem {
        id,
        cart_id,
        product_id,
        quantity,
        price_at_addition_cents: price,
        created_at: datetime(),
        updated_at: datetime(),
    }
}

pub fn cart(id: i32, user_id: i32, items: Vec<CartItem>) -> Cart {
    Cart {
        id,
        user_id,
        items,
        created_at: datetime(),
        updated_at: datetime(),
    }
}

pub fn checkout_cart(id: i32, user_id: i32, lines: Vec<(CartItem, Product)>) -> CheckoutCart {
    CheckoutCart {
        id,
        user_id,
        lines: lines
            .into_iter()
            .map(|(item, product)| CartLine { item, product })
            .collect(),
        created_at: datetime(),
        updated_at: datetime(),
    }
}

/// Combines the per-trait mocks into a single repository.
#[derive(Default)]
pub struct FakeRepo {
    pub user_reader: MockUserReader,
    pub user_writer: MockUserWriter,
    pub product_reader: MockProductReader,
    pub product_writer: MockProductWriter,
    pub cart_reader: MockCartReader,
    pub cart_writer: MockCartWriter,
    pub order_reader: MockOrderReader,
    pub order_writer: MockOrderWriter,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserReader for FakeRepo {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        self.user_reader.get_user_by_id(id)
    }

    fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>> {
        self.user_reader.get_user_by_email(email, hub_id)
    }
}

impl UserWriter for FakeRepo {
    fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        self.user_writer.upsert_user(new_user)
    }

    fn delete_user(&self, user_id: i32) -> RepositoryResult<()> {
        self.user_writer.delete_user(user_id)
    }
}

impl ProductReader for FakeRepo {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>> {
        self.product_reader.get_product_by_id(id, hub_id)
    }

    fn get_product_by_name(
        &self,
        name: &str,
        brand: &str,
        hub_id: i32,
    ) -> RepositoryResult<Option<Product>> {
        self.product_reader.get_product_by_name(name, brand, hub_id)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        self.product_reader.list_products(query)
    }
}

impl ProductWriter for FakeRepo {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        self.product_writer.create_product(new_product)
    }

    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        self.product_writer
            .update_product(product_id, hub_id, updates)
    }

    fn upsert_products(&self, products: &[NewProduct]) -> RepositoryResult<UpsertCounts> {
        self.product_writer.upsert_products(products)
    }
}

impl CartReader for FakeRepo {
    fn get_cart_item(&self, item_id: i32) -> RepositoryResult<Option<CartItem>> {
        self.cart_reader.get_cart_item(item_id)
    }
}

impl CartWriter for FakeRepo {
    fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<Cart> {
        self.cart_writer.get_or_create_cart(user_id)
    }

    fn load_cart_for_checkout(&self, user_id: i32) -> RepositoryResult<CheckoutCart> {
        self.cart_writer.load_cart_for_checkout(user_id)
    }

    fn upsert_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem> {
        self.cart_writer.upsert_cart_item(new_item)
    }

    fn update_cart_item(
        &self,
        item_id: i32,
        cart_id: i32,
        updates: &UpdateCartItem,
    ) -> RepositoryResult<CartItem> {
        self.cart_writer.update_cart_item(item_id, cart_id, updates)
    }

    fn delete_cart_item(&self, item_id: i32, cart_id: i32) -> RepositoryResult<()> {
        self.cart_writer.delete_cart_item(item_id, cart_id)
    }

    fn clear_cart(&self, cart_id: i32) -> RepositoryResult<usize> {
        self.cart_writer.clear_cart(cart_id)
    }
}

impl OrderReader for FakeRepo {
    fn get_order_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<Order>> {
        self.order_reader.get_order_by_id(id, user_id)
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)> {
        self.order_reader.list_orders(query)
    }
}

impl OrderWriter for FakeRepo {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        self.order_writer.create_order(new_order)
    }
}
