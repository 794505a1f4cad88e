use mockall::mock;

use super::{
    CartReader, CartWriter, OrderReader, OrderWriter, ProductReader, ProductWriter, UserReader,
    UserWriter,
};
use crate::domain::{
    cart::{Cart, CartItem, CheckoutCart, NewCartItem, UpdateCartItem},
    order::{NewOrder, Order, OrderListQuery},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct, UpsertCounts},
    user::{NewUser, User},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn get_product_by_name(&self, name: &str, brand: &str, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, hub_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn upsert_products(&self, products: &[NewProduct]) -> RepositoryResult<UpsertCounts>;
    }
}

mock! {
    pub CartReader {}

    impl CartReader for CartReader {
        fn get_cart_item(&self, item_id: i32) -> RepositoryResult<Option<CartItem>>;
    }
}

mock! {
    pub CartWriter {}

    impl CartWriter for CartWriter {
        fn get_or_create_cart(&self, user_id: i32) -> RepositoryResult<Cart>;
        fn load_cart_for_checkout(&self, user_id: i32) -> RepositoryResult<CheckoutCart>;
        fn upsert_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem>;
        fn update_cart_item(&self, item_id: i32, cart_id: i32, updates: &UpdateCartItem) -> RepositoryResult<CartItem>;
        fn delete_cart_item(&self, item_id: i32, cart_id: i32) -> RepositoryResult<()>;
        fn clear_cart(&self, cart_id: i32) -> RepositoryResult<usize>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    }
}
