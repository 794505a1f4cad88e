use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::{
    Cart as DomainCart, CartItem as DomainCartItem, CartLine as DomainCartLine,
    CheckoutCart as DomainCheckoutCart, NewCartItem as DomainNewCartItem,
    UpdateCartItem as DomainUpdateCartItem,
};
use crate::models::product::Product;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::carts)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(belongs_to(Cart, foreign_key = cart_id))]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_addition_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::carts)]
pub struct NewCart {
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem {
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_addition_cents: i64,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct UpdateCartItem {
    pub quantity: i32,
    pub updated_at: NaiveDateTime,
}

impl From<CartItem> for DomainCartItem {
    fn from(value: CartItem) -> Self {
        Self {
            id: value.id,
            cart_id: value.cart_id,
            product_id: value.product_id,
            quantity: value.quantity,
            price_at_addition_cents: value.price_at_addition_cents,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<(Cart, Vec<CartItem>)> for DomainCart {
    fn from((cart, items): (Cart, Vec<CartItem>)) -> Self {
        Self {
            id: cart.id,
            user_id: cart.user_id,
            items: items.into_iter().map(Into::into).collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

impl From<(Cart, Vec<(CartItem, Product)>)> for DomainCheckoutCart {
    fn from((cart, rows): (Cart, Vec<(CartItem, Product)>)) -> Self {
        Self {
            id: cart.id,
            user_id: cart.user_id,
            lines: rows
                .into_iter()
                .map(|(item, product)| DomainCartLine {
                    item: item.into(),
                    product: product.into(),
                })
                .collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

impl From<&DomainNewCartItem> for NewCartItem {
    fn from(value: &DomainNewCartItem) -> Self {
        Self {
            cart_id: value.cart_id,
            product_id: value.product_id,
            quantity: value.quantity,
            price_at_addition_cents: value.price_at_addition_cents,
            updated_at: value.updated_at,
        }
    }
}

impl From<&DomainUpdateCartItem> for UpdateCartItem {
    fn from(value: &DomainUpdateCartItem) -> Self {
        Self {
            quantity: value.quantity,
            updated_at: value.updated_at,
        }
    }
}
