//! Cart mutations and the cart view.
//!
//! Every mutation re-reads the product so stock decisions use live catalog
//! state; the price captured on a cart line is only used for display and totals.

use pushkind_common::repository::errors::RepositoryError;
use serde::Serialize;
use validator::Validate;

pub use crate::domain::cart::calculate_total;
use crate::domain::cart::{CartItem, CartLine, CheckoutCart, NewCartItem, UpdateCartItem};
use crate::domain::money::cents_to_units;
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::forms::cart::{AddCartItemForm, UpdateCartItemForm};
use crate::repository::{CartReader, CartWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Payload returned by `GET /cart`.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub id: i32,
    pub items: Vec<CartItemView>,
    pub total_amount: f64,
    pub total_items: i64,
}

#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub id: i32,
    pub product: CartProductView,
    pub quantity: i32,
    pub price_at_addition: f64,
    pub subtotal: f64,
}

/// Product summary embedded in a cart line.
#[derive(Debug, Serialize)]
pub struct CartProductView {
    pub id: i32,
    pub name: String,
    pub brand: String,
    /// Current catalog price.
    pub price: f64,
    pub image_url: Option<String>,
}

impl From<CartLine> for CartItemView {
    fn from(line: CartLine) -> Self {
        let CartLine { item, product } = line;
        let subtotal = cents_to_units(item.subtotal_cents());

        Self {
            id: item.id,
            product: CartProductView {
                id: product.id,
                name: product.name,
                brand: product.brand,
                price: cents_to_units(product.price_cents),
                image_url: product.image_url,
            },
            quantity: item.quantity,
            price_at_addition: cents_to_units(item.price_at_addition_cents),
            subtotal,
        }
    }
}

impl From<CheckoutCart> for CartView {
    fn from(cart: CheckoutCart) -> Self {
        let totals = cart.totals();

        Self {
            id: cart.id,
            items: cart.lines.into_iter().map(CartItemView::from).collect(),
            total_amount: cents_to_units(totals.total_amount_cents),
            total_items: totals.total_items,
        }
    }
}

/// Loads the user's cart, creating an empty one on first access.
pub fn load_cart<R>(repo: &R, user: &User) -> ServiceResult<CartView>
where
    R: CartWriter + ?Sized,
{
    let cart = repo
        .load_cart_for_checkout(user.id)
        .map_err(ServiceError::from)?;

    Ok(CartView::from(cart))
}

/// Adds `quantity` units of a product, merging with an existing line for the
/// same product.
///
/// Stock is checked against the quantity being added, not the merged line
/// total; checkout re-validates the full line quantity.
pub fn add_item<R>(repo: &R, user: &User, form: AddCartItemForm) -> ServiceResult<CartItem>
where
    R: CartWriter + ProductReader + ?Sized,
{
    form.validate()?;

    let product = find_active_product(repo, form.product_id, user.hub_id)?;
    ensure_stock(&product, form.quantity)?;

    let cart = repo.get_or_create_cart(user.id).map_err(ServiceError::from)?;

    let new_item = NewCartItem::new(cart.id, product.id, form.quantity, product.price_cents);
    let item = repo
        .upsert_cart_item(&new_item)
        .map_err(ServiceError::from)?;

    log::info!(
        "User {} added {} x product {} to cart {} (line quantity {})",
        user.id,
        form.quantity,
        product.id,
        cart.id,
        item.quantity
    );

    Ok(item)
}

/// Sets the quantity of one of the user's cart lines.
pub fn update_item<R>(
    repo: &R,
    user: &User,
    item_id: i32,
    form: UpdateCartItemForm,
) -> ServiceResult<CartItem>
where
    R: CartReader + CartWriter + ProductReader + ?Sized,
{
    form.validate()?;

    let (cart_id, item) = owned_item(repo, user, item_id, "Not authorized to update this item")?;

    let product = repo
        .get_product_by_id(item.product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::not_found("Product", item.product_id))?;
    ensure_stock(&product, form.quantity)?;

    let updated = repo
        .update_cart_item(item_id, cart_id, &UpdateCartItem::new(form.quantity))
        .map_err(|err| item_error(err, item_id))?;

    log::info!(
        "User {} set cart item {} to quantity {}",
        user.id,
        item_id,
        updated.quantity
    );

    Ok(updated)
}

/// Deletes one of the user's cart lines.
pub fn remove_item<R>(repo: &R, user: &User, item_id: i32) -> ServiceResult<()>
where
    R: CartReader + CartWriter + ?Sized,
{
    let (cart_id, _) = owned_item(repo, user, item_id, "Not authorized to remove this item")?;

    repo.delete_cart_item(item_id, cart_id)
        .map_err(|err| item_error(err, item_id))?;

    log::info!("User {} removed cart item {}", user.id, item_id);

    Ok(())
}

/// Removes every line from the user's cart. Clearing an empty cart succeeds.
pub fn clear<R>(repo: &R, user: &User) -> ServiceResult<usize>
where
    R: CartWriter + ?Sized,
{
    let cart = repo.get_or_create_cart(user.id).map_err(ServiceError::from)?;
    let removed = repo.clear_cart(cart.id).map_err(ServiceError::from)?;

    log::info!("User {} cleared cart {} ({removed} lines)", user.id, cart.id);

    Ok(removed)
}

fn find_active_product<R>(repo: &R, product_id: i32, hub_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id, hub_id)
        .map_err(ServiceError::from)?
        .filter(|product| product.is_active)
        .ok_or_else(|| ServiceError::not_found("Product", product_id))
}

pub(crate) fn ensure_stock(product: &Product, requested: i32) -> ServiceResult<()> {
    if product.has_stock_for(requested) {
        return Ok(());
    }

    Err(ServiceError::OutOfStock {
        product: product.name.clone(),
        requested,
        available: product.stock_quantity,
    })
}

/// Fetches a cart item and checks it sits in the user's own cart.
fn owned_item<R>(
    repo: &R,
    user: &User,
    item_id: i32,
    denied: &str,
) -> ServiceResult<(i32, CartItem)>
where
    R: CartReader + CartWriter + ?Sized,
{
    let item = repo
        .get_cart_item(item_id)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::not_found("CartItem", item_id))?;

    let cart = repo.get_or_create_cart(user.id).map_err(ServiceError::from)?;

    if item.cart_id != cart.id {
        log::warn!(
            "User {} attempted to modify cart item {} of cart {}",
            user.id,
            item_id,
            item.cart_id
        );
        return Err(ServiceError::PermissionDenied(denied.to_string()));
    }

    Ok((cart.id, item))
}

fn item_error(err: RepositoryError, item_id: i32) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::not_found("CartItem", item_id),
        other => ServiceError::from(other),
    }
}
