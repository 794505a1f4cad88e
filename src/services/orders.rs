use chrono::NaiveDateTime;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::{Deserialize, Serialize};

use crate::domain::money::cents_to_units;
use crate::domain::order::{NewOrder, Order, OrderItem, OrderListQuery, OrderStatus};
use crate::domain::user::User;
use crate::forms::orders::RecordOrderForm;
use crate::repository::{CartWriter, OrderReader, OrderWriter};
use crate::services::checkout::load_validated_cart;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by `GET /orders`.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// JSON representation of a recorded order.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: i32,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub whatsapp_message_sent: bool,
    pub items: Vec<OrderItemView>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct OrderItemView {
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_purchase: f64,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            total_amount: cents_to_units(order.total_cents),
            status: order.status,
            whatsapp_message_sent: order.whatsapp_message_sent,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemView {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price_at_purchase: cents_to_units(item.price_at_purchase_cents),
                })
                .collect(),
            created_at: order.created_at,
        }
    }
}

/// Persists a pending order built from the user's cart.
///
/// Runs the same validation as checkout. Stock and the cart are not modified.
pub fn record_order<R>(repo: &R, user: &User, form: RecordOrderForm) -> ServiceResult<OrderView>
where
    R: CartWriter + OrderWriter + ?Sized,
{
    let cart = load_validated_cart(repo, user)?;
    let totals = cart.totals();

    let items: Vec<OrderItem> = cart
        .lines
        .iter()
        .map(|line| OrderItem {
            product_id: line.product.id,
            quantity: line.item.quantity,
            price_at_purchase_cents: line.item.price_at_addition_cents,
        })
        .collect();

    let new_order = NewOrder::new(user.id, totals.total_amount_cents, items)
        .with_message_sent(form.whatsapp_message_sent);

    let order = repo.create_order(&new_order).map_err(ServiceError::from)?;

    log::info!(
        "Recorded order {} for user {} ({} items)",
        order.id,
        user.id,
        totals.total_items
    );

    Ok(OrderView::from(order))
}

/// Lists the user's orders, newest first.
pub fn list_orders<R>(
    repo: &R,
    user: &User,
    query: OrdersQuery,
) -> ServiceResult<Paginated<OrderView>>
where
    R: OrderReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let list_query = OrderListQuery::new(user.id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, orders) = repo.list_orders(list_query).map_err(ServiceError::from)?;

    let items = orders.into_iter().map(OrderView::from).collect();
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(Paginated::new(items, page, total_pages))
}

pub fn get_order<R>(repo: &R, user: &User, order_id: i32) -> ServiceResult<OrderView>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id, user.id)
        .map_err(ServiceError::from)?
        .map(OrderView::from)
        .ok_or_else(|| ServiceError::not_found("Order", order_id))
}
