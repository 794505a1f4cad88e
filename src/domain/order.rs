use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Possible states of a recorded order. Orders are only ever created as `Pending`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order message was composed and awaits the merchant.
    #[default]
    Pending,
    /// Merchant accepted the order.
    Confirmed,
    /// Order will not be fulfilled.
    Cancelled,
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(other.to_string()),
        }
    }
}

/// Product line captured when the order was recorded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price copied from the cart line.
    pub price_at_purchase_cents: i64,
}

/// Domain representation of a recorded order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    /// Total amount in the smallest currency unit.
    pub total_cents: i64,
    pub status: OrderStatus,
    /// Whether the shopper reported sending the WhatsApp message.
    pub whatsapp_message_sent: bool,
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i32,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub whatsapp_message_sent: bool,
    pub items: Vec<OrderItem>,
    /// Timestamp captured when the order payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewOrder {
    /// Build a pending order payload with the current timestamp.
    pub fn new(user_id: i32, total_cents: i64, items: Vec<OrderItem>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            user_id,
            total_cents,
            status: OrderStatus::default(),
            whatsapp_message_sent: false,
            items,
            updated_at: now,
        }
    }

    pub fn with_message_sent(mut self, sent: bool) -> Self {
        self.whatsapp_message_sent = sent;
        self
    }
}

/// Query definition used to list the orders of a user.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub user_id: i32,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    /// Construct a query that targets all orders placed by `user_id`.
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            pagination: None,
        }
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_stored_values() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled,
        ] {
            let stored: &'static str = status.into();
            assert_eq!(OrderStatus::try_from(stored), Ok(status));
        }
    }

    #[test]
    fn order_status_rejects_unknown_value() {
        assert_eq!(
            OrderStatus::try_from("shipped"),
            Err("shipped".to_string())
        );
    }
}
