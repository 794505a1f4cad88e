use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Per-user shopping cart. Exactly one exists per user, created on first access.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    /// Line items in insertion order.
    pub items: Vec<CartItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        calculate_total(&self.items)
    }
}

/// One product line inside a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: i32,
    /// Cart the line belongs to.
    pub cart_id: i32,
    pub product_id: i32,
    /// Always at least one.
    pub quantity: i32,
    /// Unit price captured when the line was added or last incremented.
    ///
    /// Display and totals only; stock decisions always re-read the product.
    pub price_at_addition_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CartItem {
    pub fn subtotal_cents(&self) -> i64 {
        i64::from(self.quantity).saturating_mul(self.price_at_addition_cents)
    }
}

/// Cart line joined with the product row as read at load time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

/// Cart hydrated with current product data, used by the cart view and checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutCart {
    pub id: i32,
    pub user_id: i32,
    pub lines: Vec<CartLine>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CheckoutCart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        calculate_total(self.lines.iter().map(|line| &line.item))
    }
}

/// Aggregates computed over the items of a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Sum of `quantity * price_at_addition` in the smallest currency unit.
    pub total_amount_cents: i64,
    /// Sum of quantities.
    pub total_items: i64,
}

/// Sums amounts and quantities over cart items using their captured prices.
pub fn calculate_total<'a, I>(items: I) -> CartTotals
where
    I: IntoIterator<Item = &'a CartItem>,
{
    items
        .into_iter()
        .fold(CartTotals::default(), |totals, item| CartTotals {
            total_amount_cents: totals
                .total_amount_cents
                .saturating_add(item.subtotal_cents()),
            total_items: totals.total_items.saturating_add(i64::from(item.quantity)),
        })
}

/// Payload for adding a product to a cart.
///
/// When the product is already in the cart the stored quantity is incremented
/// by `quantity` and the captured price is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price_at_addition_cents: i64,
    pub updated_at: NaiveDateTime,
}

impl NewCartItem {
    pub fn new(cart_id: i32, product_id: i32, quantity: i32, price_at_addition_cents: i64) -> Self {
        Self {
            cart_id,
            product_id,
            quantity,
            price_at_addition_cents,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Absolute quantity change for an existing line.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCartItem {
    pub quantity: i32,
    pub updated_at: NaiveDateTime,
}

impl UpdateCartItem {
    pub fn new(quantity: i32) -> Self {
        Self {
            quantity,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn item(id: i32, quantity: i32, price_cents: i64) -> CartItem {
        CartItem {
            id,
            cart_id: 1,
            product_id: id,
            quantity,
            price_at_addition_cents: price_cents,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    #[test]
    fn calculate_total_sums_amount_and_quantity() {
        let items = vec![item(1, 2, 10_000), item(2, 3, 2_550)];

        let totals = calculate_total(&items);

        assert_eq!(totals.total_amount_cents, 2 * 10_000 + 3 * 2_550);
        assert_eq!(totals.total_items, 5);
    }

    #[test]
    fn calculate_total_is_order_independent_and_repeatable() {
        let items = vec![item(1, 2, 10_000), item(2, 3, 2_550)];
        let reversed: Vec<CartItem> = items.iter().rev().cloned().collect();

        let first = calculate_total(&items);
        let second = calculate_total(&items);
        let third = calculate_total(&reversed);

        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn calculate_total_saturates_instead_of_overflowing() {
        let items = vec![item(1, i32::MAX, i64::MAX / 2), item(2, 1, i64::MAX)];

        let totals = calculate_total(&items);

        assert_eq!(items[0].subtotal_cents(), i64::MAX);
        assert_eq!(totals.total_amount_cents, i64::MAX);
        assert_eq!(totals.total_items, i64::from(i32::MAX) + 1);
    }

    #[test]
    fn calculate_total_of_empty_cart_is_zero() {
        let totals = calculate_total(&Vec::<CartItem>::new());

        assert_eq!(totals, CartTotals::default());
    }
}
