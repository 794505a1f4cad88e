//! Turns a cart into a WhatsApp order message.
//!
//! Checkout is a read-only preview: stock is validated against the live
//! catalog but nothing is decremented, the cart is left untouched and no
//! order is persisted.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::config::ShopConfig;
use crate::domain::cart::{CartLine, CheckoutCart};
use crate::domain::money::format_amount;
use crate::domain::user::User;
use crate::repository::CartWriter;
use crate::services::cart::ensure_stock;
use crate::services::{ServiceError, ServiceResult};

/// Characters kept verbatim in the `text` query parameter.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Message and deep link returned by `POST /orders/checkout`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutPreview {
    pub whatsapp_text: String,
    pub whatsapp_link: String,
}

/// Validates the user's cart against current stock and composes the order message.
pub fn prepare_checkout<R>(
    repo: &R,
    user: &User,
    config: &ShopConfig,
) -> ServiceResult<CheckoutPreview>
where
    R: CartWriter + ?Sized,
{
    let cart = load_validated_cart(repo, user)?;

    let whatsapp_text = compose_message(user, &cart.lines, config);
    let whatsapp_link = generate_link(&config.whatsapp_phone_number, &whatsapp_text);

    log::info!(
        "Prepared checkout for user {} with {} lines",
        user.id,
        cart.lines.len()
    );

    Ok(CheckoutPreview {
        whatsapp_text,
        whatsapp_link,
    })
}

/// Loads the cart with current product rows and re-checks every line.
pub(crate) fn load_validated_cart<R>(repo: &R, user: &User) -> ServiceResult<CheckoutCart>
where
    R: CartWriter + ?Sized,
{
    let cart = repo
        .load_cart_for_checkout(user.id)
        .map_err(ServiceError::from)?;

    if cart.is_empty() {
        return Err(ServiceError::EmptyCart);
    }

    for line in &cart.lines {
        ensure_stock(&line.product, line.item.quantity)?;
    }

    Ok(cart)
}

/// Wraps the order summary with the greeting and closing lines.
pub fn compose_message(user: &User, lines: &[CartLine], config: &ShopConfig) -> String {
    let mut message = format!(
        "🌸 *Nuevo Pedido - {}*\n\nHola {}, me gustaría realizar un pedido:\n\n",
        config.store_name, config.merchant_name
    );
    message.push_str(&format!(
        "👤 *Cliente:* {}\n📧 *Email:* {}\n\n",
        user.name, user.email
    ));
    message.push_str("🛒 *Detalle del Carrito:*\n");
    message.push_str(&format_order_summary(lines));
    message.push_str("\n\nQuedo atento a tus indicaciones de pago. ¡Gracias! ✨");
    message
}

/// One line per cart item followed by the grand total.
pub fn format_order_summary(lines: &[CartLine]) -> String {
    let mut summary = String::new();
    let mut total_cents = 0i64;

    for CartLine { item, product } in lines {
        let subtotal = item.subtotal_cents();
        total_cents += subtotal;
        summary.push_str(&format!(
            "- {} {} ({}) x{}: ${}\n",
            product.brand,
            product.name,
            product.product_type.label(),
            item.quantity,
            format_amount(subtotal)
        ));
    }

    summary.push_str(&format!(
        "\n💰 *Total a pagar: ${}*",
        format_amount(total_cents)
    ));
    summary
}

/// Builds a `wa.me` link that opens a chat with `phone_number` pre-filled with `text`.
pub fn generate_link(phone_number: &str, text: &str) -> String {
    let phone: String = phone_number
        .chars()
        .filter(|ch| *ch != '+' && !ch.is_whitespace())
        .collect();
    let encoded = utf8_percent_encode(text, MESSAGE_ENCODE_SET);

    format!("{WHATSAPP_BASE_URL}/{phone}?text={encoded}")
}
