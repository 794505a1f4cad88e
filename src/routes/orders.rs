use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::config::ShopConfig;
use crate::forms::orders::RecordOrderForm;
use crate::repository::DieselRepository;
use crate::routes::{as_user, error_response};
use crate::services::{checkout, orders as order_service};

#[post("/orders/checkout")]
/// Validate the cart against live stock and return the WhatsApp message and link.
///
/// Nothing is persisted.
pub async fn checkout_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ShopConfig>,
) -> impl Responder {
    let config = config.into_inner();
    match as_user(&repo, user, move |repo, user| {
        checkout::prepare_checkout(repo, user, &config)
    })
    .await
    {
        Ok(preview) => HttpResponse::Ok().json(json!({
            "message": "Checkout prepared",
            "whatsapp_text": preview.whatsapp_text,
            "whatsapp_link": preview.whatsapp_link,
        })),
        Err(err) => error_response("prepare checkout", err),
    }
}

#[post("/orders")]
pub async fn record_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: Option<web::Json<RecordOrderForm>>,
) -> impl Responder {
    let form = form.map(web::Json::into_inner).unwrap_or_default();
    match as_user(&repo, user, move |repo, user| {
        order_service::record_order(repo, user, form)
    })
    .await
    {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => error_response("record order", err),
    }
}

#[get("/orders")]
pub async fn list_orders(
    params: web::Query<order_service::OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = params.into_inner();
    match as_user(&repo, user, move |repo, user| {
        order_service::list_orders(repo, user, query)
    })
    .await
    {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(err) => error_response("list orders", err),
    }
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    match as_user(&repo, user, move |repo, user| {
        order_service::get_order(repo, user, order_id)
    })
    .await
    {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response("load order", err),
    }
}
