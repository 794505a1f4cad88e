use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::cart::{AddCartItemForm, UpdateCartItemForm};
use crate::repository::DieselRepository;
use crate::routes::{as_user, error_response, message_response};
use crate::services::cart as cart_service;

#[get("/cart")]
pub async fn show_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match as_user(&repo, user, |repo, user| cart_service::load_cart(repo, user)).await {
        Ok(cart) => HttpResponse::Ok().json(cart),
        Err(err) => error_response("load cart", err),
    }
}

#[post("/cart/items")]
pub async fn add_cart_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCartItemForm>,
) -> impl Responder {
    let form = form.into_inner();
    match as_user(&repo, user, move |repo, user| {
        cart_service::add_item(repo, user, form)
    })
    .await
    {
        Ok(_) => message_response("Item added to cart"),
        Err(err) => error_response("add cart item", err),
    }
}

#[put("/cart/items/{item_id}")]
pub async fn update_cart_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateCartItemForm>,
) -> impl Responder {
    let item_id = item_id.into_inner();
    let form = form.into_inner();
    match as_user(&repo, user, move |repo, user| {
        cart_service::update_item(repo, user, item_id, form)
    })
    .await
    {
        Ok(_) => message_response("Item updated"),
        Err(err) => error_response("update cart item", err),
    }
}

#[delete("/cart/items/{item_id}")]
pub async fn remove_cart_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let item_id = item_id.into_inner();
    match as_user(&repo, user, move |repo, user| {
        cart_service::remove_item(repo, user, item_id)
    })
    .await
    {
        Ok(()) => message_response("Item removed"),
        Err(err) => error_response("remove cart item", err),
    }
}

#[delete("/cart")]
pub async fn clear_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match as_user(&repo, user, |repo, user| cart_service::clear(repo, user)).await {
        Ok(_) => message_response("Cart cleared"),
        Err(err) => error_response("clear cart", err),
    }
}
