use actix_web::{HttpResponse, Responder, delete, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::repository::DieselRepository;
use crate::routes::{as_user, error_response, message_response};
use crate::services::users as user_service;

#[get("/users/me")]
pub async fn show_current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match as_user(&repo, user, |_, user| Ok(user.clone())).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => error_response("load user", err),
    }
}

#[delete("/users/me")]
/// Delete the local account together with its cart and orders.
pub async fn delete_current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match as_user(&repo, user, |repo, user| user_service::delete_account(repo, user)).await {
        Ok(()) => message_response("User deleted"),
        Err(err) => error_response("delete user", err),
    }
}
