use actix_web::http::StatusCode;
use actix_web::{HttpResponse, error, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::domain::user::User;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, ServiceResult, users as user_service};

pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

/// Runs a service call on the blocking thread pool.
pub(crate) async fn blocking<F, T>(call: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(call).await {
        Ok(result) => result,
        Err(err) => Err(ServiceError::Internal(err.to_string())),
    }
}

/// Resolves the local user for `identity`, then runs `call` on the blocking pool.
pub(crate) async fn as_user<F, T>(
    repo: &web::Data<DieselRepository>,
    identity: AuthenticatedUser,
    call: F,
) -> ServiceResult<T>
where
    F: FnOnce(&DieselRepository, &User) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let repo = repo.get_ref().clone();
    blocking(move || {
        let user = user_service::resolve_user(&repo, &identity)?;
        call(&repo, &user)
    })
    .await
}

/// Maps a service failure to its HTTP status with a `{"detail": ...}` body.
pub(crate) fn error_response(action: &str, err: ServiceError) -> HttpResponse {
    let status = match &err {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::PermissionDenied(_) | ServiceError::Unauthorized => StatusCode::FORBIDDEN,
        ServiceError::Validation(_) | ServiceError::OutOfStock { .. } | ServiceError::EmptyCart => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::Duplicate { .. } => StatusCode::CONFLICT,
        ServiceError::Internal(_) => {
            log::error!("Failed to {action}: {err}");
            return HttpResponse::InternalServerError()
                .json(json!({ "detail": "Internal server error" }));
        }
    };

    log::debug!("Rejected request to {action}: {err}");
    HttpResponse::build(status).json(json!({ "detail": err.to_string() }))
}

pub(crate) fn message_response(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": message }))
}

/// JSON extractor settings that report malformed bodies as `{"detail": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "detail": detail })),
        )
        .into()
    })
}
