use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::repository::errors::RepositoryError;

use crate::domain::user::{NewUser, User};
use crate::repository::UserWriter;
use crate::services::{ServiceError, ServiceResult};

/// Maps the authenticated identity onto the local user row, creating it on first use.
pub fn resolve_user<R>(repo: &R, identity: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let new_user = NewUser::from(identity);
    if new_user.email.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Authenticated identity has no email".to_string(),
        ));
    }

    repo.upsert_user(&new_user).map_err(ServiceError::from)
}

/// Removes the user with their cart and order history.
pub fn delete_account<R>(repo: &R, user: &User) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    match repo.delete_user(user.id) {
        Ok(()) => {
            log::info!("Deleted user {} from hub {}", user.id, user.hub_id);
            Ok(())
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::not_found("User", user.id)),
        Err(err) => Err(ServiceError::from(err)),
    }
}
