pub mod errors;

pub use errors::{ServiceError, ServiceResult};

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
