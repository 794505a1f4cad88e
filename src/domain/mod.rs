pub mod cart;
pub mod money;
pub mod order;
pub mod product;
pub mod user;
