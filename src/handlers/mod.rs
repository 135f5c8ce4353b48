pub mod categories;
pub mod products;
pub mod session;
pub mod upload;
