pub mod connection;
pub mod products;
pub mod schema;

pub use connection::{Database, IN_MEMORY};
