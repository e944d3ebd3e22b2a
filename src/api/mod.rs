pub mod documents;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod owner_handlers;
pub mod ownership_handlers;
pub mod route_table;
pub mod routes;
pub mod unit_handlers;

pub use error::*;
pub use handlers::*;
pub use routes::*;
