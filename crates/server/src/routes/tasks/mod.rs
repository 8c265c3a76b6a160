// Task CRUD routes: transport object, mapper, handlers and the route table.
pub mod dto;
pub mod handlers;
pub mod mapper;
pub mod router;

pub use dto::*;
pub use handlers::*;
pub use router::router;
