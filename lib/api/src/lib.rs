pub mod page;
pub mod rest;

pub use page::{Outcome, Page};
pub use rest::{routes, RestApi, ServerConfig};
