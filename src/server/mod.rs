mod auth;
pub mod dto;
mod posts;
pub mod response;
mod router;

pub use router::{AppState, create_router};
