pub mod handlers;
pub mod instagram;
pub mod middleware;
pub mod reels;
pub mod routes;

pub use routes::create_router;
