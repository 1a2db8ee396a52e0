pub mod pages;
pub mod rest;
pub mod routes;
pub mod state;
pub mod templates;

// Re-export the router builder so the binary and the integration tests can
// assemble the same application.
pub use routes::build_router;
pub use state::AppState;
