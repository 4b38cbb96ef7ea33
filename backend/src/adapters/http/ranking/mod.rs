//! HTTP adapter for ranking endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, SubmitResponse, SUBMIT_SUCCESS_MESSAGE};
pub use handlers::RankingAppState;
pub use routes::{app_router, ranking_routes};
