//! HTTP adapters - REST API implementations.

pub mod ranking;

pub use ranking::{app_router, ranking_routes, RankingAppState};
