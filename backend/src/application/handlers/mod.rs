//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

mod submit_ranking;

pub use submit_ranking::{
    SubmitRankingCommand, SubmitRankingError, SubmitRankingHandler, SubmitRankingResult,
};
