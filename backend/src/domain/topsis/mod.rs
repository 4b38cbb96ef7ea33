//! TOPSIS Module - Technique for Order Preference by Similarity to Ideal Solution.
//!
//! # Components
//!
//! - `DecisionMatrix` - Validated alternatives x criteria table
//! - `WeightVector` / `ImpactVector` - Per-criterion weights and directions
//! - `TopsisEngine` - Normalization, weighting, ideal solutions, closeness, ranking
//! - `RankedResult` - The matrix augmented with scores and ranks
//!
//! All functions are pure and synchronous. A ranking is computed fresh for
//! each request and nothing is cached between calls.

mod criteria;
mod engine;
mod matrix;
mod ranked_result;

pub use criteria::{tokenize, Impact, ImpactVector, WeightVector};
pub use engine::TopsisEngine;
pub use matrix::{DecisionMatrix, MIN_ALTERNATIVES, MIN_CRITERIA};
pub use ranked_result::{RankedResult, RankedRow, RANK_COLUMN, SCORE_COLUMN};
