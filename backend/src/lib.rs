//! TOPSIS Ranking Service
//!
//! Ranks the alternatives of an uploaded decision table with TOPSIS
//! (Technique for Order Preference by Similarity to Ideal Solution) and
//! emails the ranked table back to the requester.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
