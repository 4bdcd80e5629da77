// src/services/mod.rs

//! Crawling and reduction services.
//!
//! - `listing`: listing page scraping and aggregation
//! - `detail`: detail API batching, fetching and XML parsing
//! - `normalize`: raw field normalization
//! - `poll`: poll reduction into scalar results
//! - `merge`: positional listing/detail merging
//! - `weight`: best-effort weight extraction from the game page

pub mod detail;
pub mod listing;
pub mod merge;
pub mod normalize;
pub mod poll;
pub mod weight;
