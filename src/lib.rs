// src/lib.rs

//! Ranked board game catalog crawler library.
//!
//! Scrapes the paginated ranked listing, fetches batch detail payloads
//! from the XML API, and merges both into unified game records.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
