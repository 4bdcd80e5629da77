//! Pipeline entry points for crawler operations.
//!
//! - `run_crawl`: scrape N listing pages and merge detail metadata
//! - `run_single`: fetch one game by identifier

pub mod crawl;

pub use crawl::{run_crawl, run_single};
