//! Extract vlr.gg match listings and match details into normalized records
//! and serve them as cached JSON.

pub use client::{VlrClient, DEFAULT_BASE_URL};
pub use error::{Result, ScrapeError};
pub use fetch::{HttpFetcher, PageFetcher, USER_AGENT};
pub use model::*;
pub use vlr_scraper::matches::split_stage_and_event;
pub use vlr_scraper::normalize;

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod server;
mod vlr_scraper;
