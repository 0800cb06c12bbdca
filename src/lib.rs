//! # seo-content-rs
//!
//! SEO content generation service: chained completion prompts per keyword,
//! four-section article assembly, a spreadsheet audit trail and idempotent
//! WordPress publishing, served over a small JSON HTTP API.

pub mod audit;
pub mod config;
pub mod content;
pub mod error;
pub mod llm;
pub mod logging;
pub mod publish;
pub mod server;

pub use error::{Error, Result};
