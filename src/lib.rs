//! # codeforge
//!
//! A thin HTTP backend for AI code tools.
//!
//! This library provides:
//! - An HTTP API exposing per-tool endpoints (review, debug, security scan, ...)
//! - A fixed catalog of system instructions, one per tool
//! - An OpenRouter client with bounded retry on rate limiting
//! - Markdown code-fence stripping for model output
//!
//! ## Architecture
//!
//! Each endpoint follows the same pipeline:
//! 1. Validate the required request fields (reject with 400 before any upstream call)
//! 2. Compose a user prompt from the fields and pick the tool's system instruction
//! 3. Call the LLM through the retry wrapper (exponential backoff on 429 only)
//! 4. Strip code fences from the response and shape the HTTP body
//!
//! ## Example
//!
//! ```rust,ignore
//! use codeforge::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod api;
pub mod config;
pub mod llm;
pub mod prompts;
pub mod sanitize;

pub use config::Config;
