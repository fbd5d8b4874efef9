//! HTTP server for Storyline interactive fiction.
//!
//! Exposes the navigation engine from [`storyline_core`] as a JSON API. Every
//! response is an envelope `{meta: {count, title, url}, data}`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod observability;
mod response;
mod server;

pub use api::{AppState, create_router, parse_index, with_cors};
pub use config::{ContentSettings, LogFormat, LoggingSettings, ServerSettings, StorylineConfig};
pub use observability::init_tracing;
pub use response::{ApiError, Envelope, ErrorData, Meta, PageData, request_url};
pub use server::{load_state, serve, serve_state};
