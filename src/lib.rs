// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(
    test,
    allow(clippy::indexing_slicing, clippy::unwrap_used, clippy::expect_used)
)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::wildcard_enum_match_arm)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]

//! A terminal search input that suggests entries from its own recent-search
//! history, with keyboard and mouse navigation, outside-click dismissal and
//! optional persistence.

pub mod app;
pub mod config;
pub mod document;
pub mod search;
pub mod storage;
pub mod ui;

pub use config::{Config, DedupePolicy, InputPosition, SearchOptions};
pub use document::{Document, Subscription};
pub use search::{EventResult, SuggestionInputSearch};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
