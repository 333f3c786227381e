//! API Showcase library
//!
//! A keyed, de-duplicating request cache (`cache`) and the pages that fetch
//! public APIs through it. Exposed as a library for integration tests.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod logging;
pub mod pages;
pub mod render;
pub mod session;
