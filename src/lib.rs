//! siegestats: data-access core for the Rainbow Six Siege statistics API.
//!
//! Two pieces: the immutable entity catalogs in [`catalog`] (game modes and
//! operators, with the statistic-key formats the remote API matches
//! literally), and the blocking request/response pipeline in [`http`]
//! (`connect` → `get`/`post` → `parse`). Presentation and command handling
//! live in the caller.

pub mod catalog;
pub mod error;
pub mod http;

pub use error::{Error, Result};
