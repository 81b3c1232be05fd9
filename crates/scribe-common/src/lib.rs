//! Common utilities for scribe
//!
//! This crate provides the small pieces shared by the transport, client,
//! and studio crates: HTTP status vocabulary and a resettable one-shot
//! initialization guard.

pub mod http;
pub mod init;

pub use http::{HttpMethod, HttpResponseLike, HttpStatus};
pub use init::InitOnce;
