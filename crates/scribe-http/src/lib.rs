//! scribe-http: async HTTP transport for the scribe store client
//!
//! Owns a single long-lived connection pool bound to a base endpoint and
//! turns (method, path, payload) triples into responses. Non-2xx responses
//! are surfaced as a distinguishable failure carrying the status code and
//! the raw body, so the layer above can branch on status class without
//! this crate knowing what any status means.
//!
//! # Architecture
//!
//! - `HttpClient`: cloneable handle over one pooled `reqwest::Client`
//! - `RequestBuilder`: path, headers, query, and a JSON / bytes /
//!   multipart body
//! - `HttpResponse`: status, headers, body bytes, latency
//!
//! Binary payloads round-trip byte-exact; nothing in this crate
//! re-encodes a body.

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use client::HttpClient;
pub use config::HttpClientConfig;
pub use error::{HttpError, HttpResult};
pub use request::{MultipartField, MultipartValue, RequestBody, RequestBuilder};
pub use response::HttpResponse;

// Re-export the shared HTTP vocabulary
pub use scribe_common::{HttpMethod, HttpResponseLike, HttpStatus};
