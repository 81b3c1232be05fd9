//! scribe-client: typed client for the scribe LMP store
//!
//! Records, retrieves, and versions LMP (language-model-program) metadata
//! and invocation history against a remote store. Application code depends
//! on the [`LmpStore`] trait; [`ScribeApiClient`] is the HTTP-backed
//! implementation, one network round trip per operation, no batching, no
//! retries, no caching.
//!
//! Error translation is deliberately narrow: a validation-class rejection
//! of an LMP write is re-raised as [`StoreError::ValidationRejected`] with
//! the server's detail text so callers can fix and retry; everything else
//! non-2xx stays a generic transport failure.

pub mod api;
pub mod error;
pub mod store;
pub mod types;

pub use api::{ApiClientConfig, ScribeApiClient};
pub use error::{StoreError, StoreResult};
pub use store::LmpStore;
pub use types::{BlobMetadata, Invocation, Lmp, WriteLmpInput};
