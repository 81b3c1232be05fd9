//! The capability set callers program against

use crate::error::StoreResult;
use crate::types::{BlobMetadata, Invocation, Lmp, WriteLmpInput};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Operations of the LMP store.
///
/// Callers depend only on this trait; [`crate::ScribeApiClient`] is the
/// network-backed implementation and an in-memory double slots in without
/// touching call sites. Operations carry no implicit ordering relative to
/// each other — a caller whose invocation write must follow its LMP write
/// awaits the first before issuing the second.
#[async_trait]
pub trait LmpStore: Send + Sync {
    /// Fetch one LMP by its server-assigned id; `None` when absent.
    async fn get_lmp(&self, lmp_id: &str) -> StoreResult<Option<Lmp>>;

    /// Fetch the version history of an fqn, oldest first, possibly empty.
    async fn get_lmp_versions(&self, fqn: &str) -> StoreResult<Vec<Lmp>>;

    /// Record an LMP together with the set of LMP ids it uses.
    async fn write_lmp(&self, lmp: WriteLmpInput, uses: BTreeSet<String>) -> StoreResult<()>;

    /// Record one execution of an LMP.
    async fn write_invocation(&self, invocation: Invocation) -> StoreResult<()>;

    /// Store a binary blob, returning its server-assigned id.
    async fn store_blob(
        &self,
        blob: Vec<u8>,
        metadata: Option<BlobMetadata>,
    ) -> StoreResult<String>;

    /// Retrieve a blob by id, byte-exact.
    async fn retrieve_blob(&self, blob_id: &str) -> StoreResult<Vec<u8>>;

    /// Release the underlying connection resource. Idempotent.
    async fn close(&self) -> StoreResult<()>;
}
