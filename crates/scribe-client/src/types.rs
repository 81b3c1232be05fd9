//! Wire types for the LMP store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key-value metadata attached to blobs; values are arbitrary JSON
pub type BlobMetadata = HashMap<String, serde_json::Value>;

/// A stored, versioned language-model program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lmp {
    /// Server-assigned identity, globally unique and immutable
    pub lmp_id: String,

    /// Fully qualified name; one fqn maps to an ordered version history
    pub fqn: String,

    /// Program source as captured at registration
    pub source: String,

    /// Identities of the LMPs this one depends on
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Implementation-defined payload the client does not interpret
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Creation time; version history within an fqn is in creation order
    pub created_at: DateTime<Utc>,

    /// Position within the fqn's version history
    #[serde(default)]
    pub version_number: u64,
}

/// Payload for registering a new or updated LMP
///
/// The write is atomic from the caller's perspective: the LMP and all its
/// declared uses are recorded together or not at all (enforced server
/// side). The version number is assigned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteLmpInput {
    pub lmp_id: String,
    pub fqn: String,
    pub source: String,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    pub created_at: DateTime<Utc>,
}

/// An immutable record of one LMP execution
///
/// Written exactly once per execution; never mutated or deleted through
/// this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub id: String,
    pub lmp_id: String,

    /// Arguments as captured by the caller; opaque to the store
    pub args: serde_json::Value,

    pub latency_ms: f64,
    pub created_at: DateTime<Utc>,
}
