//! HTTP-backed implementation of the LMP store

use crate::error::{StoreError, StoreResult};
use crate::store::LmpStore;
use crate::types::{BlobMetadata, Invocation, Lmp, WriteLmpInput};
use async_trait::async_trait;
use scribe_common::{HttpMethod, HttpStatus};
use scribe_http::{HttpClient, HttpClientConfig, HttpError, MultipartField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration for [`ScribeApiClient`]
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Transport configuration, including the base endpoint
    pub http: HttpClientConfig,

    /// Statuses on the LMP-write path treated as semantic rejections
    /// rather than transport failures. The server reserves 422; widen this
    /// only if a deployment repurposes other 4xx codes the same way.
    pub validation_statuses: Vec<u16>,
}

impl ApiClientConfig {
    /// Config bound to a base endpoint, with 422 as the validation status
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClientConfig::new(base_url),
            validation_statuses: vec![HttpStatus::UNPROCESSABLE_ENTITY.code()],
        }
    }

    /// Treat an additional status as a semantic rejection
    pub fn validation_status(mut self, code: u16) -> Self {
        if !self.validation_statuses.contains(&code) {
            self.validation_statuses.push(code);
        }
        self
    }
}

/// Client for the scribe store's HTTP API
///
/// Every operation is a single round trip against the configured base
/// endpoint. The connection pool is owned for the client's lifetime and
/// released by [`LmpStore::close`] / the last handle dropping; concurrent
/// operations on one instance are safe.
#[derive(Debug, Clone)]
pub struct ScribeApiClient {
    http: HttpClient,
    validation_statuses: Vec<u16>,
}

#[derive(Serialize)]
struct WriteLmpRequest<'a> {
    lmp: &'a WriteLmpInput,
    uses: &'a BTreeSet<String>,
}

#[derive(Deserialize)]
struct StoreBlobResponse {
    blob_id: String,
}

impl ScribeApiClient {
    /// Connect to a store at `base_url` with default configuration
    pub fn new(base_url: impl Into<String>) -> StoreResult<Self> {
        Self::with_config(ApiClientConfig::new(base_url))
    }

    /// Connect with explicit configuration
    pub fn with_config(config: ApiClientConfig) -> StoreResult<Self> {
        Ok(Self {
            http: HttpClient::new(config.http)?,
            validation_statuses: config.validation_statuses,
        })
    }

    /// The endpoint this client talks to
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

/// Map transport JSON errors to decode failures; everything else stays a
/// transport failure.
fn as_decode(err: HttpError) -> StoreError {
    match err {
        HttpError::Json(msg) => StoreError::Decode(msg),
        other => StoreError::Transport(other),
    }
}

fn encode<T: Serialize>(value: &T) -> StoreResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Pull the server's `detail` field out of a rejection body.
fn extract_detail(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str().map(str::to_owned))
        })
        .unwrap_or_else(|| "no detailed error message provided".to_string())
}

#[async_trait]
impl LmpStore for ScribeApiClient {
    async fn get_lmp(&self, lmp_id: &str) -> StoreResult<Option<Lmp>> {
        let response = self
            .http
            .get(&format!("/lmp/{lmp_id}"))
            .await?
            .error_for_status()?;

        // The server answers 2xx with a JSON null for an unknown id
        let value = response.json().map_err(as_decode)?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn get_lmp_versions(&self, fqn: &str) -> StoreResult<Vec<Lmp>> {
        let request = self
            .http
            .request(HttpMethod::Get, "/lmp/versions")
            .query("fqn", fqn);
        let response = self.http.execute(request).await?.error_for_status()?;
        response.json_as().map_err(as_decode)
    }

    async fn write_lmp(&self, lmp: WriteLmpInput, uses: BTreeSet<String>) -> StoreResult<()> {
        let body = encode(&WriteLmpRequest {
            lmp: &lmp,
            uses: &uses,
        })?;

        match self.http.post_json("/lmp", body).await?.error_for_status() {
            Ok(_) => Ok(()),
            Err(HttpError::Status { code, body }) if self.validation_statuses.contains(&code) => {
                let detail = extract_detail(&body);
                tracing::error!(status = code, detail = %detail, "lmp write rejected by server");
                Err(StoreError::ValidationRejected { detail })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write_invocation(&self, invocation: Invocation) -> StoreResult<()> {
        let body = encode(&invocation)?;
        self.http
            .post_json("/invocation", body)
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn store_blob(
        &self,
        blob: Vec<u8>,
        metadata: Option<BlobMetadata>,
    ) -> StoreResult<String> {
        let mut fields = vec![MultipartField::bytes("blob", blob)];
        if let Some(metadata) = metadata {
            let text =
                serde_json::to_string(&metadata).map_err(|e| StoreError::Decode(e.to_string()))?;
            fields.push(MultipartField::text("metadata", text));
        }

        let response = self
            .http
            .post_multipart("/blob", fields)
            .await?
            .error_for_status()?;
        let payload: StoreBlobResponse = response.json_as().map_err(as_decode)?;
        Ok(payload.blob_id)
    }

    async fn retrieve_blob(&self, blob_id: &str) -> StoreResult<Vec<u8>> {
        let response = self.http.get(&format!("/blob/{blob_id}")).await?;
        match response.error_for_status() {
            Ok(response) => Ok(response.into_body()),
            Err(HttpError::Status { code, .. }) if code == HttpStatus::NOT_FOUND.code() => {
                Err(StoreError::NotFound(blob_id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn close(&self) -> StoreResult<()> {
        self.http.close();
        Ok(())
    }
}
