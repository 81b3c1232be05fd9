//! Request construction

use crate::error::HttpResult;
use scribe_common::HttpMethod;
use std::collections::HashMap;
use url::Url;

/// Request body variants
#[derive(Debug, Clone)]
pub enum RequestBody {
    None,
    Json(serde_json::Value),
    Bytes(Vec<u8>),
    Multipart(Vec<MultipartField>),
}

/// One named field of a multipart body.
///
/// Byte fields are transmitted as-is; text fields are sent verbatim as
/// UTF-8. There is no other encoding step anywhere on this path.
#[derive(Debug, Clone)]
pub struct MultipartField {
    pub name: String,
    pub value: MultipartValue,
}

/// Content of a multipart field
#[derive(Debug, Clone)]
pub enum MultipartValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl MultipartField {
    /// A text field
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: MultipartValue::Text(value.into()),
        }
    }

    /// A raw-bytes field
    pub fn bytes(name: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            value: MultipartValue::Bytes(value),
        }
    }
}

/// Builder for a single request
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub method: HttpMethod,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestBuilder {
    /// Start a request for `path`, joined against the client's base URL
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set a JSON body
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a raw-bytes body
    pub fn bytes(mut self, body: Vec<u8>) -> Self {
        self.body = RequestBody::Bytes(body);
        self
    }

    /// Add a multipart field (switches the body to multipart)
    pub fn part(mut self, field: MultipartField) -> Self {
        match &mut self.body {
            RequestBody::Multipart(fields) => fields.push(field),
            _ => self.body = RequestBody::Multipart(vec![field]),
        }
        self
    }

    /// Lower into a reqwest builder against `base_url`
    pub(crate) fn build_reqwest(
        self,
        client: &reqwest::Client,
        base_url: &Url,
    ) -> HttpResult<reqwest::RequestBuilder> {
        let url = base_url.join(&self.path)?;

        let method = match self.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = client.request(method, url);

        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }

        builder = match self.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Bytes(bytes) => builder.body(bytes),
            RequestBody::Multipart(fields) => {
                let mut form = reqwest::multipart::Form::new();
                for field in fields {
                    let part = match field.value {
                        MultipartValue::Text(text) => reqwest::multipart::Part::text(text),
                        MultipartValue::Bytes(bytes) => reqwest::multipart::Part::bytes(bytes),
                    };
                    form = form.part(field.name, part);
                }
                builder.multipart(form)
            }
        };

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates() {
        let builder = RequestBuilder::new(HttpMethod::Post, "/lmp")
            .header("X-Trace", "abc")
            .query("fqn", "pkg.module.fn")
            .json_value(serde_json::json!({"key": "value"}));

        assert_eq!(builder.method, HttpMethod::Post);
        assert_eq!(builder.path, "/lmp");
        assert!(builder.headers.contains_key("X-Trace"));
        assert_eq!(builder.query.len(), 1);
        assert!(matches!(builder.body, RequestBody::Json(_)));
    }

    #[test]
    fn test_part_switches_body_to_multipart() {
        let builder = RequestBuilder::new(HttpMethod::Post, "/blob")
            .part(MultipartField::bytes("blob", vec![0, 1, 2]))
            .part(MultipartField::text("metadata", "{}"));

        match builder.body {
            RequestBody::Multipart(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].name, "blob");
                assert_eq!(fields[1].name, "metadata");
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn test_build_joins_path_against_base() {
        let base = Url::parse("http://localhost:9000").unwrap();
        let client = reqwest::Client::new();

        let request = RequestBuilder::new(HttpMethod::Get, "/lmp/abc")
            .build_reqwest(&client, &base)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:9000/lmp/abc");
        assert_eq!(request.method(), reqwest::Method::GET);
    }
}
