use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart;
use serde_json::Value;

use super::{ApiRequest, Body, Download, Method, Part, Transport};
use crate::models::Envelope;

/// Talks to the REST backend over HTTP(S). No timeout is configured; a hung
/// request keeps its caller waiting.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn build(&self, req: ApiRequest) -> anyhow::Result<reqwest::RequestBuilder> {
        let url = format!("{}{}", self.base_url, req.path);
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match req.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => {
                let mut form = multipart::Form::new();
                for part in parts {
                    form = match part {
                        Part::Text { name, value } => form.text(name, value),
                        Part::File { name, file } => {
                            let part = multipart::Part::bytes(file.bytes)
                                .file_name(file.file_name)
                                .mime_str(&file.content_type)
                                .context("invalid attachment content type")?;
                            form.part(name, part)
                        }
                    };
                }
                builder.multipart(form)
            }
        };
        Ok(builder)
    }
}

fn file_name_from_disposition(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|p| {
        p.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, req: ApiRequest) -> anyhow::Result<Envelope<Value>> {
        let method = req.method.as_str();
        let path = req.path.clone();
        tracing::debug!(method, path = %path, "backend request");

        let resp = self
            .build(req)?
            .send()
            .await
            .with_context(|| format!("failed to call backend {method} {path}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("failed to read backend response")?;

        // Business failures come back as an envelope with a non-2xx status;
        // those are passed on rather than treated as transport errors.
        match serde_json::from_str::<Envelope<Value>>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => {
                anyhow::bail!("backend {method} {path} returned {status}: {text}")
            }
            Err(e) => Err(e).context("failed to parse backend envelope"),
        }
    }

    async fn download(&self, req: ApiRequest) -> anyhow::Result<Download> {
        let path = req.path.clone();
        tracing::debug!(path = %path, "backend download");

        let resp = self
            .build(req)?
            .send()
            .await
            .with_context(|| format!("failed to download {path}"))?
            .error_for_status()
            .context("backend refused download")?;

        let header = |name: reqwest::header::HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type =
            header(CONTENT_TYPE).unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = header(CONTENT_DISPOSITION).and_then(|v| file_name_from_disposition(&v));

        let bytes = resp.bytes().await.context("failed to read download body")?;

        Ok(Download {
            content_type,
            file_name,
            bytes: bytes.to_vec(),
        })
    }
}
