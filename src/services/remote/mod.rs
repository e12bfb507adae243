pub mod card;
pub mod courses;
pub mod enrollment;
pub mod files;
pub mod http;
pub mod links;
pub mod payments;
pub mod quiz;
pub mod schedule;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{Attachment, Envelope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, file: Attachment },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self, AppError> {
        let value = serde_json::to_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<Part>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: ApiRequest) -> anyhow::Result<Envelope<Value>>;
    async fn download(&self, req: ApiRequest) -> anyhow::Result<Download>;
}

pub fn segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Unwraps the `data` of a successful envelope. `success: false` becomes a
/// `Rejected` error carrying the backend's message verbatim.
pub fn into_data<T: DeserializeOwned>(envelope: Envelope<Value>) -> Result<T, AppError> {
    let envelope = check(envelope)?;
    serde_json::from_value(envelope.data.unwrap_or(Value::Null))
        .map_err(|e| AppError::Decode(e.to_string()))
}

fn check(envelope: Envelope<Value>) -> Result<Envelope<Value>, AppError> {
    if envelope.success {
        return Ok(envelope);
    }
    let message = if envelope.message.trim().is_empty() {
        "Request failed".to_string()
    } else {
        envelope.message
    };
    Err(AppError::Rejected(message))
}

#[derive(Clone, Copy)]
pub struct Backend<'a> {
    transport: &'a dyn Transport,
    bearer: Option<&'a str>,
}

impl<'a> Backend<'a> {
    pub fn new(transport: &'a dyn Transport, bearer: Option<&'a str>) -> Self {
        Self { transport, bearer }
    }

    pub async fn fetch<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, AppError> {
        let envelope = self.transport.send(req.bearer(self.bearer)).await?;
        into_data(envelope)
    }

    pub async fn execute(&self, req: ApiRequest) -> Result<String, AppError> {
        let envelope = self.transport.send(req.bearer(self.bearer)).await?;
        Ok(check(envelope)?.message)
    }

    pub async fn download(&self, req: ApiRequest) -> Result<Download, AppError> {
        Ok(self.transport.download(req.bearer(self.bearer)).await?)
    }
}
