#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `zcashrpc-http` — HTTP Transport Backend
//!
//! This crate provides a concrete HTTP-based implementation of the
//! [`transport::Transport`] trait for talking to `zcashd`.
//!
//! ## Overview
//!
//! - Implements [`HttpTransport`], a thin wrapper over [`reqwest::Client`]
//! - Supports both authenticated and unauthenticated RPC calls, with
//!   credentials given explicitly or read from the daemon's `.cookie` file
//! - Each request is POSTed on a task of the ambient Tokio runtime; its
//!   response is routed back to the caller's future by request id
//!
//! ## Example
//! ```no_run
//! use transport::Transport;
//! use zcashjson::Request;
//! use zcashrpc_http::HttpTransport;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = HttpTransport::with_auth("http://127.0.0.1:8232", "rpcuser", "rpcpassword");
//!
//! let future = transport.send(Request::new(1, "z_listaddresses", vec![]));
//! println!("{:#?}", future.receive().await);
//! # });
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use transport::{PendingRequests, ResponseFuture, Transport, TransportError};
use zcashjson::{Request, Response};

/// A concrete implementation of the [`Transport`] trait using HTTP.
///
/// `HttpTransport` performs no command validation or result typing: it
/// POSTs already-marshaled requests and completes each future with the raw
/// `result` payload or the daemon's structured error.
///
/// Clones share the same connection pool and in-flight table, so shutting
/// down one clone shuts down all of them.
#[derive(Clone)]
pub struct HttpTransport {
    /// The underlying HTTP client used to perform requests.
    client: reqwest::Client,
    /// The full URL of the JSON-RPC endpoint (e.g. `http://127.0.0.1:8232`).
    url: String,
    /// Optional basic authentication credentials `(username, password)`.
    auth: Option<(String, String)>,
    pending: Arc<PendingRequests>,
}

impl HttpTransport {
    /// Constructs a new `HttpTransport` targeting the provided URL.
    ///
    /// This variant does **not** use authentication.
    ///
    /// # Example
    /// ```
    /// use transport::Transport;
    /// use zcashrpc_http::HttpTransport;
    ///
    /// let transport = HttpTransport::new("http://127.0.0.1:8232");
    /// assert_eq!(transport.endpoint(), "http://127.0.0.1:8232");
    /// ```
    pub fn new(url: impl Into<String>) -> Self { Self::build(url.into(), None) }

    /// Constructs a new `HttpTransport` with basic authentication.
    ///
    /// # Parameters
    /// - `url`: Target endpoint (e.g. `http://127.0.0.1:8232`)
    /// - `user`: RPC username
    /// - `pass`: RPC password
    pub fn with_auth(
        url: impl Into<String>,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self::build(url.into(), Some((user.into(), pass.into())))
    }

    /// Constructs a new `HttpTransport` using credentials from a `.cookie` file.
    ///
    /// The cookie file format is a single line containing `username:password`.
    /// The full path to the cookie file must be provided.
    ///
    /// # Errors
    /// Returns `TransportError::Other` if the file cannot be read, is empty,
    /// or has no colon separator.
    pub fn from_cookie_file(
        url: impl Into<String>,
        cookie_path: impl AsRef<Path>,
    ) -> Result<Self, TransportError> {
        let file = File::open(cookie_path.as_ref()).map_err(|e| {
            TransportError::Other(format!("Failed to read cookie file: {}", e))
        })?;

        let line = BufReader::new(file)
            .lines()
            .next()
            .ok_or_else(|| TransportError::Other("Cookie file is empty".to_string()))?
            .map_err(|e| TransportError::Other(format!("Failed to read cookie file: {}", e)))?;

        let (user, pass) = line.trim_end().split_once(':').ok_or_else(|| {
            TransportError::Other("Invalid cookie file format: missing colon".to_string())
        })?;

        Ok(Self::with_auth(url, user, pass))
    }

    fn build(url: String, auth: Option<(String, String)>) -> Self {
        tracing::debug!(url = %url, authenticated = auth.is_some(), "initializing HTTP transport");
        Self { client: reqwest::Client::new(), url, auth, pending: Arc::new(PendingRequests::new()) }
    }

    /// Number of requests still waiting for a response.
    pub fn in_flight(&self) -> usize { self.pending.len() }

    /// POST one request body and parse the reply envelope.
    ///
    /// The daemon reports RPC errors with non-2xx statuses, so the body is
    /// parsed whatever the status; only a body that is not an envelope is
    /// an HTTP failure.
    async fn post(&self, method: &str, body: Vec<u8>) -> Result<Response, TransportError> {
        tracing::trace!(url = %self.url, method, "POST");
        let mut req = self.client.post(&self.url).header(CONTENT_TYPE, "application/json").body(body);
        if let Some((u, p)) = &self.auth {
            req = req.basic_auth(u, Some(p));
        }
        let resp = req.send().await.map_err(|e| {
            tracing::error!("HTTP Transport - Request failed: {}", e);
            TransportError::Http(e.to_string())
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| {
            tracing::error!("HTTP Transport - Failed to read body: {}", e);
            TransportError::Http(e.to_string())
        })?;

        match Response::from_slice(&bytes) {
            Ok(response) => Ok(response),
            Err(_) if !status.is_success() => {
                tracing::error!("HTTP Transport - {} from {}", status, self.url);
                Err(TransportError::Http(format!(
                    "{} {}",
                    status,
                    String::from_utf8_lossy(&bytes).trim()
                )))
            }
            Err(e) => Err(TransportError::InvalidFormat(format!(
                "{} (body: {})",
                e,
                String::from_utf8_lossy(&bytes)
            ))),
        }
    }
}

impl Transport for HttpTransport {
    /// Registers the request and POSTs it on a background task.
    ///
    /// Must be called from within a Tokio runtime; otherwise the returned
    /// future fails with [`TransportError::Other`].
    fn send(&self, request: Request) -> ResponseFuture {
        let id = request.id;
        let future = match self.pending.register(id) {
            Ok(future) => future,
            Err(err) => return ResponseFuture::failed(err),
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                self.pending.fail(id, TransportError::Other(format!("no Tokio runtime: {}", e)));
                return future;
            }
        };
        let body = match request.to_vec() {
            Ok(body) => body,
            Err(e) => {
                self.pending.fail(id, e.into());
                return future;
            }
        };

        let this = self.clone();
        handle.spawn(async move {
            match this.post(&request.method, body).await {
                Ok(mut response) => {
                    match response.id {
                        None => response.id = Some(id),
                        Some(other) if other != id => {
                            this.pending.fail(
                                id,
                                TransportError::InvalidFormat(format!(
                                    "response id {} does not match request id {}",
                                    other, id
                                )),
                            );
                            return;
                        }
                        Some(_) => {}
                    }
                    if let Err(e) = this.pending.deliver(response) {
                        tracing::debug!(id, "dropping response: {}", e);
                    }
                }
                Err(err) => {
                    this.pending.fail(id, err);
                }
            }
        });
        future
    }

    /// Returns the configured JSON-RPC endpoint URL.
    fn endpoint(&self) -> &str { &self.url }

    fn shutdown(&self) {
        let failed = self.pending.close();
        tracing::debug!(url = %self.url, failed, "HTTP transport shut down");
    }
}
