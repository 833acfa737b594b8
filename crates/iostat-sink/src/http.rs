//! HTTP transport: one plain-text POST per payload over a pooled hyper
//! client.
//!
//! Only `http://` endpoints are supported; there is no TLS connector.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::{Result, SinkError, Transport};

const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// POSTs payloads to a fixed collector URI.
///
/// The whole exchange, connect through draining the response body, is
/// bounded by `timeout`; exceeding it is reported as
/// [`SinkError::Timeout`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    uri: Uri,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport for `url`, which must be an absolute `http://` URI
    /// with a host. Must be called inside a tokio runtime before the first
    /// send.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let uri = url.parse::<Uri>().map_err(|err| SinkError::InvalidUri {
            url: url.to_string(),
            reason: err.to_string(),
        })?;
        match uri.scheme_str() {
            Some(scheme) if scheme.eq_ignore_ascii_case("http") => {}
            Some(scheme) => return Err(SinkError::UnsupportedScheme(scheme.to_string())),
            None => {
                return Err(SinkError::InvalidUri {
                    url: url.to_string(),
                    reason: "expected http://<host>".to_string(),
                })
            }
        }
        if uri.host().is_none() {
            return Err(SinkError::InvalidUri {
                url: url.to_string(),
                reason: "missing host".to_string(),
            });
        }

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            uri,
            timeout,
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn post(&self, payload: Bytes) -> Result<()> {
        let mut request = Request::new(Full::new(payload));
        *request.method_mut() = Method::POST;
        *request.uri_mut() = self.uri.clone();
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_TEXT));

        let response = self.client.request(request).await?;
        let status = response.status();
        // Drain so the connection goes back to the pool.
        response.into_body().collect().await?;

        if !status.is_success() {
            return Err(SinkError::Status(status));
        }
        Ok(())
    }
}

impl Transport for HttpTransport {
    async fn send(&self, payload: Bytes) -> Result<()> {
        match tokio::time::timeout(self.timeout, self.post(payload)).await {
            Ok(result) => result,
            Err(_) => Err(SinkError::Timeout(self.timeout)),
        }
    }
}
