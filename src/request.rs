//! Request helper
//!
//! [`ArloClient`] sends calls through a [`Transport`], scoping each one to a
//! cloud partition with the `xcloudId` header. [`check_request`] turns the
//! outcome into a single result with three short-circuiting tiers:
//! transport, HTTP status, then the envelope's `success` flag.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ClientConfig, ConfigError};
use crate::constants::XCLOUD_ID_HEADER;
use crate::envelope::Envelope;
use crate::error::ArloError;
use crate::trans_id::{RandomTransIdGenerator, TransIdGenerator};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

/// Entry point for remote operations
pub struct ArloClient {
    transport: Box<dyn Transport>,
    trans_ids: Box<dyn TransIdGenerator>,
}

impl ArloClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            trans_ids: Box::new(RandomTransIdGenerator::from_entropy()),
        }
    }

    /// Client on a reqwest transport built from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ReqwestTransport::new(config)?))
    }

    /// Replace the transaction id source, e.g. with a seeded one in tests
    pub fn with_trans_id_generator(mut self, generator: impl TransIdGenerator + 'static) -> Self {
        self.trans_ids = Box::new(generator);
        self
    }

    /// Fresh transaction id for endpoints that require one
    pub fn trans_id(&self) -> String {
        self.trans_ids.trans_id()
    }

    /// GET `path`, scoped to `xcloud_id` when given. GET requests carry no body.
    pub fn get(
        &self,
        path: &str,
        xcloud_id: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<HttpResponse, TransportError> {
        self.send(Method::GET, path, xcloud_id, None, headers)
    }

    pub fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        xcloud_id: Option<&str>,
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<HttpResponse, TransportError> {
        let body = body.map(serde_json::to_value).transpose()?;
        self.send(Method::PUT, path, xcloud_id, body, headers)
    }

    /// POST `path` with an optional JSON body
    pub fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        xcloud_id: Option<&str>,
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<HttpResponse, TransportError> {
        let body = body.map(serde_json::to_value).transpose()?;
        self.send(Method::POST, path, xcloud_id, body, headers)
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        xcloud_id: Option<&str>,
        body: Option<serde_json::Value>,
        headers: Option<HeaderMap>,
    ) -> Result<HttpResponse, TransportError> {
        let scope = xcloud_id.filter(|id| !id.is_empty());

        // Scoping header first so caller-supplied headers take precedence.
        let mut request_headers = HeaderMap::new();
        if let Some(id) = scope {
            let value = HeaderValue::from_str(id)
                .map_err(|e| TransportError::InvalidHeader(format!("xcloudId: {}", e)))?;
            request_headers.insert(HeaderName::from_static(XCLOUD_ID_HEADER), value);
        }
        if let Some(extra) = headers {
            request_headers.extend(extra);
        }

        debug!(
            method = %method,
            path = %path,
            scoped = scope.is_some(),
            "Sending request"
        );

        self.transport.send(HttpRequest {
            method,
            path: path.to_string(),
            headers: request_headers,
            body,
        })
    }
}

impl std::fmt::Debug for ArloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArloClient").finish_non_exhaustive()
    }
}

/// Fold a call outcome into a single result annotated with `context`
///
/// * transport failure → [`ArloError::Transport`]
/// * body is not an envelope → [`ArloError::Decode`], without context
/// * status other than 200 → [`ArloError::Http`]
/// * `success: false` → [`ArloError::Api`] with the server's reason
pub fn check_request(
    outcome: Result<HttpResponse, TransportError>,
    context: &str,
) -> Result<(), ArloError> {
    let response = match outcome {
        Ok(response) => response,
        Err(source) => {
            warn!(context = %context, error = %source, "Transport failure");
            return Err(ArloError::Transport {
                context: context.to_string(),
                source,
            });
        }
    };

    let envelope: Envelope = response.decode().map_err(|e| {
        warn!(context = %context, status = response.status, error = %e, "Undecodable response body");
        ArloError::Decode(e)
    })?;

    if response.status != 200 {
        warn!(context = %context, status = response.status, "Unexpected HTTP status");
        return Err(ArloError::Http {
            context: context.to_string(),
            status: response.status,
            reason: response.reason,
        });
    }

    if let Envelope::Failure { reason } = envelope {
        warn!(context = %context, reason = %reason, "Request rejected by service");
        return Err(ArloError::Api {
            context: context.to_string(),
            reason,
        });
    }

    Ok(())
}
