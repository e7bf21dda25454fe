//! Blocking Kroki client for Mermaid to SVG rendering.
//!
//! One POST per diagram: the raw Mermaid text goes in the body of
//! `{server}/mermaid/svg` and the SVG document comes back as the response
//! body. There is no retry; callers decide what a failure means.

use std::time::Duration;

use ureq::Agent;

use crate::consts::{DEFAULT_TIMEOUT, MERMAID_ENDPOINT, SVG_FORMAT, USER_AGENT};

/// Something that turns Mermaid source into SVG text.
pub trait Renderer {
    /// Render `source` and return the SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the diagram could not be rendered.
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

/// Diagram rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: ureq::Error,
    },
    /// Kroki answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body could not be read as UTF-8 text.
    #[error("failed to read response body: {0}")]
    Body(#[source] ureq::Error),
    /// Kroki answered successfully with nothing in the body.
    #[error("empty response body")]
    EmptyResponse,
}

/// Kroki HTTP client bound to one server.
#[derive(Clone)]
pub struct KrokiClient {
    server_url: String,
    agent: Agent,
}

impl KrokiClient {
    /// Create a client for `server_url` with the default 30 second timeout.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_timeout(server_url, DEFAULT_TIMEOUT)
    }

    /// Create a client for `server_url` with a custom request timeout.
    pub fn with_timeout(server_url: impl Into<String>, timeout: Duration) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_owned();
        Self {
            server_url,
            agent: create_agent(timeout),
        }
    }

    /// Full URL the Mermaid source is posted to.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("{}/{MERMAID_ENDPOINT}/{SVG_FORMAT}", self.server_url)
    }

    /// Post `source` to Kroki and return the response body as SVG text.
    ///
    /// Non-success responses carry the body Kroki sent back, which usually
    /// holds the Mermaid syntax error.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] on transport failure, timeout, non-success
    /// status, unreadable body, or an empty body.
    pub fn render_svg(&self, source: &str) -> Result<String, RenderError> {
        let url = self.endpoint_url();
        tracing::debug!(url = %url, bytes = source.len(), "Rendering diagram");

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/plain")
            .header("User-Agent", USER_AGENT)
            .header("Accept", "image/svg+xml")
            .send(source.as_bytes())
            .map_err(|e| RenderError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if !(200..300).contains(&status) {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(RenderError::Status {
                status,
                body: error_body,
            });
        }

        let svg = body.read_to_string().map_err(RenderError::Body)?;
        if svg.is_empty() {
            return Err(RenderError::EmptyResponse);
        }
        Ok(svg)
    }
}

impl Renderer for KrokiClient {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        self.render_svg(source)
    }
}

/// Create HTTP agent with the specified timeout.
///
/// Status codes are inspected by the caller so the error body stays readable.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}
