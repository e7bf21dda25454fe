//! Internal constants for Kroki requests.

use std::time::Duration;

/// Default HTTP timeout for Kroki requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Kroki diagram type segment of the request path.
pub(crate) const MERMAID_ENDPOINT: &str = "mermaid";

/// Kroki output format segment of the request path.
pub(crate) const SVG_FORMAT: &str = "svg";

/// `User-Agent` sent with every request.
pub(crate) const USER_AGENT: &str = concat!("mmdsvg/", env!("CARGO_PKG_VERSION"));
