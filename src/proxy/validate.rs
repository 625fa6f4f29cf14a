//! Request validation: the target URL must be present and well-formed
//! before any network resource is committed.
//!
//! Validation is purely syntactic. Scheme restriction (http vs https) is
//! the transport-selection step's concern, so an absolute `ftp://` URL
//! passes here and is rejected there.

use url::Url;

use crate::http::error::{ProxyError, ProxyResult};

/// A validated, parsed forwarding target.
#[derive(Debug, Clone)]
pub struct TargetDescriptor {
    url: Url,
    raw: String,
}

impl TargetDescriptor {
    /// The full target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The target exactly as the caller supplied it, before parsing
    /// normalized it. Error reports echo this form back.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// URL scheme, lowercased by the parser.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Target host, as it appeared in the URL.
    pub fn host(&self) -> &str {
        // Guaranteed by validate_target: the URL has a host.
        self.url.host_str().unwrap_or_default()
    }

    /// Value for the outbound `host` header: `host` or `host:port` when
    /// the port is not the scheme default.
    pub fn host_header(&self) -> String {
        match self.url.port() {
            Some(port) => format!("{}:{}", self.host(), port),
            None => self.host().to_string(),
        }
    }
}

/// Validate the raw `url` query-parameter value.
///
/// - Missing or empty → [`ProxyError::MissingTarget`]
/// - Not an absolute URL with a host → [`ProxyError::InvalidTarget`]
///
/// Pure function of its input; no side effects.
pub fn validate_target(raw: Option<&str>) -> ProxyResult<TargetDescriptor> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(ProxyError::MissingTarget),
    };

    let url = Url::parse(raw).map_err(|_| ProxyError::InvalidTarget {
        target: raw.to_string(),
    })?;

    if !url.has_host() {
        return Err(ProxyError::InvalidTarget {
            target: raw.to_string(),
        });
    }

    Ok(TargetDescriptor {
        url,
        raw: raw.to_string(),
    })
}
