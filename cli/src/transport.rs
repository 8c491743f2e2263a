//! Transport adapter — obtains the served blob and its headers.
//!
//! `INPUT` is either an `http(s)://` URL or a local file. A URL with no path
//! gets the configured resource path appended, so `http://192.168.1.20`
//! fetches `http://192.168.1.20/config.b64`. A local file carries no
//! headers; the caller supplies scheme and compression explicitly.

use std::path::PathBuf;
use std::time::Duration;

use cfgbackup_blob::{COMPRESSION_HEADER, ENCRYPTION_HEADER};
use reqwest::Url;
use thiserror::Error;

/// Failures while obtaining the blob. No retries are attempted.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The input looked like a URL but could not be parsed.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request failed before a response arrived.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The device answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// A local file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A blob as obtained from the device or disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fetched {
    /// Raw body bytes (base64 text, possibly gzip-wrapped).
    pub body: Vec<u8>,
    /// `X-Encryption-Type` value, if served.
    pub encryption: Option<String>,
    /// `X-Compression-Type` value, if served.
    pub compression: Option<String>,
    /// Host the blob came from; `None` for local files.
    pub host: Option<String>,
}

/// `true` if `input` should be fetched over HTTP.
#[must_use]
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Parse `input` and append `resource_path` when the URL has no path.
///
/// # Errors
///
/// Returns [`TransportError::InvalidUrl`] if `input` is not a valid URL.
pub fn resolve_url(input: &str, resource_path: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(input).map_err(|e| TransportError::InvalidUrl {
        url: input.to_owned(),
        reason: e.to_string(),
    })?;
    if url.host_str().is_none() {
        return Err(TransportError::InvalidUrl {
            url: input.to_owned(),
            reason: "missing host".into(),
        });
    }
    if matches!(url.path(), "" | "/") {
        url.set_path(resource_path);
    }
    Ok(url)
}

fn header(response: &reqwest::blocking::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// GET the blob from `url`.
///
/// # Errors
///
/// Returns [`TransportError::Request`] on connection or body failures and
/// [`TransportError::Status`] on a non-2xx answer.
pub fn fetch_url(url: &Url, timeout: Duration) -> Result<Fetched, TransportError> {
    let request_err = |source| TransportError::Request {
        url: url.to_string(),
        source,
    };

    tracing::info!(%url, "Fetching config blob");
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(request_err)?;
    let response = client.get(url.clone()).send().map_err(request_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let encryption = header(&response, ENCRYPTION_HEADER);
    let compression = header(&response, COMPRESSION_HEADER);
    let body = response.bytes().map_err(request_err)?.to_vec();
    tracing::debug!(
        body_len = body.len(),
        encryption = encryption.as_deref().unwrap_or("-"),
        compression = compression.as_deref().unwrap_or("-"),
        "Response received"
    );

    Ok(Fetched {
        body,
        encryption,
        compression,
        host: url.host_str().map(str::to_owned),
    })
}

/// Read the blob from a local file.
///
/// # Errors
///
/// Returns [`TransportError::Read`] if the file cannot be read.
pub fn read_file(path: PathBuf) -> Result<Fetched, TransportError> {
    match std::fs::read(&path) {
        Ok(body) => {
            tracing::debug!(path = %path.display(), body_len = body.len(), "Read config blob");
            Ok(Fetched {
                body,
                ..Fetched::default()
            })
        }
        Err(source) => Err(TransportError::Read { path, source }),
    }
}

/// Obtain the blob named by `input`.
///
/// # Errors
///
/// See [`resolve_url`], [`fetch_url`] and [`read_file`].
pub fn fetch(
    input: &str,
    resource_path: &str,
    timeout: Duration,
) -> Result<Fetched, TransportError> {
    if is_url(input) {
        let url = resolve_url(input, resource_path)?;
        fetch_url(&url, timeout)
    } else {
        read_file(PathBuf::from(input))
    }
}
