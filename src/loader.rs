//! One-shot retrieval of the report document.
//!
//! A source is either an `http(s)://` URL, fetched once with a
//! cache-busting `t=<millis>` query parameter, or a path on disk. There is
//! no retry: the first failure is returned to the caller.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, ViewerError};
use crate::model::ReportCollection;

/// Where the report document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// Interpret a command-line argument as a URL or a file path.
    pub fn parse(arg: &str) -> Result<Self> {
        let trimmed = arg.trim();
        if trimmed.is_empty() {
            return Err(ViewerError::InvalidSource("empty source".to_string()));
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Source::Url(trimmed.to_string()))
        } else if lower.contains("://") {
            Err(ViewerError::InvalidSource(format!(
                "unsupported scheme in '{trimmed}'"
            )))
        } else {
            Ok(Source::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Append `t=<millis>` so intermediary caches never serve a stale copy.
#[must_use]
pub fn cache_busted_url(url: &str, now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let (base, fragment) = match url.split_once('#') {
        Some((base, frag)) => (base, Some(frag)),
        None => (url, None),
    };
    let sep = if base.contains('?') { '&' } else { '?' };
    match fragment {
        Some(frag) => format!("{base}{sep}t={millis}#{frag}"),
        None => format!("{base}{sep}t={millis}"),
    }
}

/// Parse the document body, rejecting `null` and `[]`.
pub fn parse_collection(body: &str) -> Result<ReportCollection> {
    non_empty(serde_json::from_str(body)?)
}

fn non_empty(reports: Option<ReportCollection>) -> Result<ReportCollection> {
    match reports {
        Some(reports) if !reports.is_empty() => Ok(reports),
        _ => Err(ViewerError::EmptyData),
    }
}

/// Read the report collection from `source`.
pub fn load(source: &Source) -> Result<ReportCollection> {
    let result = read_reports(source).and_then(non_empty);
    match &result {
        Ok(reports) => {
            tracing::debug!(source = %source, reports = reports.len(), "loaded report data")
        }
        Err(e) => tracing::error!(source = %source, error = %e, "error loading data"),
    }
    result
}

fn read_reports(source: &Source) -> Result<Option<ReportCollection>> {
    match source {
        Source::File(path) => {
            let io_err = |e| ViewerError::Io {
                path: path.display().to_string(),
                source: e,
            };
            let file = File::open(path).map_err(io_err)?;
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                if e.is_io() {
                    io_err(e.into())
                } else {
                    ViewerError::Malformed(e)
                }
            })
        }
        Source::Url(url) => fetch(url),
    }
}

/// Stream the response body straight into the deserializer, so large
/// documents are not subject to a string size limit.
fn fetch(url: &str) -> Result<Option<ReportCollection>> {
    let busted = cache_busted_url(url, SystemTime::now());
    tracing::debug!(url = %busted, "fetching report data");
    let transport = |reason: String| ViewerError::Transport {
        url: url.to_string(),
        reason,
    };
    match ureq::get(&busted).set("User-Agent", "snapview").call() {
        Ok(resp) => serde_json::from_reader(BufReader::new(resp.into_reader())).map_err(|e| {
            if e.is_io() {
                transport(e.to_string())
            } else {
                ViewerError::Malformed(e)
            }
        }),
        Err(ureq::Error::Status(status, _)) => Err(ViewerError::Status {
            url: url.to_string(),
            status,
        }),
        Err(e) => Err(transport(e.to_string())),
    }
}
