// src/engine/io.rs
//
// I/O operations: Source enum and byte loading for local files, memory and
// remote http(s) locations.

use crate::engine::common::EngineResult;
use crate::engine::limits::LoadLimits;
use crate::error::PlaiceholderError;
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the source image comes from.
#[derive(Clone, Debug)]
pub enum Source {
    /// Local file path, memory-mapped when loaded
    Path(PathBuf),
    /// Remote http(s) URL, fetched once with a bounded timeout
    Url(String),
    /// In-memory encoded image data
    Memory(Arc<Vec<u8>>),
}

/// Encoded bytes of a loaded source.
pub(crate) enum SourceBytes {
    Owned(Arc<Vec<u8>>),
    Mapped(Mmap),
}

impl AsRef<[u8]> for SourceBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            SourceBytes::Owned(data) => data.as_slice(),
            SourceBytes::Mapped(mmap) => mmap.as_ref(),
        }
    }
}

impl Source {
    /// Classify a location string: anything starting with `http` is remote,
    /// everything else is a local path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http") {
            Source::Url(location.to_string())
        } else {
            Source::Path(PathBuf::from(location))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Url(_))
    }

    /// Short description for logs; URLs lose their query string.
    pub fn describe(&self) -> Cow<'_, str> {
        match self {
            Source::Path(path) => path.to_string_lossy(),
            Source::Url(url) => Cow::Borrowed(redact_url(url)),
            Source::Memory(data) => Cow::Owned(format!("<{} bytes in memory>", data.len())),
        }
    }

    /// Load the encoded bytes, enforcing the byte limit.
    pub(crate) fn load(&self, limits: &LoadLimits) -> EngineResult<SourceBytes> {
        let bytes = match self {
            Source::Memory(data) => SourceBytes::Owned(data.clone()),
            Source::Path(path) => map_file(path, limits)?,
            Source::Url(url) => SourceBytes::Owned(Arc::new(fetch_remote(url, limits)?)),
        };
        limits.enforce_source_len(bytes.as_ref().len() as u64)?;
        tracing::debug!(
            source = %self.describe(),
            bytes = bytes.as_ref().len(),
            "loaded source bytes"
        );
        Ok(bytes)
    }
}

impl From<Vec<u8>> for Source {
    fn from(data: Vec<u8>) -> Self {
        Source::Memory(Arc::new(data))
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

fn map_file(path: &Path, limits: &LoadLimits) -> EngineResult<SourceBytes> {
    let display = path.to_string_lossy().to_string();

    // Validate that the file exists (fast check, no read)
    if !path.is_file() {
        return Err(PlaiceholderError::source_not_found(display));
    }

    let file =
        File::open(path).map_err(|e| PlaiceholderError::source_read_failed(display.clone(), e))?;
    let len = file
        .metadata()
        .map_err(|e| PlaiceholderError::source_read_failed(display.clone(), e))?
        .len();
    limits.enforce_source_len(len)?;

    // Empty files cannot be mapped on every platform; they are undecodable anyway.
    if len == 0 {
        return Ok(SourceBytes::Owned(Arc::new(Vec::new())));
    }

    // Safety: the file is only read while the mapping is alive and we assume it is
    // not truncated externally during the (short) decode.
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(|e| PlaiceholderError::source_read_failed(display, e))?;
    Ok(SourceBytes::Mapped(mmap))
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str, limits: &LoadLimits) -> EngineResult<Vec<u8>> {
    use std::io::Read;

    let redacted = redact_url(url).to_string();
    tracing::debug!(url = %redacted, timeout = ?limits.timeout, "fetching remote source");

    let client = reqwest::blocking::Client::builder()
        .timeout(limits.timeout)
        .build()
        .map_err(|e| PlaiceholderError::source_unreachable(redacted.clone(), e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| {
            PlaiceholderError::source_unreachable(redacted.clone(), describe_fetch_error(&e))
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PlaiceholderError::source_unreachable(
            redacted,
            format!("HTTP status {status}"),
        ));
    }

    if let Some(len) = response.content_length() {
        limits.enforce_source_len(len)?;
    }

    // Read one byte past the limit so an unannounced oversized body is still caught.
    let mut body = Vec::new();
    response
        .take(limits.max_bytes.saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|e| PlaiceholderError::source_unreachable(redacted, e.to_string()))?;
    Ok(body)
}

#[cfg(feature = "remote")]
fn describe_fetch_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str, _limits: &LoadLimits) -> EngineResult<Vec<u8>> {
    Err(PlaiceholderError::source_unreachable(
        redact_url(url).to_string(),
        "remote sources require the `remote` feature",
    ))
}

fn redact_url(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_classifies_remote_and_local() {
        assert!(Source::parse("https://example.com/a.png").is_remote());
        assert!(Source::parse("http://example.com/a.png").is_remote());
        assert!(!Source::parse("/var/images/a.png").is_remote());
        assert!(!Source::parse("images/http.png").is_remote());
    }

    #[test]
    fn describe_redacts_query_strings() {
        let source = Source::parse("https://cdn.example.com/a.png?token=secret#frag");
        assert_eq!(source.describe(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn missing_path_is_source_not_found() {
        let source = Source::parse("/definitely/not/here.png");
        let err = source.load(&LoadLimits::default()).err().unwrap();
        assert!(matches!(err, PlaiceholderError::SourceNotFound { .. }));
    }

    #[test]
    fn directory_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Source::Path(dir.path().to_path_buf())
            .load(&LoadLimits::default())
            .err()
            .unwrap();
        assert!(matches!(err, PlaiceholderError::SourceNotFound { .. }));
    }

    #[test]
    fn path_is_mapped_and_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello bytes").unwrap();
        let bytes = Source::Path(file.path().to_path_buf())
            .load(&LoadLimits::default())
            .unwrap();
        assert_eq!(bytes.as_ref(), b"hello bytes");
    }

    #[test]
    fn byte_limit_applies_to_files_and_memory() {
        let limits = LoadLimits::default().with_max_bytes(4);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        let err = Source::Path(file.path().to_path_buf())
            .load(&limits)
            .err()
            .unwrap();
        assert!(matches!(err, PlaiceholderError::SourceTooLarge { bytes: 10, max: 4 }));

        let err = Source::from(vec![0u8; 5]).load(&limits).err().unwrap();
        assert!(matches!(err, PlaiceholderError::SourceTooLarge { .. }));
    }

    #[cfg(feature = "remote")]
    #[test]
    fn unreachable_url_fails_fast() {
        // Port 9 on localhost (discard) is closed on test machines; connection is refused.
        let limits = LoadLimits::default().with_timeout(std::time::Duration::from_secs(2));
        let err = Source::parse("http://127.0.0.1:9/a.png")
            .load(&limits)
            .err()
            .unwrap();
        assert!(matches!(err, PlaiceholderError::SourceUnreachable { .. }));
    }
}
