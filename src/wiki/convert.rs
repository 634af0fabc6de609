//! Conversion entry points
//!
//! Text in, [`Document`] out. Conversion of text never fails: structural problems become
//! diagnostics on the document. The only fatal case is input that is not UTF-8, and it is
//! fatal for that one document only, which is what [`convert_batch`] relies on.

use crate::wiki::ast::Document;
use crate::wiki::building::build_document;
use crate::wiki::config::WikiConfig;
use std::borrow::Cow;
use thiserror::Error;

const BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Byte offset is relative to the input after a leading byte-order mark was removed.
    #[error("input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Convert wiki source text into its document model.
pub fn convert_str(source: &str, config: &WikiConfig) -> Document {
    build_document(&normalize_newlines(source), &config.parsing)
}

/// Decode and convert raw bytes. A UTF-8 byte-order mark is skipped.
pub fn convert_bytes(bytes: &[u8], config: &WikiConfig) -> Result<Document, EncodingError> {
    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
    let source = std::str::from_utf8(bytes).map_err(|e| EncodingError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    Ok(convert_str(source, config))
}

/// Convert several documents independently, preserving input order.
#[cfg(not(feature = "parallel"))]
pub fn convert_batch(
    sources: &[&[u8]],
    config: &WikiConfig,
) -> Vec<Result<Document, EncodingError>> {
    log::debug!("converting batch of {} documents", sources.len());
    sources
        .iter()
        .map(|bytes| convert_bytes(bytes, config))
        .collect()
}

/// Convert several documents independently and in parallel, preserving input order.
#[cfg(feature = "parallel")]
pub fn convert_batch(
    sources: &[&[u8]],
    config: &WikiConfig,
) -> Vec<Result<Document, EncodingError>> {
    use rayon::prelude::*;

    log::debug!("converting batch of {} documents in parallel", sources.len());
    sources
        .par_iter()
        .map(|bytes| convert_bytes(bytes, config))
        .collect()
}

fn normalize_newlines(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}
