//! PDF text extraction with strategy fallback.
//!
//! Primary strategy is pdf-extract; when it fails or produces unusable text
//! the content streams are re-read with lopdf. No retries beyond that: this
//! is a local, CPU-bound operation and callers run it on the blocking pool.

use thiserror::Error;
use tracing::{debug, warn};

/// Minimum alphanumeric characters for extracted text to count as usable.
const MIN_USABLE_ALNUM: usize = 64;
/// Maximum tolerated ratio of U+FFFD replacement characters.
const MAX_REPLACEMENT_RATIO: f64 = 0.2;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("file is not a valid PDF document")]
    NotPdf,

    #[error("{0}")]
    Unreadable(String),
}

/// Extracts plain text from a PDF byte stream.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(ExtractionError::NotPdf);
    }

    match extract_with_pdf_extract(bytes) {
        Ok(text) if is_usable(&text) => {
            debug!("pdf-extract produced {} chars", text.len());
            return Ok(tidy(&text));
        }
        Ok(text) => warn!(
            "pdf-extract output unusable ({} chars), falling back to lopdf",
            text.len()
        ),
        Err(e) => warn!("pdf-extract failed ({e}), falling back to lopdf"),
    }

    match extract_with_lopdf(bytes) {
        Ok(text) if is_usable(&text) => {
            debug!("lopdf produced {} chars", text.len());
            Ok(tidy(&text))
        }
        Ok(_) => Err(ExtractionError::Unreadable(
            "could not extract usable text from the document".to_string(),
        )),
        Err(e) => Err(ExtractionError::Unreadable(format!(
            "all extraction strategies failed: {e}"
        ))),
    }
}

fn extract_with_pdf_extract(bytes: &[u8]) -> Result<String, String> {
    // pdf-extract panics on some malformed files; contain the unwind
    std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| "extractor panicked".to_string())?
        .map_err(|e| e.to_string())
}

fn extract_with_lopdf(bytes: &[u8]) -> Result<String, String> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| e.to_string())?;
    let mut out = String::new();
    for page in doc.get_pages().keys() {
        if let Ok(text) = doc.extract_text(&[*page]) {
            out.push_str(&text);
            out.push('\n');
        }
    }
    Ok(out)
}

/// Usable-text heuristic: enough alphanumeric content, and not dominated by
/// replacement characters from broken font encodings.
fn is_usable(text: &str) -> bool {
    let alnum = text.chars().filter(|c| c.is_alphanumeric()).count();
    if alnum < MIN_USABLE_ALNUM {
        return false;
    }
    let total = text.chars().count();
    let replacements = text.chars().filter(|c| *c == '\u{FFFD}').count();
    (replacements as f64) / (total as f64) <= MAX_REPLACEMENT_RATIO
}

/// Trims trailing whitespace per line and collapses runs of blank lines
/// left behind by multi-column layouts.
fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blanks = 0;
    for line in text.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blanks += 1;
            if blanks > 2 {
                continue;
            }
        } else {
            blanks = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_end().to_string()
}
