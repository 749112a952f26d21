//! Centralized validation and helper functions.

use url::Url;

/// Maximum number of candidates accepted in one listing (DOS protection)
pub const MAX_CANDIDATES: usize = 100_000;

/// Maximum document size accepted by the web endpoint
pub const MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

/// Extensions the file-listing provider reports as images
pub const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// Input validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty document URL or id")]
    EmptyDocumentId,
    #[error("Could not extract document id from URL: {0}")]
    InvalidDocumentUrl(String),
    #[error("Document too large: {0} bytes exceeds maximum of {MAX_DOCUMENT_BYTES}")]
    DocumentTooLarge(usize),
}

/// Check whether a filename ends in a known image extension (case-insensitive).
///
/// # Examples
///
/// ```
/// use comp_linker::utils::validation::is_image_name;
///
/// assert!(is_image_name("EOY_FS_Mass_12_30_7am.PNG"));
/// assert!(!is_image_name("notes.txt"));
/// ```
#[must_use]
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Check if adding another candidate would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new candidate.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_candidate_limit(count: usize) -> Option<String> {
    if count >= MAX_CANDIDATES {
        Some(format!(
            "Too many candidates: adding another would exceed maximum of {MAX_CANDIDATES}"
        ))
    } else {
        None
    }
}

/// Reject documents larger than [`MAX_DOCUMENT_BYTES`]
///
/// # Errors
///
/// Returns `ValidationError::DocumentTooLarge` if the text exceeds the limit.
pub fn validate_document_size(text: &str) -> Result<(), ValidationError> {
    if text.len() > MAX_DOCUMENT_BYTES {
        return Err(ValidationError::DocumentTooLarge(text.len()));
    }
    Ok(())
}

/// Extract a document id from a full document URL, or return a bare id.
///
/// Input that does not start with `http` is taken to be the id itself.
/// URLs are parsed with [`Url::parse`] and must carry a `/document/d/<id>`
/// run of path segments.
///
/// # Errors
///
/// Returns `ValidationError::EmptyDocumentId` for blank input and
/// `ValidationError::InvalidDocumentUrl` when a URL carries no id.
pub fn extract_doc_id(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDocumentId);
    }

    if !trimmed.starts_with("http") {
        return Ok(trimmed.to_string());
    }

    let invalid = || ValidationError::InvalidDocumentUrl(trimmed.to_string());

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    let segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();
    let id = segments
        .windows(3)
        .find(|w| w[0] == "document" && w[1] == "d" && !w[2].is_empty())
        .map(|w| w[2])
        .ok_or_else(invalid)?;

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_names() {
        for name in ["a.png", "a.JPG", "a.jpeg", "a.gif", "a.webp"] {
            assert!(is_image_name(name), "{name}");
        }
        for name in ["a.pdf", "png", "a.png.txt", ""] {
            assert!(!is_image_name(name), "{name}");
        }
    }

    #[test]
    fn test_candidate_limit() {
        assert!(check_candidate_limit(0).is_none());
        assert!(check_candidate_limit(MAX_CANDIDATES - 1).is_none());
        assert!(check_candidate_limit(MAX_CANDIDATES).is_some());
    }

    #[test]
    fn test_document_size() {
        assert!(validate_document_size("Email Comp: Mass [LINK]").is_ok());
        let big = "x".repeat(MAX_DOCUMENT_BYTES + 1);
        assert!(matches!(
            validate_document_size(&big),
            Err(ValidationError::DocumentTooLarge(n)) if n == MAX_DOCUMENT_BYTES + 1
        ));
    }

    #[test]
    fn test_extract_doc_id_from_url() {
        let url = "https://docs.google.com/document/d/1AbC_dEf-123/edit?usp=sharing";
        assert_eq!(extract_doc_id(url).unwrap(), "1AbC_dEf-123");
        assert_eq!(
            extract_doc_id("  https://docs.google.com/document/d/xyz  ").unwrap(),
            "xyz"
        );
    }

    #[test]
    fn test_extract_doc_id_lenient_url_forms() {
        assert_eq!(
            extract_doc_id("https:docs.google.com/document/d/abc/edit").unwrap(),
            "abc"
        );
        assert_eq!(
            extract_doc_id("https://docs.google.com\\document\\d\\abc").unwrap(),
            "abc"
        );
        assert_eq!(
            extract_doc_id("https://docs.google.com/u/0/document/d/abc#heading=h.1").unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_extract_doc_id_bare() {
        assert_eq!(extract_doc_id(" 1AbC ").unwrap(), "1AbC");
    }

    #[test]
    fn test_extract_doc_id_errors() {
        assert!(matches!(
            extract_doc_id("   "),
            Err(ValidationError::EmptyDocumentId)
        ));
        for bad in [
            "https://docs.google.com/spreadsheets/d/abc",
            "https://docs.google.com/document/d/",
            "http:nothing",
            "https://docs.google.com",
            "http//docs.google.com/document/d/abc",
        ] {
            assert!(
                matches!(extract_doc_id(bad), Err(ValidationError::InvalidDocumentUrl(_))),
                "{bad}"
            );
        }
    }
}
