//! PDF text extraction — best-effort plain text, never an error past this boundary.

use std::path::Path;

use async_trait::async_trait;
use tracing::warn;

/// Turns an uploaded file into plain text. An empty string means "nothing usable".
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> String;
}

/// `pdf-extract` backed extractor. Parsing runs on the blocking pool because the
/// parser is CPU-bound and may panic on malformed input.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> String {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read upload {}: {e}", path.display());
                return String::new();
            }
        };

        let parsed =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
                .await;

        match parsed {
            Ok(Ok(pages)) => join_pages(&pages),
            Ok(Err(e)) => {
                warn!("PDF extraction failed for {}: {e}", path.display());
                String::new()
            }
            Err(e) => {
                warn!("PDF parser aborted for {}: {e}", path.display());
                String::new()
            }
        }
    }
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_join_pages_newline_separated_and_trimmed() {
        let pages = vec!["  Jane Doe\n".to_string(), "Rust, Go\n\n".to_string()];
        assert_eq!(join_pages(&pages), "Jane Doe\n\nRust, Go");
    }

    #[test]
    fn test_join_pages_blank_document_is_empty() {
        let pages = vec!["\n".to_string(), "   ".to_string()];
        assert_eq!(join_pages(&pages), "");
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let text = PdfTextExtractor.extract(&dir.path().join("absent.pdf")).await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_yield_empty_text() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"definitely not a pdf document").unwrap();
        let text = PdfTextExtractor.extract(file.path()).await;
        assert_eq!(text, "");
    }
}
