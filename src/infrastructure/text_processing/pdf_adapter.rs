use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, PageText};
use crate::domain::Document;

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Readers tolerate leading junk before the header.
const HEADER_SEARCH_WINDOW: usize = 1024;

fn has_pdf_header(data: &[u8]) -> bool {
    data[..data.len().min(HEADER_SEARCH_WINDOW)]
        .windows(PDF_MAGIC.len())
        .any(|window| window == PDF_MAGIC)
}

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract(data: &[u8]) -> Result<Vec<PageText>, FileLoaderError> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());

        for number in page_numbers {
            match doc.extract_text(&[number]) {
                Ok(raw) => {
                    let text = sanitize_extracted_text(&raw);
                    if !text.is_empty() {
                        pages.push(PageText { number, text });
                    }
                }
                Err(e) => {
                    tracing::warn!(page = number, error = %e, "Failed to extract page text, skipping");
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id,
            filename = %document.filename,
        )
    )]
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Vec<PageText>, FileLoaderError> {
        if !has_pdf_header(data) {
            return Err(FileLoaderError::UnsupportedContentType(format!(
                "{} (missing %PDF header)",
                document.content_type.as_mime()
            )));
        }

        let owned = data.to_vec();
        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract(&owned)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(pages)
    }
}
