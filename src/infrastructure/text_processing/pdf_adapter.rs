use async_trait::async_trait;
use lopdf::Document as PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentId, Page};

use super::text_sanitizer::sanitize_page_text;

/// PDF text extraction, one page per `Page`, page numbers 1-based.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages_blocking(
        data: &[u8],
        document_id: DocumentId,
    ) -> Result<Vec<Page>, FileLoaderError> {
        let doc = PdfDocument::load_mem(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_map = doc.get_pages();
        let mut page_numbers: Vec<u32> = page_map.keys().copied().collect();
        page_numbers.sort_unstable();

        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            // Pages without a decodable text layer yield nothing rather
            // than failing the whole document.
            let raw = doc.extract_text(&[number]).unwrap_or_default();
            let text = sanitize_page_text(&raw);

            if !text.is_empty() {
                pages.push(Page::new(document_id, number, text));
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
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Vec<Page>, FileLoaderError> {
        let data = data.to_vec();
        let document_id = document.id;
        let filename = document.filename.clone();

        let pages = tokio::task::spawn_blocking(move || {
            Self::extract_pages_blocking(&data, document_id)
        })
        .await
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(filename));
        }

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");
        Ok(pages)
    }
}
