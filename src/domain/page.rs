use super::chunk::DocumentId;

/// One page of sanitized text extracted from a source document.
/// Immutable after ingestion; `number` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub document_id: DocumentId,
    pub number: u32,
    pub text: String,
}

impl Page {
    pub fn new(document_id: DocumentId, number: u32, text: String) -> Self {
        Self {
            document_id,
            number,
            text,
        }
    }
}
