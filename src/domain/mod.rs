mod chunk;
mod document;
mod embedding;
mod page;

pub use chunk::{Chunk, ChunkId, DocumentId};
pub use document::Document;
pub use embedding::Embedding;
pub use page::Page;
