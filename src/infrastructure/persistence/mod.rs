mod disk_vector_store;

pub use disk_vector_store::DiskVectorStore;
