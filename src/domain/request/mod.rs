//! Request domain module

mod chunk;
mod file_kind;
mod slug;

pub use chunk::{ChunkRequest, MISSING_SOURCE_PLACEHOLDER, RAG_MODE};
pub use file_kind::FileKind;
pub use slug::{chunk_file_name, slugify, CHUNK_EXTENSION};
