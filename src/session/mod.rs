//! Annotation document save/load.
//!
//! Serialises the annotation store into a JSON document with save metadata,
//! writes it atomically (optionally gzip-compressed), and decodes documents
//! in either the wrapped or the bare-array form.

mod document;
mod options;

pub use document::{
    AnnotationDocument, DocumentError, DocumentMetadata, load_document, parse_annotations,
    save_document,
};
pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, ExportOptions, options_from_config,
};

#[cfg(test)]
mod tests;
