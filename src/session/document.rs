use super::options::ExportOptions;
use crate::draw::Annotation;
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Saved annotation document.
///
/// ```json
/// { "annotations": [...], "metadata": { "timestamp": "...", "source": "screen-share",
///   "quality": "high", "totalAnnotations": 2 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    pub annotations: Vec<Annotation>,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// RFC 3339 time of the save
    pub timestamp: String,
    pub source: String,
    pub quality: String,
    pub total_annotations: usize,
}

impl AnnotationDocument {
    /// Wraps the current annotations with save metadata.
    pub fn new(annotations: &[Annotation], options: &ExportOptions) -> Self {
        Self {
            annotations: annotations.to_vec(),
            metadata: DocumentMetadata {
                timestamp: Utc::now().to_rfc3339(),
                source: options.source.clone(),
                quality: options.quality.clone(),
                total_annotations: annotations.len(),
            },
        }
    }

    /// Pretty JSON form of the document.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Errors decoding a loaded document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid annotation document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to decompress annotation document: {0}")]
    Decompress(#[source] std::io::Error),
}

/// Either load shape: a bare array or a wrapped document.
#[derive(Deserialize)]
#[serde(untagged)]
enum LoadPayload {
    Bare(Vec<Annotation>),
    Wrapped { annotations: Vec<Annotation> },
}

/// Decodes annotations from document bytes (plain or gzip JSON).
///
/// Accepts a bare `[Annotation, ...]` array or `{ "annotations": [...] }`.
pub fn parse_annotations(bytes: &[u8]) -> Result<Vec<Annotation>, DocumentError> {
    let decompressed;
    let json = if is_gzip(bytes) {
        let mut decoder = GzDecoder::new(bytes);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(DocumentError::Decompress)?;
        decompressed = out;
        &decompressed[..]
    } else {
        bytes
    };

    let annotations = match serde_json::from_slice::<LoadPayload>(json)? {
        LoadPayload::Bare(annotations) => annotations,
        LoadPayload::Wrapped { annotations } => annotations,
    };
    Ok(annotations)
}

/// Writes a document for `annotations` to `target`, or to a timestamped file
/// in the export directory. Returns the path written.
///
/// The write goes to a temporary file first and is renamed into place while
/// holding an exclusive lock on the directory's lock file.
pub fn save_document(
    annotations: &[Annotation],
    options: &ExportOptions,
    target: Option<&Path>,
) -> Result<PathBuf> {
    let path = match target {
        Some(path) => path.to_path_buf(),
        None => options.file_path_at(Local::now()),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let document = AnnotationDocument::new(annotations, options);
    let mut bytes = document
        .to_json()
        .context("failed to serialise annotation document")?
        .into_bytes();

    if bytes.len() as u64 > options.max_file_size_bytes {
        anyhow::bail!(
            "annotation document is {} bytes which exceeds the limit of {} bytes",
            bytes.len(),
            options.max_file_size_bytes
        );
    }

    let compressed = options.should_compress(bytes.len());
    if compressed {
        bytes = compress_bytes(&bytes)?;
    }

    let lock_path = options.lock_file_path(&path);
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open lock file {}", lock_path.display()))?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock {}", lock_path.display()))?;

    let result = write_atomically(&path, &bytes);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!("failed to unlock {}: {}", lock_path.display(), err)
    });
    result?;

    info!(
        "Saved {} annotations to {} ({} bytes, compression={})",
        annotations.len(),
        path.display(),
        bytes.len(),
        compressed
    );
    Ok(path)
}

/// Reads and decodes the annotations stored at `path`.
///
/// Files above `max_file_size_bytes` are refused.
pub fn load_document(path: &Path, options: &ExportOptions) -> Result<Vec<Annotation>> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("failed to stat annotation file {}", path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        anyhow::bail!(
            "annotation file {} is {} bytes which exceeds the limit of {} bytes",
            path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
    }

    // Only coordinate with writers that already use the lock; never create it here
    let lock_path = options.lock_file_path(path);
    let lock_file = File::open(&lock_path).ok();
    if let Some(lock) = &lock_file {
        lock.lock_shared()
            .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;
    }

    let read = fs::read(path);

    if let Some(lock) = &lock_file {
        lock.unlock()
            .unwrap_or_else(|err| warn!("failed to unlock {}: {}", lock_path.display(), err));
    }

    let bytes = read.with_context(|| format!("failed to read {}", path.display()))?;
    let annotations = parse_annotations(&bytes)
        .with_context(|| format!("failed to load annotations from {}", path.display()))?;
    debug!(
        "Read {} annotations from {}",
        annotations.len(),
        path.display()
    );
    Ok(annotations)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| format!("failed to open temporary file {}", tmp_path.display()))?;
        tmp_file
            .write_all(bytes)
            .context("failed to write annotation document")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary file")?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress annotation document")?;
    encoder
        .finish()
        .context("failed to finalise compressed annotation document")
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{}", counter));
    }
    candidate
}
