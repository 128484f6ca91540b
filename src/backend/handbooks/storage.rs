//! Handbook file storage
//!
//! Uploaded PDFs live flat in the upload directory under generated names,
//! so client-supplied file names never touch the filesystem.

use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// `handbook-<unix millis>-<uuid>.pdf`
pub fn generate_file_name() -> String {
    format!("handbook-{}-{}.pdf", Utc::now().timestamp_millis(), Uuid::new_v4())
}

/// Accept by declared content type or by extension.
pub fn is_pdf(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let by_type = content_type
        .map(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    let by_name = file_name
        .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    by_type || by_name
}

pub async fn save_pdf(upload_dir: &Path, bytes: &[u8]) -> std::io::Result<StoredFile> {
    tokio::fs::create_dir_all(upload_dir).await?;
    let file_name = generate_file_name();
    let path = upload_dir.join(&file_name);
    tokio::fs::write(&path, bytes).await?;
    tracing::debug!("Stored {} bytes at {}", bytes.len(), path.display());
    Ok(StoredFile { path, file_name })
}

/// Remove a stored file. Failures are logged only.
pub async fn remove_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::error!("File delete error for {}: {}", path.display(), e);
    }
}
