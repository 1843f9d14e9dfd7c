//! Photo storage on the local filesystem.

use chrono::Utc;
use std::io;
use std::path::PathBuf;

const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes `bytes` under a fresh unique name and returns that name.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> io::Result<String> {
        let name = format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple(),
            extension_of(original_name)
        );
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        tracing::info!(file = %name, bytes = bytes.len(), "stored upload");
        Ok(name)
    }

    /// Reads a previously stored file. Names that could escape the upload directory are treated
    /// as missing.
    pub async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        if !is_plain_file_name(name) {
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

pub fn extension_of(original_name: Option<&str>) -> String {
    original_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

pub fn content_type_for(name: &str) -> &'static str {
    match extension_of(Some(name)).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}
