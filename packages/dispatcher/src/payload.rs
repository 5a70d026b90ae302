//! Building payloads and drop records from files on disk.

use std::path::{Path, PathBuf};

use common::{DroppedFile, FilePart, FormPayload};

use crate::error::DispatchError;

/// Text fields first, then each file field read from its path.
pub async fn build_payload<F, P>(fields: F, files: P) -> Result<FormPayload, DispatchError>
where
    F: IntoIterator<Item = (String, String)>,
    P: IntoIterator<Item = (String, PathBuf)>,
{
    let mut payload = FormPayload::new();
    for (name, value) in fields {
        payload.push_text(name, value);
    }
    for (name, path) in files {
        let part = FilePart::from_path(&path)
            .await
            .map_err(|e| DispatchError::io(&path, e))?;
        payload.push_file(name, part);
    }
    Ok(payload)
}

pub async fn load_dropped_files(paths: &[PathBuf]) -> Result<Vec<DroppedFile>, DispatchError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(stat(path).await?);
    }
    Ok(files)
}

async fn stat(path: &Path) -> Result<DroppedFile, DispatchError> {
    DroppedFile::from_path(path)
        .await
        .map_err(|e| DispatchError::io(path, e))
}
