use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::ContentBundle;
use crate::delivery::message::Message;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Output path is not a directory: {0}")]
    NotADirectory(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Write the day's artifacts into `dir`, creating it when missing. Returns the
/// paths written.
pub fn write_outputs(
    dir: &Path,
    bundle: &ContentBundle,
    message: &Message,
    document: &str,
    illustration: Option<&[u8]>,
) -> Result<Vec<PathBuf>, OutputError> {
    if dir.exists() && !dir.is_dir() {
        return Err(OutputError::NotADirectory(dir.display().to_string()));
    }
    fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;

    let bundle_json =
        serde_json::to_string_pretty(bundle).context("Serialising content bundle")?;

    let mut files: Vec<(&str, Vec<u8>)> = vec![
        ("message.html", message.html.clone().into_bytes()),
        ("document.txt", document.as_bytes().to_vec()),
        ("bundle.json", bundle_json.into_bytes()),
    ];
    if let Some(image) = illustration {
        files.push(("illustration.jpg", image.to_vec()));
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents).with_context(|| format!("Writing {}", path.display()))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }

    log::info!("wrote {} files to {}", written.len(), dir.display());
    Ok(written)
}
