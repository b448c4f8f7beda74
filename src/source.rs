//! read shader sources from disk

use std::path::Path;

use crate::error::{Error, Result};

/// Reads the whole file as one text buffer.
pub fn load(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| Error::SourceEncoding {
        path: path.to_path_buf(),
    })?;
    log::debug!("loaded {} ({} bytes)", path.display(), text.len());
    Ok(text)
}
