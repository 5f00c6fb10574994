use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;

pub(crate) fn file(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).context(format!("Unable to create file {}", path.display()))
}

/// Replaces the contents of `path` with `data`.
pub(crate) fn write_all(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let mut f = file(path)?;
    f.write_all(data.as_ref())
        .context(format!("Unable to write data to {}", path.display()))?;
    f.sync_all()
        .context(format!("Unable to flush data to {}", path.display()))
}

/// Reads `path` to a `String`, or `None` when the file does not exist.
pub(crate) fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Ok(None),
            _ => Err(e).context(format!("Unable to read file {}", path.display())),
        },
    }
}
