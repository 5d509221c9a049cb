use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

/// Read a whole text file.
pub fn read_file(path: impl AsRef<Path>) -> Result<String, anyhow::Error> {
    let path = path.as_ref();

    fs::read_to_string(path).with_context(|| format!("Error reading file: {}", path.display()))
}

/// Write `contents` to a new file at `path`, creating its directory first.
pub fn write_new_file(path: impl AsRef<Path>, contents: &str) -> Result<(), anyhow::Error> {
    let path = path.as_ref();

    if let Some(parent_dir_path) = path.parent() {
        fs::create_dir_all(parent_dir_path)
            .with_context(|| format!("Error creating path: {}", parent_dir_path.display()))?;
    }

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Error creating file: {}", path.display()))?;

    file.write_all(contents.as_bytes())
        .with_context(|| format!("Error writing file: {}", path.display()))
}
