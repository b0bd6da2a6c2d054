use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of a file's bytes
pub fn fingerprint(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);

    Ok(format!("{:x}", hasher.finalize()))
}

/// Write a file by way of a sibling temporary file and a rename, so readers never observe
/// a partially written file
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path: PathBuf = path.with_file_name(tmp_name);

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)
}
