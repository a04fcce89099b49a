use std::{fs, path::PathBuf};

/// Path of a fresh file `name` in a per-process scratch directory.
pub fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("poisson-plots-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

/// Write `contents` to the scratch file `name` and return its path.
pub fn write(name: &str, contents: &str) -> PathBuf {
    let path = scratch(name);
    fs::write(&path, contents).unwrap();
    path
}
