//! Base directory for staging and scratch files
//!
//! Staged downloads and clones must never land under the working directory,
//! where they could end up inside the bits directory or the state file's
//! repository. A relative `TMPDIR` (e.g. `TMPDIR=tmp`) is therefore ignored.

use std::env;
use std::path::PathBuf;

/// Absolute directory under which temporary files and directories are created
pub fn temp_dir_base() -> PathBuf {
    let dir = env::temp_dir();
    if dir.is_absolute() {
        return dir;
    }

    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}
