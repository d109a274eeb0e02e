//! Archive formats
//!
//! This module handles:
//! - Recognizing downloaded or local archives by their leading bytes
//! - Unpacking zip, tar and gzipped tar archives into a staging directory
//! - Writing a content tree as a deterministic zip archive

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{BitsError, Result, fetch_failed, fs};
use crate::hash::is_content;
use crate::path_utils::to_forward_slashes;

/// Enough leading bytes to see the `ustar` magic of a tar header
const SNIFF_LEN: u64 = 262;

/// Content type of a fetched file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
    Tar,
    /// Anything else; kept as a single file
    Plain,
}

/// Detect the archive type of the file at `path`
pub fn sniff(path: &Path) -> Result<ArchiveKind> {
    let file = File::open(path).map_err(|e| fs::at(path, &e))?;
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN)
        .read_to_end(&mut header)
        .map_err(|e| fs::at(path, &e))?;

    let kind = if header.starts_with(b"PK\x03\x04") || header.starts_with(b"PK\x05\x06") {
        ArchiveKind::Zip
    } else if header.starts_with(&[0x1f, 0x8b]) {
        ArchiveKind::TarGz
    } else if header.get(257..262) == Some(b"ustar".as_slice()) {
        ArchiveKind::Tar
    } else {
        ArchiveKind::Plain
    };
    Ok(kind)
}

/// Unpack `archive` into `dest`. Entries that would escape `dest` are
/// rejected by the underlying readers.
pub fn unpack(archive: &Path, kind: ArchiveKind, dest: &Path) -> Result<()> {
    let unpack_failed = |reason: String| fetch_failed(archive.display().to_string(), reason);
    let file = File::open(archive).map_err(|e| fs::at(archive, &e))?;

    match kind {
        ArchiveKind::Zip => ZipArchive::new(file)
            .and_then(|mut zip| zip.extract(dest))
            .map_err(|e| unpack_failed(format!("invalid zip archive: {e}"))),
        ArchiveKind::TarGz => tar::Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .map_err(|e| unpack_failed(format!("invalid tar.gz archive: {e}"))),
        ArchiveKind::Tar => tar::Archive::new(file)
            .unpack(dest)
            .map_err(|e| unpack_failed(format!("invalid tar archive: {e}"))),
        ArchiveKind::Plain => Err(unpack_failed("not an archive".to_string())),
    }
}

/// Turn a fetched file into a content tree under `dest`: archives are
/// unpacked, anything else is copied in as a single file called `name`.
pub fn expand_into(file: &Path, dest: &Path, name: &str) -> Result<ArchiveKind> {
    std::fs::create_dir_all(dest).map_err(|e| fs::at(dest, &e))?;

    let kind = sniff(file)?;
    if kind == ArchiveKind::Plain {
        let target = dest.join(name);
        std::fs::copy(file, &target).map_err(|e| fs::at(&target, &e))?;
    } else {
        unpack(file, kind, dest)?;
    }
    debug!(file = %file.display(), ?kind, "expanded fetched content");
    Ok(kind)
}

/// Write the content tree under `root` as a zip archive into `writer`.
///
/// Entries are sorted and carry a fixed timestamp, so the same tree always
/// produces the same bytes. `.git` directories and symlinks are skipped.
pub fn write_zip<W: Write + Seek>(root: &Path, writer: W) -> Result<W> {
    let zip_failed = |e: zip::result::ZipError| BitsError::Filesystem {
        path: root.display().to_string(),
        reason: format!("failed to write zip archive: {e}"),
    };

    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_content)
    {
        let entry = entry.map_err(|e| fs::failed(root.display().to_string(), e.to_string()))?;
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let name = to_forward_slashes(relative);

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), options)
                .map_err(zip_failed)?;
        } else if entry.file_type().is_file() {
            zip.start_file(name, options.unix_permissions(file_mode(path)))
                .map_err(zip_failed)?;
            let mut file = File::open(path).map_err(|e| fs::at(path, &e))?;
            std::io::copy(&mut file, &mut zip).map_err(|e| fs::at(path, &e))?;
        } else {
            debug!(path = %path.display(), "skipping non-regular file in archive");
        }
    }

    zip.finish().map_err(zip_failed)
}

#[cfg(unix)]
fn file_mode(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) if meta.permissions().mode() & 0o111 != 0 => 0o755,
        _ => 0o644,
    }
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> u32 {
    0o644
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<html></html>").unwrap();
        std::fs::create_dir_all(temp.path().join("static/css")).unwrap();
        std::fs::write(temp.path().join("static/css/site.css"), "body {}").unwrap();
        temp
    }

    fn entry_names(bytes: Vec<u8>) -> Vec<String> {
        let zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        zip.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_write_zip_contains_tree() {
        let temp = tree();
        let bytes = write_zip(temp.path(), Cursor::new(Vec::new()))
            .unwrap()
            .into_inner();
        let mut names = entry_names(bytes);
        names.sort();
        assert_eq!(
            names,
            vec![
                "index.html".to_string(),
                "static/".to_string(),
                "static/css/".to_string(),
                "static/css/site.css".to_string(),
            ]
        );
    }

    #[test]
    fn test_write_zip_is_deterministic() {
        let temp = tree();
        let first = write_zip(temp.path(), Cursor::new(Vec::new()))
            .unwrap()
            .into_inner();
        let second = write_zip(temp.path(), Cursor::new(Vec::new()))
            .unwrap()
            .into_inner();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_zip_skips_git_dir() {
        let temp = tree();
        std::fs::create_dir(temp.path().join(".git")).unwrap();
        std::fs::write(temp.path().join(".git/HEAD"), "ref: refs/heads/main").unwrap();
        let bytes = write_zip(temp.path(), Cursor::new(Vec::new()))
            .unwrap()
            .into_inner();
        assert!(entry_names(bytes).iter().all(|name| !name.starts_with(".git")));
    }

    #[test]
    fn test_sniff_and_unpack_zip() {
        let temp = tree();
        let out = TempDir::new().unwrap();
        let archive = out.path().join("content.zip");
        write_zip(temp.path(), File::create(&archive).unwrap()).unwrap();

        assert_eq!(sniff(&archive).unwrap(), ArchiveKind::Zip);

        let dest = out.path().join("unpacked");
        unpack(&archive, ArchiveKind::Zip, &dest).unwrap();
        assert_eq!(
            std::fs::read_to_string(dest.join("static/css/site.css")).unwrap(),
            "body {}"
        );
    }

    #[test]
    fn test_sniff_and_unpack_tar_gz() {
        let temp = tree();
        let out = TempDir::new().unwrap();
        let archive = out.path().join("content.tar.gz");
        {
            let encoder = flate2::write::GzEncoder::new(
                File::create(&archive).unwrap(),
                flate2::Compression::default(),
            );
            let mut builder = tar::Builder::new(encoder);
            builder.append_dir_all("app", temp.path()).unwrap();
            builder.into_inner().unwrap().finish().unwrap();
        }

        assert_eq!(sniff(&archive).unwrap(), ArchiveKind::TarGz);

        let dest = out.path().join("unpacked");
        unpack(&archive, ArchiveKind::TarGz, &dest).unwrap();
        assert!(dest.join("app/index.html").exists());
    }

    #[test]
    fn test_expand_plain_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("download");
        std::fs::write(&file, "#!/bin/sh").unwrap();

        let dest = temp.path().join("content");
        assert_eq!(expand_into(&file, &dest, "run.sh").unwrap(), ArchiveKind::Plain);
        assert_eq!(std::fs::read_to_string(dest.join("run.sh")).unwrap(), "#!/bin/sh");
    }

    #[test]
    fn test_sniff_plain_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app.jar.txt");
        std::fs::write(&file, "just text").unwrap();
        assert_eq!(sniff(&file).unwrap(), ArchiveKind::Plain);
    }

    #[test]
    fn test_unpack_corrupt_zip_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("broken.zip");
        std::fs::write(&file, b"PK\x03\x04garbage").unwrap();
        let err = unpack(&file, ArchiveKind::Zip, &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, BitsError::Fetch { .. }));
    }
}
