//! Common file system operations

use std::fs;
use std::path::Path;

/// Copy a directory recursively, including hidden entries.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let dst_path = dst_ref.join(entry.file_name());

        if entry_path.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Move a directory into place.
///
/// Tries a plain rename first and falls back to copy-and-delete when the
/// rename fails (e.g. the source and target live on different filesystems).
pub fn move_dir<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if fs::rename(src_ref, dst_ref).is_ok() {
        return Ok(());
    }

    copy_dir_recursive(src_ref, dst_ref)?;
    fs::remove_dir_all(src_ref)
}
