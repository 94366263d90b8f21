use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::ui::messages::{info, success, warning};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally zipped. Returns the
    /// path of the file actually written.
    pub fn backup(
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !dest.is_absolute() {
            return Err(AppError::from(std::io::Error::other(format!(
                "Backup path must be absolute: {dest_file}"
            ))));
        }

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_target, force)?;

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if compressed != dest {
                match fs::remove_file(dest) {
                    Ok(()) => info(format!("Removed uncompressed backup: {}", dest.display())),
                    Err(e) => warning(format!("Failed to remove uncompressed backup: {e}")),
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        if let Ok(conn) = Connection::open(src) {
            ttlog_soft(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(final_path)
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rmontaje.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("📦 Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
