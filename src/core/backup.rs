use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, or with `compress` stream it
    /// into `<dest_file stem>.zip` (a `.zip` destination is used as is).
    /// Nothing is written next to the target; an existing target is
    /// refused. Returns the path actually written.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<PathBuf> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::not_found("Database", src.display().to_string()));
        }

        let target = if compress { zip_target(dest) } else { dest.to_path_buf() };
        if target.exists() {
            return Err(AppError::validation(
                "file",
                format!("{} already exists", target.display()),
            ));
        }
        if same_file(src, &target) {
            return Err(AppError::validation(
                "file",
                "the backup cannot replace the database itself",
            ));
        }

        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if compress {
            compress_backup(src, &target)?;
        } else {
            fs::copy(src, &target)?;
        }
        tracing::info!(src = %src.display(), dest = %target.display(), compress, "database backed up");

        let mut pool = DbPool::open(&cfg.database, cfg.busy_timeout_ms)?;
        let tx = pool.write_tx()?;
        audit(
            &tx,
            "backup",
            &target.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;
        tx.commit()?;

        Ok(target)
    }
}

/// `x.sqlite` → `x.zip`; `x.zip` stays `x.zip`.
fn zip_target(dest: &Path) -> PathBuf {
    let is_zip = dest
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
    if is_zip {
        dest.to_path_buf()
    } else {
        dest.with_extension("zip")
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write the database at `src` as the single entry of a new zip at
/// `zip_path`. A half-written zip is removed on failure.
fn compress_backup(src: &Path, zip_path: &Path) -> AppResult<()> {
    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "sitebook.sqlite".to_string());

    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(zip_path)?;

    let write = move || -> AppResult<()> {
        let mut zip = ZipWriter::new(file);
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut f = fs::File::open(src)?;
        zip.start_file(entry_name, options)
            .map_err(std::io::Error::other)?;
        std::io::copy(&mut f, &mut zip)?;
        zip.finish().map_err(std::io::Error::other)?;
        Ok(())
    };

    if let Err(e) = write() {
        if let Err(rm) = fs::remove_file(zip_path) {
            tracing::warn!(error = %rm, path = %zip_path.display(), "could not remove partial zip");
        }
        return Err(e);
    }

    tracing::debug!(zip = %zip_path.display(), "backup compressed");
    Ok(())
}
