use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Refuse to clobber an existing file unless `force` is set; create the
/// parent directory if needed.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::validation(
            "file",
            format!("{} already exists (use --force to overwrite)", path.display()),
        ));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
