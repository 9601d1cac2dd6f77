use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the application home directory.
///
/// - `requested`: an explicit path from config (may start with `~`), or `None`
///   to use the platform default: `%APPDATA%\<subdir>` on Windows,
///   `$HOME/<subdir>` elsewhere.
/// - `subdir`: the per-application directory name, e.g. `".slotbook"`.
/// - `create`: create the directory (and parents) if missing.
///
/// Returns an absolute path.
pub fn resolve_home_dir(requested: Option<String>, subdir: &str, create: bool) -> Result<PathBuf> {
    let resolved = match requested {
        Some(raw) => expand_user(&raw)?,
        None => platform_base_dir()?.join(subdir),
    };

    let absolute = if resolved.is_absolute() {
        resolved
    } else {
        std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(resolved)
    };

    if create {
        std::fs::create_dir_all(&absolute)
            .with_context(|| format!("Failed to create home dir '{}'", absolute.display()))?;
    }

    Ok(absolute)
}

/// Expand a leading `~` or `~/` into the user's home directory.
fn expand_user(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_base_dir();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_base_dir()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Platform base directory used both for `~` expansion and defaults.
fn platform_base_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    let base = std::env::var_os(var)
        .map(PathBuf::from)
        .with_context(|| format!("{var} environment variable is not set"))?;
    Ok(base)
}

/// Join a possibly-relative path onto a base directory.
/// Absolute paths are kept as-is.
pub fn resolve_under(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
