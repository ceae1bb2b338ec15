//! Data directory resolution and path helpers.
//!
//! The store file and trace files live in one data directory:
//!
//! 1. `$WORDBRIDGE_DATA_DIR` when set and non-empty
//! 2. `$HOME/.local/share/wordbridge`
//! 3. `<temp dir>/wordbridge` when no home directory is known

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "WORDBRIDGE_DATA_DIR";

/// Returns the data directory for WordBridge storage.
///
/// # Examples
///
/// ```
/// use wordbridge::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(data_dir.ends_with("wordbridge") || std::env::var_os("WORDBRIDGE_DATA_DIR").is_some());
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var(DATA_DIR_ENV).ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

/// Resolution rules of [`get_data_dir`] with the environment passed in.
#[must_use]
pub fn resolve_data_dir(override_dir: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir.map(str::trim).filter(|d| !d.is_empty()) {
        return expand_tilde(dir, home);
    }

    home.map(str::trim)
        .filter(|h| !h.is_empty())
        .map_or_else(
            || std::env::temp_dir().join("wordbridge"),
            |h| Path::new(h).join(".local").join("share").join("wordbridge"),
        )
}

/// Expands a leading `~` to `home`. Paths without one are returned unchanged.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use wordbridge::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/words", Some("/home/ana")), PathBuf::from("/home/ana/words"));
/// assert_eq!(expand_tilde("~", Some("/home/ana")), PathBuf::from("/home/ana"));
/// assert_eq!(expand_tilde("/absolute/path", Some("/home/ana")), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: Option<&str>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => PathBuf::from(home),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            Path::new(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_home() {
        assert_eq!(
            resolve_data_dir(Some("/srv/words"), Some("/home/ana")),
            PathBuf::from("/srv/words")
        );
    }

    #[test]
    fn blank_override_falls_back_to_home() {
        assert_eq!(
            resolve_data_dir(Some("  "), Some("/home/ana")),
            PathBuf::from("/home/ana/.local/share/wordbridge")
        );
    }

    #[test]
    fn missing_home_uses_temp_dir() {
        assert_eq!(
            resolve_data_dir(None, None),
            std::env::temp_dir().join("wordbridge")
        );
    }

    #[test]
    fn tilde_without_home_is_kept() {
        assert_eq!(expand_tilde("~/x", None), PathBuf::from("~/x"));
        assert_eq!(expand_tilde("~user/x", Some("/home/ana")), PathBuf::from("~user/x"));
    }
}
