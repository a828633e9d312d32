use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the application home directory.
///
/// - `Some(path)`: a leading `~` is expanded against the user's home; relative
///   paths are made absolute against the current working directory.
/// - `None`: `<user home>/<default_subdir>`.
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured {
        Some(raw) => expand_tilde(raw.trim())?,
        None => user_home()?.join(default_subdir),
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .context("cannot determine current directory")?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home_dir '{}'", path.display()))?;
    }

    Ok(path)
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("cannot determine the user's home directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_absolute_path_is_kept_and_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("nested/home");

        let resolved =
            resolve_home_dir(Some(target.to_string_lossy().to_string()), ".x", true).unwrap();

        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn relative_path_becomes_absolute() {
        let resolved = resolve_home_dir(Some("some/relative".into()), ".x", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/relative"));
    }

    #[test]
    fn tilde_is_expanded() {
        let resolved = resolve_home_dir(Some("~/.carmarket_tilde".into()), ".x", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.ends_with(".carmarket_tilde"));
    }

    #[test]
    fn tilde_and_default_follow_the_platform_home() {
        let home = dirs::home_dir().expect("home directory");

        let tilde = resolve_home_dir(Some("~/.carmarket_tilde".into()), ".x", false).unwrap();
        assert_eq!(tilde, home.join(".carmarket_tilde"));

        let bare = resolve_home_dir(Some("~".into()), ".x", false).unwrap();
        assert_eq!(bare, home);

        let default = resolve_home_dir(None, ".carmarket_default", false).unwrap();
        assert_eq!(default, home.join(".carmarket_default"));
    }
}
