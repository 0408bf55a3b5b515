use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "resumegen";
pub const CONFIG_DIR_ENV: &str = "RESUMEGEN_CONFIG_DIR";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Where config and preferences live.
///
/// Explicit override first, then `RESUMEGEN_CONFIG_DIR`, then the platform config
/// dir, then `./.resumegen`.
pub fn resolve_config_dir(explicit: Option<&Path>) -> PathBuf {
    let from_env = std::env::var_os(CONFIG_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    config_dir_from(explicit, from_env, dirs::config_dir())
}

fn config_dir_from(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = from_env {
        return dir;
    }
    match platform {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => PathBuf::from(format!(".{APP_DIR_NAME}")),
    }
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

pub fn preferences_path(config_dir: &Path) -> PathBuf {
    config_dir.join(PREFERENCES_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_is_flag_env_platform_local() {
        let flag = PathBuf::from("/flag");
        let env = Some(PathBuf::from("/env"));
        let platform = Some(PathBuf::from("/home/u/.config"));

        assert_eq!(
            config_dir_from(Some(&flag), env.clone(), platform.clone()),
            flag
        );
        assert_eq!(
            config_dir_from(None, env, platform.clone()),
            PathBuf::from("/env")
        );
        assert_eq!(
            config_dir_from(None, None, platform),
            PathBuf::from("/home/u/.config/resumegen")
        );
        assert_eq!(config_dir_from(None, None, None), PathBuf::from(".resumegen"));
    }

    #[test]
    fn file_names() {
        let dir = Path::new("/cfg");
        assert_eq!(config_path(dir), PathBuf::from("/cfg/config.json"));
        assert_eq!(preferences_path(dir), PathBuf::from("/cfg/preferences.json"));
    }
}
