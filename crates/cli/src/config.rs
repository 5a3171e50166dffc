//! Layered runtime configuration: command-line flags, then `DASHBOARD_*`
//! environment variables, then a TOML file, then built-in defaults.

use anyhow::{Context as AnyhowContext, Result};
use dashboard_protocol::RecordId;
use dashboard_search::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
pub const DEFAULT_PRODUCTS_FILE: &str = "products.json";
pub const DEFAULT_SESSIONS_FILE: &str = "sessions.json";
pub const DEFAULT_USERS_FILE: &str = "users.json";

pub const ENV_DATA_DIR: &str = "DASHBOARD_DATA_DIR";
pub const ENV_PAGE_SIZE: &str = "DASHBOARD_PAGE_SIZE";
pub const ENV_USER_ID: &str = "DASHBOARD_USER_ID";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    products_file: Option<String>,
    sessions_file: Option<String>,
    users_file: Option<String>,
    page_size: Option<usize>,
    current_user_id: Option<RecordId>,
}

/// Values supplied on the command line. They win over every other layer.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub products_path: PathBuf,
    pub sessions_path: PathBuf,
    pub users_path: PathBuf,
    pub page_size: usize,
    /// Identity used by `profile` when the request names none.
    pub current_user_id: Option<RecordId>,
    /// The file the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from(".");
        Self {
            products_path: data_dir.join(DEFAULT_PRODUCTS_FILE),
            sessions_path: data_dir.join(DEFAULT_SESSIONS_FILE),
            users_path: data_dir.join(DEFAULT_USERS_FILE),
            data_dir,
            page_size: DEFAULT_PAGE_SIZE,
            current_user_id: None,
            config_path: None,
        }
    }
}

pub fn resolve(overrides: &ConfigOverrides) -> Result<DashboardConfig> {
    resolve_with_env(overrides, |key| env::var(key).ok())
}

pub fn resolve_with_env<F>(overrides: &ConfigOverrides, env_var: F) -> Result<DashboardConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let (file, config_path) = load_file_config(overrides.config_path.as_deref())?;
    let env_value = |key: &str| env_var(key).filter(|value| !value.trim().is_empty());

    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| env_value(ENV_DATA_DIR).map(PathBuf::from))
        .or(file.data_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let env_page_size = env_value(ENV_PAGE_SIZE).and_then(|raw| match raw.trim().parse() {
        Ok(size) if size > 0 => Some(size),
        _ => {
            log::warn!("Ignoring {ENV_PAGE_SIZE}={raw}: not a page size");
            None
        }
    });
    let page_size = env_page_size
        .or(file.page_size.filter(|size| *size > 0))
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let current_user_id = env_value(ENV_USER_ID)
        .map(|raw| RecordId::parse(&raw))
        .or(file.current_user_id);

    let join = |name: Option<String>, default: &str| {
        data_dir.join(name.unwrap_or_else(|| default.to_string()))
    };

    Ok(DashboardConfig {
        products_path: join(file.products_file, DEFAULT_PRODUCTS_FILE),
        sessions_path: join(file.sessions_file, DEFAULT_SESSIONS_FILE),
        users_path: join(file.users_file, DEFAULT_USERS_FILE),
        data_dir,
        page_size,
        current_user_id,
        config_path,
    })
}

/// An explicit config file must exist and parse; the implicit `./dashboard.toml`
/// is best-effort and only warned about when broken.
fn load_file_config(explicit: Option<&Path>) -> Result<(FileConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let parsed = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        return Ok((parsed, Some(path.to_path_buf())));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if !path.is_file() {
        return Ok((FileConfig::default(), None));
    }
    let parsed = fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| toml::from_str::<FileConfig>(&raw).map_err(anyhow::Error::from));
    match parsed {
        Ok(file) => Ok((file, Some(path))),
        Err(err) => {
            log::warn!("Ignoring config {}: {err:#}", path.display());
            Ok((FileConfig::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_map(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(body: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, body).unwrap();
        (dir, path)
    }

    #[test]
    fn file_layer_sets_paths_and_identity() {
        let (_dir, path) = write_config(
            r#"
            data_dir = "/srv/data"
            products_file = "catalog.json"
            page_size = 6
            current_user_id = 1001
            "#,
        );
        let overrides = ConfigOverrides {
            config_path: Some(path.clone()),
            data_dir: None,
        };

        let config = resolve_with_env(&overrides, no_env).unwrap();
        assert_eq!(config.products_path, PathBuf::from("/srv/data/catalog.json"));
        assert_eq!(config.sessions_path, PathBuf::from("/srv/data/sessions.json"));
        assert_eq!(config.page_size, 6);
        assert_eq!(config.current_user_id, Some(RecordId::Int(1001)));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn env_beats_file_and_flags_beat_env() {
        let (_dir, path) = write_config("data_dir = \"/from/file\"\npage_size = 6\n");
        let env = env_map(&[
            (ENV_DATA_DIR, "/from/env"),
            (ENV_PAGE_SIZE, "9"),
            (ENV_USER_ID, "ext-7"),
        ]);

        let mut overrides = ConfigOverrides {
            config_path: Some(path),
            data_dir: None,
        };
        let config = resolve_with_env(&overrides, &env).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
        assert_eq!(config.page_size, 9);
        assert_eq!(config.current_user_id, Some(RecordId::from("ext-7")));

        overrides.data_dir = Some(PathBuf::from("/from/flag"));
        let config = resolve_with_env(&overrides, &env).unwrap();
        assert_eq!(config.users_path, PathBuf::from("/from/flag/users.json"));
    }

    #[test]
    fn unusable_page_sizes_fall_back() {
        let env = env_map(&[(ENV_PAGE_SIZE, "lots")]);
        let config = resolve_with_env(&ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let env = env_map(&[(ENV_PAGE_SIZE, "0")]);
        let config = resolve_with_env(&ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_env_page_size_defers_to_file() {
        let (_dir, path) = write_config("page_size = 6\n");
        let overrides = ConfigOverrides {
            config_path: Some(path),
            data_dir: None,
        };
        let config = resolve_with_env(&overrides, env_map(&[(ENV_PAGE_SIZE, "0")])).unwrap();
        assert_eq!(config.page_size, 6);

        let (_dir, path) = write_config("page_size = 0\n");
        let overrides = ConfigOverrides {
            config_path: Some(path),
            data_dir: None,
        };
        let config = resolve_with_env(&overrides, no_env).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn explicit_config_must_parse() {
        let (_dir, path) = write_config("page_size = [");
        let overrides = ConfigOverrides {
            config_path: Some(path),
            data_dir: None,
        };
        let err = resolve_with_env(&overrides, no_env).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));

        let overrides = ConfigOverrides {
            config_path: Some(PathBuf::from("/definitely/missing.toml")),
            data_dir: None,
        };
        let err = resolve_with_env(&overrides, no_env).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config"));
    }
}
