use serde::Deserialize;
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

pub const DEFAULT_MODEL_PATH: &str = "traffic_duration_model.pt";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub meta_path: Option<PathBuf>,
    pub bind_addr: SocketAddr,
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    model_path: Option<PathBuf>,
    meta_path: Option<PathBuf>,
    bind_addr: Option<String>,
    port: Option<u16>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolve from a variable lookup: defaults, then `PREDICTOR_CONFIG`
    /// file, then `MODEL_PATH`, `META_PATH`, `BIND_ADDR`, `PORT`.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match var("PREDICTOR_CONFIG") {
            Some(p) => FileConfig::load(Path::new(&p))?,
            None => FileConfig::default(),
        };

        let model_path = var("MODEL_PATH")
            .map(PathBuf::from)
            .or(file.model_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let meta_path = var("META_PATH").map(PathBuf::from).or(file.meta_path);

        let addr_str = var("BIND_ADDR")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let mut bind_addr: SocketAddr =
            addr_str.parse().map_err(|source| ConfigError::BindAddr {
                value: addr_str.clone(),
                source,
            })?;

        let port = match var("PORT") {
            Some(p) => Some(p.trim().parse::<u16>().map_err(|source| ConfigError::Port {
                value: p.clone(),
                source,
            })?),
            None => file.port,
        };
        if let Some(port) = port {
            bind_addr.set_port(port);
        }

        Ok(Self {
            model_path,
            meta_path,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = AppConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(cfg.model_path, PathBuf::from("traffic_duration_model.pt"));
        assert_eq!(cfg.meta_path, None);
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn env_overrides() {
        let cfg = AppConfig::from_vars(vars(&[
            ("MODEL_PATH", "/models/duration.pt"),
            ("META_PATH", "/models/meta.json"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("PORT", "9100"),
        ]))
        .unwrap();
        assert_eq!(cfg.model_path, PathBuf::from("/models/duration.pt"));
        assert_eq!(cfg.meta_path, Some(PathBuf::from("/models/meta.json")));
        assert_eq!(cfg.bind_addr, "127.0.0.1:9100".parse().unwrap());
    }

    #[test]
    fn file_values_sit_under_env() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"model_path": "from_file.pt", "bind_addr": "127.0.0.1:7000", "port": 7001}}"#
        )
        .unwrap();
        let path = f.path().to_string_lossy().to_string();

        let cfg = AppConfig::from_vars(vars(&[("PREDICTOR_CONFIG", path.as_str())])).unwrap();
        assert_eq!(cfg.model_path, PathBuf::from("from_file.pt"));
        assert_eq!(cfg.bind_addr, "127.0.0.1:7001".parse().unwrap());

        let cfg = AppConfig::from_vars(vars(&[
            ("PREDICTOR_CONFIG", path.as_str()),
            ("MODEL_PATH", "env.pt"),
            ("PORT", "7002"),
        ]))
        .unwrap();
        assert_eq!(cfg.model_path, PathBuf::from("env.pt"));
        assert_eq!(cfg.bind_addr.port(), 7002);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(matches!(
            AppConfig::from_vars(vars(&[("BIND_ADDR", "localhost")])),
            Err(ConfigError::BindAddr { .. })
        ));
        assert!(matches!(
            AppConfig::from_vars(vars(&[("PORT", "99999")])),
            Err(ConfigError::Port { .. })
        ));
        assert!(matches!(
            AppConfig::from_vars(vars(&[("PREDICTOR_CONFIG", "/no/such/file.json")])),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"modle_path": "typo.pt"}}"#).unwrap();
        let path = f.path().to_string_lossy().to_string();
        assert!(matches!(
            AppConfig::from_vars(vars(&[("PREDICTOR_CONFIG", path.as_str())])),
            Err(ConfigError::Parse { .. })
        ));
    }
}
