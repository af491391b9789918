use bookshelf_core::{BookshelfError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_collection_file")]
    pub collection_file: String,
    /// Relative paths are resolved against `data_dir`.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Directory served for any path the API does not handle.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_collection_file() -> String {
    "books.json".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_dir: default_data_dir(),
            collection_file: default_collection_file(),
            content_dir: default_content_dir(),
            static_dir: None,
        }
    }
}

/// `BOOKSHELF_BIND_ADDR` sets `bind_addr`; `__` separates nested keys.
fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix("BOOKSHELF")
        .prefix_separator("_")
        .separator("__")
}

impl Config {
    /// Load from an optional file, overridden by `BOOKSHELF_*` environment variables.
    pub fn from_file(path: &str) -> Result<Self> {
        Self::from_sources(path, environment())
    }

    fn from_sources(path: &str, environment: ::config::Environment) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| BookshelfError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| BookshelfError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bind_addr.trim().is_empty() {
            return Err(BookshelfError::Config("bind_addr cannot be empty".to_string()));
        }
        if self.collection_file.trim().is_empty() {
            return Err(BookshelfError::Config(
                "collection_file cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn collection_path(&self) -> PathBuf {
        self.data_dir.join(&self.collection_file)
    }

    pub fn content_path(&self) -> PathBuf {
        self.data_dir.join(&self.content_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_under_data_dir() {
        let config = Config::default();
        assert_eq!(config.collection_path(), PathBuf::from("data/books.json"));
        assert_eq!(config.content_path(), PathBuf::from("data/content"));
    }

    #[test]
    fn test_from_yaml_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bookshelf.yaml");
        std::fs::write(
            &path,
            "bind_addr: \"0.0.0.0:8080\"\ndata_dir: /srv/books\ncontent_dir: /srv/texts\nstatic_dir: public\n",
        )
        .unwrap();

        let config = Config::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.collection_path(), PathBuf::from("/srv/books/books.json"));
        assert_eq!(config.content_path(), PathBuf::from("/srv/texts"));
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn test_rejects_empty_collection_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bookshelf.yaml");
        std::fs::write(&path, "collection_file: \"\"\n").unwrap();

        let error = Config::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(error, BookshelfError::Config(_)));
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bookshelf.yaml");
        std::fs::write(&path, "bind_addr: \"0.0.0.0:8080\"\ncollection_file: shelf.json\n")
            .unwrap();

        let mut vars = ::config::Map::new();
        vars.insert("BOOKSHELF_BIND_ADDR".to_string(), "127.0.0.1:9000".to_string());
        vars.insert("BOOKSHELF_DATA_DIR".to_string(), "/var/lib/bookshelf".to_string());

        let config =
            Config::from_sources(path.to_str().unwrap(), environment().source(Some(vars)))
                .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(
            config.collection_path(),
            PathBuf::from("/var/lib/bookshelf/shelf.json")
        );
    }
}
