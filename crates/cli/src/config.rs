//! `tokenbake.toml` loading and path precedence.
//!
//! Flags beat the config file; the config file beats the built-in defaults.
//! Relative paths in a config file are taken relative to the file itself.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokenbake_core::CollectionNames;

pub(crate) const CONFIG_FILE_NAME: &str = "tokenbake.toml";
pub(crate) const DEFAULT_INPUT: &str = "src/design-tokens/BILD Design System-variables-full.json";
pub(crate) const DEFAULT_OUT_DIR: &str = "src/processed-tokens";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub input: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub collections: CollectionNames,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn input_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    pub fn out_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.out_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }

    fn rebase(mut self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.input = self.input.map(join);
        self.out_dir = self.out_dir.map(join);
        self
    }
}

/// Load the config named by `--config`, or `tokenbake.toml` in the current
/// directory if one exists. An explicitly named file must exist.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, String> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let implicit = PathBuf::from(CONFIG_FILE_NAME);
            if !implicit.is_file() {
                return Ok(Config::default());
            }
            implicit
        }
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("could not read config '{}': {}", path.display(), e))?;
    let config = Config::from_toml(&content)
        .map_err(|e| format!("could not parse config '{}': {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), "loaded config");
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.rebase(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input_path(None), PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.out_dir(None), PathBuf::from(DEFAULT_OUT_DIR));
    }

    #[test]
    fn flag_beats_config() {
        let config = Config::from_toml("out_dir = \"tokens\"").unwrap();
        assert_eq!(config.out_dir(None), PathBuf::from("tokens"));
        assert_eq!(
            config.out_dir(Some(Path::new("elsewhere"))),
            PathBuf::from("elsewhere")
        );
    }

    #[test]
    fn collection_overrides_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [collections]
            color_mode = "Theme"
            primitives = ["Primitives"]
            "#,
        )
        .unwrap();
        assert_eq!(config.collections.color_mode, "Theme");
        assert_eq!(config.collections.primitives, vec!["Primitives"]);
        assert_eq!(config.collections.density, "Density");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("outdir = \"x\"").is_err());
        assert!(Config::from_toml("[collections]\nbrand = \"x\"").is_err());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "input = \"export.json\"\nout_dir = \"/abs/out\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.input, Some(tmp.path().join("export.json")));
        assert_eq!(config.out_dir, Some(PathBuf::from("/abs/out")));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(err.contains("could not read config"), "{}", err);
    }
}
