//! Panel generation options: resource paths and the particle seed.

use crate::error::{Error, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_RESOURCE_DIR: &str = "res";
pub const SCRIPT_RELATIVE_PATH: &str = "js/update.js";
pub const STYLE_RELATIVE_PATH: &str = "style/defs.xml";
pub const DEFAULT_OUTPUT: &str = "te.svg";

/// Inputs of one panel generation run.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "script_path": "res/js/update.js", "style_path": "res/style/defs.xml", "seed": 42 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelOptions {
    pub script_path: Option<PathBuf>,
    pub style_path: Option<PathBuf>,
    /// Seeds particle placement; `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl PanelOptions {
    pub fn from_resource_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            script_path: Some(dir.join(SCRIPT_RELATIVE_PATH)),
            style_path: Some(dir.join(STYLE_RELATIVE_PATH)),
            seed: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_dir_layout() {
        let opts = PanelOptions::from_resource_dir("res");
        assert_eq!(opts.script_path, Some(PathBuf::from("res/js/update.js")));
        assert_eq!(opts.style_path, Some(PathBuf::from("res/style/defs.xml")));
    }

    #[test]
    fn json_fields_are_optional() {
        let opts = PanelOptions::from_json_str(r#"{ "seed": 9 }"#).unwrap();
        assert_eq!(opts, PanelOptions::default().with_seed(9));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            PanelOptions::from_json_str(r#"{ "sead": 9 }"#),
            Err(Error::Config(_))
        ));
    }
}
