//! Resource bundle for user-facing texts

use crate::core::error::ConfigError;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;

const DEFAULT_BUNDLE: &str = include_str!("../../i18n/i18n.yaml");

/// Texts by key with `{0}`, `{1}`, … placeholders
///
/// A missing key resolves to the key itself, so a forgotten translation is
/// visible in the UI instead of failing.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    texts: IndexMap<String, String>,
}

impl ResourceBundle {
    /// The bundle shipped with the crate
    pub fn english() -> Self {
        Self::from_yaml_str(DEFAULT_BUNDLE).unwrap_or_default()
    }

    /// Load a flat `key: text` YAML mapping
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let texts: IndexMap<String, String> =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::InvalidBundle {
                message: e.to_string(),
            })?;
        Ok(Self { texts })
    }

    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn has_text(&self, key: &str) -> bool {
        self.texts.contains_key(key)
    }

    /// Look up a text and substitute positional arguments
    ///
    /// Placeholders without a matching argument are left as they are.
    pub fn text(&self, key: &str, args: &[&str]) -> String {
        let Some(template) = self.texts.get(key) else {
            return key.to_string();
        };
        if args.is_empty() {
            return template.clone();
        }

        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let regex = PLACEHOLDER
            .get_or_init(|| Regex::new(r"\{(\d+)\}").expect("valid placeholder regex"));
        regex
            .replace_all(template, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i))
                    .map(|arg| arg.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
