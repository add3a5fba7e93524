use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Named range formats: format name → (integer cut-off as text → category label).
pub type RangeFormats = BTreeMap<String, BTreeMap<String, String>>;

/// Root configuration structure, deserialized from `.arbmark/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Classification API settings.
    #[serde(default)]
    pub klass: KlassConfig,
    /// Where to find range formats for `categorize_ranges`.
    #[serde(default)]
    pub formats: FormatsConfig,
}

/// Connection and classification identifiers for the KLASS API.
#[derive(Debug, Clone, Deserialize)]
pub struct KlassConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Classification of Norwegian counties.
    #[serde(default = "default_county_classification")]
    pub county_classification: u32,
    /// Classification of regional special codes (Svalbard, Jan Mayen, continental shelf).
    #[serde(default = "default_special_region_classification")]
    pub special_region_classification: u32,
    /// Variant mapping NACE divisions to the 17 published industry groups.
    #[serde(default = "default_nace_variant")]
    pub nace_variant: u32,
}

fn default_base_url() -> String {
    "https://data.ssb.no/api/klass/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_county_classification() -> u32 {
    104
}

fn default_special_region_classification() -> u32 {
    4
}

fn default_nace_variant() -> u32 {
    1616
}

impl Default for KlassConfig {
    fn default() -> Self {
        KlassConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            county_classification: default_county_classification(),
            special_region_classification: default_special_region_classification(),
            nace_variant: default_nace_variant(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatsConfig {
    /// JSON file with range formats. Relative paths resolve against the working directory.
    pub path: Option<PathBuf>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.arbmark/config.toml`
/// 3. `~/.config/arbmark/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".arbmark").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("arbmark").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

/// Read range formats from a JSON file such as
/// `{"age": {"0": "young", "30": "middle", "60": "old"}}`.
pub fn load_range_formats(path: &Path) -> Result<RangeFormats> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults_when_sections_missing() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.klass.county_classification, 104);
        assert_eq!(cfg.klass.nace_variant, 1616);
        assert!(cfg.formats.path.is_none());
    }

    #[test]
    fn test_partial_klass_section() {
        let cfg: Config = toml::from_str(
            r#"
[klass]
base_url = "http://localhost:8080/klass"
timeout_secs = 3
"#,
        )
        .unwrap();
        assert_eq!(cfg.klass.base_url, "http://localhost:8080/klass");
        assert_eq!(cfg.klass.timeout_secs, 3);
        assert_eq!(cfg.klass.special_region_classification, 4);
    }

    #[test]
    fn test_project_config_is_found() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".arbmark")).unwrap();
        std::fs::write(
            dir.path().join(".arbmark").join("config.toml"),
            "[formats]\npath = \"formats.json\"\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.formats.path, Some(PathBuf::from("formats.json")));
    }

    #[test]
    fn test_override_wins() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[klass]\nnace_variant = 42").unwrap();
        let cfg = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap();
        assert_eq!(cfg.klass.nace_variant, 42);
    }

    #[test]
    fn test_load_range_formats() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, r#"{{"lonn": {{"0": "lav", "500000": "hoy"}}}}"#).unwrap();
        let formats = load_range_formats(f.path()).unwrap();
        assert_eq!(formats["lonn"]["500000"], "hoy");
    }
}
