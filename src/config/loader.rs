use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hash-table associative container whose uses can be recorded
pub const DEFAULT_CONTAINER_SYMBOL: &str = "java.util.HashMap";

/// Configuration for keywordtrace analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Statement filtering policy
    pub inspection: InspectionConfig,

    /// Best-effort API classification used when the model omits flags
    pub classification: ClassificationConfig,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionConfig {
    /// Only inspect invocations of interesting APIs
    pub interested_api_only: bool,

    /// Additionally require the invoked API to be library-declared
    pub api_in_libraries_only: bool,

    /// Record every statement referencing the container symbol
    pub record_container_symbol: bool,

    /// Symbol recorded when `record_container_symbol` is on
    pub container_symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Class patterns of APIs worth inspecting, e.g. `android.*`
    pub interesting_apis: Vec<String>,

    /// Class patterns treated as library code
    pub library_packages: Vec<String>,

    /// Generated wrapper classes whose outgoing call edges are ignored
    pub synthetic_entry_classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            interested_api_only: true,
            api_in_libraries_only: false,
            record_container_symbol: false,
            container_symbol: DEFAULT_CONTAINER_SYMBOL.to_string(),
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            interesting_apis: vec![
                "android.*".to_string(),
                "java.*".to_string(),
                "javax.*".to_string(),
                "org.apache.http.*".to_string(),
            ],
            library_packages: vec![
                "android.support.*".to_string(),
                "androidx.*".to_string(),
                "com.google.*".to_string(),
                "com.squareup.*".to_string(),
                "okhttp3.*".to_string(),
                "okio.*".to_string(),
                "retrofit2.*".to_string(),
                "io.reactivex.*".to_string(),
                "kotlin.*".to_string(),
                "kotlinx.*".to_string(),
                "org.apache.*".to_string(),
            ],
            synthetic_entry_classes: vec!["dummyMainClass".to_string()],
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(dir: &Path) -> Result<Self> {
        let default_names = [
            ".keywordtrace.yml",
            ".keywordtrace.yaml",
            ".keywordtrace.toml",
            "keywordtrace.yml",
            "keywordtrace.yaml",
            "keywordtrace.toml",
        ];

        for name in &default_names {
            let path = dir.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }
}

/// Simple glob matching for class patterns like "android.*" or "*Activity"
pub fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        // Pattern like "*Activity" matches "MainActivity"
        return text.ends_with(suffix);
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        // Pattern like "android.*" matches "android.util.Log"
        return text.starts_with(prefix);
    }

    // Exact match
    text == pattern
}
