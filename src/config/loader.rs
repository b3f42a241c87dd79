use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for mzsweep analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory names to skip entirely, matched case-sensitively against
    /// path segments
    pub exclude_dirs: Vec<String>,

    /// Save-file extension, never part of the candidate universe
    pub save_extension: String,

    /// Extensions classified as code (scripts and structured data)
    pub code_extensions: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,

    /// Resolution configuration
    pub resolve: ResolveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// Group provenance by: target, source
    pub group_by: String,

    /// Show the provenance report alongside the unused list
    pub show_references: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Iterate the reference sweep to a fixpoint instead of one pass
    pub fixpoint: bool,

    /// Scan source files in parallel during the reference sweep
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_dirs: vec![
                ".git".to_string(),
                ".idea".to_string(),
                "DatabaseCleanUpTool".to_string(),
            ],
            save_extension: "rmmzsave".to_string(),
            code_extensions: vec!["js".to_string(), "json".to_string()],
            report: ReportConfig::default(),
            resolve: ResolveConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            group_by: "target".to_string(),
            show_references: false,
        }
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            fixpoint: false,
            parallel: false,
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
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".mzsweep.yml",
            ".mzsweep.yaml",
            ".mzsweep.toml",
            "mzsweep.yml",
            "mzsweep.yaml",
            "mzsweep.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Check whether a path falls under an excluded directory.
    ///
    /// Matching is case-sensitive and applies to whole path segments, so an
    /// entry ".git" skips "/proj/.git/config" but not "/proj/.github/x".
    pub fn should_exclude(&self, path: &Path) -> bool {
        path.components().any(|c| {
            let segment = c.as_os_str().to_string_lossy();
            self.exclude_dirs.iter().any(|dir| dir.as_str() == segment)
        })
    }

    /// Check whether an extension is classified as code
    pub fn is_code_extension(&self, extension: &str) -> bool {
        self.code_extensions.iter().any(|e| e == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.save_extension, "rmmzsave");
        assert!(config.is_code_extension("js"));
        assert!(config.is_code_extension("json"));
        assert!(!config.is_code_extension("png"));
        assert!(!config.resolve.fixpoint);
    }

    #[test]
    fn test_should_exclude_matches_segments() {
        let config = Config::default();
        assert!(config.should_exclude(Path::new("/proj/.git/config")));
        assert!(config.should_exclude(Path::new("proj/DatabaseCleanUpTool/tool.exe")));
        // Segment match, not substring match
        assert!(!config.should_exclude(Path::new("/proj/.github/workflows/ci.yml")));
        assert!(!config.should_exclude(Path::new("/proj/img/pictures/a.png")));
    }

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mzsweep.yml");
        std::fs::write(
            &path,
            "exclude_dirs: ['.svn']\nresolve:\n  fixpoint: true\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.exclude_dirs, vec![".svn".to_string()]);
        assert!(config.resolve.fixpoint);
        // Unspecified sections fall back to defaults
        assert_eq!(config.save_extension, "rmmzsave");
    }

    #[test]
    fn test_from_default_locations_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_default_locations(dir.path()).unwrap();
        assert_eq!(config.exclude_dirs, Config::default().exclude_dirs);
    }
}
