use crate::config::layout;
use crate::content::read_text;
use crate::resolvers::{Mark, SEED_SOURCE};
use miette::{miette, IntoDiagnostic, Result};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

/// Resolver for the plugin manifest and the bootstrap script.
///
/// The manifest (js/plugins.js) is a script that assigns a JSON array of
/// plugin descriptors; the array is located by the first `[` and the last `]`
/// rather than by evaluating the script. Every named plugin maps to
/// js/plugins/<name>.js. The manifest and the bootstrap script themselves are
/// unconditionally used, and the bootstrap is scanned for quoted .js/.json
/// path references to the engine core scripts.
pub struct PluginResolver<'a> {
    root: &'a str,
    script_ref: Regex,
}

/// Outcome of plugin resolution: marks to apply, plus the script paths that
/// must join the code-file set so the generic sweep scans them as sources
#[derive(Debug, Default)]
pub struct PluginResolution {
    pub marks: Vec<Mark>,
    pub code_files: Vec<String>,
}

impl<'a> PluginResolver<'a> {
    pub fn new(root: &'a str) -> Self {
        // Quoted path ending in .js or .json, closed by a double quote
        let script_ref = Regex::new(r#"["']([^"']+\.(?:js|json))""#).unwrap();
        Self { root, script_ref }
    }

    /// Resolve the manifest and bootstrap into used-file marks.
    ///
    /// A manifest parse failure is logged and resolution falls back to the
    /// two unconditional entries; it never aborts the run.
    pub fn resolve(&self) -> PluginResolution {
        let manifest = format!("{}/{}/{}", self.root, layout::JS_DIR, layout::PLUGIN_MANIFEST);
        let bootstrap = format!(
            "{}/{}/{}",
            self.root,
            layout::JS_DIR,
            layout::BOOTSTRAP_SCRIPT
        );

        // Always include the manifest and the bootstrap
        let mut files = vec![manifest.clone(), bootstrap.clone()];

        match self.manifest_plugins(&manifest) {
            Ok(names) => {
                debug!("Found {} plugins in {}", names.len(), layout::PLUGIN_MANIFEST);
                for name in names {
                    files.push(format!("{}/{}/{}.js", self.root, layout::PLUGINS_DIR, name));
                }
            }
            Err(e) => warn!("Error loading {}: {}", manifest, e),
        }

        for path in self.bootstrap_references(&bootstrap) {
            files.push(path);
        }

        let marks = files
            .iter()
            .map(|path| Mark::new(path.clone(), SEED_SOURCE))
            .collect();

        PluginResolution {
            marks,
            code_files: files,
        }
    }

    /// Extract plugin names from the manifest's embedded descriptor array
    fn manifest_plugins(&self, manifest: &str) -> Result<Vec<String>> {
        let content = read_text(manifest)?;
        let start = content
            .find('[')
            .ok_or_else(|| miette!("no descriptor array start in manifest"))?;
        let end = content
            .rfind(']')
            .ok_or_else(|| miette!("no descriptor array end in manifest"))?;
        if end < start {
            return Err(miette!("malformed descriptor array span in manifest"));
        }

        let descriptors: Vec<Value> =
            serde_json::from_str(&content[start..=end]).into_diagnostic()?;

        Ok(descriptors
            .iter()
            .filter_map(|d| d.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    /// Extract quoted .js/.json references from the bootstrap script.
    ///
    /// A leading "js/" segment is stripped before re-qualifying relative to
    /// the script directory.
    fn bootstrap_references(&self, bootstrap: &str) -> Vec<String> {
        let content = match read_text(bootstrap) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error loading {}: {}", bootstrap, e);
                return Vec::new();
            }
        };

        self.script_ref
            .captures_iter(&content)
            .map(|cap| {
                let mut reference = cap[1].to_string();
                if let Some(stripped) = reference.strip_prefix("js/") {
                    reference = stripped.to_string();
                }
                format!("{}/{}/{}", self.root, layout::JS_DIR, reference)
            })
            .collect()
    }
}
