use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_VERSION: &str = "0.0.1";

/// Canonical license text, embedded when the tool is built.
pub const LICENSE_TEXT: &str = include_str!("../LICENSE");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scripts {
    pub prepublish_only: String,
}

/// Static manifest fields merged into every generated `package.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestDefaults {
    pub author: String,
    pub license: String,
    pub browser: String,
    pub main: String,
    pub module: String,
    pub typings: String,
    pub scripts: Scripts,
}
impl Default for ManifestDefaults {
    fn default() -> Self {
        Self {
            author: "Automorph Ltd (https://www.automorph.com)".to_string(),
            license: "MIT".to_string(),
            browser: "lib/index.js".to_string(),
            main: "lib/index".to_string(),
            module: "lib/index.mjs".to_string(),
            typings: "lib/index.d.ts".to_string(),
            scripts: Scripts {
                prepublish_only: "tsc-mjs -b tsconfig.json --force".to_string(),
            },
        }
    }
}

/// Configuration loaded once at start-up and handed to the renderer and materializer.
#[derive(Debug, Clone)]
pub struct Settings {
    pub default_version: String,
    pub license: String,
    /// Directory holding `tsconfig.json` and `tsconfig/`, linked into every package.
    pub shared_root: PathBuf,
    pub manifest: ManifestDefaults,
}
impl Settings {
    /// Shared configuration of the tool's install root, falling back to the copy bundled
    /// with the sources the tool was built from.
    pub fn default_shared_root() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| Self::installed_shared_root(&exe))
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shared"))
    }

    /// `<prefix>/shared` for a binary installed as `<prefix>/bin/sprout`, if it holds a
    /// `tsconfig.json`.
    fn installed_shared_root(exe: &Path) -> Option<PathBuf> {
        let shared = exe.parent()?.parent()?.join("shared");

        shared.join("tsconfig.json").is_file().then_some(shared)
    }

    pub fn with_shared_root(mut self, shared_root: impl Into<PathBuf>) -> Self {
        self.shared_root = shared_root.into();
        self
    }
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_VERSION.to_string(),
            license: LICENSE_TEXT.to_string(),
            shared_root: Self::default_shared_root(),
            manifest: ManifestDefaults::default(),
        }
    }
}
