//! Render settings with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (unicode glyphs)
//! 2. Global config: `$XDG_CONFIG_HOME/boxtree/boxtree.toml`
//! 3. Local config: a file passed by the caller
//! 4. Environment variables: `BOXTREE_*` prefix
//!
//! Settings only influence a [`crate::Printer`] built from them;
//! [`crate::Tree::print`] always uses the fixed unicode glyphs.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::render::{Glyphs, Style};

/// Per-glyph overrides applied on top of the style preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GlyphOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blank: Option<String>,
}

impl GlyphOverrides {
    /// Overlay wins field by field.
    pub fn merge(&self, overlay: &GlyphOverrides) -> Self {
        Self {
            middle: overlay.middle.clone().or_else(|| self.middle.clone()),
            last: overlay.last.clone().or_else(|| self.last.clone()),
            vertical: overlay.vertical.clone().or_else(|| self.vertical.clone()),
            blank: overlay.blank.clone().or_else(|| self.blank.clone()),
        }
    }

    fn apply(&self, mut glyphs: Glyphs) -> Glyphs {
        if let Some(middle) = &self.middle {
            glyphs.middle = middle.clone();
        }
        if let Some(last) = &self.last {
            glyphs.last = last.clone();
        }
        if let Some(vertical) = &self.vertical {
            glyphs.vertical = vertical.clone();
        }
        if let Some(blank) = &self.blank {
            glyphs.blank = blank.clone();
        }
        glyphs
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
///
/// `style` stays a string here so it goes through `Style`'s `FromStr`, the
/// same path environment overrides take.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    style: Option<String>,
    glyphs: GlyphOverrides,
}

/// Effective render settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Glyph preset
    pub style: Style,
    /// Individual glyphs replacing those of the preset
    pub glyphs: GlyphOverrides,
}

/// Get the XDG config directory for boxtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "boxtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("boxtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> TreeResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| TreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| TreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Resolve the glyph set: style preset plus overrides.
    pub fn glyphs(&self) -> Glyphs {
        self.glyphs.apply(self.style.glyphs())
    }

    fn merge_with(&self, overlay: &RawSettings) -> TreeResult<Self> {
        let style = match &overlay.style {
            Some(style) => style.parse()?,
            None => self.style,
        };
        Ok(Self {
            style,
            glyphs: self.glyphs.merge(&overlay.glyphs),
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file layered over the global one; skipped
    ///   when it does not exist
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> TreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?)?;
            }
        }

        if let Some(local_path) = local {
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(local_path)?)?;
            }
        }

        current = current.apply_env_overrides(env_source())?;
        debug!("settings: {:?}", current);
        Ok(current)
    }

    /// Load a single TOML file over the compiled defaults, ignoring the
    /// global file and environment.
    pub fn from_file(path: &Path) -> TreeResult<Self> {
        Self::default().merge_with(&load_raw_settings(path)?)
    }

    /// Apply `BOXTREE_*` variables from `env` as explicit overrides.
    pub fn apply_env_overrides(mut self, env: Environment) -> TreeResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("style") {
            self.style = val.parse()?;
        }
        let overrides = GlyphOverrides {
            middle: config.get_string("glyphs.middle").ok(),
            last: config.get_string("glyphs.last").ok(),
            vertical: config.get_string("glyphs.vertical").ok(),
            blank: config.get_string("glyphs.blank").ok(),
        };
        self.glyphs = self.glyphs.merge(&overrides);

        Ok(self)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> TreeResult<String> {
        toml::to_string_pretty(self).map_err(|e| TreeError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# boxtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/boxtree/boxtree.toml
#   Local:  file passed to Settings::load
#   Env:    BOXTREE_STYLE, BOXTREE_GLYPHS__MIDDLE, ...

# Glyph preset: "unicode" or "ascii"
# style = "unicode"

[glyphs]
# Override single glyphs of the preset
# middle = "├── "
# last = "└── "
# vertical = "│   "
# blank = "    "
"#
        .to_string()
    }
}

/// Environment source for `BOXTREE_STYLE` and `BOXTREE_GLYPHS__<NAME>`.
pub fn env_source() -> Environment {
    Environment::with_prefix("BOXTREE")
        .prefix_separator("_")
        .separator("__")
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}
