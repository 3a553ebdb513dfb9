//! Configuration loading and environment variable interpolation

use regex::Regex;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::pyconf::parse_pyconf;
use super::SiteConfig;
use crate::error::{ConfigError, Result};

/// File names searched for, in order, when no path is given
pub const CONFIG_FILENAMES: &[&str] = &[
    "site.toml",
    "site.yaml",
    "site.yml",
    "site.json",
    "pelicanconf.py",
    "conf.py",
];

/// Text formats a settings source can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Yaml,
    Json,
    /// Generator-native `NAME = value` assignment file
    Python,
}

impl SourceFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "toml" => Ok(SourceFormat::Toml),
            "yaml" | "yml" => Ok(SourceFormat::Yaml),
            "json" => Ok(SourceFormat::Json),
            "py" => Ok(SourceFormat::Python),
            "" => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
            other => Err(ConfigError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Toml => "TOML",
            SourceFormat::Yaml => "YAML",
            SourceFormat::Json => "JSON",
            SourceFormat::Python => "Python",
        };
        f.write_str(name)
    }
}

/// Load configuration by searching upward from the current directory
pub fn load_config() -> Result<SiteConfig> {
    let current = env::current_dir()?;
    let config_path = find_config_file(&current)?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<SiteConfig> {
    let format = SourceFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = load_config_from_str(&content, format)?;
    tracing::info!("Loaded {} config from {}", format, path.display());
    Ok(config)
}

/// Load configuration from in-memory text
pub fn load_config_from_str(content: &str, format: SourceFormat) -> Result<SiteConfig> {
    let content = interpolate_env_vars(content);

    let config: SiteConfig = match format {
        SourceFormat::Toml => toml::from_str(&content)?,
        SourceFormat::Yaml => serde_yaml::from_str(&content)?,
        SourceFormat::Json => serde_json::from_str(&content)?,
        SourceFormat::Python => parse_pyconf(&content)?,
    };

    config.validate()?;
    Ok(config)
}

/// Find the configuration file, searching upward from `start`
pub fn find_config_file(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        for name in CONFIG_FILENAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                tracing::debug!("Found config file {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            return Err(ConfigError::NotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
///
/// Substitution is textual and happens before parsing, so a value containing
/// the source format's quote characters must be escaped for that format;
/// otherwise loading fails with a parse or syntax error.
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Site configuration
# Every option is optional; commented values show the defaults.

# Input markup languages: "rst", "md", "html" (a single name or a list)
markup = ["md"]

theme = "notmyidea"
default_language = "en"

# Directories copied verbatim to the output
static_paths = ["images"]

# Typographic substitutions (smart quotes, dashes)
typography_enabled = false

timezone = "UTC"

# author = "${USER}"
# site_url = "https://example.com"
site_name = "A Pelican Blog"

# Per-tag Atom feeds; the single %s is replaced by the tag slug
# tag_feed_path_template = "tag/%s.atom.xml"

date_format = "%a %d %B %Y"
markdown_extensions = ["codehilite", "extra"]

# Extra navigation entries
# menu_items = [["Archives", "/archives.html"]]
"#
}
