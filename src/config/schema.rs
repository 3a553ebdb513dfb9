//! Site configuration schema definitions

use std::collections::BTreeMap;
use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::{ConfigError, Result};

/// Mapping between `SiteConfig` option names and the names the site
/// generator reads from its own settings file.
pub const GENERATOR_NAMES: &[(&str, &str)] = &[
    ("markup", "MARKUP"),
    ("theme", "THEME"),
    ("default_language", "DEFAULT_LANG"),
    ("static_paths", "STATIC_PATHS"),
    ("typography_enabled", "TYPOGRIFY"),
    ("timezone", "TIMEZONE"),
    ("author", "AUTHOR"),
    ("site_url", "SITEURL"),
    ("site_name", "SITENAME"),
    ("tag_feed_path_template", "TAG_FEED_ATOM"),
    ("date_format", "DEFAULT_DATE_FORMAT"),
    ("markdown_extensions", "MARKDOWN_EXTENSIONS"),
    ("menu_items", "MENUITEMS"),
];

/// Look up the option name for a generator setting name
pub fn option_for_generator_name(name: &str) -> Option<&'static str> {
    GENERATOR_NAMES
        .iter()
        .find(|(_, generator)| *generator == name)
        .map(|(option, _)| *option)
}

/// Input markup languages the generator can parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    #[serde(alias = "restructuredtext")]
    Rst,
    #[serde(alias = "markdown")]
    Md,
    #[serde(alias = "htm")]
    Html,
}

impl Markup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Markup::Rst => "rst",
            Markup::Md => "md",
            Markup::Html => "html",
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value in the flat settings mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
    Pairs(Vec<(String, String)>),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(text) => f.write_str(text),
            SettingValue::Flag(flag) => write!(f, "{}", flag),
            SettingValue::List(items) => f.write_str(&items.join(", ")),
            SettingValue::Pairs(pairs) => {
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(name, target)| format!("{} -> {}", name, target))
                    .collect();
                f.write_str(&rendered.join(", "))
            }
        }
    }
}

/// Loaded site configuration.
///
/// Fields are private: once a `SiteConfig` is loaded it can only be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default = "default_markup", deserialize_with = "one_or_many")]
    markup: Vec<Markup>,

    #[serde(default = "default_theme")]
    theme: String,

    #[serde(default = "default_language")]
    default_language: String,

    #[serde(default = "default_static_paths")]
    static_paths: Vec<String>,

    #[serde(default)]
    typography_enabled: bool,

    #[serde(default = "default_timezone")]
    timezone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,

    #[serde(default)]
    site_url: String,

    #[serde(default = "default_site_name")]
    site_name: String,

    /// Output path for per-tag Atom feeds; `None` disables them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag_feed_path_template: Option<String>,

    #[serde(default = "default_date_format")]
    date_format: String,

    #[serde(default = "default_markdown_extensions")]
    markdown_extensions: Vec<String>,

    /// Extra navigation entries as (title, url) pairs
    #[serde(default)]
    menu_items: Vec<(String, String)>,
}

fn default_markup() -> Vec<Markup> {
    vec![Markup::Md]
}

fn default_theme() -> String {
    "notmyidea".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_static_paths() -> Vec<String> {
    vec!["images".to_string()]
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_site_name() -> String {
    "A Pelican Blog".to_string()
}

fn default_date_format() -> String {
    "%a %d %B %Y".to_string()
}

fn default_markdown_extensions() -> Vec<String> {
    vec!["codehilite".to_string(), "extra".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            markup: default_markup(),
            theme: default_theme(),
            default_language: default_language(),
            static_paths: default_static_paths(),
            typography_enabled: false,
            timezone: default_timezone(),
            author: None,
            site_url: String::new(),
            site_name: default_site_name(),
            tag_feed_path_template: None,
            date_format: default_date_format(),
            markdown_extensions: default_markdown_extensions(),
            menu_items: Vec::new(),
        }
    }
}

/// Accept either a single markup name or a sequence of them
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<Markup>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Markup),
        Many(Vec<Markup>),
    }

    match OneOrMany::deserialize(deserializer) {
        Ok(OneOrMany::One(markup)) => Ok(vec![markup]),
        Ok(OneOrMany::Many(markups)) => Ok(markups),
        Err(_) => Err(serde::de::Error::custom(
            "markup must be one of rst, md, html or a list of them",
        )),
    }
}

impl SiteConfig {
    pub fn markup(&self) -> &[Markup] {
        &self.markup
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn static_paths(&self) -> &[String] {
        &self.static_paths
    }

    pub fn typography_enabled(&self) -> bool {
        self.typography_enabled
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn tag_feed_path_template(&self) -> Option<&str> {
        self.tag_feed_path_template.as_deref()
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn markdown_extensions(&self) -> &[String] {
        &self.markdown_extensions
    }

    pub fn menu_items(&self) -> &[(String, String)] {
        &self.menu_items
    }

    /// Expand the per-tag feed template for a tag, if tag feeds are enabled
    pub fn tag_feed_path(&self, tag: &str) -> Option<String> {
        self.tag_feed_path_template
            .as_ref()
            .map(|template| template.replacen("%s", tag, 1))
    }

    /// Flat option-name to value mapping. Unset optional fields are omitted.
    pub fn settings(&self) -> BTreeMap<&'static str, SettingValue> {
        let mut settings = BTreeMap::new();

        settings.insert(
            "markup",
            SettingValue::List(self.markup.iter().map(|m| m.as_str().to_string()).collect()),
        );
        settings.insert("theme", SettingValue::Text(self.theme.clone()));
        settings.insert(
            "default_language",
            SettingValue::Text(self.default_language.clone()),
        );
        settings.insert("static_paths", SettingValue::List(self.static_paths.clone()));
        settings.insert(
            "typography_enabled",
            SettingValue::Flag(self.typography_enabled),
        );
        settings.insert("timezone", SettingValue::Text(self.timezone.clone()));
        if let Some(author) = &self.author {
            settings.insert("author", SettingValue::Text(author.clone()));
        }
        settings.insert("site_url", SettingValue::Text(self.site_url.clone()));
        settings.insert("site_name", SettingValue::Text(self.site_name.clone()));
        if let Some(template) = &self.tag_feed_path_template {
            settings.insert("tag_feed_path_template", SettingValue::Text(template.clone()));
        }
        settings.insert("date_format", SettingValue::Text(self.date_format.clone()));
        settings.insert(
            "markdown_extensions",
            SettingValue::List(self.markdown_extensions.clone()),
        );
        settings.insert("menu_items", SettingValue::Pairs(self.menu_items.clone()));

        settings
    }

    /// The same mapping as [`SiteConfig::settings`], keyed by the names the
    /// site generator expects.
    pub fn generator_settings(&self) -> BTreeMap<&'static str, SettingValue> {
        let mut settings = self.settings();
        GENERATOR_NAMES
            .iter()
            .filter_map(|(option, generator)| {
                settings.remove(option).map(|value| (*generator, value))
            })
            .collect()
    }

    /// Check semantic constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.markup.is_empty() {
            return Err(ConfigError::invalid(
                "markup",
                "at least one markup language is required",
            ));
        }

        require_non_empty("theme", &self.theme)?;
        require_non_empty("default_language", &self.default_language)?;
        require_non_empty("site_name", &self.site_name)?;
        require_non_empty("date_format", &self.date_format)?;

        if self.static_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "static_paths",
                "entries must be non-empty directory names",
            ));
        }

        if self.markdown_extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "markdown_extensions",
                "entries must be non-empty extension names",
            ));
        }

        if self
            .menu_items
            .iter()
            .any(|(title, target)| title.is_empty() || target.is_empty())
        {
            return Err(ConfigError::invalid(
                "menu_items",
                "each entry needs a title and a url",
            ));
        }

        validate_timezone(&self.timezone)?;
        validate_site_url(&self.site_url)?;
        validate_date_format(&self.date_format)?;

        if let Some(template) = &self.tag_feed_path_template {
            let placeholders = template.matches("%s").count();
            if placeholders != 1 {
                return Err(ConfigError::invalid(
                    "tag_feed_path_template",
                    format!(
                        "expected exactly one '%s' placeholder, found {} in '{}'",
                        placeholders, template
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn validate_timezone(timezone: &str) -> Result<()> {
    if timezone.parse::<Tz>().is_err() {
        return Err(ConfigError::invalid(
            "timezone",
            format!("'{}' is not an IANA timezone name", timezone),
        ));
    }
    Ok(())
}

fn validate_site_url(site_url: &str) -> Result<()> {
    if site_url.is_empty() {
        return Ok(());
    }

    let url = Url::parse(site_url)
        .map_err(|e| ConfigError::invalid("site_url", format!("'{}': {}", site_url, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::invalid(
            "site_url",
            format!("'{}' must be an absolute http(s) URL", site_url),
        ));
    }

    if site_url.ends_with('/') {
        tracing::warn!("site_url '{}' has a trailing slash", site_url);
    }

    Ok(())
}

fn validate_date_format(date_format: &str) -> Result<()> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::invalid(
            "date_format",
            format!("'{}' is not a valid strftime template", date_format),
        ));
    }
    Ok(())
}
