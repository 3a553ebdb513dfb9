//! CLI command implementations

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::{error, info, print_settings_table, success, warn, OutputFormat};
use crate::config::{self, SiteConfig};

/// Write a default configuration file
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        warn(&format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
        return Ok(());
    }

    let content = config::default_config_content();
    fs::write(path, content).with_context(|| format!("Failed writing {}", path.display()))?;

    success(&format!("Created {}", path.display()));
    info("Edit the file and run 'sitecfg check' to validate it");

    Ok(())
}

/// Load and validate the configuration
pub fn check(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    success(&format!(
        "Configuration for '{}' is valid ({} markup, theme '{}')",
        config.site_name(),
        config
            .markup()
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join("+"),
        config.theme()
    ));

    Ok(())
}

/// Print the loaded settings
pub fn show(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path)?;

    match format {
        OutputFormat::Table => {
            print_settings_table(&config);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&config)?;
            println!("{}", yaml);
        }
        OutputFormat::Toml => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

/// Write the settings as an assignment file for the site generator
pub fn export(config_path: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let content = config::to_pyconf(&config);

    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed writing {}", path.display()))?;
            success(&format!("Wrote {}", path.display()));
        }
        None => print!("{}", content),
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<SiteConfig> {
    let result = match config_path {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    result.map_err(|e| {
        error(&format!("Failed to load configuration: {}", e));
        e.into()
    })
}
