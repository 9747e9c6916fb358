//! Config command implementation.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { shop, force } => init_config(&shop, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Configuration");

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output
        .kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("name", &ctx.config.shop.name);
    ctx.output.kv("address", &ctx.config.shop.address);
    ctx.output.kv("phone", &ctx.config.shop.phone);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());
    ctx.output.kv("level", &ctx.config.logging.level.to_string());

    if !ctx.config.environments.is_empty() {
        ctx.output.info("");
        ctx.output.info("Environments:");
        let mut names: Vec<&String> = ctx.config.environments.keys().collect();
        names.sort();
        for env in names {
            ctx.output.list_item(env);
        }
    }

    Ok(())
}

fn init_config(shop: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("tailor.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(shop))?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config);

    for warning in &warnings {
        ctx.output.warn(warning);
    }
    for error in &errors {
        ctx.output.error(error);
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}

/// Errors and warnings for a configuration.
fn check(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let base_url = &config.api.base_url;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(format!("api.base_url must be an http(s) URL: {}", base_url));
    }
    if config.api.timeout_secs == 0 {
        errors.push("api.timeout_secs must be at least 1".to_string());
    }
    if config.shop.name.trim().is_empty() {
        errors.push("shop.name is required".to_string());
    }
    if config.shop.phone.trim().is_empty() {
        warnings.push("shop.phone is empty; printed slips will have no contact".to_string());
    }
    if config.storage.data_dir.trim().is_empty() {
        errors.push("storage.data_dir is required".to_string());
    }

    let mut envs: Vec<_> = config.environments.iter().collect();
    envs.sort_by(|a, b| a.0.cmp(b.0));
    for (name, env) in envs {
        if let Some(ref api) = env.api {
            if !api.base_url.starts_with("http") {
                errors.push(format!(
                    "environments.{}.api.base_url must be an http(s) URL",
                    name
                ));
            }
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config: CliConfig = toml::from_str(&generate_default_config("Alphasuits")).unwrap();
        let (errors, warnings) = check(&config);
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_bad_values_are_errors() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:8000".to_string();
        config.shop.name = " ".to_string();
        let (errors, _) = check(&config);
        assert_eq!(errors.len(), 2);
    }
}
