//! Config command - show or initialize configuration

use std::path::Path;

use rxverify::config::Config;
use rxverify::output::{OperationResult, OutputMode};

/// Show the effective configuration, or write it out with `init`
pub fn config(path: &Path, init: bool, mode: OutputMode) -> anyhow::Result<()> {
    let config = Config::load_from(path)?;

    if init {
        config.save_to(path)?;
        OperationResult {
            success: true,
            message: format!("Wrote configuration to {}", path.display()),
        }
        .render(mode);
        return Ok(());
    }

    let key_present = config.knowledge.api_key().is_some();
    if mode == OutputMode::Json {
        let json = serde_json::json!({
            "path": path,
            "config": config,
            "api_key_present": key_present,
            "history_path": config.history.path(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("Config file: {}", path.display());
        println!();
        print!("{}", toml::to_string_pretty(&config)?);
        println!();
        println!(
            "API key ({}): {}",
            config.knowledge.api_key_env,
            if key_present { "set" } else { "not set" }
        );
        println!("History file: {}", config.history.path().display());
    }
    Ok(())
}
