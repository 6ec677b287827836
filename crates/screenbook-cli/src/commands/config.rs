use std::path::PathBuf;

use booking_config::{Config, PathManager};
use color_eyre::Result;
use comfy_table::{Cell, Table};

use crate::output::Output;
use crate::ConfigCommands;

pub async fn run_config(
    cmd: ConfigCommands,
    override_path: Option<&PathBuf>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config_file = match override_path {
                Some(path) => path.clone(),
                None => PathManager::default().config_file(),
            };

            if output.is_human() {
                let mut table = Table::new();
                table.set_header(vec![
                    Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
                ]);
                table.add_row(vec!["Config file".to_string(), config_file.display().to_string()]);
                table.add_row(vec![
                    "Catalog service".to_string(),
                    config.catalog.base_url.clone(),
                ]);
                table.add_row(vec![
                    "Calendar service".to_string(),
                    config.calendar.base_url.clone(),
                ]);
                table.add_row(vec![
                    "Ledger".to_string(),
                    config
                        .ledger
                        .as_ref()
                        .map(|l| l.base_url.clone())
                        .unwrap_or_else(|| "embedded (file-backed)".to_string()),
                ]);
                table.add_row(vec![
                    "HTTP timeout".to_string(),
                    format!("{}s", config.http.timeout_secs),
                ]);
                table.add_row(vec![
                    "Data directory".to_string(),
                    config
                        .storage
                        .data_dir
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| {
                            PathManager::default().data_dir().display().to_string()
                        }),
                ]);
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                println!("{table}");
            } else {
                output.json(&serde_json::json!({
                    "config_file": config_file.display().to_string(),
                    "catalog": config.catalog.base_url,
                    "calendar": config.calendar.base_url,
                    "ledger": config.ledger.as_ref().map(|l| l.base_url.clone()),
                    "timeout_secs": config.http.timeout_secs,
                }));
            }
        }
    }

    Ok(())
}
