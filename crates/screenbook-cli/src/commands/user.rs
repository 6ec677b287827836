use chrono::{DateTime, Utc};
use color_eyre::Result;
use comfy_table::Table;

use crate::commands::{fail, Service};
use crate::output::Output;
use crate::UserCommands;

pub async fn run_user(cmd: UserCommands, service: &Service, output: &Output) -> Result<()> {
    match cmd {
        UserCommands::Add { name } => {
            let user = service
                .user_directory()
                .register(&name)
                .await
                .map_err(fail)?;
            output.success(format!("User added: {} ({})", user.display_name, user.id));
            output.json(&serde_json::to_value(&user)?);
        }
        UserCommands::List => {
            let users = service.user_directory().list().await;
            if output.is_human() {
                let mut table = Table::new();
                table.set_header(vec!["ID", "Name", "Last active"]);
                for user in &users {
                    table.add_row(vec![
                        user.id.clone(),
                        user.display_name.clone(),
                        format_timestamp(user.last_active),
                    ]);
                }
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                println!("{table}");
            } else {
                output.json(&serde_json::to_value(&users)?);
            }
        }
        UserCommands::Show { user_id } => {
            let user = service.user_directory().get(&user_id).await.map_err(fail)?;
            output.info(format!(
                "{} ({}), last active {}",
                user.display_name,
                user.id,
                format_timestamp(user.last_active)
            ));
            output.json(&serde_json::to_value(&user)?);
        }
        UserCommands::Rename { user_id, name } => {
            let user = service
                .user_directory()
                .rename(&user_id, &name)
                .await
                .map_err(fail)?;
            output.success(format!("User renamed to {}", user.display_name));
            output.json(&serde_json::to_value(&user)?);
        }
        UserCommands::Rm { user_id } => {
            service
                .user_directory()
                .remove(&user_id)
                .await
                .map_err(fail)?;
            output.success(format!("User {} deleted", user_id));
        }
    }

    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}
