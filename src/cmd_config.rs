//! The `config` commands: read and change durable settings.

use anyhow::{Result, bail};

use pagerelay_protocols::SettingsStore;
use pagerelay_store::SqliteStore;

use crate::cli::ConfigAction;

pub async fn run(store: SqliteStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get => {
            let settings = SettingsStore::load(&store).await?;
            println!("template_prefix:          {:?}", settings.template_prefix);
            println!(
                "secondary_action_enabled: {}",
                settings.secondary_action_enabled
            );
            println!("tracking_enabled:         {}", settings.tracking_enabled);
            println!("favorite_engine:          {}", settings.favorite_engine);
            Ok(())
        }

        ConfigAction::Set {
            template_prefix,
            secondary_action_enabled,
            tracking_enabled,
            favorite_engine,
        } => {
            let mut settings = SettingsStore::load(&store).await?;

            if let Some(prefix) = template_prefix {
                settings.template_prefix = prefix;
            }
            if let Some(enabled) = secondary_action_enabled {
                settings.secondary_action_enabled = enabled;
            }
            if let Some(enabled) = tracking_enabled {
                settings.tracking_enabled = enabled;
            }
            if let Some(engine) = favorite_engine {
                if pagerelay_engine::by_name(&engine).is_none() {
                    bail!("Unknown engine '{}'", engine);
                }
                settings.favorite_engine = engine;
            }

            store.save(&settings).await?;
            println!("Settings updated");
            Ok(())
        }
    }
}
