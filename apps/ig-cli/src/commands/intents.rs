// intents.rs — `intents`: list the registry.

use std::process::ExitCode;

use ig_hooks::GateConfig;
use ig_intent::{IntentRegistry, RegistrySnapshot};

pub fn execute(config: &GateConfig) -> anyhow::Result<ExitCode> {
    let registry = IntentRegistry::new(config.layout.registry.clone());
    match registry.load() {
        RegistrySnapshot::Missing => {
            println!(
                "No registry at {} (gate disabled).",
                registry.path().display()
            );
        }
        RegistrySnapshot::Loaded(intents) if intents.is_empty() => {
            println!("No intents defined.");
        }
        RegistrySnapshot::Loaded(intents) => {
            println!("{:<12} {:<14} {:<32} SCOPE", "ID", "STATUS", "NAME");
            for intent in &intents {
                let scope = if intent.owned_scope.is_empty() {
                    "(any)".to_string()
                } else {
                    intent.owned_scope.join(", ")
                };
                println!(
                    "{:<12} {:<14} {:<32} {}",
                    intent.id,
                    intent.status,
                    intent.display_name(),
                    scope
                );
            }
        }
        RegistrySnapshot::Malformed {
            reason,
            recovered_ids,
        } => {
            println!("Registry is malformed: {}", reason);
            if !recovered_ids.is_empty() {
                println!("Recovered ids: {}", recovered_ids.join(", "));
            }
            return Ok(ExitCode::FAILURE);
        }
        RegistrySnapshot::Unreadable { reason } => {
            anyhow::bail!("registry could not be read: {}", reason);
        }
    }
    Ok(ExitCode::SUCCESS)
}
