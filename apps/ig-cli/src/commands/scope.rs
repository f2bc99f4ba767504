// scope.rs — `scope`: explain whether an intent may touch a path.

use std::process::ExitCode;

use ig_hooks::GateConfig;
use ig_intent::IntentRegistry;
use ig_policy::{is_in_scope, workspace_relative};

pub fn execute(config: &GateConfig, intent_id: &str, path: &str) -> anyhow::Result<ExitCode> {
    let intent = IntentRegistry::new(config.layout.registry.clone()).resolve(intent_id)?;
    let target = workspace_relative(path, config.workspace_root());

    if !intent.has_scope() {
        println!("{}: '{}' allowed (intent declares no scope)", intent.id, target);
        return Ok(ExitCode::SUCCESS);
    }
    if is_in_scope(&target, &intent.owned_scope) {
        println!("{}: '{}' in scope", intent.id, target);
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{}: '{}' OUT OF SCOPE (allowed: {})",
            intent.id,
            target,
            intent.owned_scope.join(", ")
        );
        Ok(ExitCode::FAILURE)
    }
}
