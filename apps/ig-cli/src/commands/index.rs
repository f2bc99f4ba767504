// index.rs — `index`: print the intent map.

use std::process::ExitCode;

use ig_audit::IntentMap;
use ig_hooks::GateConfig;

pub fn execute(config: &GateConfig) -> anyhow::Result<ExitCode> {
    let map = IntentMap::new(config.layout.intent_map.clone());
    let rows = map.rows()?;
    if rows.is_empty() {
        println!("No intent map entries at {}", map.path().display());
        return Ok(ExitCode::SUCCESS);
    }
    for row in rows {
        println!("{}", row.to_markdown());
    }
    Ok(ExitCode::SUCCESS)
}
