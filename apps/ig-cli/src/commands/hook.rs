// hook.rs — `pre` and `post`: hook entry points over stdin/stdout.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use ig_hooks::{parse_invocation, run_post_hook, run_pre_hook, GateConfig, InvocationContext};

/// Exit status for a denied call, so shell-based hook runners can branch on it.
const DENIED_EXIT: u8 = 2;

fn read_invocation() -> anyhow::Result<InvocationContext> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read invocation context from stdin")?;
    Ok(parse_invocation(&input)?)
}

pub fn pre(config: &GateConfig) -> anyhow::Result<ExitCode> {
    let ctx = read_invocation()?;
    let decision = run_pre_hook(&ctx, config.workspace_root());
    println!("{}", serde_json::to_string(&decision)?);
    if decision.is_allowed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(DENIED_EXIT))
    }
}

pub fn post(config: &GateConfig) -> anyhow::Result<ExitCode> {
    let ctx = read_invocation()?;
    run_post_hook(&ctx, config.workspace_root());
    Ok(ExitCode::SUCCESS)
}
