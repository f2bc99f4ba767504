// context.rs — Rendering an intent into the context block injected on selection.
//
// Every section is always present. Empty lists render as an explicit
// placeholder so the agent never sees a blank section it might misread as
// "no information".

use ig_intent::Intent;

const ANY_SCOPE: &str = "Any (unrestricted)";
const NONE: &str = "None";

/// Render `intent` as an `<intent_context>` block.
pub fn render_intent_context(intent: &Intent) -> String {
    let mut out = String::new();
    out.push_str("<intent_context>\n");
    out.push_str(&format!("  <id>{}</id>\n", intent.id));
    out.push_str(&format!("  <name>{}</name>\n", intent.display_name()));
    out.push_str(&format!(
        "  <status>{}</status>\n",
        if intent.status.trim().is_empty() {
            "UNKNOWN"
        } else {
            intent.status.as_str()
        }
    ));
    push_section(&mut out, "owned_scope", &intent.owned_scope, ANY_SCOPE);
    push_section(&mut out, "constraints", &intent.constraints, NONE);
    push_section(
        &mut out,
        "acceptance_criteria",
        &intent.acceptance_criteria,
        NONE,
    );
    out.push_str("</intent_context>");
    out
}

fn push_section(out: &mut String, tag: &str, items: &[String], placeholder: &str) {
    out.push_str(&format!("  <{}>\n", tag));
    if items.is_empty() {
        out.push_str(&format!("    {}\n", placeholder));
    } else {
        for item in items {
            out.push_str(&format!("    - {}\n", item));
        }
    }
    out.push_str(&format!("  </{}>\n", tag));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_rendered_as_items() {
        let mut intent = Intent::new("INT-001", "Weather API").with_scope(["src/api/**"]);
        intent.status = "IN_PROGRESS".into();
        intent.constraints = vec!["No external auth".into()];
        intent.acceptance_criteria = vec!["Tests pass".into()];

        let ctx = render_intent_context(&intent);
        assert!(ctx.starts_with("<intent_context>"));
        assert!(ctx.contains("<id>INT-001</id>"));
        assert!(ctx.contains("    - src/api/**"));
        assert!(ctx.contains("    - No external auth"));
        assert!(ctx.contains("    - Tests pass"));
        assert!(ctx.contains("<status>IN_PROGRESS</status>"));
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let ctx = render_intent_context(&Intent::new("INT-002", ""));
        assert!(ctx.contains("<owned_scope>\n    Any (unrestricted)\n  </owned_scope>"));
        assert!(ctx.contains("<constraints>\n    None\n  </constraints>"));
        assert!(ctx.contains("<acceptance_criteria>\n    None\n  </acceptance_criteria>"));
        assert!(ctx.contains("<name>INT-002</name>"));
    }
}
