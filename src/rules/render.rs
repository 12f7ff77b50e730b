//! Body Emitter: turns the final rule sequence into the text handed to the agent.

use crate::error::ApiError;
use crate::rules::entry::ResolvedRule;
use crate::rules::frontmatter;
use crate::rules::source::RuleSource;

/// Separator between the last body and the trailer.
const TRAILER_RULE: &str = "* * *";

/// Render bodies in the given order followed by a trailer naming `target`.
///
/// An empty sequence renders a single notice line instead.
pub fn render(
    rules: &[ResolvedRule<'_>],
    target: &str,
    source: &dyn RuleSource,
) -> Result<String, ApiError> {
    if rules.is_empty() {
        return Ok(no_context_notice(target));
    }

    let mut output = String::new();
    for rule in rules {
        let content = source.read(rule.path())?;
        output.push_str(frontmatter::extract_body(&content));
        output.push('\n');
    }
    output.push_str(TRAILER_RULE);
    output.push_str("\n\n");
    output.push_str(&format!(
        "End of additional context for {}. Continue.",
        target
    ));
    Ok(output)
}

pub fn no_context_notice(target: &str) -> String {
    format!("No additional context found for {}. Continue.", target)
}
