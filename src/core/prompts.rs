//! Prompt text for the audit request.
//!
//! - `AUDIT_SYSTEM_PROMPT`: the fixed auditor instruction
//! - `build_user_text`: wraps the flattened table text for the user message

/// Fixed system instruction describing the audit task. Identical for every
/// request; determinism comes from this plus temperature 0.
pub const AUDIT_SYSTEM_PROMPT: &str = "You are a technical data auditor. Compare the pasted \
table text with the attached image of the same table. Verify that every value, model \
designation and power rating matches between the two. Cells marked with an asterisk must \
match exactly as marked; blank cells must correspond to blank or dash-marked cells in the \
counterpart. Reply that the data agrees in full, or itemize each divergence precisely.";

pub fn build_user_text(table_text: &str) -> String {
    format!("Pasted table data:\n{}", table_text)
}
