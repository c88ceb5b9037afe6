use pocketdash_client::{ClientError, RENDER_FAILURE_PLACEHOLDER};

pub fn render_error(error: &ClientError) -> String {
    let mut lines = Vec::new();
    if error.is_render_failure() {
        lines.push(RENDER_FAILURE_PLACEHOLDER.to_string());
        lines.push(String::new());
    } else {
        lines.push("Something went wrong, but it's easy to fix.".to_string());
        lines.push(String::new());
    }

    lines.push(format!("  Error:    {}", error.code));
    lines.push(format!("  Details:  {}", error.message));
    lines.push(String::new());
    lines.push("What to do next:".to_string());

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
