use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use feishu_client_core::LookupResult;
use feishu_client_core::contact::IdKind;

const RULE_WIDTH: usize = 80;
const ID_WIDTH: usize = 40;
const KIND_WIDTH: usize = 10;
const VALUE_WIDTH: usize = 30;

/// Fixed-width table for terminals
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn row(id: &str, kind: &str, value: &str) -> String {
        format!("{id:<ID_WIDTH$} | {kind:<KIND_WIDTH$} | {value:<VALUE_WIDTH$}\n")
    }
}

impl OutputFormatter for TableFormatter {
    fn format_result(&self, result: &LookupResult) -> Result<String> {
        let mut output = String::new();
        let rule = "-".repeat(RULE_WIDTH);

        if !result.is_success() {
            let message = result.error.as_deref().unwrap_or("unknown error");
            output.push_str(&format!("{}: {message}\n", self.colorize("Error", |s| s.red())));
            return Ok(output);
        }

        let data = result.data.clone().unwrap_or_default();

        if data.user_list.is_empty() {
            output.push_str("No matching users found\n");
        } else {
            output.push_str(&format!("\nQuery results:\n{rule}\n"));
            output.push_str(&Self::row("User ID", "Type", "Value"));
            output.push_str(&format!("{rule}\n"));

            for user in &data.user_list {
                let user_id = user.user_id.as_deref().unwrap_or("N/A");
                for (kind, value) in user.inputs() {
                    output.push_str(&Self::row(user_id, &kind.to_string(), value));
                }
            }

            output.push_str(&format!("{rule}\n"));
        }

        if !data.errors.is_empty() {
            output.push_str(&format!("\n{}\n", self.colorize("Lookup errors:", |s| s.yellow())));
            for entry in &data.errors {
                let (kind, value) = entry.input().unwrap_or((IdKind::Email, "N/A"));
                let reason = entry.reason.as_deref().unwrap_or("unknown error");
                output.push_str(&format!("{kind}: {value} - {reason}\n"));
            }
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &LookupResult) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(format!("{json}\n"))
    }
}
