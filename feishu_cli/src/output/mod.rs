mod formatters;

pub use formatters::{JsonFormatter, TableFormatter};

use anyhow::Result;
use feishu_client_core::LookupResult;

/// Output format of `feishu-user-id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

/// Trait for lookup result formatters
pub trait OutputFormatter: Send + Sync {
    /// Render the whole result, success or failure
    fn format_result(&self, result: &LookupResult) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Table => Box::new(TableFormatter::new(use_color)),
    }
}
