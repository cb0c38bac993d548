use colored::*;
use feishu_client_core::Error as CoreError;
use feishu_client_core::error::{IoErrorKind, ValidationError};
use std::error::Error as StdError;
use std::fmt;

/// CLI-specific error type with user-facing suggestions
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category used for the message prefix and suggestions
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    General,
    Misuse,
    Network,
    Filesystem,
}

/// Exit codes of both binaries
///
/// Every failure category exits with 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Print a clap parse error and map it onto the exit codes
///
/// Help and version output exit 0, every usage error exits 1.
pub fn exit_for_parse_error(error: clap::Error) -> std::process::ExitCode {
    let _ = error.print();
    if error.use_stderr() {
        ExitCode::Failure.into()
    } else {
        ExitCode::Success.into()
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a usage or configuration error
    pub fn misuse(message: &str) -> Self {
        Self::new(message, ErrorCategory::Misuse)
            .with_suggestion("Run with --help for usage information")
    }

    /// Create a network error
    pub fn network(message: &str) -> Self {
        Self::new(message, ErrorCategory::Network)
            .with_suggestion("Check your network connection and the configured endpoint")
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        if message.contains("not found") {
            error
                .suggestions
                .push("Check that the roster file path is correct".to_string());
        } else if message.contains("ermission") {
            error.suggestions.push("Check file permissions".to_string());
        } else if message.contains("Malformed") {
            error
                .suggestions
                .push("Fix the JSON syntax of the file".to_string());
        }

        error
    }

    /// Credentials were neither passed nor found in the environment
    pub fn missing_credentials() -> Self {
        Self::misuse("Both an App ID and an App Secret are required").with_suggestion(
            "Pass --app-id and --app-secret or set FEISHU_APP_ID and FEISHU_APP_SECRET",
        )
    }

    /// Neither a mobile nor an email was given
    pub fn missing_inputs() -> Self {
        Self::misuse("Provide at least one mobile (--mobile) or email (--email)")
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::General => "Error".red(),
            ErrorCategory::Misuse => "Usage Error".yellow(),
            ErrorCategory::Network => "Network Error".red(),
            ErrorCategory::Filesystem => "File Error".red(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  - {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            match self.category {
                ErrorCategory::General => "Error",
                ErrorCategory::Misuse => "Usage Error",
                ErrorCategory::Network => "Network Error",
                ErrorCategory::Filesystem => "File Error",
            },
            self.message
        )?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

/// Map core library errors onto CLI categories
impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();
        let mut cli_error = match &error {
            CoreError::Validation(ValidationError::MissingField { field })
                if field == "app_id" || field == "app_secret" =>
            {
                Self::missing_credentials()
            }
            CoreError::Validation(ValidationError::MissingField { field })
                if field == "mobile or email" =>
            {
                Self::missing_inputs()
            }
            CoreError::Validation(_) => Self::misuse(&message),
            CoreError::Protocol(_) => Self::network(&message),
            CoreError::Io(io) => {
                let err = Self::filesystem(&message);
                match (&io.path, &io.kind) {
                    (Some(path), IoErrorKind::FileNotFound | IoErrorKind::Malformed) => {
                        err.with_context("path", &path.display().to_string())
                    }
                    _ => err,
                }
            }
        };
        cli_error.source = Some(Box::new(error));
        cli_error
    }
}

/// Convert anyhow errors to CLI errors
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<CoreError>() {
            Ok(core) => Self::from(core),
            Err(other) => Self::general(&format!("{other:#}")),
        }
    }
}

/// Closest candidate within edit distance 2, if any
pub fn closest_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (levenshtein_distance(input, c), *c))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, c)| c)
}

/// Simple Levenshtein distance for suggestions
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *cell = j;
    }

    for (i, c1) in s1_chars.iter().enumerate() {
        let i1 = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let j1 = j + 1;
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i1][j1] = std::cmp::min(
                std::cmp::min(matrix[i][j1] + 1, matrix[i1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[len1][len2]
}
