//! Terminal detection utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::{stdin, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY but nobody is there to answer
    if is_ci_environment() {
        return false;
    }

    if env::var("DEBIAN_FRONTEND").unwrap_or_default() == "noninteractive" {
        return false;
    }

    true
}

/// Whether a confirmation prompt can be answered
pub fn can_prompt() -> bool {
    is_interactive() && stdin().is_terminal()
}

/// Whether colored output should be used on stdout
pub fn use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    let term = env::var("TERM").unwrap_or_default();
    is_interactive() && term != "dumb"
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "BUILDKITE",
        "TF_BUILD",
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}
