use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use feishu_cli::config::{ConfigManager, get_config};
use feishu_cli::error::{CliError, CliResult, ExitCode, exit_for_parse_error};
use feishu_cli::logging::{self, DUTY_DEFAULT_FILTER};
use feishu_cli::orchestrators::duty_orchestrator::{DutyOrchestrator, OnceOptions};
use feishu_cli::terminal;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feishu-duty")]
#[command(author, version, about = "Daily duty rotation reminder for a Feishu group", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Roster file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the reminder every day at the configured time (default)
    Run,

    /// Rotate once and send the reminder now
    Once {
        /// Print the message without advancing the roster or sending
        #[arg(long)]
        dry_run: bool,

        /// Send without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the roster and the rotation cursor
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., schedule.time)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., webhook.url)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return exit_for_parse_error(e),
    };
    let debug = cli.debug;

    match run(cli).await {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprint!("{}", e.format_for_user(debug));
            e.exit_code().into()
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let Cli {
        debug,
        roster,
        command,
    } = cli;
    let command = command.unwrap_or(Commands::Run);

    let config = get_config();

    // Only the rotating commands write to the log file
    let log_file = match (&command, &config) {
        (Commands::Run | Commands::Once { .. }, Ok(config)) => Some(config.logging.file.clone()),
        _ => None,
    };
    if let Err(e) = logging::init(debug, DUTY_DEFAULT_FILTER, log_file.as_deref()) {
        eprintln!("Warning: {e:#}");
        let _ = logging::init(debug, DUTY_DEFAULT_FILTER, None);
    }

    match command {
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
        Commands::Run => {
            let mut config = config?;
            config.apply_cli_overrides(roster);
            DutyOrchestrator::new(config).run().await
        }
        Commands::Once { dry_run, yes } => {
            let mut config = config?;
            config.apply_cli_overrides(roster);
            let options = OnceOptions {
                dry_run,
                assume_yes: yes,
                interactive: terminal::can_prompt(),
            };
            DutyOrchestrator::new(config).once(options).await.map(|_| ())
        }
        Commands::Status => {
            let mut config = config?;
            config.apply_cli_overrides(roster);
            print!("{}", DutyOrchestrator::new(config).status()?);
            Ok(())
        }
    }
}

fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            if items.is_empty() {
                return Err(CliError::general("No configuration values available"));
            }

            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, rest) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((rest.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
                println!();
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
