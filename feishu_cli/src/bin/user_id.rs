use clap::Parser;
use feishu_cli::config::get_config;
use feishu_cli::error::{CliResult, ExitCode, exit_for_parse_error};
use feishu_cli::logging::{self, LOOKUP_DEFAULT_FILTER};
use feishu_cli::orchestrators::lookup_orchestrator::{self, LookupOptions};
use feishu_cli::output::OutputFormat;
use feishu_cli::terminal;

#[derive(Parser)]
#[command(name = "feishu-user-id")]
#[command(author, version, about = "Look up Feishu user ids by mobile number and/or email", long_about = None)]
struct Cli {
    /// Mobile number to look up (repeatable)
    #[arg(short, long = "mobile", value_name = "MOBILE")]
    mobile: Vec<String>,

    /// Email address to look up (repeatable)
    #[arg(short, long = "email", value_name = "EMAIL")]
    email: Vec<String>,

    /// App ID of the Feishu app (falls back to FEISHU_APP_ID)
    #[arg(long)]
    app_id: Option<String>,

    /// App Secret of the Feishu app (falls back to FEISHU_APP_SECRET)
    #[arg(long)]
    app_secret: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return exit_for_parse_error(e),
    };
    let debug = cli.debug;

    if let Err(e) = logging::init(debug, LOOKUP_DEFAULT_FILTER, None) {
        eprintln!("Warning: {e:#}");
    }

    match run(cli).await {
        Ok(true) => ExitCode::Success.into(),
        Ok(false) => ExitCode::Failure.into(),
        Err(e) => {
            eprint!("{}", e.format_for_user(debug));
            e.exit_code().into()
        }
    }
}

/// Returns whether the lookup succeeded
async fn run(cli: Cli) -> CliResult<bool> {
    let config = get_config()?;

    let options = LookupOptions {
        mobiles: cli.mobile,
        emails: cli.email,
        app_id: cli.app_id,
        app_secret: cli.app_secret,
    };

    let report =
        lookup_orchestrator::run(config.contact, options, cli.output, terminal::use_color())
            .await?;
    print!("{}", report.rendered);

    Ok(report.success)
}
