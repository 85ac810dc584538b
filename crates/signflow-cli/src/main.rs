//! Signflow CLI - Turn plain-text signing requirements into published workflows.

use clap::Parser;
use signflow_cli::commands;
use signflow_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> signflow_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let token = cli.token.as_deref();
    match cli.command {
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter)?,
        Command::Parse(args) => commands::execute_parse(args, &formatter)?,
        Command::Build(args) => {
            commands::execute_build(args, config.active_profile()?, &formatter)?
        }
        Command::Create(args) => {
            commands::execute_create(
                args,
                config.active_profile()?,
                token,
                cli.gemini_key.as_deref(),
                &formatter,
            )
            .await?
        }
        Command::Submit(args) => {
            commands::execute_submit(args, config.active_profile()?, token, &formatter).await?
        }
    }

    Ok(())
}
