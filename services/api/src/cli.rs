use crate::demo::{run_calculate, run_demo, run_sanitize, CalculateArgs, DemoArgs, SanitizeArgs};
use crate::server;
use auxilios::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Auxílios BR",
    about = "Run the benefit calculators and ad-slot service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one benefit calculator against household figures
    Calculate(CalculateArgs),
    /// Sanitize ad markup read from a file or stdin
    Sanitize(SanitizeArgs),
    /// Walk through the reference household scenarios and a rendered ad slot
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV export of ad creatives to seed the slot store
    #[arg(long)]
    pub(crate) ads_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Sanitize(args) => run_sanitize(args),
        Command::Demo(args) => run_demo(args),
    }
}
