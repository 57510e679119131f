use crate::demo::{run_demo, run_evaluate, run_options, DemoArgs, EvaluateArgs, OptionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pip_choice::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "PIP Choice",
    about = "Work out which Michigan PIP medical coverage levels a household can choose",
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
    /// Print the six coverage options and the Medicaid plan list
    Options(OptionsArgs),
    /// Evaluate a questionnaire stored as JSON and print the outcome
    Evaluate(EvaluateArgs),
    /// Walk a scripted household through the questionnaire wizard
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Options(args) => run_options(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}
