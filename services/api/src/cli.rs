use crate::demo::{run_demo, run_render, DemoArgs, RenderArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use docgen::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rental Document Generator",
    about = "Render rental back-office documents from templates and entity data",
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
    /// Render templates to preview or PDF-ready HTML
    Render(RenderArgs),
    /// Run an end-to-end demo against the built-in sample data
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
        Command::Render(args) => run_render(args),
        Command::Demo(args) => run_demo(args),
    }
}
