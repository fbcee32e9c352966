use crate::demo::{run_audit_report, run_demo, AuditRunArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use listing_health::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Listing Health Auditor",
    about = "Run and serve profile health audits for local business listings",
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
    /// Run audits against the seeded listing snapshot
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },
    /// Run an end-to-end CLI demo covering the audit workflow
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Audit a listing once and print the category report
    Run(AuditRunArgs),
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
        Command::Audit {
            command: AuditCommand::Run(args),
        } => run_audit_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
