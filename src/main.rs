use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fundme::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fundme::AppCommand {
    fn from(cmd: Commands) -> fundme::AppCommand {
        match cmd {
            Commands::Deploy { owner, force } => fundme::AppCommand::Deploy { owner, force },
            Commands::Fund { from, value } => fundme::AppCommand::Fund { from, value },
            Commands::Withdraw { from } => fundme::AppCommand::Withdraw { from },
            Commands::Status => fundme::AppCommand::Status,
            Commands::Funder { index } => fundme::AppCommand::Funder { index },
            Commands::Funded { account } => fundme::AppCommand::Funded { account },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Deploy the contract on the configured network
    Deploy {
        /// Owner address or named account (defaults to `deployer`)
        #[arg(long)]
        owner: Option<String>,
        /// Replace an existing deployment
        #[arg(long)]
        force: bool,
    },
    /// Contribute ether to the contract
    Fund {
        /// Sender address or named account
        #[arg(long)]
        from: String,
        /// Amount in ether, e.g. 0.1
        #[arg(long)]
        value: String,
    },
    /// Withdraw the whole balance to the owner
    Withdraw {
        /// Caller address or named account
        #[arg(long)]
        from: String,
    },
    /// Display the contract and its funders
    Status,
    /// Display the funder at an index in funding order
    Funder { index: usize },
    /// Display the total funded by an account
    Funded { account: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fundme::cli::setup::setup(),
        Some(cmd) => fundme::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}
