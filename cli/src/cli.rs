use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(name = "thoughtverse")]
#[command(bin_name = "thoughtverse")]
#[command(about = "Publish, buy and tip content on the Thought Verse contract")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub network: NetworkOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct NetworkOptions {
    /// Configuration file (defaults to ./thoughtverse.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint of the wallet provider.
    #[arg(long, global = true, env = "THOUGHTVERSE_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Address of the deployed platform contract.
    #[arg(long, global = true, env = "THOUGHTVERSE_CONTRACT")]
    pub contract: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Connect the wallet and show the active account.
    Connect,
    /// Create or inspect creator profiles.
    Profile(ProfileArgs),
    /// Publish new content.
    Post(PostArgs),
    /// List all published content.
    List,
    /// Show one item with its creator.
    Show(ContentArgs),
    /// Pay for an item and print its full body.
    Access(ContentArgs),
    /// Tip the creator of an item.
    Tip(TipArgs),
    /// Owner-only platform controls.
    Owner(OwnerArgs),
    /// Print the effective configuration.
    Config,
    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Register a profile for the connected account.
    Create {
        /// Display name.
        #[arg(long)]
        username: String,

        /// Short biography.
        #[arg(long, default_value = "")]
        bio: String,
    },
    /// Show a profile (the connected account's by default).
    Show {
        /// Account to look up.
        address: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct PostArgs {
    /// Content title.
    #[arg(long)]
    pub title: String,

    /// Content body.
    #[arg(long)]
    pub body: String,

    /// Access price in ether; free when omitted.
    #[arg(long, default_value = "")]
    pub price: String,
}

#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Content id, starting at 1.
    pub id: u64,
}

#[derive(Debug, Args)]
pub struct TipArgs {
    /// Content id whose creator receives the tip.
    pub id: u64,

    /// Tip amount in ether.
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
}

#[derive(Debug, Args)]
pub struct OwnerArgs {
    #[command(subcommand)]
    pub command: OwnerCommand,
}

#[derive(Debug, Subcommand)]
pub enum OwnerCommand {
    /// Show balance, platform share and posting fee.
    Status,
    /// Withdraw part of the contract balance.
    Withdraw {
        /// Amount in ether.
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Withdraw the whole contract balance.
    WithdrawAll,
    /// Set the platform's share of access payments.
    SetShare {
        /// Percentage, up to two decimals.
        #[arg(allow_hyphen_values = true)]
        percent: String,
    },
    /// Set the fee charged for publishing.
    SetFee {
        /// Fee in ether.
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
