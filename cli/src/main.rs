mod cli;
mod commands;
mod context;
mod error;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        ui::error(err.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.network.verbose);

    match cli.command {
        Commands::Completions(args) => commands::completions::run(args),
        command => {
            let ctx = Context::load(&cli.network)?;
            dispatch(&ctx, command)
        }
    }
}

fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Connect => commands::connect::run(ctx),
        Commands::Profile(args) => commands::profile::run(ctx, args),
        Commands::Post(args) => commands::post::run(ctx, args),
        Commands::List => commands::list::run(ctx),
        Commands::Show(args) => commands::show::run(ctx, args),
        Commands::Access(args) => commands::access::run(ctx, args),
        Commands::Tip(args) => commands::tip::run(ctx, args),
        Commands::Owner(args) => commands::owner::run(ctx, args),
        Commands::Config => commands::config::run(ctx),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

// `-v` wins over RUST_LOG; otherwise only warnings reach stderr.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("thoughtverse=debug,thoughtverse_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
