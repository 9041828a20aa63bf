use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotify_gradient::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the gradient endpoint
    Serve,

    /// Print the currently playing song and its gradient
    NowPlaying,

    /// Open the Spotify authorization page to obtain a one-time code
    Authorize,

    /// Inspect or reset the cached tokens
    Tokens(TokensOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TokensOptions {
    #[command(subcommand)]
    pub command: TokensSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TokensSubcommand {
    /// Show which tokens are cached
    Status,

    /// Remove both cached tokens
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Serve => cli::serve(&config).await,
        Command::NowPlaying => cli::now_playing(&config).await,
        Command::Authorize => cli::authorize(&config).await,
        Command::Tokens(opt) => match opt.command {
            TokensSubcommand::Status => cli::token_status(&config).await,
            TokensSubcommand::Clear => cli::clear_tokens(&config).await,
        },
        Command::Completions(_) => {}
    }
}
