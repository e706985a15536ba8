use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_genius::{
    cli,
    config::{self, DEFAULT_SERVER_ADDRESS, Settings},
    warning,
};

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
    #[clap(flatten)]
    settings: Settings,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web backend
    Serve(ServeOptions),

    /// Log in with Spotify in the browser and print the token set
    Login,

    /// Show the Spotify account behind a token
    Profile(TokenOptions),

    /// Generate a playlist from a prompt
    Generate(GenerateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on
    #[clap(long, env = "SERVER_ADDRESS", default_value = DEFAULT_SERVER_ADDRESS)]
    address: String,
}

#[derive(Args, Debug, Clone)]
pub struct TokenOptions {
    /// Spotify access token, as printed by `login`
    #[clap(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    token: String,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// What the playlist should sound like
    prompt: String,

    #[clap(flatten)]
    token: TokenOptions,

    /// Keep popular tracks (only drop tracks from your listening history)
    #[clap(long)]
    no_novelty: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            config::init_logging("info,tower_http=debug");
            cli::serve(cli.settings, &opt.address).await
        }
        Command::Login => {
            config::init_logging("warn");
            cli::login(cli.settings).await
        }
        Command::Profile(opt) => {
            config::init_logging("warn");
            cli::profile(cli.settings, &opt.token).await
        }
        Command::Generate(opt) => {
            config::init_logging("warn");
            cli::generate(cli.settings, &opt.token.token, &opt.prompt, !opt.no_novelty).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
