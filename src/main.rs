use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eastwing::agent::{TurnExecutor, providers};
use eastwing::config;
use eastwing::console;
use eastwing::facts::{self, FactProvider, StaticFacts, TavilyFactProvider};
use eastwing::repl::Repl;
use eastwing::session::SessionState;

#[derive(Parser)]
#[command(name = "eastwing")]
#[command(about = "The East Wing - A conversational text adventure game")]
#[command(
    after_help = "Chat with the last remaining wall of the demolished White House East Wing. \
                  Type \"help\" for instructions, or \"quit\"/\"exit\"/\"bye\"/\"goodbye\" to end the game."
)]
#[command(version)]
struct Cli {
    /// Use fast stage progression (final stage at turn 12)
    #[arg(short, long, conflicts_with = "slow")]
    fast: bool,

    /// Use slow stage progression (default)
    #[arg(short, long)]
    slow: bool,

    /// AI model: gpt-5-mini (default), gpt-5-nano, gpt-5, gpt-4o-mini
    #[arg(long, env = "EASTWING_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an API key in ~/.eastwing/credentials
    Key {
        /// Provider: openai or tavily
        provider: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Key { provider }) => {
            let key = rpassword::prompt_password(format!("{provider} API key: "))?;
            let path = eastwing::secrets::store_api_key(&provider, &key)?;
            println!("saved {provider} key to {}", path.display());
            Ok(())
        }
        None => play(cli).await,
    }
}

async fn play(cli: Cli) -> anyhow::Result<()> {
    let config = config::load()?;

    let mut session_config = config.session.clone();
    if cli.fast {
        session_config.speed = "fast".into();
    } else if cli.slow {
        session_config.speed = "slow".into();
    }
    if let Some(model) = cli.model {
        session_config.model = model;
    }

    let resolved = session_config.resolve();
    let palette = resolved.color.palette();
    for notice in &resolved.notices {
        console::alert(&palette, &format!("Error: {notice}"));
    }
    console::alert(&palette, &format!("Using model: {}", resolved.model.id));
    console::alert(&palette, &format!("Current game speed: {}\n", resolved.speed));

    let provider = providers::from_config(&config.openai)?;

    println!("Fetching current information about the East Wing...");
    let fact_provider: Box<dyn FactProvider> = match &config.facts.tavily_api_key {
        Some(key) if config.facts.enabled => Box::new(TavilyFactProvider::new(
            key.clone(),
            config.facts.max_results,
        )),
        _ => {
            println!("Note: No Tavily API key found - using basic facts.");
            Box::new(StaticFacts)
        }
    };
    let background = facts::fetch_or_fallback(fact_provider.as_ref()).await;
    println!();

    let mut session = SessionState::new(resolved.speed, resolved.model, background);
    session.set_color(resolved.color);
    if let Some(mood) = resolved.mood {
        session.set_mood_override(mood);
    }

    Repl::new(TurnExecutor::new(Box::new(provider)), session)?
        .run()
        .await
}
