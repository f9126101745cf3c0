//! Companion CLI
//!
//! Terminal client for the companion backend:
//! - Log in and store the session token
//! - Chat interactively with the stored token
//! - Send a single message
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use companion::config::generate_default_config;
use companion::{
    render_bubble, ChatBackend, ChatSession, CompanionClient, Config, FileTokenStore, LoggingConfig,
    LoginForm, SendOutcome, TokenStore, DEFAULT_WIDTH, THINKING_INDICATOR, VERIFYING_LABEL,
};

type InputLines = Lines<BufReader<Stdin>>;

#[derive(Parser)]
#[command(name = "companion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for a companion chat backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Terminal width used to lay out message bubbles
    #[arg(long, default_value_t = DEFAULT_WIDTH, global = true)]
    pub width: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in, store the session token and open the chat
    Login {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Stop after logging in instead of opening the chat
        #[arg(long)]
        no_chat: bool,
    },

    /// Chat using the stored session token
    Chat,

    /// Send one message and print the exchange
    Send {
        /// Message text (words are joined with spaces)
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    match cli.command {
        Commands::Config { output } => write_default_config(output)?,

        Commands::Login {
            username,
            password,
            no_chat,
        } => {
            let (client, tokens) = connect(cli.config, cli.api_url)?;

            let password = match password {
                Some(p) => p,
                None => read_password().await?,
            };

            let mut form = LoginForm::new(username, password);
            eprintln!("{}", VERIFYING_LABEL);

            if let Err(failure) = form.submit(&client, &tokens).await {
                eprintln!("{}", failure.alert_text());
                std::process::exit(1);
            }

            eprintln!("Logged in.");
            if !no_chat {
                run_chat(&client, &tokens, &mut input, cli.width).await?;
            }
        }

        Commands::Chat => {
            let (client, tokens) = connect(cli.config, cli.api_url)?;
            run_chat(&client, &tokens, &mut input, cli.width).await?;
        }

        Commands::Send { message } => {
            let (client, tokens) = connect(cli.config, cli.api_url)?;
            let mut session = ChatSession::new();
            session.set_input(message.join(" "));

            let outcome = send_with_indicator(&mut session, &client, &tokens).await;
            print_new_messages(&session, 0, cli.width);

            if let SendOutcome::Failed(failure) = outcome {
                eprintln!("{}", failure.alert_text());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Load configuration, start logging and build the backend client
fn connect(
    config_path: Option<PathBuf>,
    api_url: Option<String>,
) -> anyhow::Result<(CompanionClient, FileTokenStore)> {
    let mut config = match config_path {
        Some(path) => Config::load_with_env(&path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);
    tracing::debug!("Companion v{} using {}", env!("CARGO_PKG_VERSION"), config.api.base_url);

    let client = CompanionClient::new(config.api.client_config())?;
    let tokens = FileTokenStore::new(&config.session.token_file);
    Ok((client, tokens))
}

fn write_default_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("writing config to {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Interactive chat view. Runs until stdin closes.
async fn run_chat<B, T>(
    backend: &B,
    tokens: &T,
    input: &mut InputLines,
    width: usize,
) -> anyhow::Result<()>
where
    B: ChatBackend + ?Sized,
    T: TokenStore + ?Sized,
{
    let mut session = ChatSession::new();
    let mut shown = 0;

    eprintln!("Say something. Press Enter to send, Ctrl-D to leave.");

    while let Some(line) = prompt("> ", input).await? {
        session.set_input(line);

        if let SendOutcome::Failed(failure) = send_with_indicator(&mut session, backend, tokens).await {
            eprintln!("! {}", failure.alert_text());
        }

        shown = print_new_messages(&session, shown, width);
    }

    Ok(())
}

async fn send_with_indicator<B, T>(session: &mut ChatSession, backend: &B, tokens: &T) -> SendOutcome
where
    B: ChatBackend + ?Sized,
    T: TokenStore + ?Sized,
{
    if !session.input().trim().is_empty() {
        eprintln!("{}", THINKING_INDICATOR);
    }
    session.send_message(backend, tokens).await
}

/// Print transcript entries from `shown` onwards; returns the new count
fn print_new_messages(session: &ChatSession, shown: usize, width: usize) -> usize {
    let transcript = session.transcript();
    for message in transcript.iter().skip(shown) {
        println!("{}\n", render_bubble(message, width));
    }
    transcript.len()
}

async fn prompt(label: &str, input: &mut InputLines) -> anyhow::Result<Option<String>> {
    eprint!("{}", label);
    std::io::stderr().flush()?;
    Ok(input.next_line().await?)
}

/// Prompt on the terminal without echoing what is typed
async fn read_password() -> anyhow::Result<String> {
    let password = tokio::task::spawn_blocking(|| rpassword::prompt_password("Password: ")).await??;
    Ok(password)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("companion={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
