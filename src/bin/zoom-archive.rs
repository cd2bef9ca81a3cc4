use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zoom_archive::{export, AccessToken, CallbackParams, Client, Credentials, DateRange, DEFAULT_PAGE_SIZE};

/// List Zoom archive files over the OAuth authorization-code flow.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the URL a user opens to authorize the app
    AuthorizeUrl {
        /// Opaque value echoed back on the redirect
        #[arg(long)]
        state: Option<String>,
    },

    /// Exchange an authorization code (or the full redirect query) for an access token
    Exchange {
        /// Authorization code, or a query string such as `code=...&state=...`
        #[arg(long)]
        code: String,
    },

    /// Fetch every archive file record in a date range
    Collect {
        #[arg(long, env = "ZOOM_ACCESS_TOKEN", hide_env_values = true)]
        token: String,

        /// First day, YYYY-MM-DD (defaults to seven days ago)
        #[arg(long)]
        from: Option<String>,

        /// Last day, YYYY-MM-DD (defaults to now)
        #[arg(long)]
        to: Option<String>,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Write the record set here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let timeout = cli.timeout;

    match cli.command {
        Command::AuthorizeUrl { state } => {
            let client = oauth_client(timeout)?;
            println!("{}", client.authorization_url(state.as_deref())?);
        }
        Command::Exchange { code } => {
            let code = if code.contains('=') {
                match CallbackParams::from_query(&code)? {
                    CallbackParams::Code { code, .. } => code,
                    CallbackParams::Denied { error } => anyhow::bail!("Authorization denied: {}", error),
                }
            } else {
                code
            };

            let client = oauth_client(timeout)?;
            let token = client.exchange(&code).context("Failed to exchange authorization code")?;
            println!("{}", token.secret());
        }
        Command::Collect { token, from, to, page_size, output } => {
            let range = DateRange::normalize(from.as_deref(), to.as_deref())?;
            let mut client = Client::for_listing();
            client.set_timeout(timeout);
            let records = client
                .collect(&AccessToken::new(token), &range, page_size)
                .context("Failed to collect archive files")?;

            match output {
                Some(path) => export::write_json(&path, &records)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => export::to_writer(std::io::stdout().lock(), &records)?,
            }
        }
    }

    Ok(())
}

/// Client for the OAuth subcommands, which need the app credentials from the environment.
fn oauth_client(timeout: u64) -> Result<Client> {
    let credentials = Credentials::from_env().context("Failed to read Zoom credentials")?;
    let mut client = Client::new(credentials);
    client.set_timeout(timeout);

    Ok(client)
}
