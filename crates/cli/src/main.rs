use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Relay CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Run the relay server. Requires an upstream base URL (upstream.baseUrl
    /// in the config file, or RELAY_UPSTREAM_URL).
    Serve {
        /// Config file path (default: RELAY_CONFIG_PATH or ~/.relay/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// HTTP port (default from config or 8080)
        #[arg(long, short)]
        port: Option<u16>,

        /// Upstream base URL (overrides config and RELAY_UPSTREAM_URL)
        #[arg(long, value_name = "URL")]
        upstream: Option<String>,
    },

    /// Send a message through a running relay and print the JSON response.
    Send {
        /// Config file path (default: RELAY_CONFIG_PATH or ~/.relay/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// The message text to relay.
        message: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("relay {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Serve { config, port, upstream }) => {
            if let Err(e) = run_serve(config, port, upstream).await {
                log::error!("serve failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Send { config, message }) => {
            if let Err(e) = run_send(config, message).await {
                log::error!("send failed: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

async fn run_serve(
    config_path: Option<std::path::PathBuf>,
    port: Option<u16>,
    upstream: Option<String>,
) -> anyhow::Result<()> {
    let (mut config, _path) = lib::config::load_config(config_path)?;
    if let Some(p) = port {
        config.relay.port = p;
    }
    if let Some(u) = upstream {
        config.upstream.base_url = Some(u);
    }
    log::info!("starting relay on {}:{}", config.relay.bind, config.relay.port);
    lib::relay::run_relay(config).await
}

async fn run_send(
    config_path: Option<std::path::PathBuf>,
    message: String,
) -> anyhow::Result<()> {
    let (config, _) = lib::config::load_config(config_path)?;
    let url = format!(
        "http://{}:{}/api/message",
        config.relay.bind.trim(),
        config.relay.port
    );

    let client = reqwest::Client::new();
    let res = client
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, "text/plain")
        .body(message)
        .send()
        .await?;
    let status = res.status();
    let body: serde_json::Value = res.json().await?;
    if !status.is_success() {
        anyhow::bail!(
            "relay returned {}: {}",
            status,
            body.get("error").and_then(|v| v.as_str()).unwrap_or("unknown error")
        );
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
