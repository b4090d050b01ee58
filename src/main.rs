use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use triad::{
    agents::router::RoutingDecision,
    api::routes::create_app,
    cli::{output::Output, Cli, Commands},
    utils::toml_config::ProviderConfig,
    AppState, Orchestrator, TriadConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let (config, found) = TriadConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    init_tracing(&config, cli.verbose);

    if !found {
        warn!(
            "Configuration file {} not found, using defaults",
            cli.config.display()
        );
    }

    match cli.command {
        None | Some(Commands::Serve) => serve(config, &output).await,
        Some(Commands::Ask {
            message,
            agents,
            json,
        }) => ask(&config, &output, &message, agents, json).await,
        Some(Commands::Route { message }) => {
            output.header("Routing");
            output.kv("request", &message);
            output.routing(&RoutingDecision::for_request(&message));
            Ok(())
        }
        Some(Commands::Config { validate }) => show_config(&config, &cli.config, found, validate, &output),
    }
}

/// Level used when `RUST_LOG` is unset.
fn default_log_level(config: &TriadConfig, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else {
        config.server.log_level.as_str()
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output on stdout stays clean.
fn init_tracing(config: &TriadConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(config, verbose)));

    if config.server.log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn serve(config: TriadConfig, output: &Output) -> anyhow::Result<()> {
    output.banner();

    let orchestrator = Orchestrator::initialize(&config)
        .await
        .context("Failed to initialize agents")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        orchestrator: Arc::new(orchestrator),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    output.success(&format!("Listening on http://{}", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn ask(
    config: &TriadConfig,
    output: &Output,
    message: &str,
    agents: Vec<triad::Capability>,
    json: bool,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::initialize(config)
        .await
        .context("Failed to initialize agents")?;

    let explicit = if agents.is_empty() { None } else { Some(agents) };
    let response = orchestrator.process_request(message, explicit).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        output.header(message);
        output.process_response(&response);
        output.newline();
    }
    Ok(())
}

fn show_config(
    config: &TriadConfig,
    path: &std::path::Path,
    found: bool,
    validate: bool,
    output: &Output,
) -> anyhow::Result<()> {
    output.header("Configuration");
    output.kv(
        "file",
        &if found {
            path.display().to_string()
        } else {
            format!("{} (not found, defaults)", path.display())
        },
    );
    output.kv(
        "server",
        &format!("{}:{}", config.server.host, config.server.port),
    );

    output.subheader("Providers");
    let mut providers: Vec<_> = config.providers.iter().collect();
    providers.sort_by(|a, b| a.0.cmp(b.0));
    for (name, provider) in providers {
        let detail = match provider {
            ProviderConfig::Ollama { base_url, .. } => format!("ollama @ {}", base_url),
            ProviderConfig::OpenAI { api_base, .. } => format!("openai @ {}", api_base),
        };
        output.list_item(&format!("{}: {}", name, detail));
    }

    output.subheader("Models");
    let mut models: Vec<_> = config.models.iter().collect();
    models.sort_by(|a, b| a.0.cmp(b.0));
    for (alias, model) in models {
        output.list_item(&format!("{} -> {} via {}", alias, model.model, model.provider));
    }

    output.subheader("Search");
    if config.search.enabled {
        output.info(&format!(
            "duckduckgo, up to {} results",
            config.search.max_results
        ));
    } else {
        output.info("disabled, research runs without sources");
    }

    output.subheader("Agents");
    for capability in triad::Capability::ALL {
        let (model, options) = config.agents.for_capability(capability);
        output.list_item(&format!(
            "{}: {} (max_tokens {}, temperature {})",
            capability, model, options.max_tokens, options.temperature
        ));
    }

    if !found {
        output.hint("Copy triad.example.toml to triad.toml to customize these settings");
    }

    if validate {
        output.newline();
        match config.validate() {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => {
                output.error(&e.to_string());
                anyhow::bail!("Configuration is invalid");
            }
        }
    }

    Ok(())
}
