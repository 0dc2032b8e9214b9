use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use rqd_core::config::{self, CONFIG_FILE_NAME, RqdConfig};
use rqd_core::designer::{Session, SlotLocation};
use rqd_core::parse;
use rqd_core::parse::spec::ApiSpec;

#[derive(Parser)]
#[command(name = "rqd", about = "Schema-driven HTTP request designer", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an API specification document
    Validate {
        /// Path to the spec file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect a parsed specification document
    Inspect {
        /// Path to the spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Compose an effective request from a spec and supplied values
    Compose(ComposeArgs),

    /// Initialize a new rqd configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Compose(args) => cmd_compose(args),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "rqd", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<RqdConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_spec(path: &PathBuf) -> Result<ApiSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };

    Ok(parsed)
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let spec = load_spec(&input)?;

    eprintln!("Valid OpenAPI {} spec: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());

    let operations: usize = spec.paths.values().map(|item| item.methods().len()).sum();
    eprintln!("  Operations: {}", operations);

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let spec = load_spec(&input)?;
    let summary = build_inspect_summary(&spec);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &ApiSpec) -> serde_json::Value {
    let paths: Vec<serde_json::Value> = spec
        .paths
        .iter()
        .map(|(path, item)| {
            let operations: Vec<serde_json::Value> = item
                .methods()
                .iter()
                .filter_map(|m| item.operation(*m).map(|op| (m, op)))
                .map(|(method, op)| {
                    serde_json::json!({
                        "method": method.as_str(),
                        "summary": op.summary,
                        "parameters": op.parameters.len(),
                        "has_body": op.request_body.is_some(),
                    })
                })
                .collect();
            serde_json::json!({ "path": path, "operations": operations })
        })
        .collect();

    serde_json::json!({
        "title": spec.info.title,
        "version": spec.info.version,
        "base_url": spec.base_url(),
        "paths": paths,
    })
}

#[derive(clap::Args)]
struct ComposeArgs {
    /// Path to the spec file (defaults to the configured input)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path template to select (defaults to the first declared path)
    #[arg(short, long)]
    path: Option<String>,

    /// HTTP method to select (defaults to the first declared method)
    #[arg(short, long)]
    method: Option<String>,

    /// Path parameter value, as name=value (repeatable)
    #[arg(short = 'P', long = "path-value", value_name = "NAME=VALUE")]
    path_values: Vec<String>,

    /// Query parameter value, as name=value (repeatable)
    #[arg(short = 'Q', long = "query-value", value_name = "NAME=VALUE")]
    query_values: Vec<String>,

    /// Body field value, as name=value (repeatable)
    #[arg(short = 'B', long = "body-value", value_name = "NAME=VALUE")]
    body_values: Vec<String>,

    /// Header entry, as name=value (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME=VALUE")]
    headers: Vec<String>,

    /// Report advisory rule violations for the supplied values
    #[arg(long)]
    check: bool,
}

fn cmd_compose(args: ComposeArgs) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = args.input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let mut spec = load_spec(&input)?;

    if let Some(ref base_url) = cfg.base_url {
        match spec.servers.first_mut() {
            Some(server) => server.url = base_url.clone(),
            None => spec.servers.push(rqd_core::parse::server::Server {
                url: base_url.clone(),
                description: None,
            }),
        }
    }

    let mut session = Session::new(spec);

    if let Some(path) = args.path {
        session.select_path(&path);
    }
    if let Some(method) = args.method {
        session.select_method(&method);
    }

    for (name, value) in cfg.headers.iter() {
        session.set_header(name, value);
    }
    for entry in &args.headers {
        let (name, value) = split_pair(entry)?;
        session.set_header(name, value);
    }
    for entry in &args.path_values {
        let (name, value) = split_pair(entry)?;
        session.set_value(SlotLocation::Path, name, value);
    }
    for entry in &args.query_values {
        let (name, value) = split_pair(entry)?;
        session.set_value(SlotLocation::Query, name, value);
    }
    for entry in &args.body_values {
        let (name, value) = split_pair(entry)?;
        session.set_value(SlotLocation::Body, name, value);
    }

    if args.check {
        report_violations(&session);
    }

    let request = session.submit();
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

/// Advisory only: violations are reported but never block composition.
fn report_violations(session: &Session) {
    for slot in session.slots().iter() {
        let violations = rqd_core::designer::violations(&slot.rules, &slot.value);
        for rule in violations {
            eprintln!("  warning: {} {:?} violates {:?}", slot.name, slot.value, rule);
        }
    }
}

fn split_pair(entry: &str) -> Result<(&str, &str)> {
    match entry.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("expected name=value, got {:?}", entry),
    }
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Wrote {}", config_path.display());
    Ok(())
}
