use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use clearapi_core::config::{self, CONFIG_FILE_NAME, ClearApiConfig};
use clearapi_core::parse;
use clearapi_core::parse::operation::{HttpMethod, Operation};
use clearapi_core::parse::ref_resolve::schema_ref;
use clearapi_core::parse::schema::SchemaOrRef;
use clearapi_core::synth::{ExampleContext, build_command_with_options, example_json};
use clearapi_core::view::{component_node, expand_all, group_operations, render_outline};
use clearapi_core::{OpenApiSpec, resolve};

#[derive(Parser)]
#[command(name = "clearapi", about = "Browse OpenAPI 3.x documents", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a text outline of the document
    Show {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List operations grouped by tag
    Groups {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: GroupsFormat,
    },

    /// Synthesize an example JSON value
    Example {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Component schema name
        #[arg(long, conflicts_with = "operation", required_unless_present = "operation")]
        schema: Option<String>,

        /// Operation as "METHOD /path"
        #[arg(long)]
        operation: Option<String>,

        /// Response status code; picks a response instead of the request body
        #[arg(long, requires = "operation")]
        status: Option<String>,

        /// Direction used to hide readOnly / writeOnly properties
        #[arg(long)]
        context: Option<ContextArg>,
    },

    /// Print a curl command for an operation
    Curl {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Operation as "METHOD /path"
        #[arg(long)]
        operation: String,

        /// Base URL; overrides the config and the document's servers
        #[arg(long)]
        server: Option<String>,
    },

    /// Print the expanded property tree of a component schema
    Schema {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Component schema name
        #[arg(long)]
        name: String,

        /// Maximum nesting depth
        #[arg(long)]
        depth: Option<usize>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: SchemaFormat,
    },

    /// Initialize a new clearapi configuration
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
enum GroupsFormat {
    Yaml,
    Json,
}

#[derive(Clone, ValueEnum)]
enum SchemaFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContextArg {
    Request,
    Response,
    Neutral,
}

impl From<ContextArg> for ExampleContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Request => ExampleContext::Request,
            ContextArg::Response => ExampleContext::Response,
            ContextArg::Neutral => ExampleContext::Neutral,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { input } => cmd_show(input),

        Commands::Groups { input, format } => cmd_groups(input, format),

        Commands::Example {
            input,
            schema,
            operation,
            status,
            context,
        } => cmd_example(input, schema, operation, status, context),

        Commands::Curl {
            input,
            operation,
            server,
        } => cmd_curl(input, &operation, server),

        Commands::Schema {
            input,
            name,
            depth,
            format,
        } => cmd_schema(input, &name, depth, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "clearapi", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ClearApiConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_spec(path: &Path) -> Result<OpenApiSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    let parsed = match ext {
        "json" => parse::from_json(&content),
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_document(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;

    log::debug!(
        "loaded {} with {} operations",
        path.display(),
        parsed.operation_count()
    );
    Ok(parsed)
}

/// Load the config (or defaults) and the document it points at, unless
/// `input` overrides the config's path.
fn load(input: Option<PathBuf>) -> Result<(ClearApiConfig, OpenApiSpec)> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let spec = load_spec(&input)?;
    Ok((cfg, spec))
}

/// Find an operation from `"METHOD /path"`.
fn find_operation<'a>(
    spec: &'a OpenApiSpec,
    target: &str,
) -> Result<(HttpMethod, &'a str, &'a Operation)> {
    let Some((method, path)) = target.trim().split_once(char::is_whitespace) else {
        anyhow::bail!("expected \"METHOD /path\", got {target:?}");
    };
    let Some(method) = HttpMethod::from_token(method) else {
        anyhow::bail!("unknown HTTP method {method:?}");
    };
    let path = path.trim();
    let Some((path, item)) = spec.paths.get_key_value(path) else {
        anyhow::bail!("no path {path} in document");
    };
    match item.operations.get(&method) {
        Some(operation) => Ok((method, path.as_str(), operation)),
        None => anyhow::bail!("no {method} operation on {path}"),
    }
}

fn cmd_show(input: Option<PathBuf>) -> Result<()> {
    let (_, spec) = load(input)?;
    println!("{}", render_outline(&spec));
    Ok(())
}

fn cmd_groups(input: Option<PathBuf>, format: GroupsFormat) -> Result<()> {
    let (_, spec) = load(input)?;
    let summary = build_groups_summary(&spec);

    match format {
        GroupsFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        GroupsFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_groups_summary(spec: &OpenApiSpec) -> serde_json::Value {
    let groups: serde_json::Map<String, serde_json::Value> = group_operations(&spec.paths)
        .into_iter()
        .map(|(name, operations)| {
            let operations: Vec<serde_json::Value> = operations
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "method": entry.method.as_str(),
                        "path": entry.path,
                        "operation_id": entry.operation.operation_id,
                        "summary": entry.operation.summary,
                        "deprecated": entry.operation.deprecated.unwrap_or(false),
                    })
                })
                .collect();
            (name, serde_json::Value::Array(operations))
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "groups": groups,
    })
}

fn cmd_example(
    input: Option<PathBuf>,
    schema: Option<String>,
    operation: Option<String>,
    status: Option<String>,
    context: Option<ContextArg>,
) -> Result<()> {
    let (cfg, spec) = load(input)?;
    let mut context = context.map(ExampleContext::from).unwrap_or(cfg.example.context);

    let component;
    let target: &SchemaOrRef = match (schema, operation) {
        (Some(name), _) => {
            let ref_path = schema_ref(&name);
            if resolve(&ref_path, &spec.components).is_none() {
                anyhow::bail!("no schema named {name} in document");
            }
            component = SchemaOrRef::Ref { ref_path };
            &component
        }
        (None, Some(target)) => {
            let (method, path, op) = find_operation(&spec, &target)?;
            // an explicit status always means a response payload
            if status.is_some() && context == ExampleContext::Request {
                context = ExampleContext::Response;
            }
            operation_schema(op, status.as_deref(), context)
                .with_context(|| format!("{method} {path} has no JSON payload to sample"))?
        }
        (None, None) => anyhow::bail!("either --schema or --operation is required"),
    };

    match example_json(target, &spec.components, context) {
        Some(json) => println!("{json}"),
        None => eprintln!("No example could be synthesized."),
    }
    Ok(())
}

/// JSON schema sampled for an operation: the request body in request
/// context, otherwise the response for `status` or the first success
/// response that carries one.
fn operation_schema<'a>(
    op: &'a Operation,
    status: Option<&str>,
    context: ExampleContext,
) -> Option<&'a SchemaOrRef> {
    if let Some(code) = status {
        return op.responses.get(code)?.json_schema();
    }
    if context == ExampleContext::Request {
        return op.json_request_schema();
    }
    op.responses
        .iter()
        .filter(|(code, _)| code.starts_with('2'))
        .chain(op.responses.iter())
        .find_map(|(_, response)| response.json_schema())
}

fn cmd_curl(input: Option<PathBuf>, target: &str, server: Option<String>) -> Result<()> {
    let (cfg, spec) = load(input)?;
    let (method, path, op) = find_operation(&spec, target)?;

    let server = server
        .as_deref()
        .or(cfg.command.server.as_deref())
        .or_else(|| spec.server_url());
    let cmd = build_command_with_options(
        method,
        path,
        op,
        server,
        &spec.components,
        &cfg.command.options(),
    );
    println!("{cmd}");
    Ok(())
}

fn cmd_schema(
    input: Option<PathBuf>,
    name: &str,
    depth: Option<usize>,
    format: SchemaFormat,
) -> Result<()> {
    let (cfg, spec) = load(input)?;
    let Some(root) = component_node(name, &spec.components) else {
        anyhow::bail!("no schema named {name} in document");
    };
    let tree = expand_all(root, &spec.components, depth.unwrap_or(cfg.tree.max_depth));

    match format {
        SchemaFormat::Text => println!("{}", tree.render()),
        SchemaFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
