use anyhow::Result;
use canvas_async::CanvasConfig;
use canvas_tools::identifier::IdentifierArg;
use canvas_tools::tool::TextFormat;
use canvas_tools::{CanvasServer, CanvasTools, CourseError, build_registry};
use clap::{Parser, Subcommand};
use rmcp::ServiceExt;
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "canvas-tools")]
#[command(about = "Canvas LMS course tools via CLI or MCP")]
#[command(version)]
struct Args {
    /// Canvas API base URL (e.g. https://canvas.example.edu/api/v1)
    #[arg(long, global = true, env = "CANVAS_API_URL")]
    api_url: Option<String>,
    /// Canvas access token
    #[arg(long, global = true, env = "CANVAS_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List courses for the authenticated user
    Courses {
        /// Also list concluded courses
        #[arg(long)]
        include_concluded: bool,
        /// List every enrollment, not only taught courses
        #[arg(long)]
        include_all: bool,
    },
    /// Show details for one course
    Course {
        /// Course code or numeric course ID
        identifier: String,
    },
    /// Summarize a course's pages and modules
    Overview {
        /// Course code or numeric course ID
        identifier: String,
        /// Skip the pages summary
        #[arg(long)]
        no_pages: bool,
        /// Skip the modules summary
        #[arg(long)]
        no_modules: bool,
    },
    /// Start MCP server
    Mcp {
        /// Expose only these tools (repeatable)
        #[arg(long = "tool")]
        tools: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let is_mcp = matches!(args.command, Commands::Mcp { .. });

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "canvas_tools=info".into());
    let fmt_layer = tracing_subscriber::fmt::layer();

    if is_mcp {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    let mut config = CanvasConfig::new();
    if let Some(url) = &args.api_url {
        config = config.with_api_base(url.trim());
    }
    if let Some(token) = &args.api_token {
        config = config.with_api_token(token.trim());
    }
    let tools = CanvasTools::with_config(config);

    let json = args.json;
    match args.command {
        Commands::Mcp { tools: allow } => run_mcp_server(tools, allow).await,
        Commands::Courses {
            include_concluded,
            include_all,
        } => emit(tools.fetch_courses(include_concluded, include_all).await, json),
        Commands::Course { identifier } => {
            emit(tools.course_details(&IdentifierArg::from(identifier)).await, json)
        }
        Commands::Overview {
            identifier,
            no_pages,
            no_modules,
        } => emit(
            tools
                .content_overview(&IdentifierArg::from(identifier), !no_pages, !no_modules)
                .await,
            json,
        ),
    }
}

fn emit<T: Serialize + TextFormat>(result: Result<T, CourseError>, json: bool) -> Result<ExitCode> {
    match result {
        Ok(v) if json => println!("{}", serde_json::to_string_pretty(&v)?),
        Ok(v) => println!("{}", v.fmt_text()),
        Err(e) => {
            eprintln!("{}", e.message());
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_mcp_server(tools: CanvasTools, allow: Vec<String>) -> Result<ExitCode> {
    let registry = Arc::new(build_registry(Arc::new(tools)));
    let mut server = CanvasServer::new(registry);
    if !allow.is_empty() {
        server = server.with_allowlist(allow);
    }

    tracing::info!(
        name = server.name(),
        version = server.version(),
        tools = ?server.effective_tool_names(),
        "starting MCP server"
    );
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    tracing::info!("MCP server stopped");
    Ok(ExitCode::SUCCESS)
}
