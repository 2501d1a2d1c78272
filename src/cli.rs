// Command-line entry points that work without the TUI
use crate::catalog::Catalog;
use crate::clipboard::payload_text;
use crate::config::Settings;
use crate::executor::{ExecRequest, SimulatedBackend, run_one};
use std::path::PathBuf;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const MAGENTA: &str = "\x1b[35m";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliAction {
    Tui,
    List,
    Call(String),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub no_track: bool,
    pub action: CliAction,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(std::env::args().skip(1).collect())
}

/// Parses everything after the program name.
pub fn parse_from(args: Vec<String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        config: None,
        catalog: None,
        no_track: false,
        action: CliAction::Tui,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--catalog" => {
                let path = iter.next().ok_or("--catalog needs a path")?;
                parsed.catalog = Some(PathBuf::from(path));
            }
            "--no-track" => parsed.no_track = true,
            "-h" | "--help" => parsed.action = CliAction::Help,
            "-V" | "--version" => parsed.action = CliAction::Version,
            "list" if parsed.action == CliAction::Tui => parsed.action = CliAction::List,
            "call" if parsed.action == CliAction::Tui => {
                let key = iter.next().ok_or("Usage: coreapi call <id|path>")?;
                parsed.action = CliAction::Call(key);
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        r#"{}coreapi{} - A portfolio rendered as an API reference

{}USAGE:{}
    coreapi                     Launch the TUI
    coreapi list                List every endpoint
    coreapi call <id|path>      Execute one endpoint and print its response

{}OPTIONS:{}
    -c, --config <file.hcl>     Settings file (default: ./coreapi.hcl)
    --catalog <file.json>       Endpoint catalog to load instead of the bundled one
    --no-track                  Select sections only from the navigation panel
    -h, --help                  Show this help
    -V, --version               Show version

{}EXAMPLES:{}
    coreapi call get-about
    coreapi call /projects/auth-service
    coreapi --catalog me.json --no-track
"#,
        colors::BOLD,
        colors::RESET,
        colors::BOLD,
        colors::RESET,
        colors::BOLD,
        colors::RESET,
        colors::BOLD,
        colors::RESET,
    );
}

pub fn print_version() {
    println!("coreapi {}", env!("CARGO_PKG_VERSION"));
}

fn method_color(method: &str) -> &'static str {
    match method {
        "GET" => colors::GREEN,
        "POST" => colors::YELLOW,
        "PUT" => colors::CYAN,
        "DELETE" => colors::RED,
        _ => colors::MAGENTA,
    }
}

pub fn print_catalog(catalog: &Catalog) {
    for (group, members) in catalog.groups() {
        println!("{}{}{}", colors::BOLD, group.to_uppercase(), colors::RESET);
        for endpoint in members.into_iter().filter_map(|i| catalog.at(i)) {
            let method = endpoint.method.as_str();
            println!(
                "  {}{:<6}{} {:<36} {}{}{}",
                method_color(method),
                method,
                colors::RESET,
                endpoint.path,
                colors::DIM,
                endpoint.id,
                colors::RESET,
            );
        }
        println!();
    }
}

/// Executes one endpoint against the simulated backend. Returns the
/// process exit code.
pub async fn call(catalog: &Catalog, settings: &Settings, key: &str) -> i32 {
    let Some(endpoint) = catalog.resolve(key) else {
        eprintln!(
            "{}Error:{} no endpoint with id or path '{}'",
            colors::RED,
            colors::RESET,
            key
        );
        return 1;
    };

    let method = endpoint.method.as_str();
    println!(
        "{}{}{} {}{}{}",
        method_color(method),
        method,
        colors::RESET,
        colors::BOLD,
        endpoint.path,
        colors::RESET
    );

    let backend = SimulatedBackend::new(settings.execute_delay(), settings.latency_range());
    let request = ExecRequest::for_endpoint(endpoint);
    match run_one(&backend, &request, settings.request_timeout()).await {
        Ok(done) => {
            println!(
                "{}✓ {} OK{} {}{}ms{}\n",
                colors::GREEN,
                done.status,
                colors::RESET,
                colors::DIM,
                done.latency_ms,
                colors::RESET
            );
            println!("{}", payload_text(&done.response));
            0
        }
        Err(e) => {
            eprintln!("{}✗ {}{}", colors::RED, e, colors::RESET);
            1
        }
    }
}
