//! stack-cli: build configuration tooling
//!
//! Usage:
//!   stack-cli api configure <api> --build-name <name>   Configure the providers of a build
//!   stack-cli version                                    Show version information

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use stack_nvidia_adapter::config::{
    build_config_path, builds_base_dir, configure_stack_provider, PromptConfigurator, StackApi,
};
use tracing_subscriber::EnvFilter;

/// Exit code for usage errors.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<ExitCode> {
    match args.first().map(String::as_str) {
        Some("api") => match args.get(1).map(String::as_str) {
            Some("configure") => cmd_api_configure(&args[2..]),
            Some(other) => Ok(usage_error(&format!("unknown api subcommand: {other}"))),
            None => Ok(usage_error("missing api subcommand")),
        },
        Some("version" | "--version" | "-V") => {
            println!("stack-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        Some(other) => Ok(usage_error(&format!("unknown command: {other}"))),
        None => Ok(usage_error("missing command")),
    }
}

fn print_usage() {
    println!(
        r#"stack-cli: configure stack builds

USAGE:
    stack-cli <COMMAND> [OPTIONS]

COMMANDS:
    api configure <api> --build-name <name>
                                Configure a stack API provider
                                (api: {allowed})
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    LLAMA_STACK_BUILDS_DIR      Build configuration root (default: ~/.llama/builds)
    RUST_LOG                    Log filter (default: warn)"#,
        allowed = StackApi::allowed()
    );
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("stack-cli: error: {message}");
    eprintln!();
    print_usage();
    ExitCode::from(EXIT_USAGE)
}

#[derive(Debug, PartialEq)]
struct ConfigureArgs {
    api: StackApi,
    build_name: String,
}

fn parse_configure_args(args: &[String]) -> Result<ConfigureArgs, String> {
    let mut api: Option<&str> = None;
    let mut build_name: Option<&str> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--build-name" {
            let value = iter
                .next()
                .ok_or_else(|| "argument --build-name: expected one argument".to_string())?;
            build_name = Some(value.as_str());
        } else if let Some(value) = arg.strip_prefix("--build-name=") {
            build_name = Some(value);
        } else if arg.starts_with("--") {
            return Err(format!("unrecognized argument: {arg}"));
        } else if api.is_none() {
            api = Some(arg.as_str());
        } else {
            return Err(format!("unrecognized argument: {arg}"));
        }
    }

    let api = api.ok_or_else(|| "the following arguments are required: api".to_string())?;
    let api = api.parse::<StackApi>().map_err(|_| {
        format!(
            "argument api: invalid choice: '{api}' (choose from {})",
            StackApi::allowed()
        )
    })?;
    let build_name = build_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| "the following arguments are required: --build-name".to_string())?;

    Ok(ConfigureArgs {
        api,
        build_name: build_name.to_string(),
    })
}

fn cmd_api_configure(args: &[String]) -> anyhow::Result<ExitCode> {
    let parsed = match parse_configure_args(args) {
        Ok(p) => p,
        Err(msg) => return Ok(usage_error(&msg)),
    };

    let base: PathBuf = builds_base_dir()?;
    let config_file = build_config_path(&base, parsed.api, &parsed.build_name);
    if !config_file.exists() {
        eprintln!(
            "stack-cli: error: Could not find {}. Please run `stack-cli api build` first",
            config_file.display()
        );
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    let stdin = io::stdin();
    let mut configurator = PromptConfigurator::new(stdin.lock(), io::stdout());
    configure_stack_provider(&config_file, &mut configurator)?;

    println!("YAML configuration has been written to {}", config_file.display());
    Ok(ExitCode::SUCCESS)
}
