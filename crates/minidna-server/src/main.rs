//! MiniDNA Server CLI
//!
//! Starts the catalogue HTTP server.

use minidna_server::{config::ServerConfig, init_tracing, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        ServerConfig::default()
    };

    // PORT and GROQ_API_KEY win over the file
    let config = config.with_process_env()?;

    start_server(config).await
}

fn print_help() {
    println!("MiniDNA Server - product catalogue with duplicate detection");
    println!();
    println!("USAGE:");
    println!("    minidna-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    PORT               Port to listen on (default: 8080)");
    println!("    GROQ_API_KEY       API key for the Groq completion service (required)");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address, bind_port, database_path");
    println!("    - [llm] endpoint, model, api_key, temperature, timeout_secs");
    println!("    - [submission] canonical_confidence, duplicate_confidence,");
    println!("      unsupported_fallback_message");
    println!();
}
