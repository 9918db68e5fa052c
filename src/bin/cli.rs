//! respkv CLI Client
//!
//! Command-line interface for issuing single commands to the store.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use respkv::{Client, Config};

/// respkv CLI
#[derive(Parser, Debug)]
#[command(name = "respkv-cli")]
#[command(about = "CLI for a RESP key-value store")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long, default_value = "6379")]
    port: u16,

    /// AUTH username
    #[arg(short, long, default_value = "")]
    username: String,

    /// AUTH password
    #[arg(short, long, default_value = "")]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Set a time-to-live on a key
    Expire {
        /// The key to expire
        key: String,

        /// TTL in seconds
        seconds: i64,
    },

    /// Ping the server
    Ping,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,respkv=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .host(args.host)
        .port(args.port)
        .username(args.username)
        .password(args.password)
        .build();
    let client = Client::new(config);

    let outcome = match args.command {
        Commands::Get { key } => client.get(&key).map(|value| match value {
            Some(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
            None => println!("(nil)"),
        }),
        Commands::Set { key, value } => client
            .set(&key, value.as_bytes())
            .map(|_| println!("OK")),
        Commands::Del { key } => client.del(&key).map(|_| println!("OK")),
        Commands::Expire { key, seconds } => {
            client.expire(&key, seconds).map(|_| println!("OK"))
        }
        Commands::Ping => client.ready().map(|up| {
            println!("{}", if up { "PONG" } else { "no PONG" });
        }),
    };

    if let Err(e) = outcome {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
