//! tokenwire CLI Client
//!
//! `tokenwire <address> <port> <command> <args...>`
//!
//! Prints the SAS, GAS or status byte on stdout; diagnostics go to stderr.

use clap::{Parser, Subcommand};
use tokenwire::{Client, Config, Request};
use tracing_subscriber::{fmt, EnvFilter};

/// tokenwire CLI
#[derive(Parser, Debug)]
#[command(name = "tokenwire")]
#[command(about = "Client for the UDP token authentication protocol")]
#[command(version)]
struct Args {
    /// Server hostname, IPv4 or IPv6 address
    address: String,

    /// Server UDP port
    port: u16,

    /// Per-attempt receive timeout in milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    /// Total send attempts before giving up
    #[arg(long, default_value = "3")]
    attempts: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Request an individual token (prints the SAS)
    Itr {
        /// Identifier, at most 12 ASCII bytes
        #[arg(allow_hyphen_values = true)]
        id: String,

        /// Unsigned 32-bit nonce
        #[arg(allow_hyphen_values = true)]
        nonce: String,
    },

    /// Validate an individual token (prints the status, 0 = valid)
    Itv {
        /// Signed access string: id:nonce:token
        #[arg(allow_hyphen_values = true)]
        sas: String,
    },

    /// Request a group token over N SAS (prints the GAS)
    Gtr {
        /// Number of SAS that follow
        n: String,

        /// The N signed access strings
        #[arg(required = true, allow_hyphen_values = true)]
        sas: Vec<String>,
    },

    /// Validate a group token (prints the status, 0 = valid)
    Gtv {
        /// Group access string: sas1+...+sasN+token
        #[arg(allow_hyphen_values = true)]
        gas: String,
    },
}

impl Commands {
    fn to_request(&self) -> tokenwire::Result<Request> {
        match self {
            Commands::Itr { id, nonce } => Request::individual_token(id, nonce),
            Commands::Itv { sas } => Request::individual_validation(sas),
            Commands::Gtr { n, sas } => Request::group_token(n, sas.as_slice()),
            Commands::Gtv { gas } => Request::group_validation(gas),
        }
    }
}

fn main() {
    // Logs go to stderr so stdout only carries the result
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let request = match args.command.to_request() {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let config = Config::builder()
        .server_host(&args.address)
        .server_port(args.port)
        .recv_timeout_ms(args.timeout_ms)
        .max_attempts(args.attempts)
        .build();

    tracing::debug!("tokenwire v{} -> {}:{}", tokenwire::VERSION, args.address, args.port);

    match Client::new(config).execute(&request) {
        Ok(reply) => println!("{}", reply),
        Err(e) => {
            tracing::error!("{:?} failed: {}", request.code(), e);
            std::process::exit(1);
        }
    }
}
