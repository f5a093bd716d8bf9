//! `zcashctl`: send one wallet command to a zcashd node and print the result.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use clap::Parser;
use zcashctl::{resolve_config, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.logging.level);

    match run(&cli, &config).await {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
