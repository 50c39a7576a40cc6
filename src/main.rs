mod client;
mod constants;
mod design;
mod gemini;
mod print_help;
mod server;
mod session;

use crate::client::run_client;
use crate::constants::CMD_SERVE;
use crate::print_help::print_help;
use crate::server::run_server;
use std::{env, error::Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|arg| arg == "-help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    if args[1] == CMD_SERVE {
        return run_server().await;
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(120))
        .build()?;

    run_client(&client, &args[1..]).await
}
