use anyhow::{Context, Result};
use log::info;
use std::env;
use std::io;

use elevator::network::server::Server;
use elevator::request_file::{batch, loader};
use elevator::util::config::{Config, Mode};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (mode, config) = Config::from_args(&args).context("invalid arguments")?;

    match mode {
        Mode::Serve => {
            let server = Server::bind(config.clone())
                .with_context(|| format!("failed to bind {}", config.bind_addr))?;
            server.run()?;
        }
        Mode::Batch => {
            let requests = loader::load(&config.input_path)
                .with_context(|| format!("failed to load {}", config.input_path))?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let summary = batch::run(&config, requests, &mut out)?;
            info!("Batch finished after {} ticks (drained: {})", summary.ticks, summary.drained);
        }
    }
    Ok(())
}
