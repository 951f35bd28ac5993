// File: src/main.rs
use std::io;

use anyhow::Context;
use hwrand::cli;
use hwrand::config::Config;
use hwrand::logging::{init_logger, parse_level, LOG_ENV};
use hwrand::Generator;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load hwrand.toml")?;

    let level = std::env::var(LOG_ENV).unwrap_or_else(|_| config.log_level.clone());
    init_logger(parse_level(&level))?;

    let generator = Generator::new();
    log::info!(
        "detected RDRAND={} RDSEED={}",
        generator.support().rdrand_available,
        generator.support().rdseed_available
    );

    cli::run(&generator, &config, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
