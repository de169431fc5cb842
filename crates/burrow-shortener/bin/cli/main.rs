mod cli;

use crate::cli::{LogFormatArg, CLI};
use anyhow::Context;
use burrow_bloom::{BloomFilter, BloomFilterConfig};
use burrow_core::InMemoryStore;
use burrow_shortener::{ShortenerService, StrategyKind, StrategyOptions};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        strategy = %config.strategy,
        hash_method = %config.hash_method,
        max_retries = config.max_retries,
        expected_codes = config.expected_codes,
        false_positive_rate = config.false_positive_rate,
        "starting burrow"
    );

    let filter = BloomFilter::new(
        BloomFilterConfig::builder()
            .expected_items(config.expected_codes)
            .false_positive_rate(config.false_positive_rate)
            .build(),
    )
    .context("failed to size the existence filter")?;
    info!(
        bits = filter.bit_count(),
        hashes = filter.hash_count(),
        "existence filter ready"
    );

    let options = StrategyOptions::builder()
        .hash_method(config.hash_method.into())
        .max_retries(config.max_retries)
        .build();
    let service = ShortenerService::with_kind(
        InMemoryStore::new(),
        filter,
        config.strategy.into(),
        options,
    )?;

    run_pass(&service, &config.urls).await?;

    if let Some(next) = config.then {
        service.set_strategy_kind(next.into(), options);
        run_pass(&service, &config.urls).await?;
    }

    Ok(())
}

async fn run_pass(service: &ShortenerService<InMemoryStore>, urls: &[String]) -> anyhow::Result<()> {
    let kind: StrategyKind = service.strategy_kind();
    for url in urls {
        let code = service
            .shorten(url)
            .await
            .with_context(|| format!("failed to shorten {url}"))?;
        let resolved = service.resolve(code.as_str()).await?;
        println!("{kind}\t{code}\t{resolved}");
    }
    Ok(())
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}
