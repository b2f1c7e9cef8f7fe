use anyhow::Context;
use clap::Parser;
use w3c_group::utils::logger;
use w3c_group::{resolver_from_config, CliConfig, LocalDocumentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting w3c-group CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let resolver_config = config
        .resolver_config()
        .context("invalid resolver configuration")?;
    let resolver = resolver_from_config(&resolver_config)?;

    let store = LocalDocumentStore::new(".");
    let mut document = store
        .read_config(&config.input)
        .with_context(|| format!("failed to read {}", config.input))?;

    // 診斷訊息在產生時已寫入日誌 (stderr)
    let diagnostics = resolver.run(&mut document).await;
    tracing::info!(
        "Group resolution finished with {} warning(s), {} error(s)",
        diagnostics.warnings().count(),
        diagnostics.errors().count()
    );

    match &config.output {
        Some(path) => {
            let written = store
                .write_config(path, &document)
                .with_context(|| format!("failed to write {}", path))?;
            tracing::info!("📁 Resolved configuration saved to: {}", written.display());
        }
        None => println!("{}", document.to_json_pretty()?),
    }

    if config.strict && diagnostics.has_errors() {
        tracing::error!(
            "❌ {} group(s) could not be resolved",
            diagnostics.errors().count()
        );
        std::process::exit(2);
    }

    Ok(())
}
