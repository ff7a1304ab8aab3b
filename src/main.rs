use bby_stock::adapters::build_http_client;
use bby_stock::core::Notifier;
use bby_stock::utils::{logger, validation::Validate};
use bby_stock::{
    BestBuyClient, CliArgs, DryRunNotifier, SlackNotifier, StockChecker, StockConfig, StockError,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting bby-stock");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = run(&args).await {
        tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(args: &CliArgs) -> Result<(), StockError> {
    let config_path = args.config_path();
    tracing::info!("📁 Loading configuration from: {}", config_path.display());

    let config = StockConfig::from_file(&config_path)?;
    config.validate()?;
    tracing::info!(
        "✅ Configuration loaded: {} tracked item(s)",
        config.items().len()
    );

    let client = build_http_client(config.timeout())?;
    let catalog = BestBuyClient::from_config(client.clone(), &config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the webhook will not be called");
        check(catalog, DryRunNotifier, args, &config).await
    } else {
        let notifier = SlackNotifier::new(client, config.webhook_url());
        check(catalog, notifier, args, &config).await
    }
}

async fn check<N: Notifier>(
    catalog: BestBuyClient,
    notifier: N,
    args: &CliArgs,
    config: &StockConfig,
) -> Result<(), StockError> {
    let checker = StockChecker::new(catalog, notifier, args.run_options());
    let summary = checker.run(&config.postal_code, config.items()).await?;

    tracing::info!(
        "✅ Checked {} item(s): {} actionable, {} failed, notification {}",
        summary.items_checked,
        summary.actionable,
        summary.failed,
        if summary.notified { "sent" } else { "skipped" }
    );

    Ok(())
}
