use clap::Parser;
use site_render::domain::ports::ConfigProvider;
use site_render::utils::error::{ErrorSeverity, SiteError};
use site_render::utils::logger::{self, LogFormat};
use site_render::utils::validation::Validate;
use site_render::{CliConfig, LocalStorage, SiteEngine, TomlConfig};
use std::fmt::Debug;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let exit_code = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                init_logger(cli.verbose || config.verbose(), cli.json_logs || config.json_logs());
                tracing::info!("📋 Loaded configuration from {}", path);
                execute(config, cli.verbose, cli.dry_run).await
            }
            Err(e) => {
                logger::init_logger(cli.verbose, LogFormat::Compact);
                report(&e)
            }
        },
        None => {
            init_logger(cli.verbose, cli.json_logs);
            let (verbose, dry_run) = (cli.verbose, cli.dry_run);
            execute(cli, verbose, dry_run).await
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

fn init_logger(verbose: bool, json: bool) {
    logger::init_logger(verbose, LogFormat::from_json_flag(json));
}

async fn execute<C>(config: C, verbose: bool, dry_run: bool) -> i32
where
    C: ConfigProvider + Validate + Debug,
{
    tracing::info!("Starting site-render");
    if verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return report(&e);
    }

    if dry_run {
        print_plan(&config);
        return 0;
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = match SiteEngine::new(storage, config) {
        Ok(engine) => engine,
        Err(e) => return report(&e),
    };

    match engine.run().await {
        Ok(written) => {
            tracing::info!("✅ Site render completed successfully!");
            println!("✅ Rendered {} page(s)", written.len());
            for path in written {
                println!("📁 {}", path);
            }
            0
        }
        Err(e) => report(&e),
    }
}

fn print_plan<C: ConfigProvider>(config: &C) {
    println!("🔍 Dry run, nothing will be fetched or written");
    match config.source() {
        Ok(source) => println!("  source:  {:?}", source),
        Err(e) => println!("  source:  {}", e),
    }
    println!("  output:  {}", config.output_path());
    println!("  pages:   {}", config.pages().join(", "));
    if let Some(category) = config.team_category() {
        println!("  team:    {}", category);
    }
    for (field, value) in config.resources().all() {
        println!("  {:<32} {}", field, value);
    }
}

/// Logs the failure and maps its severity to an exit code.
fn report(e: &SiteError) -> i32 {
    tracing::error!(
        "❌ Site render failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
