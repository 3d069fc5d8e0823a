use chrono::Utc;
use clap::Parser;
use forum_stats::utils::{logger, validation, validation::Validate};
use forum_stats::{
    Cli, Command, DiscourseReportSource, FetchConfig, MailConfig, Mailer, SmtpMailTransport,
    StatsEngine, ThrottledClient,
};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch {
            look_back,
            output_dir,
            rate_limit_ms,
            verbose,
        } => {
            logger::init_cli_logger(verbose);
            tracing::info!("Starting forum-stats fetch");

            // 設定只在啟動時讀一次，缺了就在打任何網路請求之前失敗
            let config = match load_fetch_config(look_back) {
                Ok(config) => config,
                Err(e) => abort(e),
            };

            let client = ThrottledClient::new(Duration::from_millis(rate_limit_ms));
            let source = DiscourseReportSource::new(&config, client);
            let engine = StatsEngine::new(source, output_dir);

            match engine.run_fetch(Utc::now(), look_back).await {
                Ok(paths) => {
                    for path in &paths {
                        println!("✅ wrote {}", path.display());
                    }
                }
                Err(e) => abort(e),
            }
        }

        Command::Send { input_dir, verbose } => {
            logger::init_cli_logger(verbose);
            tracing::info!("Starting forum-stats send");

            let config = match MailConfig::from_env().and_then(|config| {
                config.validate()?;
                Ok(config)
            }) {
                Ok(config) => config,
                Err(e) => abort(e),
            };

            let transport = SmtpMailTransport::new(&config);
            let mailer = Mailer::new(transport, config);

            match mailer.send_directory(&input_dir).await {
                Ok(()) => println!("✅ mail sent"),
                Err(e) => abort(e),
            }
        }
    }
}

fn load_fetch_config(look_back: usize) -> forum_stats::Result<FetchConfig> {
    validation::validate_positive_number("look_back", look_back, 1)?;

    let config = FetchConfig::from_env()?;
    config.validate()?;

    Ok(config)
}

fn abort(e: forum_stats::StatsError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e);
    std::process::exit(1);
}
