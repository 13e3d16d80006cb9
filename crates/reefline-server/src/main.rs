mod cli;
mod config;

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reefline_adapters::notify::LogNotifier;
use reefline_adapters::persistence::sqlite::SqliteDb;
use reefline_app::alert_service::AlertService;
use reefline_app::threshold_service::ThresholdService;
use reefline_core::context::RequestContext;
use reefline_core::ids::AquariumId;
use reefline_core::notification::{batch_alerts, NotificationMethod};
use reefline_core::water_test::WaterTest;
use reefline_ports::outbound::Notifier;
use reefline_ports::types::AlertFilter;

use crate::cli::{Command, USAGE};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reefline=info,reefline_app=info,reefline_adapters=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    let config = Config::from_env()?;

    let db = SqliteDb::new(&config.database_url)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;
    tracing::info!(database_url = %config.database_url, "database ready");

    let ctx = RequestContext::new(config.user_id.clone());
    let now = Utc::now();

    match command {
        Command::Evaluate {
            path,
            aquarium_name,
        } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let test: WaterTest = serde_json::from_str(&raw)
                .with_context(|| format!("parsing water test {}", path.display()))?;

            let notifiers: Vec<Box<dyn Notifier>> = NotificationMethod::ALL
                .into_iter()
                .map(|method| Box::new(LogNotifier::new(method)) as Box<dyn Notifier>)
                .collect();
            let service = AlertService::new(db.clone(), db.clone(), db.clone(), notifiers);

            let report = service
                .evaluate(&ctx, &test, aquarium_name.as_deref(), now)
                .await?;
            let output = serde_json::json!({
                "test_id": test.id().to_string(),
                "summary": report.summary,
                "alerts": batch_alerts(&report.alerts),
                "notifications_sent": report.notifications_sent,
                "notifications_failed": report.notifications_failed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Seed { aquarium_id } => {
            let aquarium_id = AquariumId::parse(&aquarium_id)?;
            let service = ThresholdService::new(db.clone(), db.clone());
            let created = service
                .seed_defaults(&aquarium_id, &config.notify_methods)
                .await?;
            for threshold in &created {
                println!("{}\t{}", threshold.id(), threshold.parameter_name());
            }
        }
        Command::Alerts { aquarium_id } => {
            let filter = AlertFilter {
                aquarium_id: Some(AquariumId::parse(&aquarium_id)?),
                ..Default::default()
            };
            let service = AlertService::new(db.clone(), db.clone(), db.clone(), vec![]);
            for alert in service.list_alerts(&filter).await? {
                println!(
                    "{}\t{}\t{}",
                    alert.triggered_at().to_rfc3339(),
                    alert.severity().as_str(),
                    alert.title()
                );
            }
        }
        Command::Snooze {
            threshold_id,
            until,
        } => {
            let service = ThresholdService::new(db.clone(), db.clone());
            let threshold = service.snooze(&threshold_id, until, now).await?;
            println!(
                "{} snoozed until {}",
                threshold.parameter_name(),
                until.to_rfc3339()
            );
        }
        Command::Unsnooze { threshold_id } => {
            let service = ThresholdService::new(db.clone(), db.clone());
            let threshold = service.unsnooze(&threshold_id, now).await?;
            println!("{} notifications resumed", threshold.parameter_name());
        }
    }

    Ok(())
}
