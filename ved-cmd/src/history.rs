//! Pollution history query with chart-series printing and CSV export.

use log::info;
use ved_api::aggregator::Aggregator;
use ved_api::credentials::Credentials;
use ved_api::history::PollutionHistory;
use ved_data::{daily, hourly};

/// Load the trailing-day history and print the selected breakdown.
///
/// The load never fails: when no station or measurements are available the
/// aggregator serves simulated history instead.
pub async fn run_history(days: u32, show_hourly: bool, csv_path: Option<&str>) -> anyhow::Result<()> {
    let aggregator = Aggregator::new(Credentials::from_env());
    aggregator.load_pollution_history(days).await;
    let history = aggregator.pollution_history();

    info!("{} history points covering {} days", history.len(), days);

    if let Some(path) = csv_path {
        write_history_csv(path, &history)?;
        info!("history written to {path}");
    }

    if show_hourly {
        for sample in hourly::hourly_breakdown(&history) {
            println!(
                "{}  pm25={:>5.1}  pm10={:>5.1}  no2={:>5.1}  combined={:>5.1}",
                sample.label, sample.pm25, sample.pm10, sample.no2, sample.combined()
            );
        }
    } else {
        for sample in daily::daily_breakdown(&history, days as usize) {
            println!(
                "{}  pm25={:>5.1}  pm10={:>5.1}  no2={:>5.1}  combined={:>5.1}",
                sample.label, sample.pm25, sample.pm10, sample.no2, sample.combined()
            );
        }
    }

    Ok(())
}

fn write_history_csv(path: &str, history: &[PollutionHistory]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "pm25", "pm10", "no2", "o3"])?;
    for point in history {
        writer.write_record([
            point.date.clone(),
            format!("{:.1}", point.pm25),
            format!("{:.1}", point.pm10),
            format!("{:.1}", point.no2),
            point.o3.map(|v| format!("{v:.1}")).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
