//! Heatmap point field generation with CSV export.

use log::info;
use ved_api::aggregator::Aggregator;
use ved_api::credentials::Credentials;
use ved_data::heatmap::{self, HeatmapPoint};
use ved_data::level;

/// Generate the heatmap field for the current (or overridden) PM2.5
/// concentration and print or export it.
pub async fn run_heatmap(pm25: Option<f64>, csv_path: Option<&str>) -> anyhow::Result<()> {
    let pm25 = match pm25 {
        Some(value) => value,
        None => {
            let aggregator = Aggregator::new(Credentials::from_env());
            aggregator.load_city_data().await;
            heatmap::current_pm25(aggregator.air_quality().as_ref())
        }
    };

    let points = heatmap::build_heatmap(pm25, &mut rand::thread_rng());
    let quality = level::classify(pm25);
    info!(
        "generated {} heatmap points for PM2.5 {:.1} µg/m³ ({})",
        points.len(),
        pm25,
        quality.label
    );

    match csv_path {
        Some(path) => {
            write_heatmap_csv(path, &points)?;
            info!("heatmap written to {path}");
        }
        None => {
            for point in &points {
                println!(
                    "{:.5},{:.5}  value={:>6.1}  intensity={:.3}",
                    point.lat,
                    point.lng,
                    point.value,
                    level::normalize_intensity(point.value)
                );
            }
        }
    }

    Ok(())
}

fn write_heatmap_csv(path: &str, points: &[HeatmapPoint]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["lat", "lng", "value", "intensity"])?;
    for point in points {
        writer.write_record([
            format!("{:.5}", point.lat),
            format!("{:.5}", point.lng),
            format!("{:.1}", point.value),
            format!("{:.3}", level::normalize_intensity(point.value)),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
