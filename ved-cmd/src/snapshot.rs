//! Joint snapshot load: air quality, weather and traffic.

use log::info;
use ved_api::aggregator::Aggregator;
use ved_api::credentials::Credentials;
use ved_data::gauge;
use ved_utils::bounds;

/// Load the three city snapshots concurrently and print them.
///
/// Feeds without credentials serve simulated data; a failed live fetch
/// leaves its section reported as unavailable rather than aborting the
/// command.
pub async fn run_snapshot(json: bool) -> anyhow::Result<()> {
    let aggregator = Aggregator::new(Credentials::from_env());
    aggregator.load_city_data().await;

    if json {
        let payload = serde_json::json!({
            "airQuality": aggregator.air_quality().map(|s| gauge::with_gauge_max(&s)),
            "weather": aggregator.weather(),
            "traffic": aggregator.traffic(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match aggregator.air_quality() {
        Some(summary) => {
            let summary = gauge::with_gauge_max(&summary);
            println!("Air quality  AQI {} ({})", summary.aqi, summary.category);
            println!("  updated {}", summary.last_updated);
            for pollutant in &summary.pollutants {
                println!(
                    "  {:<6} {:>6.1} {}  [{:>5.1}%]",
                    pollutant.name,
                    pollutant.value,
                    pollutant.unit,
                    gauge::pollutant_percentage(pollutant)
                );
            }
        }
        None => println!("Air quality  no data"),
    }

    match aggregator.weather() {
        Some(weather) => {
            println!("Weather      {:.1} °C, humidity {:.0}%", weather.temperature, weather.humidity);
            println!(
                "  rain {:.1} mm/h, probability {:.0}%, 24h estimate {:.1} mm",
                weather.rain, weather.rain_probability, weather.rain24h
            );
        }
        None => println!("Weather      no data"),
    }

    match aggregator.traffic() {
        Some(traffic) => {
            println!(
                "Traffic      {:.0}% ({})",
                bounds::clamp_percentage(traffic.overall_congestion),
                traffic.category
            );
            for street in &traffic.streets {
                println!(
                    "  {:<16} {:>3.0}%",
                    street.name,
                    bounds::clamp_percentage(street.congestion)
                );
            }
        }
        None => println!("Traffic      no data"),
    }

    info!("snapshot load complete");
    Ok(())
}
