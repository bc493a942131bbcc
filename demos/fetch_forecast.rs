//! Fetch the same forecast twice; the second call is answered from cache.
//!
//! Run with `RUST_LOG=netcache=debug cargo run --example fetch_forecast`.
use netcache::config::Configurable;
use netcache::prelude::{Endpoint, FetchPipeline, Reachability};
use netcache::{Parameters, tracing};
use serde::Deserialize;
use std::path;
use std::time::{Duration, Instant};

const FORECAST_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/forecast.yml");

#[derive(Debug, Deserialize)]
struct Forecast {
    latitude: f64,
    longitude: f64,
    #[serde(rename = "current_weather")]
    current: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    #[serde(rename = "windspeed")]
    wind_speed: f64,
    time: String,
}

struct ForecastEndpoint {
    latitude: f64,
    longitude: f64,
}

impl Endpoint for ForecastEndpoint {
    fn base_url(&self) -> &str {
        "https://api.open-meteo.com"
    }

    fn path(&self) -> &str {
        "/v1/forecast"
    }

    fn parameters(&self) -> Option<Parameters> {
        Some(vec![
            ("latitude".into(), self.latitude.to_string()),
            ("longitude".into(), self.longitude.to_string()),
            ("current_weather".into(), "true".into()),
        ])
    }
}

struct Context {
    config: serde_yaml::Value,
}

impl Configurable for Context {
    fn config(&self) -> &serde_yaml::Value {
        &self.config
    }
}

impl Context {
    fn from_config(config_file_path: impl AsRef<path::Path>) -> anyhow::Result<Self> {
        Ok(Self {
            config: Self::load_config(config_file_path)?,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ctx = Context::from_config(FORECAST_CONFIG)?;
    let config = ctx.network_config()?;

    let mut reachability = Reachability::from_params(&config.reachability);
    let first_probe = tokio::time::timeout(Duration::from_secs(5), reachability.changed());
    if !matches!(first_probe.await, Ok(Some(true))) {
        anyhow::bail!("network looks unreachable");
    }

    let pipeline = FetchPipeline::new(&config)?.with_reachability(reachability);
    let oslo = ForecastEndpoint {
        latitude: 59.91,
        longitude: 10.75,
    };

    for attempt in 1..=2 {
        let started = Instant::now();
        let forecast: Forecast = pipeline.fetch_endpoint(&oslo).await?;
        tracing::info!(
            attempt,
            elapsed = ?started.elapsed(),
            latitude = forecast.latitude,
            longitude = forecast.longitude,
            temperature = forecast.current.temperature,
            wind_speed = forecast.current.wind_speed,
            observed_at = %forecast.current.time,
            "Current weather"
        );
    }

    Ok(())
}
