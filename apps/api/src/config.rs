use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Multiplier applied to every simulated service delay. 0 disables latency.
    pub latency_scale: f64,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            latency_scale: parse_latency_scale(
                &std::env::var("LATENCY_SCALE").unwrap_or_else(|_| "1.0".to_string()),
            )?,
            seed_demo_data: parse_bool(
                "SEED_DEMO_DATA",
                &std::env::var("SEED_DEMO_DATA").unwrap_or_else(|_| "true".to_string()),
            )?,
        })
    }
}

fn parse_latency_scale(raw: &str) -> Result<f64> {
    let scale = raw
        .trim()
        .parse::<f64>()
        .context("LATENCY_SCALE must be a number")?;
    if !scale.is_finite() || scale < 0.0 {
        anyhow::bail!("LATENCY_SCALE must be a non-negative number, got {raw}");
    }
    Ok(scale)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean, got '{other}'"),
    }
}
