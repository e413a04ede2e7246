//! Configuration management for the PDF analysis server

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a multipart request body, in bytes
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Resolution used when a page is rasterized
    pub dpi: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_upload_bytes: 100 * 1024 * 1024,
            },
            render: RenderConfig {
                dpi: 200,
                jpeg_quality: 75,
            },
        }
    }
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// Unset or invalid variables fall back to their default individually.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port),
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.server.max_upload_bytes),
            },
            render: RenderConfig {
                dpi: parse_var("RENDER_DPI", defaults.render.dpi),
                jpeg_quality: parse_var("JPEG_QUALITY", defaults.render.jpeg_quality).clamp(1, 100),
            },
        }
    }
}

/// Read an env var, falling back to `default` when unset or unparsable
fn parse_var<T: FromStr + Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: '{}', using default {}", name, value, default);
            default
        }),
        Err(_) => default,
    }
}
