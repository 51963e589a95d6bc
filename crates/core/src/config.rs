use std::env;
use std::str::FromStr;
use crate::error::{AppError, Result};
use dotenvy::dotenv;

/// Default radius of a landmark marker, in world units.
pub const DEFAULT_MARKER_RADIUS: f32 = 0.15;

/// Default height of the mesh dome, in mesh-local units.
pub const DEFAULT_MESH_AMPLITUDE: f32 = 1.0;

#[derive(Clone, Debug)]
pub struct Config {
    /// Empty landmark slots allocated before the session starts.
    pub landmark_slots: usize,
    pub marker_radius: f32,
    pub mesh_amplitude: f32,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            landmark_slots: 0,
            marker_radius: DEFAULT_MARKER_RADIUS,
            mesh_amplitude: DEFAULT_MESH_AMPLITUDE,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let defaults = Self::default();

        let landmark_slots = parse_var("LANDMARK_SLOTS")?.unwrap_or(defaults.landmark_slots);
        let marker_radius = parse_var("LANDMARK_MARKER_RADIUS")?.unwrap_or(defaults.marker_radius);
        let mesh_amplitude =
            parse_var("LANDMARK_MESH_AMPLITUDE")?.unwrap_or(defaults.mesh_amplitude);
        let log_filter = env::var("LANDMARK_LOG").unwrap_or(defaults.log_filter);

        Self::builder()
            .with_landmark_slots(landmark_slots)
            .with_marker_radius(marker_radius)
            .with_mesh_amplitude(mesh_amplitude)
            .with_log_filter(log_filter)
            .build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            config: Self::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value: {raw:?}"))),
        Err(_) => Ok(None),
    }
}

/// Programmatic construction of a [`Config`], validated on [`build`](Self::build).
#[derive(Debug)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn with_landmark_slots(mut self, slots: usize) -> Self {
        self.config.landmark_slots = slots;
        self
    }

    pub fn with_marker_radius(mut self, radius: f32) -> Self {
        self.config.marker_radius = radius;
        self
    }

    pub fn with_mesh_amplitude(mut self, amplitude: f32) -> Self {
        self.config.mesh_amplitude = amplitude;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    pub fn build(self) -> Result<Config> {
        let config = self.config;
        if !config.marker_radius.is_finite() || config.marker_radius <= 0.0 {
            return Err(AppError::config(format!(
                "marker radius must be positive, got {}",
                config.marker_radius
            )));
        }
        if !config.mesh_amplitude.is_finite() {
            return Err(AppError::config("mesh amplitude must be finite"));
        }
        Ok(config)
    }
}
