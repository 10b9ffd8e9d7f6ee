//! Simulation constants, loadable from a TOML file.
//!
//! Every section and field is optional; missing values fall back to the
//! constants the experiments were designed around.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RelvizError, Result};
use crate::relativity::{doppler, simultaneity, train_tunnel, twin};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub warp: WarpConfig,
    pub doppler: DopplerConfig,
    pub simultaneity: SimultaneityConfig,
    pub train_tunnel: TrainTunnelConfig,
    pub twin: TwinConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarpConfig {
    /// Years on the ship's clock.
    pub proper_time: f64,
    /// Ship length in metres, at rest.
    pub proper_length: f64,
    /// Slider ceiling as a fraction of c.
    pub max_velocity: f64,
    pub step: f64,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            proper_time: 10.0,
            proper_length: 100.0,
            max_velocity: 0.995,
            step: 0.001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DopplerConfig {
    pub rest_wavelength: f64,
    /// The slider runs from -max_velocity (receding) to +max_velocity.
    pub max_velocity: f64,
    pub step: f64,
}

impl Default for DopplerConfig {
    fn default() -> Self {
        Self {
            rest_wavelength: doppler::REST_WAVELENGTH_NM,
            max_velocity: 0.9,
            step: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimultaneityConfig {
    pub light_speed: f64,
    pub rod_speed: f64,
    pub half_length: f64,
    pub duration: f64,
}

impl Default for SimultaneityConfig {
    fn default() -> Self {
        Self {
            light_speed: simultaneity::SIM_LIGHT_SPEED,
            rod_speed: simultaneity::SIM_ROD_SPEED,
            half_length: simultaneity::SIM_HALF_LENGTH,
            duration: simultaneity::SIM_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainTunnelConfig {
    pub train_rest: f64,
    pub tunnel_rest: f64,
    /// Starting speed. When unset, the speed at which the train contracts
    /// to exactly the tunnel's length.
    pub velocity: Option<f64>,
    pub max_velocity: f64,
    pub step: f64,
}

impl Default for TrainTunnelConfig {
    fn default() -> Self {
        Self {
            train_rest: train_tunnel::REST_TRAIN_LENGTH,
            tunnel_rest: train_tunnel::REST_TUNNEL_LENGTH,
            velocity: None,
            max_velocity: 0.95,
            step: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwinConfig {
    /// Light-years to the turnaround star.
    pub distance: f64,
    pub velocity: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub step: f64,
    pub departure_age: f64,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            distance: twin::DEFAULT_DISTANCE_LY,
            velocity: twin::DEFAULT_VELOCITY,
            min_velocity: 0.1,
            max_velocity: 0.99,
            step: 0.01,
            departure_age: twin::DEPARTURE_AGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub metrics_csv: PathBuf,
    pub realtime_csv: PathBuf,
    pub plot: PathBuf,
    pub log_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            metrics_csv: PathBuf::from("metrics.csv"),
            realtime_csv: PathBuf::from("realtime.csv"),
            plot: PathBuf::from("plot.png"),
            log_file: PathBuf::from("relviz.log"),
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> RelvizError {
    RelvizError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

fn require_slider_limit(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must lie in (0, 1), got {value}")))
    }
}

impl SimConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("warp.proper_time", self.warp.proper_time)?;
        require_positive("warp.proper_length", self.warp.proper_length)?;
        require_slider_limit("warp.max_velocity", self.warp.max_velocity)?;
        require_slider_limit("warp.step", self.warp.step)?;

        require_positive("doppler.rest_wavelength", self.doppler.rest_wavelength)?;
        require_slider_limit("doppler.max_velocity", self.doppler.max_velocity)?;
        require_slider_limit("doppler.step", self.doppler.step)?;

        let sim = &self.simultaneity;
        require_positive("simultaneity.light_speed", sim.light_speed)?;
        require_positive("simultaneity.half_length", sim.half_length)?;
        require_positive("simultaneity.duration", sim.duration)?;
        if !sim.rod_speed.is_finite() || sim.rod_speed.abs() >= sim.light_speed {
            return Err(invalid(
                "simultaneity.rod_speed",
                format!("must be slower than light_speed ({}), got {}", sim.light_speed, sim.rod_speed),
            ));
        }

        require_positive("train_tunnel.train_rest", self.train_tunnel.train_rest)?;
        require_positive("train_tunnel.tunnel_rest", self.train_tunnel.tunnel_rest)?;
        if let Some(velocity) = self.train_tunnel.velocity {
            require_slider_limit("train_tunnel.velocity", velocity)?;
        }
        require_slider_limit("train_tunnel.max_velocity", self.train_tunnel.max_velocity)?;
        require_slider_limit("train_tunnel.step", self.train_tunnel.step)?;

        let trip = &self.twin;
        require_positive("twin.distance", trip.distance)?;
        require_slider_limit("twin.velocity", trip.velocity)?;
        require_slider_limit("twin.min_velocity", trip.min_velocity)?;
        require_slider_limit("twin.max_velocity", trip.max_velocity)?;
        require_slider_limit("twin.step", trip.step)?;
        if trip.min_velocity > trip.max_velocity {
            return Err(invalid(
                "twin.min_velocity",
                format!("must not exceed max_velocity ({}), got {}", trip.max_velocity, trip.min_velocity),
            ));
        }
        if !self.twin.departure_age.is_finite() || self.twin.departure_age < 0.0 {
            return Err(invalid("twin.departure_age", "must be a non-negative number"));
        }

        Ok(())
    }

    pub fn simultaneity_experiment(&self) -> Result<simultaneity::SimultaneityExperiment> {
        let sim = &self.simultaneity;
        Ok(simultaneity::SimultaneityExperiment::new(
            sim.half_length,
            sim.light_speed,
            sim.rod_speed,
        )?)
    }

    pub fn train_tunnel_scene(&self) -> Result<train_tunnel::TrainTunnel> {
        Ok(train_tunnel::TrainTunnel::new(
            self.train_tunnel.train_rest,
            self.train_tunnel.tunnel_rest,
        )?)
    }

    /// Starting train speed: the configured one, or the speed at which the
    /// train exactly fills the tunnel.
    pub fn train_tunnel_velocity(&self) -> Result<f64> {
        match self.train_tunnel.velocity {
            Some(velocity) => Ok(velocity),
            None => Ok(self.train_tunnel_scene()?.matching_velocity()?.beta()),
        }
    }

    pub fn twin_trip(&self, velocity: f64) -> Result<twin::TwinTrip> {
        Ok(twin::TwinTrip::new(self.twin.distance, velocity)?.with_departure_age(self.twin.departure_age)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simultaneity.light_speed, 5.0);
        assert_eq!(config.doppler.rest_wavelength, 550.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            [doppler]
            rest_wavelength = 600.0

            [twin]
            distance = 4.2
            "#,
        )
        .unwrap();
        assert_eq!(config.doppler.rest_wavelength, 600.0);
        assert_eq!(config.doppler.max_velocity, 0.9);
        assert_eq!(config.twin.distance, 4.2);
        assert_eq!(config.warp, WarpConfig::default());
    }

    #[test]
    fn test_rejects_superluminal_rod() {
        let err = SimConfig::from_toml_str(
            r#"
            [simultaneity]
            light_speed = 5.0
            rod_speed = 6.0
            "#,
        )
        .unwrap_err();
        match err {
            RelvizError::InvalidConfig { field, .. } => assert_eq!(field, "simultaneity.rod_speed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_slider_at_light_speed() {
        let err = SimConfig::from_toml_str("[warp]\nmax_velocity = 1.0\n").unwrap_err();
        assert!(err.to_string().contains("warp.max_velocity"));
    }

    #[test]
    fn test_train_velocity_defaults_to_matching_speed() {
        let config = SimConfig::default();
        let v = config.train_tunnel_velocity().unwrap();
        assert!((v - 0.75f64.sqrt()).abs() < 1e-12);

        let config = SimConfig::from_toml_str("[train_tunnel]\nvelocity = 0.5\n").unwrap();
        assert_eq!(config.train_tunnel_velocity().unwrap(), 0.5);
    }

    #[test]
    fn test_short_train_without_velocity_is_rejected() {
        let config = SimConfig::from_toml_str("[train_tunnel]\ntrain_rest = 4.0\n").unwrap();
        assert!(matches!(config.train_tunnel_velocity(), Err(RelvizError::Kinematics(_))));
    }

    #[test]
    fn test_rejects_inverted_twin_range() {
        let err = SimConfig::from_toml_str("[twin]\nmin_velocity = 0.9\nmax_velocity = 0.5\n").unwrap_err();
        assert!(err.to_string().contains("twin.min_velocity"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            SimConfig::from_toml_str("[warp]\nwarp_factor = 9\n"),
            Err(RelvizError::Toml(_))
        ));
    }
}
