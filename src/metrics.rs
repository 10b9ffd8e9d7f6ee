use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;
use serde::Serialize;

use crate::config::SimConfig;
use crate::error::KinematicsError;
use crate::relativity::{Velocity, length_contraction, observed_wavelength, time_dilation, wavelength_to_rgb};

/// γ is clipped to this when plotting so the curve stays readable near c.
pub const GAMMA_PLOT_CAP: f64 = 10.0;

/// Which velocity slider a snapshot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slider {
    Warp,
    Doppler,
    TrainTunnel,
    Twin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub slider: Slider,
    pub velocity_fraction: f64,
    pub gamma: f64,
    pub proper_time: f64,
    pub dilated_time: f64,
    pub proper_length: f64,
    pub contracted_length: f64,
    pub observed_wavelength: f64,
    pub color: String,
}

/// Warp-screen quantities at `velocity_fraction`, tagged with the slider that set it.
pub fn snapshot(slider: Slider, velocity_fraction: f64, config: &SimConfig) -> Result<DataPoint, KinematicsError> {
    let v = Velocity::new(velocity_fraction)?;
    let proper_time = config.warp.proper_time;
    let proper_length = config.warp.proper_length;
    let observed = observed_wavelength(config.doppler.rest_wavelength, velocity_fraction)?;

    Ok(DataPoint {
        slider,
        velocity_fraction,
        gamma: v.gamma(),
        proper_time,
        dilated_time: time_dilation(proper_time, velocity_fraction)?,
        proper_length,
        contracted_length: length_contraction(proper_length, velocity_fraction)?,
        observed_wavelength: observed,
        color: wavelength_to_rgb(observed).to_hex(),
    })
}

/// Samples v = 0.00, 0.01, ... up to the warp slider ceiling.
pub fn sweep(config: &SimConfig) -> Result<Vec<DataPoint>, KinematicsError> {
    let max = config.warp.max_velocity;
    (0..100)
        .map(|i| i as f64 / 100.0)
        .take_while(|v| *v <= max)
        .map(|v| snapshot(Slider::Warp, v, config))
        .collect()
}

pub fn export_csv(log: &[DataPoint], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for dp in log {
        writer.serialize(dp)?;
    }
    writer.flush()?;
    tracing::info!(rows = log.len(), path = %path.display(), "exported metrics");
    Ok(())
}

/// Plots the warp-slider rows of `log`; rows from other sliders are ignored.
/// Returns whether a chart was written.
pub fn plot_results(log: &[DataPoint], path: &Path) -> Result<bool> {
    let mut log: Vec<DataPoint> = log.iter().filter(|dp| dp.slider == Slider::Warp).cloned().collect();
    if log.is_empty() {
        tracing::warn!("no warp data points recorded, skipping plot");
        return Ok(false);
    }

    log.sort_by(|a, b| a.velocity_fraction.total_cmp(&b.velocity_fraction));

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = log.iter().map(|d| d.velocity_fraction).fold(0.0, f64::min);
    let y_max = log
        .iter()
        .map(|d| d.dilated_time.max(d.proper_length).max(d.gamma.min(GAMMA_PLOT_CAP)))
        .fold(1.0, f64::max)
        .ceil();

    let mut chart = ChartBuilder::on(&root)
        .caption("Relativity Effects", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..1f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Velocity (fraction of c)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            log.iter().map(|d| (d.velocity_fraction, d.dilated_time)),
            &BLUE,
        ))?
        .label("Time Dilation")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(
            log.iter().map(|d| (d.velocity_fraction, d.contracted_length)),
            &RED,
        ))?
        .label("Length Contraction")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &RED));

    chart
        .draw_series(LineSeries::new(
            log.iter().map(|d| (d.velocity_fraction, d.gamma.min(GAMMA_PLOT_CAP))),
            &GREEN,
        ))?
        .label("Lorentz Factor γ")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &GREEN));

    chart.configure_series_labels().border_style(&BLACK).draw()?;
    root.present()?;

    tracing::info!(path = %path.display(), "saved plot");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_snapshot_values() {
        let dp = snapshot(Slider::Warp, 0.6, &SimConfig::default()).unwrap();
        assert_relative_eq!(dp.gamma, 1.25, epsilon = 1e-12);
        assert_relative_eq!(dp.dilated_time, 12.5, epsilon = 1e-9);
        assert_relative_eq!(dp.contracted_length, 80.0, epsilon = 1e-9);
        assert!(dp.observed_wavelength < 550.0);
        assert!(dp.color.starts_with('#'));
    }

    #[test]
    fn test_snapshot_rejects_light_speed() {
        assert!(snapshot(Slider::Doppler, 1.0, &SimConfig::default()).is_err());
    }

    #[test]
    fn test_sweep_respects_ceiling() {
        let mut config = SimConfig::default();
        assert_eq!(sweep(&config).unwrap().len(), 100);

        config.warp.max_velocity = 0.5;
        let points = sweep(&config).unwrap();
        assert_eq!(points.len(), 51);
        assert_eq!(points.last().unwrap().velocity_fraction, 0.5);
        assert!(points.iter().all(|dp| dp.slider == Slider::Warp));
    }

    #[test]
    fn test_plot_skips_logs_without_warp_rows() {
        let config = SimConfig::default();
        let log = vec![
            snapshot(Slider::Twin, 0.8, &config).unwrap(),
            snapshot(Slider::Doppler, -0.5, &config).unwrap(),
        ];
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plot.png");
        assert!(!plot_results(&log, &path).unwrap());
        assert!(!path.exists());
    }
}
