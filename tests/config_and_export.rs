use std::fs;

use crossterm::event::KeyCode;
use relviz::metrics::{export_csv, sweep};
use relviz::tui::{App, Screen};
use relviz::{RelvizError, SimConfig};
use tempfile::TempDir;

#[test]
fn test_config_file_round_trip_into_experiments() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("relviz.toml");
    fs::write(
        &path,
        r#"
        [simultaneity]
        light_speed = 10.0
        rod_speed = 5.0
        half_length = 10.0

        [train_tunnel]
        train_rest = 20.0
        tunnel_rest = 10.0

        [output]
        realtime_csv = "session.csv"
        "#,
    )
    .unwrap();

    let config = SimConfig::from_file(&path).unwrap();
    let experiment = config.simultaneity_experiment().unwrap();
    let hits = experiment.observer_frame_hits();
    assert_eq!(hits.right, 2.0);
    assert!(!hits.is_simultaneous());

    let scene = config.train_tunnel_scene().unwrap();
    assert_eq!(scene.train_rest(), 20.0);
    assert_eq!(config.output.realtime_csv.to_str(), Some("session.csv"));
    assert_eq!(config.output.plot.to_str(), Some("plot.png"));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = SimConfig::from_file(temp_dir.path().join("missing.toml"));
    assert!(matches!(result, Err(RelvizError::Io(_))));
}

#[test]
fn test_load_without_path_uses_defaults() {
    assert_eq!(SimConfig::load(None).unwrap(), SimConfig::default());
}

#[test]
fn test_metrics_csv_export() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("metrics.csv");

    let points = sweep(&SimConfig::default()).unwrap();
    export_csv(&points, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some(
            "slider,velocity_fraction,gamma,proper_time,dilated_time,proper_length,contracted_length,observed_wavelength,color"
        )
    );
    assert_eq!(content.lines().count(), points.len() + 1);

    let first = lines.next().unwrap();
    assert!(first.starts_with("warp,0.0,1.0,10.0,10.0,100.0,100.0,550.0,#92ff00"));
}

#[test]
fn test_explorer_log_keeps_slider_per_row() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("realtime.csv");

    let mut app = App::new(SimConfig::default()).unwrap();
    app.handle_key(KeyCode::Right);
    app.screen = Screen::Twin;
    app.handle_key(KeyCode::Right);
    app.screen = Screen::Theory;
    app.handle_key(KeyCode::Right);
    export_csv(app.log(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = content.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("warp,0.001,"));
    assert!(rows[1].starts_with("twin,0.81,"));
}
