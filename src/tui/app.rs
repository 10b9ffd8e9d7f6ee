use crossterm::event::KeyCode;

use crate::config::SimConfig;
use crate::error::KinematicsError;
use crate::metrics::{self, DataPoint, Slider};
use crate::relativity::simultaneity::{self, SimultaneityExperiment};
use crate::relativity::train_tunnel::{self, ApparentLengths, TrainTunnel};
use crate::relativity::twin::{self, Ages, TwinTrip};
use crate::relativity::{Velocity, observed_wavelength};

/// Trip progress per second of wall time (a full round trip is 2.0).
const TWIN_PROGRESS_RATE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Warp,
    Doppler,
    Simultaneity,
    TrainTunnel,
    Twin,
    Theory,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Warp,
        Screen::Doppler,
        Screen::Simultaneity,
        Screen::TrainTunnel,
        Screen::Twin,
        Screen::Theory,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Warp => "Warp",
            Screen::Doppler => "Doppler",
            Screen::Simultaneity => "Simultaneity",
            Screen::TrainTunnel => "Train-Tunnel",
            Screen::Twin => "Twin Paradox",
            Screen::Theory => "Theory",
        }
    }

    /// The velocity slider shown on this screen, if any.
    pub fn slider(self) -> Option<Slider> {
        match self {
            Screen::Warp => Some(Slider::Warp),
            Screen::Doppler => Some(Slider::Doppler),
            Screen::TrainTunnel => Some(Slider::TrainTunnel),
            Screen::Twin => Some(Slider::Twin),
            Screen::Simultaneity | Screen::Theory => None,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WarpView {
    pub velocity: Velocity,
    pub gamma: f64,
    pub dilated_time: f64,
    pub contracted_length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DopplerView {
    pub velocity: Velocity,
    pub observed_wavelength: f64,
}

/// Everything the explorer shows. Owned by the event loop and passed to
/// the renderer; nothing else holds experiment state.
#[derive(Debug, Clone)]
pub struct App {
    config: SimConfig,
    pub screen: Screen,
    warp_velocity: f64,
    doppler_velocity: f64,
    train_velocity: f64,
    twin_velocity: f64,
    pub simultaneity_frame: simultaneity::Frame,
    pub train_frame: train_tunnel::Frame,
    experiment: SimultaneityExperiment,
    tunnel: TrainTunnel,
    sim_time: f64,
    twin_progress: f64,
    pub playing: bool,
    log: Vec<DataPoint>,
}

impl App {
    pub fn new(config: SimConfig) -> crate::error::Result<Self> {
        let experiment = config.simultaneity_experiment()?;
        let tunnel = config.train_tunnel_scene()?;
        let twin_velocity = config.twin.velocity;
        let train_velocity = config.train_tunnel_velocity()?;
        Ok(Self {
            config,
            screen: Screen::Warp,
            warp_velocity: 0.0,
            doppler_velocity: 0.0,
            train_velocity,
            twin_velocity,
            simultaneity_frame: simultaneity::Frame::Observer,
            train_frame: train_tunnel::Frame::Tunnel,
            experiment,
            tunnel,
            sim_time: 0.0,
            twin_progress: 0.0,
            playing: false,
            log: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn log(&self) -> &[DataPoint] {
        &self.log
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Control {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Tab => self.switch_screen(self.screen.next()),
            KeyCode::BackTab => self.switch_screen(self.screen.previous()),
            KeyCode::Right => self.nudge_velocity(1.0),
            KeyCode::Left => self.nudge_velocity(-1.0),
            KeyCode::Char('f') => self.toggle_frame(),
            KeyCode::Char(' ') => self.toggle_playing(),
            KeyCode::Char('r') => self.reset_animation(),
            _ => {}
        }
        Control::Continue
    }

    /// Advances running animations by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        match self.screen {
            Screen::Simultaneity => {
                let duration = self.config.simultaneity.duration;
                self.sim_time = (self.sim_time + dt).min(duration);
                if self.sim_time >= duration {
                    self.playing = false;
                }
            }
            Screen::Twin => {
                self.twin_progress = (self.twin_progress + dt * TWIN_PROGRESS_RATE).min(twin::ROUND_TRIP);
                if self.twin_progress >= twin::ROUND_TRIP {
                    self.playing = false;
                }
            }
            _ => {}
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.playing = false;
        tracing::debug!(screen = screen.title(), "switched screen");
    }

    /// Slider range for the current screen: (min, max).
    pub fn velocity_range(&self) -> (f64, f64) {
        let config = &self.config;
        match self.screen {
            Screen::Warp | Screen::Simultaneity | Screen::Theory => (0.0, config.warp.max_velocity),
            Screen::Doppler => (-config.doppler.max_velocity, config.doppler.max_velocity),
            Screen::TrainTunnel => (0.0, config.train_tunnel.max_velocity),
            Screen::Twin => (config.twin.min_velocity, config.twin.max_velocity),
        }
    }

    pub fn velocity_step(&self) -> f64 {
        let config = &self.config;
        match self.screen {
            Screen::Warp | Screen::Simultaneity | Screen::Theory => config.warp.step,
            Screen::Doppler => config.doppler.step,
            Screen::TrainTunnel => config.train_tunnel.step,
            Screen::Twin => config.twin.step,
        }
    }

    /// Theory reuses the warp velocity for its worked examples.
    pub fn velocity(&self) -> f64 {
        match self.screen {
            Screen::Warp | Screen::Theory => self.warp_velocity,
            Screen::Simultaneity => self.experiment.rod_speed() / self.experiment.light_speed(),
            Screen::Doppler => self.doppler_velocity,
            Screen::TrainTunnel => self.train_velocity,
            Screen::Twin => self.twin_velocity,
        }
    }

    fn nudge_velocity(&mut self, direction: f64) {
        let Some(slider) = self.screen.slider() else {
            return;
        };
        let (lo, hi) = self.velocity_range();
        // drop float drift from repeated steps
        let raw = ((self.velocity() + direction * self.velocity_step()) * 1e9).round() / 1e9;
        let next = match Velocity::clamped(raw, hi.max(lo.abs())) {
            Ok(v) => v.beta().clamp(lo, hi),
            Err(e) => {
                tracing::warn!("slider limit rejected: {e}");
                return;
            }
        };
        match slider {
            Slider::Warp => self.warp_velocity = next,
            Slider::Doppler => self.doppler_velocity = next,
            Slider::TrainTunnel => self.train_velocity = next,
            Slider::Twin => {
                self.twin_velocity = next;
                self.twin_progress = 0.0;
                self.playing = false;
            }
        }
        self.record(slider, next);
    }

    fn record(&mut self, slider: Slider, velocity_fraction: f64) {
        match metrics::snapshot(slider, velocity_fraction, &self.config) {
            Ok(dp) => {
                tracing::debug!(slider = ?slider, v = dp.velocity_fraction, gamma = dp.gamma, "slider change");
                self.log.push(dp);
            }
            Err(e) => tracing::warn!("skipping snapshot: {e}"),
        }
    }

    fn toggle_frame(&mut self) {
        match self.screen {
            Screen::Simultaneity => {
                self.simultaneity_frame = self.simultaneity_frame.toggled();
                self.reset_animation();
            }
            Screen::TrainTunnel => self.train_frame = self.train_frame.toggled(),
            _ => {}
        }
    }

    fn toggle_playing(&mut self) {
        match self.screen {
            Screen::Simultaneity if self.sim_time >= self.config.simultaneity.duration => {
                self.sim_time = 0.0;
                self.playing = true;
            }
            Screen::Twin if self.twin_progress >= twin::ROUND_TRIP => {
                self.twin_progress = 0.0;
                self.playing = true;
            }
            Screen::Simultaneity | Screen::Twin => self.playing = !self.playing,
            _ => {}
        }
    }

    fn reset_animation(&mut self) {
        self.playing = false;
        match self.screen {
            Screen::Simultaneity => self.sim_time = 0.0,
            Screen::Twin => self.twin_progress = 0.0,
            _ => {}
        }
    }

    pub fn warp_view(&self) -> Result<WarpView, KinematicsError> {
        let velocity = Velocity::new(self.warp_velocity)?;
        let dp = metrics::snapshot(Slider::Warp, self.warp_velocity, &self.config)?;
        Ok(WarpView {
            velocity,
            gamma: dp.gamma,
            dilated_time: dp.dilated_time,
            contracted_length: dp.contracted_length,
        })
    }

    pub fn doppler_view(&self) -> Result<DopplerView, KinematicsError> {
        Ok(DopplerView {
            velocity: Velocity::new(self.doppler_velocity)?,
            observed_wavelength: observed_wavelength(self.config.doppler.rest_wavelength, self.doppler_velocity)?,
        })
    }

    pub fn simultaneity_view(&self) -> (SimultaneityExperiment, simultaneity::Snapshot, f64) {
        let snapshot = self.experiment.snapshot(self.simultaneity_frame, self.sim_time);
        let progress = self.sim_time / self.config.simultaneity.duration;
        (self.experiment, snapshot, progress)
    }

    pub fn train_tunnel_view(&self) -> Result<(TrainTunnel, ApparentLengths), KinematicsError> {
        let lengths = self.tunnel.apparent_lengths(self.train_frame, self.train_velocity)?;
        Ok((self.tunnel, lengths))
    }

    pub fn twin_view(&self) -> crate::error::Result<(TwinTrip, Ages, f64)> {
        let trip = self.config.twin_trip(self.twin_velocity)?;
        Ok((trip, trip.ages_at(self.twin_progress), self.twin_progress))
    }
}
