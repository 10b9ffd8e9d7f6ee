use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use relviz::SimConfig;
use relviz::logger;
use relviz::metrics::{export_csv, plot_results, sweep};
use relviz::narration;
use relviz::quiz::{QuizSession, full_quiz};
use relviz::relativity::simultaneity;
use relviz::relativity::spectrum::{Band, is_invisible, wavelength_to_rgb};
use relviz::relativity::train_tunnel;
use relviz::relativity::{Velocity, observed_wavelength};
use relviz::theory;
use relviz::tui::{self, App};

/// relviz - explore special relativity from the terminal
#[derive(Parser)]
#[command(name = "relviz", about = "Interactive special relativity explorer")]
struct Cli {
    /// TOML file overriding the simulation constants
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive explorer
    Tui,
    /// Sweep 0..c, export CSV and plot the curves
    Metrics {
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Observed wavelength and colour of the reference star
    Doppler {
        /// Velocity as a fraction of c; positive means approaching
        #[arg(allow_hyphen_values = true)]
        velocity: f64,
    },
    /// Light-pulse hit times on a moving rod
    Simultaneity {
        #[arg(long, value_enum, default_value_t = SimFrame::Observer)]
        frame: SimFrame,
    },
    /// Apparent lengths in the train-tunnel paradox
    TrainTunnel {
        velocity: Option<f64>,
        #[arg(long, value_enum, default_value_t = TunnelFrame::Tunnel)]
        frame: TunnelFrame,
    },
    /// Ages of the twins after the round trip
    Twin { velocity: Option<f64> },
    /// Take the relativity quiz
    Quiz,
    /// The two postulates and their consequences
    Theory {
        /// Velocity for the worked examples, as a fraction of c
        #[arg(default_value_t = 0.9)]
        velocity: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SimFrame {
    Rod,
    Observer,
}

impl From<SimFrame> for simultaneity::Frame {
    fn from(frame: SimFrame) -> Self {
        match frame {
            SimFrame::Rod => simultaneity::Frame::Rod,
            SimFrame::Observer => simultaneity::Frame::Observer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TunnelFrame {
    Tunnel,
    Train,
}

impl From<TunnelFrame> for train_tunnel::Frame {
    fn from(frame: TunnelFrame) -> Self {
        match frame {
            TunnelFrame::Tunnel => train_tunnel::Frame::Tunnel,
            TunnelFrame::Train => train_tunnel::Frame::Train,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = SimConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let command = cli.command.unwrap_or(Commands::Tui);

    if matches!(command, Commands::Tui) {
        logger::init_file_logger(cli.verbose, &config.output.log_file)?;
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match command {
        Commands::Tui => tui::start(App::new(config)?)?,
        Commands::Metrics { csv, plot } => run_metrics(&config, csv, plot)?,
        Commands::Doppler { velocity } => run_doppler(&config, velocity)?,
        Commands::Simultaneity { frame } => run_simultaneity(&config, frame.into())?,
        Commands::TrainTunnel { velocity, frame } => {
            let velocity = match velocity {
                Some(velocity) => velocity,
                None => config.train_tunnel_velocity()?,
            };
            run_train_tunnel(&config, velocity, frame.into())?
        }
        Commands::Twin { velocity } => run_twin(&config, velocity.unwrap_or(config.twin.velocity))?,
        Commands::Quiz => run_quiz()?,
        Commands::Theory { velocity } => run_theory(velocity)?,
    }

    Ok(())
}

fn run_metrics(config: &SimConfig, csv: Option<PathBuf>, plot: Option<PathBuf>) -> anyhow::Result<()> {
    let log = sweep(config)?;
    let csv = csv.unwrap_or_else(|| config.output.metrics_csv.clone());
    let plot = plot.unwrap_or_else(|| config.output.plot.clone());

    export_csv(&log, &csv)?;
    println!("✅ Metrics written to {}", csv.display());
    if plot_results(&log, &plot)? {
        println!("✅ Plot saved to {}", plot.display());
    }
    Ok(())
}

fn run_doppler(config: &SimConfig, velocity: f64) -> anyhow::Result<()> {
    let v = Velocity::new(velocity)?;
    let observed = observed_wavelength(config.doppler.rest_wavelength, velocity)?;
    let band = Band::of(observed);

    println!("v = {:+.3}c", v.beta());
    println!("Rest wavelength:     {:.1} nm", config.doppler.rest_wavelength);
    println!("Observed wavelength: {:.1} nm", observed);
    println!("Colour:              {}", wavelength_to_rgb(observed));
    if is_invisible(observed) {
        println!("⚠ {}: invisible to the human eye", band.label());
    }
    println!();
    println!("{}", narration::doppler(v, band));
    Ok(())
}

fn run_simultaneity(config: &SimConfig, frame: simultaneity::Frame) -> anyhow::Result<()> {
    let experiment = config.simultaneity_experiment()?;
    let hits = experiment.hits(frame);

    println!(
        "c = {} | v = {} | L = {}",
        experiment.light_speed(),
        experiment.rod_speed(),
        experiment.half_length()
    );
    println!("Left end struck at  t = {:.4}", hits.left);
    println!("Right end struck at t = {:.4}", hits.right);
    if hits.is_simultaneous() {
        println!("Simultaneous.");
    } else {
        println!("Not simultaneous: gap of {:.4}", hits.gap());
    }
    println!();
    println!("{}", narration::simultaneity(frame));
    Ok(())
}

fn run_train_tunnel(config: &SimConfig, velocity: f64, frame: train_tunnel::Frame) -> anyhow::Result<()> {
    let scene = config.train_tunnel_scene()?;
    let lengths = scene.apparent_lengths(frame, velocity)?;

    println!("v = {:.3}c, γ = {:.4}", velocity, Velocity::new(velocity)?.gamma());
    println!("Train:  {:.3} (rest {:.3})", lengths.train, scene.train_rest());
    println!("Tunnel: {:.3} (rest {:.3})", lengths.tunnel, scene.tunnel_rest());
    println!(
        "{}",
        if lengths.train_fits() { "The train fits inside the tunnel." } else { "The train does not fit." }
    );
    println!();
    println!("{}", narration::train_tunnel(frame, velocity, lengths));
    Ok(())
}

fn run_twin(config: &SimConfig, velocity: f64) -> anyhow::Result<()> {
    let trip = config.twin_trip(velocity)?;
    let ages = trip.reunion_ages();

    println!("Distance: {} ly at {:.3}c", config.twin.distance, velocity);
    println!("Earth clock: {:.2} years", trip.earth_duration());
    println!("Ship clock:  {:.2} years", trip.ship_duration());
    println!();
    println!("{}", narration::twin(ages));
    Ok(())
}

fn run_theory(velocity: f64) -> anyhow::Result<()> {
    let examples = theory::worked_examples(Velocity::new(velocity)?)?;

    println!("The two postulates (1905)");
    for (i, card) in theory::POSTULATES.iter().enumerate() {
        println!("\n{}. {}\n   {}", i + 1, card.title, card.body);
    }
    println!("\nThe consequences");
    for card in theory::CONSEQUENCES {
        println!("\n* {} ({})\n  {}", card.title, card.formula.unwrap_or("-"), card.body);
    }
    println!();
    for line in examples {
        println!("{line}");
    }
    Ok(())
}

fn run_quiz() -> anyhow::Result<()> {
    let mut session = QuizSession::new(full_quiz()?)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(question) = session.current().cloned() {
        let (n, total) = session.position();
        println!("\nQuestion {n}/{total}: {}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }

        let outcome = loop {
            print!("Your answer: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            let choice = match line?.trim().parse::<usize>() {
                Ok(choice) if choice >= 1 => choice - 1,
                _ => {
                    println!("Enter an option number.");
                    continue;
                }
            };
            match session.answer(choice) {
                Ok(outcome) => break outcome,
                Err(e) => println!("{e}"),
            }
        };

        if outcome.correct {
            println!("✅ Correct! {}", outcome.explanation);
        } else {
            println!("❌ Incorrect. Answer: {}. {}", outcome.correct_option + 1, outcome.explanation);
        }
        session.advance()?;
    }

    let result = session.result();
    println!(
        "\nYou scored {}/{} ({:.0}%): {}",
        result.score,
        result.total,
        result.percentage,
        result.grade.title()
    );
    Ok(())
}
