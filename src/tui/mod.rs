mod app;

pub use app::{App, Control, Screen};

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap},
};

use crate::metrics::{export_csv, plot_results};
use crate::narration;
use crate::relativity::Velocity;
use crate::relativity::simultaneity;
use crate::relativity::spectrum::{self, Band, Rgb};
use crate::relativity::train_tunnel;
use crate::relativity::lorentz_factor;
use crate::relativity::twin::{Leg, LifeStage, ROUND_TRIP, TwinTrip};
use crate::theory;

const TICK: Duration = Duration::from_millis(50);

pub fn start(mut app: App) -> anyhow::Result<()> {
    // Setup terminal
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    tracing::info!("explorer started");

    let result = run(&mut terminal, &mut app);

    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    let output = &app.config().output;
    export_csv(app.log(), &output.realtime_csv)?;
    println!("✅ Data exported to {}", output.realtime_csv.display());
    if plot_results(app.log(), &output.plot)? {
        println!("✅ Plot saved to {}", output.plot.display());
    }
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw(f, app))?;

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code) == Control::Quit {
                    tracing::info!(snapshots = app.log().len(), "explorer closed");
                    return Ok(());
                }
            }
        }
        if last_tick.elapsed() >= TICK {
            app.tick(last_tick.elapsed().as_secs_f64());
            last_tick = Instant::now();
        }
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(3)])
        .split(f.area());

    let titles: Vec<&str> = Screen::ALL.iter().map(|s| s.title()).collect();
    let selected = Screen::ALL.iter().position(|s| *s == app.screen).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title("relviz"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.screen {
        Screen::Warp => draw_warp(f, app, chunks[1]),
        Screen::Doppler => draw_doppler(f, app, chunks[1]),
        Screen::Simultaneity => draw_simultaneity(f, app, chunks[1]),
        Screen::TrainTunnel => draw_train_tunnel(f, app, chunks[1]),
        Screen::Twin => draw_twin(f, app, chunks[1]),
        Screen::Theory => draw_theory(f, app, chunks[1]),
    }

    let help = "Tab: next screen  ←/→: velocity  f: switch frame  space: play/pause  r: reset  q: quit";
    f.render_widget(
        Paragraph::new(help).block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );
}

fn boxed<'a>(lines: Vec<Line<'a>>, title: &'a str) -> Paragraph<'a> {
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true })
}

fn draw_error(f: &mut Frame, area: Rect, err: &dyn std::fmt::Display) {
    let line = Line::from(Span::styled(format!("⚠ {err}"), Style::default().fg(Color::Red)));
    f.render_widget(boxed(vec![line], "Error"), area);
}

fn split(area: Rect, constraints: &[Constraint]) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints.to_vec())
        .split(area)
}

fn velocity_gauge<'a>(v: f64, lo: f64, hi: f64) -> Gauge<'a> {
    let ratio = if hi > lo { ((v - lo) / (hi - lo)).clamp(0.0, 1.0) } else { 0.0 };
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Velocity"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{:+.3}c", v))
}

fn draw_warp(f: &mut Frame, app: &App, area: Rect) {
    let view = match app.warp_view() {
        Ok(view) => view,
        Err(e) => return draw_error(f, area, &e),
    };
    let warp = &app.config().warp;
    let chunks = split(area, &[Constraint::Length(3), Constraint::Length(6), Constraint::Min(3)]);
    let (lo, hi) = app.velocity_range();
    f.render_widget(velocity_gauge(view.velocity.beta(), lo, hi), chunks[0]);

    let lines = vec![
        Line::from(format!(
            "Velocity: {:.3}c ({:.0} m/s)",
            view.velocity.beta(),
            view.velocity.meters_per_second()
        )),
        Line::from(format!("Lorentz factor (γ): {:.4}", view.gamma)),
        Line::from(format!(
            "Proper time: {:.1} years | Dilated time: {:.2} years",
            warp.proper_time, view.dilated_time
        )),
        Line::from(format!(
            "Proper length: {:.1} m | Contracted length: {:.2} m",
            warp.proper_length, view.contracted_length
        )),
    ];
    f.render_widget(boxed(lines, "Time dilation & length contraction"), chunks[1]);
    f.render_widget(boxed(vec![Line::from(narration::warp(view.velocity))], "What is happening?"), chunks[2]);
}

fn swatch(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn draw_doppler(f: &mut Frame, app: &App, area: Rect) {
    let view = match app.doppler_view() {
        Ok(view) => view,
        Err(e) => return draw_error(f, area, &e),
    };
    let chunks = split(
        area,
        &[Constraint::Length(3), Constraint::Length(5), Constraint::Length(3), Constraint::Min(3)],
    );
    let (lo, hi) = app.velocity_range();
    f.render_widget(velocity_gauge(view.velocity.beta(), lo, hi), chunks[0]);

    let observed = view.observed_wavelength;
    let rgb = spectrum::wavelength_to_rgb(observed);
    let band = Band::of(observed);
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Star colour: "),
            Span::styled("      ", Style::default().bg(swatch(rgb))),
            Span::raw(format!(" {rgb}")),
        ]),
        Line::from(format!(
            "Rest wavelength: {:.0} nm | Observed: {:.0} nm",
            app.config().doppler.rest_wavelength,
            observed
        )),
    ];
    if spectrum::is_invisible(observed) {
        lines.push(Line::from(Span::styled(
            format!("{}: invisible to the human eye", band.label()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }
    f.render_widget(boxed(lines, "Relativistic Doppler shift"), chunks[1]);

    let marker = spectrum::spectrum_marker_position(observed);
    let strip = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Spectrum 300nm (UV) … 800nm (IR)"))
        .gauge_style(Style::default().fg(swatch(rgb)))
        .ratio(marker)
        .label(format!("{observed:.0} nm"));
    f.render_widget(strip, chunks[2]);

    f.render_widget(
        boxed(vec![Line::from(narration::doppler(view.velocity, band))], "What is happening?"),
        chunks[3],
    );
}

fn hit_span(label: &str, hit: bool, at: f64) -> Span<'static> {
    let style = if hit {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };
    let state = if hit { "HIT" } else { "waiting" };
    Span::styled(format!("{label}: {state} (t = {at:.3})  "), style)
}

fn draw_simultaneity(f: &mut Frame, app: &App, area: Rect) {
    let (experiment, snapshot, progress) = app.simultaneity_view();
    let frame = app.simultaneity_frame;
    let hits = experiment.hits(frame);
    let chunks = split(
        area,
        &[Constraint::Length(3), Constraint::Length(6), Constraint::Min(3)],
    );

    let timeline = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Timeline"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("t = {:.2}", snapshot.time));
    f.render_widget(timeline, chunks[0]);

    let frame_name = match frame {
        simultaneity::Frame::Observer => "Platform view (rod moving)",
        simultaneity::Frame::Rod => "Rod view (rod at rest)",
    };
    let verdict = if hits.is_simultaneous() {
        "Both ends are struck at the same instant.".to_string()
    } else {
        format!("The far end is struck {:.3} later.", hits.gap())
    };
    let lines = vec![
        Line::from(format!(
            "{frame_name} | c = {} | v = {} | L = {}",
            experiment.light_speed(),
            experiment.rod_speed(),
            experiment.half_length()
        )),
        Line::from(format!(
            "Light radius: {:.2} | Rod offset: {:.2}",
            snapshot.light_radius, snapshot.rod_offset
        )),
        Line::from(vec![
            hit_span("Left end", snapshot.left_hit, hits.left),
            hit_span("Right end", snapshot.right_hit, hits.right),
        ]),
        Line::from(verdict),
    ];
    f.render_widget(boxed(lines, "Relativity of simultaneity"), chunks[1]);
    f.render_widget(
        boxed(vec![Line::from(narration::simultaneity(frame))], "What is happening?"),
        chunks[2],
    );
}

fn bar(length: f64, scale: f64, width: u16) -> String {
    let cells = ((length / scale) * f64::from(width)).round().clamp(0.0, f64::from(width)) as usize;
    "█".repeat(cells)
}

fn draw_train_tunnel(f: &mut Frame, app: &App, area: Rect) {
    let (scene, lengths) = match app.train_tunnel_view() {
        Ok(view) => view,
        Err(e) => return draw_error(f, area, &e),
    };
    let chunks = split(area, &[Constraint::Length(3), Constraint::Length(7), Constraint::Min(3)]);
    let (lo, hi) = app.velocity_range();
    let v = app.velocity();
    let gamma = match lorentz_factor(v) {
        Ok(gamma) => gamma,
        Err(e) => return draw_error(f, area, &e),
    };
    f.render_widget(velocity_gauge(v, lo, hi), chunks[0]);

    let scale = scene.train_rest().max(scene.tunnel_rest());
    let width = chunks[1].width.saturating_sub(16);
    let frame_name = match app.train_frame {
        train_tunnel::Frame::Tunnel => "Tunnel frame",
        train_tunnel::Frame::Train => "Train frame",
    };
    let verdict = if lengths.train_fits() {
        Span::styled("The train fits inside the tunnel.", Style::default().fg(Color::Green))
    } else {
        Span::styled("The train does not fit.", Style::default().fg(Color::Red))
    };
    let lines = vec![
        Line::from(format!("{frame_name} | γ = {gamma:.3}")),
        Line::from(vec![
            Span::raw(format!("Train  {:>6.2} ", lengths.train)),
            Span::styled(bar(lengths.train, scale, width), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::raw(format!("Tunnel {:>6.2} ", lengths.tunnel)),
            Span::styled(bar(lengths.tunnel, scale, width), Style::default().fg(Color::Gray)),
        ]),
        Line::from(verdict),
    ];
    f.render_widget(boxed(lines, "Train-tunnel paradox"), chunks[1]);
    f.render_widget(
        boxed(vec![Line::from(narration::train_tunnel(app.train_frame, v, lengths))], "What is happening?"),
        chunks[2],
    );
}

fn draw_twin(f: &mut Frame, app: &App, area: Rect) {
    let (trip, ages, progress) = match app.twin_view() {
        Ok(view) => view,
        Err(e) => return draw_error(f, area, &e),
    };
    let chunks = split(
        area,
        &[Constraint::Length(3), Constraint::Length(3), Constraint::Length(6), Constraint::Min(3)],
    );
    let (lo, hi) = app.velocity_range();
    f.render_widget(velocity_gauge(trip.velocity().beta(), lo, hi), chunks[0]);

    let leg = match TwinTrip::leg(progress) {
        Leg::Outbound => "Outbound",
        Leg::Return => "Return",
    };
    let journey = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Journey"))
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio((progress / ROUND_TRIP).clamp(0.0, 1.0))
        .label(leg);
    f.render_widget(journey, chunks[1]);

    let lines = vec![
        Line::from(format!(
            "Round trip: {:.2} years on Earth, {:.2} years aboard",
            trip.earth_duration(),
            trip.ship_duration()
        )),
        Line::from(format!("Earth twin: {:.1} yrs ({})", ages.earth, LifeStage::of(ages.earth).label())),
        Line::from(format!("Ship twin:  {:.1} yrs ({})", ages.ship, LifeStage::of(ages.ship).label())),
        Line::from(format!("Age gap: {:.2} years", ages.gap())),
    ];
    f.render_widget(boxed(lines, "Twin paradox"), chunks[2]);
    f.render_widget(boxed(vec![Line::from(narration::twin(ages))], "What is happening?"), chunks[3]);
}

fn card_lines(cards: &[theory::Card]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, card) in cards.iter().enumerate() {
        let heading = match card.formula {
            Some(formula) => format!("{}. {}  ({formula})", i + 1, card.title),
            None => format!("{}. {}", i + 1, card.title),
        };
        lines.push(Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))));
        lines.push(Line::from(card.body));
    }
    lines
}

fn draw_theory(f: &mut Frame, app: &App, area: Rect) {
    let examples = match Velocity::new(app.velocity()).and_then(theory::worked_examples) {
        Ok(examples) => examples,
        Err(e) => return draw_error(f, area, &e),
    };
    let chunks = split(area, &[Constraint::Length(6), Constraint::Length(8), Constraint::Min(5)]);
    f.render_widget(boxed(card_lines(&theory::POSTULATES), "The two postulates (1905)"), chunks[0]);
    f.render_widget(boxed(card_lines(&theory::CONSEQUENCES), "The consequences"), chunks[1]);

    let lines = examples.into_iter().map(Line::from).collect();
    f.render_widget(boxed(lines, "At your warp velocity"), chunks[2]);
}
