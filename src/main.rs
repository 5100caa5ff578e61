mod event;
mod tui;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use busy_calendar::app::{format_selection, App, Outcome};
use busy_calendar::calendar::{EventDataSource, MemorySource};
use busy_calendar::clock::{clock_for, Clock};
use busy_calendar::components::{self, DayView, MonthView, StatusBar, TimeBar};
use busy_calendar::config::{
    parse_instant, parse_weekday, ConfigFile, SelectorConfig, SelectorConfigBuilder, APP_NAME,
};
use busy_calendar::theme::Theme;
use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Pick a date (and time) from a month grid shaded by how busy each day is.
///
/// Prints the picked value to stdout on Enter; prints nothing when cancelled.
#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about)]
struct Cli {
    /// First column of the grid, e.g. `sunday` or `mon`
    #[arg(long, value_name = "DAY")]
    week_start: Option<String>,

    /// Events that make a day count as full
    #[arg(long, value_name = "N")]
    threshold: Option<u32>,

    /// Pick a date without a time
    #[arg(long)]
    date_only: bool,

    /// Hide the day panel next to the grid
    #[arg(long)]
    compact: bool,

    /// Minutes added or removed by +/-
    #[arg(long, value_name = "MINUTES")]
    minute_step: Option<u32>,

    /// Pretend the current time is this instant (`YYYY-MM-DD[THH:MM]`)
    #[arg(long, value_name = "DATETIME")]
    now: Option<String>,

    /// Initially selected date (`YYYY-MM-DD[THH:MM]`)
    #[arg(long, value_name = "DATETIME")]
    date: Option<String>,

    /// Use generated sample events instead of the system calendar
    #[arg(long)]
    demo: bool,

    /// Config file (default: <config dir>/busy-calendar/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Result<SelectorConfigBuilder> {
        let mut builder = SelectorConfig::builder();
        if let Some(day) = self.week_start.as_deref() {
            builder = builder.week_start(parse_weekday(day)?);
        }
        if let Some(n) = self.threshold {
            builder = builder.full_day_threshold(n);
        }
        if self.date_only {
            builder = builder.date_only(true);
        }
        if self.compact {
            builder = builder.expanded(false);
        }
        if let Some(step) = self.minute_step {
            builder = builder.minute_step(step);
        }
        if let Some(now) = self.now.as_deref() {
            builder = builder.simulated_now(parse_instant(now)?);
        }
        Ok(builder)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let file = ConfigFile::load(cli.config.as_deref())?;
    let config = file.to_builder()?.merge(cli.overrides()?).build()?;
    let theme = Theme::from_config(&file.theme);
    tracing::info!(?config, theme = %theme.name, "starting picker");

    let clock = clock_for(config.simulated_now);
    let source = open_source(cli.demo, clock.today())?;
    let initial = cli.date.as_deref().map(parse_instant).transpose()?;

    let mut app = App::new(config, theme, clock, source, initial)?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result?;

    match app.outcome {
        Some(Outcome::Selected(value)) => {
            tracing::info!(%value, "picked");
            println!("{}", format_selection(value, app.config.date_only));
        }
        _ => tracing::info!("cancelled"),
    }
    Ok(())
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| eyre!("invalid RUST_LOG / log filter: {e}"))?;

    let writer = match log_file() {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

fn log_file() -> Option<fs::File> {
    let dir = dirs::cache_dir()?.join(APP_NAME);
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{APP_NAME}.log")))
        .ok()
}

#[cfg(target_os = "macos")]
fn open_source(demo: bool, today: NaiveDate) -> Result<Box<dyn EventDataSource>> {
    if demo {
        return Ok(sample_source(today));
    }

    eprintln!("Connecting to Apple Calendar...");
    let store = busy_calendar::calendar::Store::new()?;
    if !store.request_access()? {
        return Err(eyre!(
            "Calendar access denied. Grant access in System Settings > Privacy & Security > \
             Calendars, or run with --demo"
        ));
    }
    Ok(Box::new(store))
}

#[cfg(not(target_os = "macos"))]
fn open_source(demo: bool, today: NaiveDate) -> Result<Box<dyn EventDataSource>> {
    if !demo {
        tracing::info!("no system calendar on this platform");
    }
    Ok(sample_source(today))
}

fn sample_source(today: NaiveDate) -> Box<dyn EventDataSource> {
    let source = MemorySource::sample(today);
    tracing::info!(events = source.len(), "using sample events");
    Box::new(source)
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: grid/day panel + time bar + status bar
            let layout = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

            render_content(frame, layout[0], app);
            TimeBar::render(frame, layout[1], app);
            StatusBar::render(frame, layout[2], app);

            if app.show_help {
                components::render_help(frame, area, &app.theme, app.config.date_only);
            }
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(250))? {
            // Clear status message on any key
            app.status_message = None;

            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            handle_key(app, key.code, key.modifiers);
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => app.cancel(),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.cancel(),
        (KeyCode::Enter, _) => app.confirm(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.prev_week(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.next_week(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => app.later(),
        (KeyCode::Char('-'), _) => app.earlier(),
        (KeyCode::Char('H'), _) => app.prev_hour(),
        (KeyCode::Char('L'), _) => app.next_hour(),
        (KeyCode::PageDown, _) => app.scroll_day_down(),
        (KeyCode::PageUp, _) => app.scroll_day_up(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn render_content(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    if !app.config.expanded || area.width < 60 {
        MonthView::render(frame, area, app);
        return;
    }

    let content = Layout::horizontal([Constraint::Length(39), Constraint::Min(20)]).split(area);
    MonthView::render(frame, content[0], app);
    DayView::render(frame, content[1], app);
}
