mod app;
mod document;
mod error;
mod paths;
mod render;

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use treeview::{convert_key_event, convert_modifiers};

use app::{App, Options};
use document::Document;
use error::DemoError;
use paths::LogDir;
use render::Terminal;

const SAMPLE: &str = include_str!("../assets/sample.json");

/// Interactive terminal host for a tree view.
#[derive(Parser, Debug)]
#[command(name = "treeview-demo")]
#[command(version, about, long_about = None)]
struct Args {
    /// Tree document (JSON). Uses a bundled sample when omitted.
    path: Option<PathBuf>,

    /// Allow selecting more than one node
    #[arg(short, long)]
    multiselect: bool,

    /// Keep the selection in the host and feed it back after each change
    #[arg(long)]
    controlled: bool,

    /// Log level for the log file (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,

    /// Number of earlier runs' log files to keep
    #[arg(long, default_value_t = 10)]
    keep_logs: usize,
}

fn init_logging(level: LevelFilter, keep: usize) -> Result<PathBuf, DemoError> {
    let dir = paths::cache_dir().ok_or(DemoError::NoLogDir)?;
    let logs = LogDir::new(dir, keep);
    let archived = logs.rotate()?;

    let path = logs.latest();
    let file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), file)?;
    if let Some(archived) = archived {
        info!("Previous log archived to {}", archived.display());
    }
    Ok(path)
}

fn load(path: Option<&Path>) -> Result<Document, DemoError> {
    match path {
        Some(path) => Document::load(path),
        None => Document::parse(SAMPLE, Path::new("sample.json")),
    }
}

fn run(args: Args) -> Result<(), DemoError> {
    let log_path = init_logging(args.log_level, args.keep_logs)?;
    info!("Logging to {}", log_path.display());

    let document = load(args.path.as_deref())?;
    let options = Options {
        multiselect: args.multiselect,
        controlled: args.controlled,
    };
    let mut app = App::new(document, options);
    let mut terminal = Terminal::new()?;

    while !app.quit {
        terminal.draw(&mut app)?;
        match event::read()? {
            Event::Key(key) => {
                if let Some(combo) = convert_key_event(key) {
                    app.handle_key(combo);
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) = render::row_at(&app, mouse.row) {
                    app.handle_click(row, convert_modifiers(mouse.modifiers));
                }
            }
            _ => {}
        }
    }

    info!("Quit");
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
