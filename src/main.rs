//! skilltree: browse a markdown skill outline as a collapsible, searchable tree.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skilltree::app_state::{AppState, Command};
use skilltree::error::LoadError;
use skilltree::listing::{skill_from_url, ListingNavigator, Manifest};
use skilltree::render::TextRenderer;
use skilltree::view::TreeView;
use skilltree::{config, input, ui};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use url::Url;

#[derive(Parser)]
#[command(name = "skilltree")]
#[command(about = "Browse a markdown skill outline as a collapsible tree", long_about = None)]
struct Args {
    /// Outline files to try in order (`-` reads stdin)
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// HTML page with an inline `skilltree-md` script to fall back on
    #[arg(long, value_name = "HTML")]
    inline: Option<PathBuf>,

    /// Print the tree as text and exit
    #[arg(long)]
    print: bool,

    /// Print the parsed forest as JSON and exit
    #[arg(long, conflicts_with = "print")]
    json: bool,

    /// Search query applied before printing
    #[arg(long, short = 'f', value_name = "QUERY")]
    filter: Option<String>,

    /// Expand every branch before printing
    #[arg(long)]
    expand: bool,

    /// Project manifest used to preview listing results
    #[arg(long, value_name = "JSON")]
    manifest: Option<PathBuf>,

    /// Listing URL whose `skill` parameter seeds the search when `--filter` is absent
    #[arg(long, value_name = "URL")]
    skill_url: Option<Url>,

    /// Indent policy for over-indented items (`pad` or `clamp`)
    #[arg(long, value_name = "POLICY")]
    indent: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.paths.is_empty() {
        cfg.sources = args.paths.iter().map(|p| p.display().to_string()).collect();
    }
    if let Some(ref page) = args.inline {
        cfg.inline_page = page.display().to_string();
    }
    if let Some(ref manifest) = args.manifest {
        cfg.manifest = manifest.display().to_string();
    }
    if let Some(ref policy) = args.indent {
        cfg.indent_policy.clone_from(policy);
    }

    let forest = match input::load_forest(
        &cfg.source_paths(),
        cfg.inline_path().as_deref(),
        cfg.indent_policy(),
    ) {
        Ok(forest) => forest,
        Err(LoadError::EmptyForest) => {
            eprintln!("{}", LoadError::EmptyForest);
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            tracing::error!(error = %e, "skill tree load failed");
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let query = args
        .filter
        .or_else(|| args.skill_url.as_ref().and_then(skill_from_url));

    if args.json {
        let json = serde_json::to_string_pretty(&forest).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    if args.print {
        let mut view = TreeView::render(&forest);
        if args.expand {
            view.expand_all();
        }
        if let Some(ref query) = query {
            view.apply_filter(query);
        }
        let mut renderer = TextRenderer::new();
        view.walk(&mut renderer);
        print!("{}", renderer.finish());
        return Ok(ExitCode::SUCCESS);
    }

    let manifest = match cfg.manifest_path() {
        Some(path) => match Manifest::load(&path) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "manifest unavailable");
                None
            }
        },
        None => None,
    };
    let navigator = ListingNavigator::new(&cfg.listing_url, manifest)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut state = AppState::new(&forest, navigator);
    if let Some(query) = query {
        state.search_buffer.clone_from(&query);
        state.dispatch(Command::SetFilter(query));
    }
    if args.expand {
        state.dispatch(Command::ExpandAll);
    }

    run_tui(state)?;
    Ok(ExitCode::SUCCESS)
}

fn run_tui(mut app: AppState<ListingNavigator>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else if let Some(nav) = app.navigator().last() {
        println!("{}", nav.url);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState<ListingNavigator>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.handle_key(key.code) {
            return Ok(());
        }
    }
}
