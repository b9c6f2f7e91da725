mod app;
mod catalog;
mod config;
mod error;
mod logging;
mod translate;
mod ui;
mod view;

use app::{App, BatchOutcome, InputMode};
use catalog::{EntitySource, PageRequest, PokeApiClient};
use clap::{Parser, Subcommand};
use config::{Config, Overrides};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use indicatif::{ProgressBar, ProgressStyle};
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use translate::Locale;
use view::{CardView, DetailView};

/// TUI explorer for the PokeAPI creature catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the REST API
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Display language: pt or en
    #[arg(long, global = true, value_parser = parse_locale)]
    lang: Option<Locale>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI explorer (default)
    Run,
    /// Fetch one entry and print its detail view
    Show {
        /// Catalog number
        id: u32,
    },
    /// Fetch one page of entries and print their cards
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::parse(s).ok_or_else(|| format!("unsupported language '{}', expected pt or en", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: Failed to initialize logging: {}", e.user_message());
    }

    let config = Config::load(
        cli.config.as_deref(),
        Overrides {
            api_base: cli.api_base,
            language: cli.lang,
        },
    )
    .map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        e.user_message()
    })?;
    tracing::debug!(?config, "configuration loaded");

    let client = PokeApiClient::new(&config.api_base)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Show { id } => {
            let entity = client.try_fetch_entity(id).await.map_err(|e| e.user_message())?;
            print!("{}", DetailView::from_entity(&entity, config.language).to_text(config.language));
        }
        Commands::List { page } => {
            let request = PageRequest::for_page(page, config.page_size, config.catalog_max)
                .ok_or_else(|| format!("page {} is past the end of the catalog", page))?;
            print_page(&client, request, config.language).await?;
        }
        Commands::Run => {
            let mut app = App::new(&config);

            // Init terminal
            let mut terminal = ratatui::init();
            crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;

            let size = terminal.size()?;
            app.update_rows(size.height);

            // Main loop
            let result = run_app(&mut terminal, &mut app, Arc::new(client)).await;

            // Restore terminal
            let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!(error = %e, "explorer exited with error");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Load a page with a spinner and print one line per card.
async fn print_page(
    client: &PokeApiClient,
    request: PageRequest,
    locale: Locale,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.set_message(format!("Fetching #{}–#{}", request.start, request.end));
    pb.enable_steady_tick(Duration::from_millis(100));

    let entities = catalog::load_page(client, request).await;
    pb.finish_and_clear();

    for entity in &entities {
        let card = CardView::from_entity(entity, locale);
        let badges: Vec<String> = card.badges.iter().map(|b| format!("[{}]", b.label)).collect();
        println!(
            "{:>6}  {:<16} {:<24} {}",
            card.number,
            card.name,
            badges.join(" "),
            card.image_url.as_deref().unwrap_or("-")
        );
    }
    eprintln!("{} of {} entries loaded", entities.len(), request.len());
    Ok(())
}

/// Run one page load on its own task and report back once every fetch has
/// settled. A panic inside the batch surfaces as `BatchOutcome::Failed`.
fn spawn_page_load<S: EntitySource>(
    source: Arc<S>,
    request: PageRequest,
    tx: UnboundedSender<BatchOutcome>,
) {
    tokio::spawn(async move {
        let batch = tokio::spawn(async move { catalog::load_page(&*source, request).await });
        let outcome = match batch.await {
            Ok(entities) => BatchOutcome::Loaded { request, entities },
            Err(e) => BatchOutcome::Failed {
                request,
                message: e.to_string(),
            },
        };
        let _ = tx.send(outcome);
    });
}

async fn run_app<S: EntitySource>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    source: Arc<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx): (UnboundedSender<BatchOutcome>, UnboundedReceiver<BatchOutcome>) =
        mpsc::unbounded_channel();

    if let Some(request) = app.begin_load() {
        spawn_page_load(Arc::clone(&source), request, tx.clone());
    }

    let size = terminal.size()?;
    let mut screen = Rect::new(0, 0, size.width, size.height);

    loop {
        while let Ok(outcome) = rx.try_recv() {
            app.finish_load(outcome, Instant::now());
        }
        app.tick(Instant::now());

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(request) = handle_key(app, key) {
                        spawn_page_load(Arc::clone(&source), request, tx.clone());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse, screen),
                Event::Resize(width, height) => {
                    screen = Rect::new(0, 0, width, height);
                    app.update_rows(height);
                }
                _ => {}
            }
        }
    }
}

/// Dispatch a key press. Returns a page request when the key started a load.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<PageRequest> {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return None;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return None;
    }

    if key.code == KeyCode::Char('?') {
        app.show_help = true;
        return None;
    }

    if app.category_picker.is_some() {
        handle_picker_key(app, key);
        return None;
    }

    if app.detail.is_some() {
        handle_detail_key(app, key);
        return None;
    }

    handle_list_key(app, key)
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.search();
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.picker_next(),
        KeyCode::Up | KeyCode::Char('k') => app.picker_prev(),
        KeyCode::Enter => app.picker_confirm(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('t') => app.picker_cancel(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Char('r') => {
            app.random_pick(&mut rand::thread_rng());
        }
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) -> Option<PageRequest> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => app.list_next(),
        KeyCode::Up | KeyCode::Char('k') => app.list_prev(),
        KeyCode::PageDown => app.list_page_down(),
        KeyCode::PageUp => app.list_page_up(),
        KeyCode::Char('g') => app.list_first(),
        KeyCode::Char('G') => app.list_last(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('t') => app.open_category_picker(),
        KeyCode::Char('r') => {
            app.random_pick(&mut rand::thread_rng());
        }
        KeyCode::Char('m') => return app.request_next_page(),
        KeyCode::Esc => {
            // Clear search and filters
            app.search_input.clear();
            app.search();
        }
        _ => {}
    }
    None
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, screen: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.show_help || app.category_picker.is_some() || app.input_mode == InputMode::Editing {
        return;
    }
    let position = ratatui::layout::Position::new(mouse.column, mouse.row);

    if app.detail.is_some() {
        if !ui::detail::modal_area(screen).contains(position) {
            app.close_detail();
        }
        return;
    }

    if let Some(row) = ui::list::card_row_at(screen, mouse.column, mouse.row) {
        if app.select_row(row) {
            app.open_selected();
        }
    }
}
