//! Rangeform TUI — a terminal form of data-bound slider widgets.
//!
//! Runs the built-in demo form, or a TOML form definition given as the
//! first argument:
//!
//! ```text
//! rangeform-tui            # demo form
//! rangeform-tui form.toml  # custom form
//! ```

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use rangeform_core::config::FormDefinition;
use rangeform_core::store::MemoryStore;

use rangeform_tui::app::AppState;
use rangeform_tui::sample_form::{self, DemoActions};
use rangeform_tui::widget::SliderWidget;
use rangeform_tui::{input, persistence, ui};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the
    // panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Form definition: file argument or the built-in demo.
    let form = match std::env::args().nth(1) {
        Some(path) => FormDefinition::load(Path::new(&path))
            .with_context(|| format!("loading form definition {path}"))?,
        None => sample_form::definition(),
    };

    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rangeform")
        .join("state.json");

    // Store, notice channel, widgets.
    let (notice_tx, notice_rx) = mpsc::channel();
    let store = MemoryStore::from_definition(&form, notice_tx);
    let fields: Vec<SliderWidget> = form.sliders.iter().cloned().map(SliderWidget::new).collect();

    let mut app = AppState::new(
        form.title.clone(),
        store,
        notice_rx,
        DemoActions::new(),
        fields,
        state_path.clone(),
    );

    // Restore persisted values before any subscriptions exist, then attach.
    let persisted = persistence::load(&state_path);
    persistence::apply(&mut app, persisted);
    for field in &mut app.fields {
        field.attach(&mut app.store);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&app.state_path, &persisted);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain change notices (non-blocking)
        app.drain_notices();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
