use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use folio_core::portfolio::{http_client, ImageDiskCache};
use folio_core::{AppConfig, Portfolio};
use folio_tui::{
    app::{App, Effect, Mode},
    event::{AppEvent, EventHandler, ImageLoadResult},
    input::handle_key_event,
    load_theme,
    media_cache::{cell_size, spawn_media_load, Fit},
    widgets::{HeaderWidget, LightboxWidget, NavMenuWidget, PageWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, portfolio: Portfolio) -> Result<()> {
    let client = http_client()?;
    let disk_cache = match ImageDiskCache::new(&config.image_cache_dir()) {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            warn!("Image disk cache disabled: {}", e);
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = format!("{} · folio", portfolio.site.name);
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config, portfolio, client, disk_cache).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Arc<AppConfig>,
    portfolio: Portfolio,
    client: reqwest::Client,
    disk_cache: Option<Arc<ImageDiskCache>>,
) -> Result<()> {
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), portfolio, theme, Instant::now());
    app.set_cell_size(cell_size());
    info!("Cell size {:?}", app.cell_px());

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.scroll.animation_fps);
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();

    let mut last_area: Option<Rect> = None;
    let mut needs_layout = true;

    loop {
        // Completed media loads change tile widths
        while let Ok(result) = img_rx.try_recv() {
            app.handle_media(result);
            needs_layout = true;
        }

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        if last_area != Some(area) {
            // Lightbox renditions depend on the screen size
            let tile_rows = config.ui.tile_rows;
            app.media
                .retain_bitmaps(|_, rows, fit| fit == Fit::Cover && rows == tile_rows);
            last_area = Some(area);
            needs_layout = true;
        }
        if needs_layout {
            app.relayout(area);
            needs_layout = false;
        }

        for url in app.media_to_load() {
            spawn_media_load(img_tx.clone(), client.clone(), disk_cache.clone(), url);
        }

        let animating = app.tick(Instant::now());

        terminal.draw(|frame| {
            app.hits.clear();
            let screen = app.screen;
            PageWidget::render(frame, &mut app);
            HeaderWidget::render(frame, screen.header, &mut app);
            if app.nav.is_open() {
                NavMenuWidget::render(frame, &mut app);
            }
            StatusBarWidget::render(frame, screen.status, &app);
            if matches!(app.mode(), Mode::Lightbox { .. }) {
                LightboxWidget::render(frame, &mut app);
            }
        })?;

        if let Some(event) = event_handler.next(animating)? {
            let now = Instant::now();
            let effect = match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key, &app);
                    // Info panels change section heights
                    needs_layout = true;
                    app.handle_action(action, now)
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse, now),
                AppEvent::Resize(_, _) => {
                    needs_layout = true;
                    Effect::None
                }
                AppEvent::Tick => Effect::None,
            };
            if let Effect::Open(target) = effect {
                info!("Opening {}", target);
                if let Err(e) = open::that(&target) {
                    warn!("Failed to open {}: {}", target, e);
                    app.set_status(format!("Could not open {target}"));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.teardown();
    info!("Closed portfolio");
    Ok(())
}
