use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;

use crate::app_core::{AppCore, DataEventHandler};
use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, AppCommand};
use crate::config::Settings;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging_with_buffer;
use crate::preferences::{FileStore, KeyValueStore, MemoryStore, Preferences};
use crate::state::AppState;
use crate::ui::screens::Screen;
use cheapshark_api::Client;

/// Production handler: preference writes plus spawned fetch tasks
struct LiveHandler {
    preferences: Preferences,
    task_manager: BackgroundTaskManager,
    data_loader: DataLoader,
}

impl DataEventHandler for LiveHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        executor::execute_command(
            command,
            state,
            &self.preferences,
            &mut self.task_manager,
            &self.data_loader,
        );
    }
}

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        // Create log buffer before initializing logging
        let log_buffer = LogBuffer::new(5000);
        let logs_dir = self.settings.logs_dir();
        let (log_path, _log_guard) =
            init_logging_with_buffer(log_buffer.clone(), logs_dir.as_deref())?;

        match &log_path {
            Some(path) => tracing::info!(log = %path.display(), "dealdash starting"),
            None => tracing::info!("dealdash starting"),
        }

        let preferences = Preferences::new(self.open_store(), self.settings.default_theme);
        let ui_state = AppState::from_preferences(&preferences);

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let api_client = Arc::new(Client::with_options(self.settings.client_options())?);
        tracing::info!("Using API at {}", api_client.base_url());

        let handler = LiveHandler {
            preferences,
            task_manager: BackgroundTaskManager::new(),
            data_loader: DataLoader::new(api_client, data_tx),
        };
        let mut core = AppCore::new(handler, ui_state);

        let mut terminal = self.init()?;
        let mut event_stream = EventStream::new();

        core.execute(AppCommand::LoadStores);
        core.execute(AppCommand::RefreshDeals);

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            // Update total_entries for logs screen if active
            if let Some(Screen::Logs(logs_state)) = core.state_mut().current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, core.state(), &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    core.state_mut().tick();
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            // Don't log when on logs screen to avoid feedback loop
                            if !matches!(core.state().current_screen(), Screen::Logs(_)) {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            core.handle_key(KeyEvent::from(key));
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    core.handle_data_event(data_event);
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");
        drop(core);

        self.exit(terminal)?;

        Ok(())
    }

    /// File-backed preferences, or an in-memory store when the directory
    /// cannot be used.
    fn open_store(&self) -> Arc<dyn KeyValueStore> {
        let store = self
            .settings
            .preferences_dir()
            .ok_or_else(|| "no config directory".to_string())
            .and_then(|dir| FileStore::new(dir).map_err(|e| e.to_string()));
        match store {
            Ok(store) => {
                tracing::info!("Preferences stored in {}", store.dir().display());
                Arc::new(store)
            }
            Err(e) => {
                tracing::warn!("Preferences will not persist: {}", e);
                Arc::new(MemoryStore::new())
            }
        }
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
