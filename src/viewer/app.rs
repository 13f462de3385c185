//! Main application logic

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::{mpsc, watch};

use crate::actors::{RefreshClients, RefreshHandle};
use crate::alerts::{AlertForm, AlertSubmitter};
use crate::clients::{AlertClient, HealthClient, SubmitOutcome, build_http_client};
use crate::config::Config;
use crate::state::Dashboard;

use super::ui::{self, ViewState};

/// Main TUI application
pub struct App {
    config: Config,
    refresh: RefreshHandle,
    submitter: AlertSubmitter,
    health: HealthClient,
    dashboard_rx: watch::Receiver<Dashboard>,
    form: AlertForm,
    outcome_tx: mpsc::UnboundedSender<SubmitOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmitOutcome>,
}

impl App {
    /// Create a new application instance and start polling
    pub fn new(config: Config) -> Result<Self> {
        // Reusable HTTP client shared by every poll and submission
        let http_client = build_http_client(config.request_timeout())?;

        let refresh = RefreshHandle::spawn(
            RefreshClients::from_config(http_client.clone(), &config),
            config.refresh_settings(),
            Dashboard::with_asset_price(config.bootstrap_asset_price()),
        );

        let submitter = AlertSubmitter::new(
            AlertClient::new(http_client.clone(), &config.api_url),
            refresh.clone(),
            config.stats_refresh_delay(),
        );

        let health = HealthClient::new(http_client, &config.api_url);
        let dashboard_rx = refresh.subscribe();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            refresh,
            submitter,
            health,
            dashboard_rx,
            form: AlertForm::default(),
            outcome_tx,
            outcome_rx,
        })
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        self.log_backend_health();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Run event loop
        let result = self.run_event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        self.refresh.shutdown().await.ok();

        result
    }

    /// Probe the backend once; the dashboard runs either way
    fn log_backend_health(&self) {
        let health = self.health.clone();

        tokio::spawn(async move {
            match health.check().await {
                Ok(true) => tracing::info!("backend is up"),
                Ok(false) => tracing::warn!("backend health check did not report UP"),
                Err(e) => tracing::warn!("backend health check failed: {}", e),
            }
        });
    }

    /// Main event loop
    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            // Render UI from the latest published dashboard
            let dashboard = self.dashboard_rx.borrow_and_update().clone();
            let view = ViewState {
                dashboard: &dashboard,
                form: &self.form,
                bot_username: &self.config.bot_username,
                api_url: &self.config.api_url,
            };
            terminal.draw(|f| ui::render(f, &view))?;

            // Apply finished submissions (non-blocking)
            while let Ok(outcome) = self.outcome_rx.try_recv() {
                self.form.finish_submit(&outcome);
            }

            // Handle keyboard events (with timeout)
            if event::poll(std::time::Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && self.handle_key_event(key.code, key.modifiers).await?
            {
                break; // Quit
            }
        }

        Ok(())
    }

    /// Handle keyboard event; returns `true` to quit
    async fn handle_key_event(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
        match code {
            KeyCode::Esc => return Ok(true),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.form.focus_next();
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => self.submit(),
            KeyCode::F(5) => {
                self.refresh.refresh_fee_now().await?;
                self.refresh.refresh_stats_now().await?;
                self.refresh.refresh_asset_price_now().await?;
            }
            KeyCode::Char(c) => self.form.push_char(c),
            _ => {}
        }

        Ok(false)
    }

    /// Validate the form and post it in the background
    fn submit(&mut self) {
        let Some(request) = self.form.begin_submit() else {
            return;
        };

        let submitter = self.submitter.clone();
        let outcome_tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let outcome = submitter.submit(request).await;
            outcome_tx.send(outcome).ok();
        });
    }
}
