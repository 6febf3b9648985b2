//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! The reducer stays pure and returns effects; this is the only place that
//! spawns backend calls. Spawned handlers report back through an unbounded
//! inbox channel that the loop drains every frame.

mod handlers;

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use aora_core::{Aora, SessionStore};
use crossterm::event;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, Tui};
use crate::{render, update};

/// Poll interval between ticks.
pub const TICK: Duration = Duration::from_millis(50);

pub struct TuiRuntime {
    terminal: Tui,
    pub state: AppState,
    aora: Aora,
    /// Where the session credential is saved.
    session_path: PathBuf,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(aora: Aora, session_path: PathBuf) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state: AppState::new(SessionStore::new()),
            aora,
            session_path,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs until the user quits. The terminal is restored on every exit path.
    ///
    /// # Errors
    /// Returns an error if reading input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        self.execute_effect(UiEffect::HydrateSession);
        let result = self.event_loop();
        let restored = terminal::restore_terminal();
        result.and(restored)
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            for event in self.collect_events()? {
                if !matches!(event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                for effect in effects {
                    self.execute_effect(effect);
                }
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let poll_duration = if events.is_empty() {
            TICK.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }
        Ok(events)
    }

    /// Runs `f` on the tokio runtime and posts its event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(Aora) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let aora = self.aora.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(aora).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        tracing::debug!(?effect, "executing effect");
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::HydrateSession => self.spawn_effect(handlers::hydrate_session),
            UiEffect::SignIn { email, password } => {
                self.spawn_effect(move |aora| handlers::sign_in(aora, email, password));
            }
            UiEffect::SignUp {
                email,
                password,
                username,
            } => {
                self.spawn_effect(move |aora| handlers::sign_up(aora, email, password, username));
            }
            UiEffect::SignOut => self.spawn_effect(handlers::sign_out),
            UiEffect::LoadHome => self.spawn_effect(handlers::load_home),
            UiEffect::Search { query } => {
                self.spawn_effect(move |aora| handlers::search(aora, query));
            }
            UiEffect::LoadUserPosts { user_id } => {
                self.spawn_effect(move |aora| handlers::load_user_posts(aora, user_id));
            }
            UiEffect::CreateVideo {
                title,
                prompt,
                thumbnail,
                video,
                user_id,
            } => {
                self.spawn_effect(move |aora| {
                    handlers::create_video(aora, title, prompt, thumbnail, video, user_id)
                });
            }
            UiEffect::PersistCredential => {
                handlers::persist_credential(&self.aora, &self.session_path);
            }
        }
    }
}
