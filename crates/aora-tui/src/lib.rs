//! Full-screen terminal client for Aora.
//!
//! Elm-style: [`update::update`] folds events into [`state::AppState`] and
//! returns [`effects::UiEffect`]s; [`runtime::TuiRuntime`] executes them
//! against `aora-core` and feeds results back as events.

pub mod components;
pub mod effects;
pub mod events;
pub mod navigation;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::path::PathBuf;

use anyhow::Result;
use aora_core::Aora;
pub use runtime::TuiRuntime;

/// Runs the interactive client until the user quits.
///
/// Must be called with a multi-threaded tokio runtime entered: the event
/// loop blocks the calling thread while backend calls run on the workers.
///
/// # Errors
/// Returns an error when stdout is not a terminal or the terminal fails.
pub fn run(aora: Aora, session_path: PathBuf) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `aora posts`, `aora upload` and friends for non-interactive use."
        );
    }
    tracing::info!(endpoint = aora.client().endpoint(), "starting tui");
    let mut runtime = TuiRuntime::new(aora, session_path)?;
    runtime.run()
}
