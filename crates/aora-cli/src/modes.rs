//! Interactive mode, compiled in with the `tui` feature.

#[cfg(feature = "tui")]
pub use aora_tui::run as run_tui;

#[cfg(not(feature = "tui"))]
pub fn run_tui(_aora: aora_core::Aora, _session_path: std::path::PathBuf) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
