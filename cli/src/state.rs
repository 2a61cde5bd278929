use std::path::PathBuf;

use neuronet_core::{CsrGraph, LoadStats};

use crate::error::{CliError, CliResult};

/// A loaded graph plus where and how it was loaded.
pub struct GraphState {
    pub graph: CsrGraph,
    pub source: PathBuf,
    pub stats: LoadStats,
    pub load_time_ms: f64,
}

/// Graph held by an interactive session. Empty until the first successful load.
#[derive(Default)]
pub struct Session {
    state: Option<GraphState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a closure with a read reference to the loaded graph.
    pub fn with_graph<R, F: FnOnce(&GraphState) -> R>(&self, f: F) -> CliResult<R> {
        self.state.as_ref().map(f).ok_or(CliError::NotLoaded)
    }

    /// Replace the session graph.
    pub fn set_graph(&mut self, state: GraphState) {
        self.state = Some(state);
    }

    /// Drop the session graph (after a failed load).
    pub fn clear(&mut self) {
        self.state = None;
    }
}
