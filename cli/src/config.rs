use clap::ValueEnum;

/// Default cap on the memory held by a loaded graph.
pub const DEFAULT_MAX_MEMORY_MB: usize = 4096;

/// Default hop bound for `bfs` when no depth is given.
pub const DEFAULT_BFS_DEPTH: i64 = 2;

/// Default number of rows for `degree`.
pub const DEFAULT_DEGREE_TOP: usize = 10;

/// How query results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per result.
    Json,
}

/// Settings shared by every command, resolved from flags and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub max_memory_mb: usize,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            format: OutputFormat::Text,
        }
    }
}
