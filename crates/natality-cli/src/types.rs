use std::path::PathBuf;

use natality_model::AgeBracket;

/// Outcome of one pipeline run, consumed by the summary printer.
#[derive(Debug)]
pub struct RunResult {
    pub sources_dir: PathBuf,
    pub output_dir: PathBuf,
    pub indicators: StageCounts,
    pub births: StageCounts,
    /// Joined comparison record count. Zero when the join came up empty.
    pub comparison_records: usize,
    /// Correlation between the chosen bracket's share and the education
    /// sub-index, when computable.
    pub correlation: Option<BracketCorrelation>,
    /// Per-file skip reasons, in discovery order.
    pub skipped: Vec<String>,
    pub outputs: OutputFiles,
    pub dry_run: bool,
}

/// File and record counts for one source kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct StageCounts {
    pub files_discovered: usize,
    pub files_loaded: usize,
    pub records: usize,
}

/// Correlation of one bracket's share against the education sub-index.
#[derive(Debug, Clone, Copy)]
pub struct BracketCorrelation {
    pub bracket: AgeBracket,
    pub coefficient: f64,
    pub sample_size: usize,
}

/// Paths of the written output tables.
#[derive(Debug, Default)]
pub struct OutputFiles {
    pub comparison: Option<PathBuf>,
    pub indicators: Option<PathBuf>,
    pub births: Option<PathBuf>,
}
