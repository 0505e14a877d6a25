mod worker;

use std::path::PathBuf;

// Re-export types from the library crate
pub use pdf_compose::{
    ComposeOptions, ComposeStatistics, ConversionReport, PdfFileEntry, SkippedImage,
};
pub use worker::{spawn_worker, worker_task};

/// Commands sent from the front end to the worker
#[derive(Debug)]
pub enum ConvertCommand {
    Convert {
        images: Vec<PathBuf>,
        options: ComposeOptions,
        output: PathBuf,
    },
    Stats {
        images: Vec<PathBuf>,
        options: ComposeOptions,
    },
    ListOutputs {
        dir: PathBuf,
    },
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone)]
pub enum ConvertUpdate {
    Progress {
        current: usize,
        total: usize,
    },
    Converted {
        report: ConversionReport,
    },
    Stats {
        stats: ComposeStatistics,
        skipped: Vec<SkippedImage>,
    },
    Outputs {
        entries: Vec<PdfFileEntry>,
    },
    Error {
        message: String,
    },
}
