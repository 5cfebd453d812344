use std::path::PathBuf;

mod worker;

pub use worker::worker_task;

// Re-export types from library crates
pub use pdf_quadrant::{CompositionPlan, CompositionRequest, DispatchOptions};

/// Commands sent from the front end to the worker
#[derive(Debug)]
pub enum ComposeCommand {
    /// Compose and hand the result to the print spooler
    Print {
        request: CompositionRequest,
        options: DispatchOptions,
    },
    /// Compose and save the result under a generated name
    Download {
        request: CompositionRequest,
        options: DispatchOptions,
    },
    /// Report the layout without producing a document
    Plan { request: CompositionRequest },
}

impl ComposeCommand {
    /// Whether `other` is a repeat of the same user action
    fn same_action(&self, other: &ComposeCommand) -> bool {
        matches!(
            (self, other),
            (ComposeCommand::Print { .. }, ComposeCommand::Print { .. })
                | (ComposeCommand::Download { .. }, ComposeCommand::Download { .. })
        )
    }
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone)]
pub enum ComposeUpdate {
    PrintSubmitted,
    /// The spooler was unavailable; the artifact was saved instead
    PrintFallback {
        path: PathBuf,
    },
    Downloaded {
        path: PathBuf,
    },
    Planned {
        plan: CompositionPlan,
    },
    Error {
        message: String,
    },
}
