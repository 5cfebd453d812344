//! Print spooler integration

use super::DispatchOptions;
use std::future::Future;
use std::io;
use std::path::Path;

/// Something that can accept a PDF file for printing
pub trait PrintSpooler: Send + Sync {
    /// Submit the file at `path`. The file may be deleted once this returns.
    fn submit(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

/// Prints by running an external command such as `lp`
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSpooler {
    command: String,
    args: Vec<String>,
}

impl SystemSpooler {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_options(options: &DispatchOptions) -> Self {
        Self::new(options.print_command.clone(), options.print_args.clone())
    }
}

impl Default for SystemSpooler {
    fn default() -> Self {
        Self::from_options(&DispatchOptions::default())
    }
}

impl PrintSpooler for SystemSpooler {
    async fn submit(&self, path: &Path) -> io::Result<()> {
        log::debug!("Running {} {:?} {}", self.command, self.args, path.display());
        let status = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .arg(path)
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "{} exited with {}",
                self.command, status
            )))
        }
    }
}
