//! Build command implementation.

use std::path::PathBuf;

use crate::errors::{OmniError, Result};
use crate::interface::Omni;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Directory below `input` to restrict the build to.
    pub subdir: Option<PathBuf>,
    /// Keep processing after a document fails.
    pub keep_going: bool,
}

/// Outcome of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub processed: usize,
    pub failed: usize,
}

/// Executes the build command.
///
/// Without `keep_going` the first failing document aborts the build. With
/// it, failures are logged and the build fails at the end if any occurred.
pub fn build(omni: &Omni, options: &BuildOptions) -> Result<BuildReport> {
    let subdir = options.subdir.as_deref();
    tracing::info!("Building {}", omni.input_root(subdir).display());

    if !options.keep_going {
        let processed = omni.process_directory(subdir)?;
        tracing::info!("Built {} documents", processed);
        return Ok(BuildReport {
            processed,
            failed: 0,
        });
    }

    let root = omni.input_root(subdir);
    let mut report = BuildReport::default();
    for path in omni.source_files(subdir)? {
        match omni.process_file_at(&root, &path) {
            Ok(_) => report.processed += 1,
            Err(e) => {
                tracing::error!("{}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }

    if report.failed > 0 {
        return Err(OmniError::Other(format!(
            "{} of {} documents failed",
            report.failed,
            report.processed + report.failed
        )));
    }
    tracing::info!("Built {} documents", report.processed);
    Ok(report)
}
