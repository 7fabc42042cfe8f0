//! Applies classifications: reports every branch and deletes DELETE results.

use super::display::{StatusRecord, dry_run_line, status_line};
use super::types::Outcome;
use crate::cli::OutputFormat;
use crate::context::RetireContext;
use crate::error::Result;
use crate::retire::{Action, Classification};
use crate::vcs::VersionControl;
use std::io::Write;
use tracing::{error, info};

/// Report one classification and, for DELETE, remove the branch unless
/// running dry.
///
/// In text mode the status line is written (and flushed) before git is
/// asked to delete, so the line is visible even if the deletion hangs.
/// A refused deletion is reported on stderr and returned as
/// [`Outcome::DeleteFailed`]; it does not stop the run.
pub fn execute<W: Write>(
    classification: &Classification,
    ctx: &RetireContext,
    vcs: &dyn VersionControl,
    format: OutputFormat,
    out: &mut W,
) -> Result<Outcome> {
    if classification.action != Action::Delete {
        match format {
            OutputFormat::Text => writeln!(out, "{}", status_line(classification))?,
            OutputFormat::Json => write_record(out, classification, ctx.dry_run, false)?,
        }
        return Ok(Outcome::Reported);
    }

    let branch = classification.branch.as_str();
    let mode = ctx.delete_mode();

    if ctx.dry_run {
        match format {
            OutputFormat::Text => {
                writeln!(out, "{}", status_line(classification))?;
                writeln!(out, "{}", dry_run_line(branch, mode))?;
            }
            OutputFormat::Json => write_record(out, classification, true, false)?,
        }
        return Ok(Outcome::WouldDelete);
    }

    if format == OutputFormat::Text {
        writeln!(out, "{}", status_line(classification))?;
        out.flush()?;
    }

    let outcome = match vcs.delete_branch(branch, mode) {
        Ok(()) => {
            info!(branch, flag = mode.flag(), "deleted branch");
            Outcome::Deleted
        }
        Err(e) => {
            error!(branch, error = %e, "branch deletion failed");
            eprintln!("Error: {}", e);
            Outcome::DeleteFailed
        }
    };

    if format == OutputFormat::Json {
        write_record(out, classification, false, outcome == Outcome::Deleted)?;
    }

    Ok(outcome)
}

fn write_record<W: Write>(
    out: &mut W,
    classification: &Classification,
    dry_run: bool,
    deleted: bool,
) -> Result<()> {
    let record = StatusRecord {
        classification,
        dry_run,
        deleted,
    };
    serde_json::to_writer(&mut *out, &record).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}
