//! The branch retirement decision pipeline.
//!
//! [`classify`] runs the guards in [`guards::GUARDS`] against one branch and
//! returns the first decision, or DELETE when every guard passes. The only
//! state it reads is the immutable [`RetireContext`] and answers from the
//! [`VersionControl`] facade; it never mutates the repository.
//!
//! Guard order:
//! 1. current branch → SKIP
//! 2. protected name or pattern → SKIP
//! 3. critical name → SKIP
//! 4. upstream not on remote (optional) → SKIP
//! 5. no issue prefix → SKIP, no closure marker on base → KEEP (optional)
//! 6. tip not contained in base → KEEP
//! 7. head exists on remote, or remote unreachable (optional) → KEEP
//! 8. otherwise → DELETE

mod classification;
pub mod guards;
pub mod oracles;


pub use classification::{Action, Classification};

use crate::context::RetireContext;
use crate::error::Result;
use crate::vcs::VersionControl;
use guards::{GUARDS, Probe};
use tracing::debug;

/// Classify one branch.
///
/// `current` is the checked-out branch, resolved once per run.
///
/// # Errors
///
/// Only a failure to resolve the branch's tip commit is returned; every
/// other failed query is folded into a conservative verdict.
pub fn classify(
    branch: &str,
    current: Option<&str>,
    ctx: &RetireContext,
    vcs: &dyn VersionControl,
) -> Result<Classification> {
    let mut probe = Probe::new(branch, current, vcs);

    for (name, guard) in GUARDS {
        if let Some(classification) = guard(ctx, &mut probe)? {
            debug!(branch, guard = name, action = %classification.action, "guard decided");
            return Ok(classification);
        }
    }

    debug!(branch, "no guard fired");
    Ok(guards::retire(ctx, &probe))
}
