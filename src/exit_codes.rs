//! Exit code constants for the branch-retire CLI.
//!
//! - 0: Success (including runs where every branch was skipped or kept)
//! - 2: Configuration, validation, or required git operation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any failure: bad configuration, invalid repository, unresolved base,
/// a failed required git call, or a refused deletion.
pub const FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(SUCCESS, FAILURE);
    }

    #[test]
    fn exit_codes_match_contract() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(FAILURE, 2);
    }
}
