//! Contract-based validation for move application.
//!
//! Contracts define correctness through postconditions on the state
//! transition: {P} move {Q}. Move application itself is infallible, so
//! the contract is all postcondition, with one clause set for accepted
//! moves and one for rejected moves.

use crate::game::{GameState, MoveReport};
use crate::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Move Contract
// ─────────────────────────────────────────────────────────────

/// Contract for move application.
///
/// Accepted move:
/// - exactly one snapshot was pushed (minus any cap eviction)
/// - the newest snapshot captures the pre-move grid and score
/// - the score advanced by exactly the reported delta
/// - the grid changed
/// - all game invariants hold
///
/// Rejected move:
/// - observable state is exactly as before
pub struct MoveContract;

impl MoveContract {
    /// Checks the postcondition for an accepted move.
    #[instrument(skip_all)]
    pub fn post_accepted(
        before: &GameState,
        after: &GameState,
        report: &MoveReport,
    ) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        let expected_len = match after.history().limit() {
            Some(limit) => before.history().len().saturating_add(1).min(limit),
            None => before.history().len() + 1,
        };
        if after.history().len() != expected_len {
            violations.push(InvariantViolation::new(
                "Accepted move must push exactly one snapshot",
            ));
        }

        // With a zero cap nothing is retained, so there is no snapshot
        // to compare against.
        if after.history().limit() != Some(0) {
            let captured_pre_move = after.history().newest().is_some_and(|snapshot| {
                snapshot.grid() == before.grid() && snapshot.score() == before.score()
            });
            if !captured_pre_move {
                violations.push(InvariantViolation::new(
                    "Newest snapshot must capture the pre-move state",
                ));
            }
        }

        if after.score() != before.score().saturating_add(report.score_delta) {
            violations.push(InvariantViolation::new(
                "Score must advance by exactly the reported delta",
            ));
        }

        if after.grid() == before.grid() {
            violations.push(InvariantViolation::new(
                "Accepted move must change the grid",
            ));
        }

        if let Err(mut invariant_violations) = GameInvariants::check_all(after) {
            violations.append(&mut invariant_violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Accepted-move contract violated");
            Err(violations)
        }
    }

    /// Checks the postcondition for a rejected move: the observable
    /// state must be untouched.
    #[instrument(skip_all)]
    pub fn post_rejected(
        before: &GameState,
        after: &GameState,
    ) -> Result<(), Vec<InvariantViolation>> {
        if after == before {
            Ok(())
        } else {
            warn!("Rejected-move contract violated");
            Err(vec![InvariantViolation::new(
                "Rejected move must leave the state untouched",
            )])
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Debug Assertions
// ─────────────────────────────────────────────────────────────

/// Asserts the move postconditions (panics on violation in debug
/// builds, compiles to nothing in release).
#[instrument(skip_all)]
pub fn assert_move_contract(before: &GameState, after: &GameState, report: &MoveReport) {
    if report.accepted {
        debug_assert!(
            MoveContract::post_accepted(before, after, report).is_ok(),
            "Accepted-move contract violated"
        );
    } else {
        debug_assert!(
            MoveContract::post_rejected(before, after).is_ok(),
            "Rejected-move contract violated"
        );
    }
}
