//! Pure transition policy: adjacency plus role and reason side-conditions.
//!
//! The policy is a deterministic decision function over a task snapshot. It
//! performs no I/O, holds no state, and is unit-testable without a store.

use super::{RequiredRole, TaskStatus, TransitionError, UserId};

/// Inputs the policy needs to judge a requested transition.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    /// Status the task currently holds.
    pub current: TaskStatus,
    /// Status the caller wants to move to.
    pub requested: TaskStatus,
    /// Identity triggering the change.
    pub actor: &'a UserId,
    /// Identity recorded as the task creator.
    pub created_by: &'a UserId,
    /// Identity the task is currently assigned to.
    pub assigned_to: &'a UserId,
    /// Caller-supplied reason, mandatory when entering `Blocked`.
    pub reason: Option<&'a str>,
}

/// Decides whether the requested transition is legal.
///
/// A terminal current status is reported as [`TransitionError::ImmutableState`]
/// before the adjacency table is consulted; role and reason side-conditions
/// are evaluated only once the edge itself is valid.
///
/// # Errors
///
/// Returns the [`TransitionError`] verdict denying the transition.
pub fn evaluate(context: &TransitionContext<'_>) -> Result<(), TransitionError> {
    if context.current.is_terminal() {
        return Err(TransitionError::ImmutableState {
            status: context.current,
        });
    }

    if !context.current.can_transition_to(context.requested) {
        return Err(TransitionError::InvalidTransition {
            from: context.current,
            to: context.requested,
            allowed: context.current.allowed_transitions(),
        });
    }

    match context.requested {
        TaskStatus::InProgress if context.actor != context.assigned_to => {
            Err(TransitionError::PermissionDenied {
                to: context.requested,
                required_role: RequiredRole::Assignee,
            })
        }
        TaskStatus::Done if context.actor != context.created_by => {
            Err(TransitionError::PermissionDenied {
                to: context.requested,
                required_role: RequiredRole::Creator,
            })
        }
        TaskStatus::Blocked if is_blank(context.reason) => Err(TransitionError::MissingReason),
        _ => Ok(()),
    }
}

fn is_blank(reason: Option<&str>) -> bool {
    reason.is_none_or(|text| text.trim().is_empty())
}
