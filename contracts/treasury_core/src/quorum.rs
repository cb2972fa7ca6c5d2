//! Quorum and expiration rules
//!
//! Both the execution path and the read-only status queries go through these
//! functions, so "ready to execute" has a single definition.

use crate::types::ProposalStatus;

/// A proposal is expired from `expires_at` onwards.
pub fn is_expired(expires_at: u32, now: u32) -> bool {
    now >= expires_at
}

/// Whether a proposal with these counters may execute at `now`.
pub fn can_execute(
    approval_count: u32,
    threshold: u32,
    executed: bool,
    expires_at: u32,
    now: u32,
) -> bool {
    !executed && approval_count >= threshold && !is_expired(expires_at, now)
}

/// Lifecycle position of a proposal at `now`.
pub fn proposal_status(
    approval_count: u32,
    threshold: u32,
    executed: bool,
    expires_at: u32,
    now: u32,
) -> ProposalStatus {
    if executed {
        ProposalStatus::Executed
    } else if is_expired(expires_at, now) {
        ProposalStatus::Expired
    } else if can_execute(approval_count, threshold, executed, expires_at, now) {
        ProposalStatus::Executable
    } else {
        ProposalStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        assert!(!is_expired(1540, 1539));
        assert!(is_expired(1540, 1540));
        assert!(is_expired(1540, 1541));
    }

    #[test]
    fn test_can_execute_requires_every_condition() {
        assert!(can_execute(2, 2, false, 1440, 10));
        assert!(can_execute(3, 2, false, 1440, 1439));

        // Below threshold
        assert!(!can_execute(1, 2, false, 1440, 10));
        // Already executed
        assert!(!can_execute(2, 2, true, 1440, 10));
        // Expired
        assert!(!can_execute(2, 2, false, 1440, 1440));
    }

    #[test]
    fn test_status_precedence() {
        assert_eq!(proposal_status(0, 1, false, 1440, 0), ProposalStatus::Pending);
        assert_eq!(proposal_status(1, 1, false, 1440, 0), ProposalStatus::Executable);
        assert_eq!(proposal_status(1, 1, false, 1440, 1440), ProposalStatus::Expired);
        // Executed wins over expired
        assert_eq!(proposal_status(1, 1, true, 1440, 5000), ProposalStatus::Executed);
    }
}
