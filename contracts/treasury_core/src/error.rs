//! Error types for the Treasury Core contract

use soroban_sdk::contracterror;

/// Treasury contract errors
///
/// Codes 100-110 keep the numbering used by deployed treasury clients.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TreasuryError {
    /// Caller lacks the role required for this operation
    NotAuthorized = 100,
    /// Address is already an active member
    AlreadyMember = 101,
    /// Address is not an active member
    NotMember = 102,
    /// Threshold is below the minimum
    InvalidThreshold = 103,
    /// No proposal exists with the given ID
    ProposalNotFound = 104,
    /// Proposal exists but its expiration window has passed
    ProposalExpired = 105,
    /// Caller has already voted on this proposal
    AlreadyVoted = 106,
    /// Proposal has fewer approvals than the current threshold
    InsufficientApprovals = 107,
    /// Proposal has already been executed
    ProposalAlreadyExecuted = 108,
    /// Amount must be strictly positive
    InvalidAmount = 109,
    /// Amount exceeds the treasury balance
    InsufficientBalance = 110,
    /// Treasury has already been initialized
    AlreadyInitialized = 111,
    /// Member registry is full
    CapacityExceeded = 112,
    /// Description is empty or too long
    DescriptionRequired = 113,
    /// Treasury has not been initialized
    NotInitialized = 114,
    /// Treasury name is empty or too long
    InvalidName = 115,
    /// Execution entry point does not match the proposal kind
    ProposalKindMismatch = 116,
    /// Counter or balance arithmetic overflowed
    ArithmeticOverflow = 117,
}
