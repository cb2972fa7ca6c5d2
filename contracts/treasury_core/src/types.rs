//! Data types for the Treasury Core contract

use soroban_sdk::{contracttype, Address, Env, String};

/// Ledgers a proposal stays actionable after creation (~10 days)
pub const PROPOSAL_DURATION: u32 = 1440;
/// Lowest threshold the treasury accepts
pub const MIN_THRESHOLD: u32 = 1;
/// Maximum number of active members
pub const MAX_MEMBERS: u32 = 20;
/// Maximum proposal description length in bytes
pub const MAX_DESCRIPTION_LEN: u32 = 200;
/// Maximum treasury name length in bytes
pub const MAX_NAME_LEN: u32 = 50;

/// Capability tier of a member
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    /// Full control, including member removal and threshold changes
    Admin = 1,
    /// May propose transfers and new members, and vote
    Member = 2,
    /// Read access only
    Viewer = 3,
}

impl Role {
    /// Whether this role grants at least the capabilities of `required`.
    ///
    /// Admin covers Member covers Viewer.
    pub fn satisfies(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::Member, Role::Member | Role::Viewer) => true,
            (Role::Viewer, Role::Viewer) => true,
            _ => false,
        }
    }
}

/// A treasury member. Removal deactivates the record instead of deleting it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    /// Address of the member
    pub address: Address,
    /// Capability tier
    pub role: Role,
    /// Ledger sequence at first admission
    pub joined_at: u32,
    /// Whether the member currently holds any capability
    pub is_active: bool,
}

/// Kind of action a proposal carries
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalKind {
    Transfer = 1,
    AddMember = 2,
    RemoveMember = 3,
    ChangeThreshold = 4,
}

/// Kind-specific payload of a proposal
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProposalAction {
    /// Pay `amount` out of the treasury to the target
    Transfer(Address, i128),
    /// Admit the target with the given role
    AddMember(Address, Role),
    /// Deactivate the target
    RemoveMember(Address),
    /// Replace the approval threshold
    ChangeThreshold(u32),
}

impl ProposalAction {
    pub fn kind(&self) -> ProposalKind {
        match self {
            ProposalAction::Transfer(..) => ProposalKind::Transfer,
            ProposalAction::AddMember(..) => ProposalKind::AddMember,
            ProposalAction::RemoveMember(..) => ProposalKind::RemoveMember,
            ProposalAction::ChangeThreshold(..) => ProposalKind::ChangeThreshold,
        }
    }

    /// Registry entry the action changes, for membership proposals
    pub fn member_target(&self) -> Option<&Address> {
        match self {
            ProposalAction::AddMember(target, _) | ProposalAction::RemoveMember(target) => {
                Some(target)
            }
            ProposalAction::Transfer(..) | ProposalAction::ChangeThreshold(_) => None,
        }
    }
}

/// A treasury proposal
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    /// Sequential identifier, starting at 1
    pub id: u64,
    /// Member who created the proposal
    pub proposer: Address,
    /// What the proposal does when executed
    pub action: ProposalAction,
    /// Human-readable reason
    pub description: String,
    /// Ledger sequence at creation
    pub created_at: u32,
    /// First ledger sequence at which the proposal is no longer actionable
    pub expires_at: u32,
    /// Whether the proposal has been executed
    pub executed: bool,
    /// Ledger sequence of execution
    pub executed_at: Option<u32>,
    /// Number of approving votes
    pub approval_count: u32,
}

impl Proposal {
    pub fn kind(&self) -> ProposalKind {
        self.action.kind()
    }
}

/// A member's vote on a proposal
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vote {
    pub proposal_id: u64,
    pub voter: Address,
    pub approved: bool,
    /// Ledger sequence of the vote
    pub voted_at: u32,
}

/// Lifecycle position of a proposal at a given ledger
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalStatus {
    /// Collecting votes, threshold not yet met
    Pending = 0,
    /// Threshold met and still inside the expiration window
    Executable = 1,
    /// Executed
    Executed = 2,
    /// Expiration window passed without execution
    Expired = 3,
}

/// Aggregate treasury state
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryState {
    /// Treasury label, fixed at initialization
    pub name: String,
    /// Approvals required to execute any proposal
    pub threshold: u32,
    /// Number of active members
    pub member_count: u32,
    /// Funds held, in the smallest currency unit
    pub balance: i128,
    /// Whether `initialize` has succeeded
    pub is_initialized: bool,
}

impl TreasuryState {
    /// State reported before initialization
    pub fn uninitialized(env: &Env) -> Self {
        Self {
            name: String::from_str(env, ""),
            threshold: 0,
            member_count: 0,
            balance: 0,
            is_initialized: false,
        }
    }
}

/// Configuration for the treasury contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryConfig {
    /// Ledgers a proposal stays actionable (default: 1440)
    pub proposal_duration: u32,
    /// Maximum number of active members (default: 20)
    pub max_members: u32,
    /// Lowest accepted threshold (default: 1)
    pub min_threshold: u32,
    /// Maximum description length in bytes (default: 200)
    pub max_description_len: u32,
    /// Maximum name length in bytes (default: 50)
    pub max_name_len: u32,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            proposal_duration: PROPOSAL_DURATION,
            max_members: MAX_MEMBERS,
            min_threshold: MIN_THRESHOLD,
            max_description_len: MAX_DESCRIPTION_LEN,
            max_name_len: MAX_NAME_LEN,
        }
    }
}
