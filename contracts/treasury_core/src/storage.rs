//! Storage keys and helpers for the Treasury Core contract

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Member, Proposal, TreasuryConfig, TreasuryState, Vote};

/// Storage keys for the treasury contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Aggregate treasury state (instance storage)
    Treasury,
    /// Treasury configuration (instance storage)
    Config,
    /// Last allocated proposal ID (instance storage)
    Nonce,
    /// Member record for an address (persistent storage)
    Member(Address),
    /// Every address ever admitted, in admission order (persistent storage)
    MemberList,
    /// A proposal by ID (persistent storage)
    Proposal(u64),
    /// A vote keyed by (proposal ID, voter) (persistent storage)
    Vote(u64, Address),
}

// ============================================================================
// Treasury State Helpers
// ============================================================================

/// Get the treasury state, if initialized
pub fn get_state(env: &Env) -> Option<TreasuryState> {
    env.storage().instance().get(&DataKey::Treasury)
}

/// Set the treasury state
pub fn set_state(env: &Env, state: &TreasuryState) {
    env.storage().instance().set(&DataKey::Treasury, state);
}

/// Check if the treasury is initialized
pub fn is_initialized(env: &Env) -> bool {
    get_state(env).map(|state| state.is_initialized).unwrap_or(false)
}

// ============================================================================
// Configuration Helpers
// ============================================================================

/// Get the treasury configuration
pub fn get_config(env: &Env) -> Option<TreasuryConfig> {
    env.storage().instance().get(&DataKey::Config)
}

/// Set the treasury configuration
pub fn set_config(env: &Env, config: &TreasuryConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ============================================================================
// Member Helpers
// ============================================================================

/// Get the member record for an address, active or not
pub fn get_member(env: &Env, address: &Address) -> Option<Member> {
    env.storage()
        .persistent()
        .get(&DataKey::Member(address.clone()))
}

/// Set the member record for an address
pub fn set_member(env: &Env, member: &Member) {
    env.storage()
        .persistent()
        .set(&DataKey::Member(member.address.clone()), member);
}

/// Get every address ever admitted
pub fn get_member_list(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::MemberList)
        .unwrap_or_else(|| Vec::new(env))
}

/// Append an address to the member list. Entries are never removed.
pub fn push_member_list(env: &Env, address: &Address) {
    let mut members = get_member_list(env);
    members.push_back(address.clone());
    env.storage().persistent().set(&DataKey::MemberList, &members);
}

// ============================================================================
// Proposal Helpers
// ============================================================================

/// Get the last allocated proposal ID (0 before the first proposal)
pub fn get_nonce(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get::<DataKey, u64>(&DataKey::Nonce)
        .unwrap_or(0)
}

/// Set the last allocated proposal ID
pub fn set_nonce(env: &Env, nonce: u64) {
    env.storage().instance().set(&DataKey::Nonce, &nonce);
}

/// Get a proposal by ID
pub fn get_proposal(env: &Env, proposal_id: u64) -> Option<Proposal> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(proposal_id))
}

/// Set a proposal
pub fn set_proposal(env: &Env, proposal: &Proposal) {
    env.storage()
        .persistent()
        .set(&DataKey::Proposal(proposal.id), proposal);
}

// ============================================================================
// Vote Helpers
// ============================================================================

/// Get a vote for (proposal, voter)
pub fn get_vote(env: &Env, proposal_id: u64, voter: &Address) -> Option<Vote> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(proposal_id, voter.clone()))
}

/// Check if a vote exists for (proposal, voter)
pub fn has_vote(env: &Env, proposal_id: u64, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vote(proposal_id, voter.clone()))
}

/// Set a vote
pub fn set_vote(env: &Env, vote: &Vote) {
    env.storage()
        .persistent()
        .set(&DataKey::Vote(vote.proposal_id, vote.voter.clone()), vote);
}
