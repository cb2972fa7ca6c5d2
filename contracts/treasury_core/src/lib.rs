#![no_std]

//! # Treasury Core
//!
//! A Soroban smart contract holding a multisig treasury. A fixed set of members
//! propose actions, vote on them, and execute them once the approval threshold
//! is met inside the proposal's expiration window.
//!
//! ## Features
//! - Role-based membership (Admin, Member, Viewer) with soft removal
//! - Four proposal kinds: transfer, add member, remove member, change threshold
//! - One vote per member per proposal
//! - Expiration measured in ledgers from proposal creation
//! - Execution computed as a full state transition before anything is written
//!
//! ## Time and identity
//! `now` is the ledger sequence number. Callers identify themselves with an
//! `Address` and authorize the call with `require_auth`.

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

mod error;
mod events;
mod executor;
mod quorum;
mod registry;
mod storage;
mod types;

pub use error::TreasuryError;
pub use types::{
    Member, Proposal, ProposalAction, ProposalKind, ProposalStatus, Role, TreasuryConfig,
    TreasuryState, Vote, MAX_DESCRIPTION_LEN, MAX_MEMBERS, MAX_NAME_LEN, MIN_THRESHOLD,
    PROPOSAL_DURATION,
};

use executor::{MemberChange, Transition};

// ============================================================================
// Internal Helpers
// ============================================================================

/// Load state and config of an initialized treasury
fn load(env: &Env) -> Result<(TreasuryState, TreasuryConfig), TreasuryError> {
    let state = storage::get_state(env)
        .filter(|state| state.is_initialized)
        .ok_or(TreasuryError::NotInitialized)?;
    let config = storage::get_config(env).ok_or(TreasuryError::NotInitialized)?;
    Ok((state, config))
}

/// Fail unless `caller` is active with at least `role`
fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), TreasuryError> {
    let member = storage::get_member(env, caller);
    if !registry::has_role(member.as_ref(), role) {
        log!(env, "caller lacks required role", caller.clone(), role as u32);
        return Err(TreasuryError::NotAuthorized);
    }
    Ok(())
}

fn validate_description(
    config: &TreasuryConfig,
    description: &String,
) -> Result<(), TreasuryError> {
    let len = description.len();
    if len == 0 || len > config.max_description_len {
        return Err(TreasuryError::DescriptionRequired);
    }
    Ok(())
}

/// Allocate the next ID and store a fresh proposal. All validation happens
/// before this is called, so a rejected proposal never consumes an ID.
fn create_proposal(
    env: &Env,
    config: &TreasuryConfig,
    proposer: Address,
    action: ProposalAction,
    description: String,
) -> Result<u64, TreasuryError> {
    let now = env.ledger().sequence();
    let proposal_id = storage::get_nonce(env)
        .checked_add(1)
        .ok_or(TreasuryError::ArithmeticOverflow)?;
    let expires_at = now
        .checked_add(config.proposal_duration)
        .ok_or(TreasuryError::ArithmeticOverflow)?;
    let kind = action.kind();

    let proposal = Proposal {
        id: proposal_id,
        proposer: proposer.clone(),
        action,
        description,
        created_at: now,
        expires_at,
        executed: false,
        executed_at: None,
        approval_count: 0,
    };

    storage::set_proposal(env, &proposal);
    storage::set_nonce(env, proposal_id);

    events::emit_proposal_created(env, proposal_id, &proposer, kind as u32, expires_at);

    Ok(proposal_id)
}

/// Validate and execute a proposal, optionally pinned to one kind
fn execute_proposal(
    env: &Env,
    caller: Address,
    proposal_id: u64,
    expected: Option<ProposalKind>,
) -> Result<ProposalKind, TreasuryError> {
    let (state, config) = load(env)?;

    caller.require_auth();

    let proposal = storage::get_proposal(env, proposal_id).ok_or(TreasuryError::ProposalNotFound)?;
    let target = proposal
        .action
        .member_target()
        .and_then(|address| storage::get_member(env, address));
    let now = env.ledger().sequence();

    let transition =
        executor::plan(&state, &config, &proposal, expected, target, now).map_err(|err| {
            log!(env, "execution rejected", proposal_id, err as u32);
            err
        })?;

    let kind = proposal.kind();
    commit(env, &caller, transition, now);
    Ok(kind)
}

/// Write a planned transition and publish its events
fn commit(env: &Env, executor: &Address, transition: Transition, now: u32) {
    let Transition {
        state,
        proposal,
        member,
        payout,
        previous_threshold,
    } = transition;

    storage::set_state(env, &state);
    storage::set_proposal(env, &proposal);

    match member {
        Some(MemberChange::Added(member)) => {
            if storage::get_member(env, &member.address).is_none() {
                storage::push_member_list(env, &member.address);
            }
            storage::set_member(env, &member);
            events::emit_member_added(
                env,
                &member.address,
                member.role as u32,
                proposal.id,
                state.member_count,
            );
        }
        Some(MemberChange::Removed(member)) => {
            storage::set_member(env, &member);
            events::emit_member_removed(env, &member.address, proposal.id, state.member_count);
        }
        None => {}
    }

    if let Some((recipient, amount)) = payout {
        events::emit_payout(env, proposal.id, &recipient, amount, state.balance);
    }

    if let Some(old) = previous_threshold {
        events::emit_threshold_updated(env, old, state.threshold, proposal.id);
    }

    events::emit_proposal_executed(env, proposal.id, executor, proposal.kind() as u32, now);
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct TreasuryCore;

#[contractimpl]
impl TreasuryCore {
    // ========================================================================
    // Initialization & Funding
    // ========================================================================

    /// Initialize the treasury with a founding Admin
    ///
    /// # Arguments
    /// * `caller` - Address submitting the initialization
    /// * `name` - Treasury label (1..=50 bytes)
    /// * `threshold` - Approvals required to execute a proposal
    /// * `founding_member` - First member, admitted as Admin
    ///
    /// # Errors
    /// * `AlreadyInitialized` - Treasury has already been initialized
    /// * `InvalidThreshold` - Threshold is below the minimum
    /// * `InvalidName` - Name is empty or too long
    pub fn initialize(
        env: Env,
        caller: Address,
        name: String,
        threshold: u32,
        founding_member: Address,
    ) -> Result<(), TreasuryError> {
        if storage::is_initialized(&env) {
            return Err(TreasuryError::AlreadyInitialized);
        }

        caller.require_auth();

        let config = TreasuryConfig::default();
        if threshold < config.min_threshold {
            return Err(TreasuryError::InvalidThreshold);
        }
        if name.len() == 0 || name.len() > config.max_name_len {
            return Err(TreasuryError::InvalidName);
        }

        let now = env.ledger().sequence();

        let founder = Member {
            address: founding_member.clone(),
            role: Role::Admin,
            joined_at: now,
            is_active: true,
        };
        let state = TreasuryState {
            name: name.clone(),
            threshold,
            member_count: 1,
            balance: 0,
            is_initialized: true,
        };

        storage::set_config(&env, &config);
        storage::set_member(&env, &founder);
        storage::push_member_list(&env, &founding_member);
        storage::set_nonce(&env, 0);
        storage::set_state(&env, &state);

        events::emit_initialized(&env, &name, &founding_member, threshold, now);

        Ok(())
    }

    /// Record funds received by the treasury
    ///
    /// Only the internal balance ledger changes; moving the asset itself is
    /// the settlement layer's job. Returns the new balance.
    ///
    /// # Errors
    /// * `NotInitialized` - Treasury not initialized
    /// * `InvalidAmount` - Amount is not positive
    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<i128, TreasuryError> {
        let (mut state, _) = load(&env)?;

        from.require_auth();

        if amount <= 0 {
            return Err(TreasuryError::InvalidAmount);
        }

        state.balance = state
            .balance
            .checked_add(amount)
            .ok_or(TreasuryError::ArithmeticOverflow)?;
        storage::set_state(&env, &state);

        events::emit_deposit(&env, &from, amount, state.balance);

        Ok(state.balance)
    }

    // ========================================================================
    // Proposal Creation
    // ========================================================================

    /// Propose paying `amount` to `target`
    ///
    /// # Errors
    /// * `NotInitialized` - Treasury not initialized
    /// * `NotAuthorized` - Caller is not an active Member or Admin
    /// * `DescriptionRequired` - Description is empty or too long
    /// * `InvalidAmount` - Amount is not positive
    /// * `InsufficientBalance` - Amount exceeds the current balance
    pub fn propose_transfer(
        env: Env,
        caller: Address,
        target: Address,
        amount: i128,
        description: String,
    ) -> Result<u64, TreasuryError> {
        let (state, config) = load(&env)?;

        caller.require_auth();
        require_role(&env, &caller, Role::Member)?;
        validate_description(&config, &description)?;

        if amount <= 0 {
            return Err(TreasuryError::InvalidAmount);
        }
        if amount > state.balance {
            return Err(TreasuryError::InsufficientBalance);
        }

        create_proposal(
            &env,
            &config,
            caller,
            ProposalAction::Transfer(target, amount),
            description,
        )
    }

    /// Propose admitting `target` with `role`
    ///
    /// # Errors
    /// * `NotInitialized` - Treasury not initialized
    /// * `NotAuthorized` - Caller is not an active Member or Admin
    /// * `DescriptionRequired` - Description is empty or too long
    /// * `AlreadyMember` - Target is already an active member
    /// * `CapacityExceeded` - Registry is full
    pub fn propose_add_member(
        env: Env,
        caller: Address,
        target: Address,
        role: Role,
        description: String,
    ) -> Result<u64, TreasuryError> {
        let (state, config) = load(&env)?;

        caller.require_auth();
        require_role(&env, &caller, Role::Member)?;
        validate_description(&config, &description)?;

        let existing = storage::get_member(&env, &target);
        registry::ensure_admissible(&state, &config, existing.as_ref())?;

        create_proposal(
            &env,
            &config,
            caller,
            ProposalAction::AddMember(target, role),
            description,
        )
    }

    /// Propose removing `target` (Admin only)
    ///
    /// # Errors
    /// * `NotInitialized` - Treasury not initialized
    /// * `NotAuthorized` - Caller is not an active Admin
    /// * `DescriptionRequired` - Description is empty or too long
    /// * `NotMember` - Target is not an active member
    pub fn propose_remove_member(
        env: Env,
        caller: Address,
        target: Address,
        description: String,
    ) -> Result<u64, TreasuryError> {
        let (_, config) = load(&env)?;

        caller.require_auth();
        require_role(&env, &caller, Role::Admin)?;
        validate_description(&config, &description)?;

        if !registry::is_member(storage::get_member(&env, &target).as_ref()) {
            return Err(TreasuryError::NotMember);
        }

        create_proposal(
            &env,
            &config,
            caller,
            ProposalAction::RemoveMember(target),
            description,
        )
    }

    /// Propose a new approval threshold (Admin only)
    ///
    /// Only the lower bound is enforced; a threshold above the member count is
    /// accepted.
    ///
    /// # Errors
    /// * `NotInitialized` - Treasury not initialized
    /// * `NotAuthorized` - Caller is not an active Admin
    /// * `DescriptionRequired` - Description is empty or too long
    /// * `InvalidThreshold` - New threshold is below the minimum
    pub fn propose_threshold_change(
        env: Env,
        caller: Address,
        new_threshold: u32,
        description: String,
    ) -> Result<u64, TreasuryError> {
        let (_, config) = load(&env)?;

        caller.require_auth();
        require_role(&env, &caller, Role::Admin)?;
        validate_description(&config, &description)?;

        if new_threshold < config.min_threshold {
            return Err(TreasuryError::InvalidThreshold);
        }

        create_proposal(
            &env,
            &config,
            caller,
            ProposalAction::ChangeThreshold(new_threshold),
            description,
        )
    }

    // ========================================================================
    // Voting
    // ========================================================================

    /// Cast the caller's single vote on a proposal
    ///
    /// # Errors
    /// * `NotInitialized` - Treasury not initialized
    /// * `NotAuthorized` - Caller is not an active Member or Admin
    /// * `ProposalNotFound` - No proposal with this ID
    /// * `ProposalAlreadyExecuted` - Proposal has been executed
    /// * `ProposalExpired` - Expiration window has passed
    /// * `AlreadyVoted` - Caller has already voted on this proposal
    pub fn vote_on_proposal(
        env: Env,
        caller: Address,
        proposal_id: u64,
        approve: bool,
    ) -> Result<(), TreasuryError> {
        load(&env)?;

        caller.require_auth();
        require_role(&env, &caller, Role::Member)?;

        let mut proposal =
            storage::get_proposal(&env, proposal_id).ok_or(TreasuryError::ProposalNotFound)?;

        if proposal.executed {
            return Err(TreasuryError::ProposalAlreadyExecuted);
        }

        let now = env.ledger().sequence();
        if quorum::is_expired(proposal.expires_at, now) {
            return Err(TreasuryError::ProposalExpired);
        }

        if storage::has_vote(&env, proposal_id, &caller) {
            log!(&env, "duplicate vote", proposal_id, caller.clone());
            return Err(TreasuryError::AlreadyVoted);
        }

        if approve {
            proposal.approval_count = proposal
                .approval_count
                .checked_add(1)
                .ok_or(TreasuryError::ArithmeticOverflow)?;
        }

        let vote = Vote {
            proposal_id,
            voter: caller.clone(),
            approved: approve,
            voted_at: now,
        };

        // Vote record and counter are written together
        storage::set_vote(&env, &vote);
        storage::set_proposal(&env, &proposal);

        events::emit_vote_cast(&env, proposal_id, &caller, approve, proposal.approval_count);

        Ok(())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Execute an approved transfer proposal
    ///
    /// # Errors
    /// * `ProposalNotFound`, `ProposalKindMismatch`, `ProposalAlreadyExecuted`,
    ///   `InsufficientApprovals`, `ProposalExpired`
    /// * `InsufficientBalance` - Balance dropped below the amount since proposal
    pub fn execute_transfer_proposal(
        env: Env,
        caller: Address,
        proposal_id: u64,
    ) -> Result<(), TreasuryError> {
        execute_proposal(&env, caller, proposal_id, Some(ProposalKind::Transfer)).map(|_| ())
    }

    /// Execute an approved add-member proposal
    ///
    /// # Errors
    /// * `ProposalNotFound`, `ProposalKindMismatch`, `ProposalAlreadyExecuted`,
    ///   `InsufficientApprovals`, `ProposalExpired`
    /// * `AlreadyMember`, `CapacityExceeded` - Registry changed since proposal
    pub fn execute_add_member_proposal(
        env: Env,
        caller: Address,
        proposal_id: u64,
    ) -> Result<(), TreasuryError> {
        execute_proposal(&env, caller, proposal_id, Some(ProposalKind::AddMember)).map(|_| ())
    }

    /// Execute an approved remove-member proposal
    ///
    /// # Errors
    /// * `ProposalNotFound`, `ProposalKindMismatch`, `ProposalAlreadyExecuted`,
    ///   `InsufficientApprovals`, `ProposalExpired`
    /// * `NotMember` - Target was removed since proposal
    pub fn execute_remove_member_proposal(
        env: Env,
        caller: Address,
        proposal_id: u64,
    ) -> Result<(), TreasuryError> {
        execute_proposal(&env, caller, proposal_id, Some(ProposalKind::RemoveMember)).map(|_| ())
    }

    /// Execute an approved threshold-change proposal
    ///
    /// # Errors
    /// * `ProposalNotFound`, `ProposalKindMismatch`, `ProposalAlreadyExecuted`,
    ///   `InsufficientApprovals`, `ProposalExpired`, `InvalidThreshold`
    pub fn execute_threshold_proposal(
        env: Env,
        caller: Address,
        proposal_id: u64,
    ) -> Result<(), TreasuryError> {
        execute_proposal(&env, caller, proposal_id, Some(ProposalKind::ChangeThreshold)).map(|_| ())
    }

    /// Execute any approved proposal, dispatching on its stored kind
    pub fn execute(
        env: Env,
        caller: Address,
        proposal_id: u64,
    ) -> Result<ProposalKind, TreasuryError> {
        execute_proposal(&env, caller, proposal_id, None)
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    /// Get the aggregate treasury state
    pub fn get_treasury_info(env: Env) -> TreasuryState {
        storage::get_state(&env).unwrap_or_else(|| TreasuryState::uninitialized(&env))
    }

    /// Get the member record for an address, including removed members
    pub fn get_member_info(env: Env, address: Address) -> Option<Member> {
        storage::get_member(&env, &address)
    }

    /// Get a proposal by ID, regardless of expiry
    pub fn get_proposal(env: Env, proposal_id: u64) -> Option<Proposal> {
        storage::get_proposal(&env, proposal_id)
    }

    /// Get a voter's vote on a proposal
    pub fn get_vote(env: Env, proposal_id: u64, voter: Address) -> Option<Vote> {
        storage::get_vote(&env, proposal_id, &voter)
    }

    /// Check if an address is an active member
    pub fn is_member(env: Env, address: Address) -> bool {
        registry::is_member(storage::get_member(&env, &address).as_ref())
    }

    /// Check if an address is active with at least `role`
    pub fn has_role_check(env: Env, address: Address, role: Role) -> bool {
        registry::has_role(storage::get_member(&env, &address).as_ref(), role)
    }

    /// Get the last allocated proposal ID
    pub fn get_proposal_nonce(env: Env) -> u64 {
        storage::get_nonce(&env)
    }

    /// Check if a proposal could be executed at the current ledger
    pub fn can_execute_proposal(env: Env, proposal_id: u64) -> bool {
        match (storage::get_state(&env), storage::get_proposal(&env, proposal_id)) {
            (Some(state), Some(proposal)) => quorum::can_execute(
                proposal.approval_count,
                state.threshold,
                proposal.executed,
                proposal.expires_at,
                env.ledger().sequence(),
            ),
            _ => false,
        }
    }

    /// Get the lifecycle status of a proposal at the current ledger
    pub fn get_proposal_status(env: Env, proposal_id: u64) -> Option<ProposalStatus> {
        let state = storage::get_state(&env)?;
        let proposal = storage::get_proposal(&env, proposal_id)?;
        Some(quorum::proposal_status(
            proposal.approval_count,
            state.threshold,
            proposal.executed,
            proposal.expires_at,
            env.ledger().sequence(),
        ))
    }

    /// Get every address ever admitted, in admission order
    ///
    /// Removed members stay in this history list, so it can grow past
    /// `max_members`. Use `get_active_members` for the current registry.
    pub fn get_members(env: Env) -> Vec<Address> {
        storage::get_member_list(&env)
    }

    /// Get the addresses of active members, in admission order
    pub fn get_active_members(env: Env) -> Vec<Address> {
        let mut active = Vec::new(&env);
        for address in storage::get_member_list(&env).iter() {
            if registry::is_member(storage::get_member(&env, &address).as_ref()) {
                active.push_back(address);
            }
        }
        active
    }

    /// Get the treasury configuration
    pub fn get_config(env: Env) -> Result<TreasuryConfig, TreasuryError> {
        if !storage::is_initialized(&env) {
            return Err(TreasuryError::NotInitialized);
        }
        storage::get_config(&env).ok_or(TreasuryError::NotInitialized)
    }
}
