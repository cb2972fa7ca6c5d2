//! Proposal execution as a single state transition
//!
//! [`plan`] takes the current treasury state and a proposal and either returns
//! the complete post-execution state or an error. Nothing is written until the
//! caller commits the returned [`Transition`], so a failed execution leaves no
//! partial effect behind.

use soroban_sdk::Address;

use crate::error::TreasuryError;
use crate::quorum;
use crate::registry;
use crate::types::{Member, Proposal, ProposalAction, ProposalKind, TreasuryConfig, TreasuryState};

/// Registry change produced by a membership proposal
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MemberChange {
    Added(Member),
    Removed(Member),
}

/// Complete result of executing a proposal
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    /// Treasury state after the effect
    pub state: TreasuryState,
    /// Proposal marked executed
    pub proposal: Proposal,
    /// Member record to write, for membership proposals
    pub member: Option<MemberChange>,
    /// Recipient and amount to report to the settlement layer, for transfers
    pub payout: Option<(Address, i128)>,
    /// Previous threshold, for threshold changes
    pub previous_threshold: Option<u32>,
}

/// Validate a proposal for execution at `now` and compute its effect.
///
/// `expected` is the kind the entry point was called for; `None` accepts any.
/// `target` is the stored member record of the action's target address.
pub fn plan(
    state: &TreasuryState,
    config: &TreasuryConfig,
    proposal: &Proposal,
    expected: Option<ProposalKind>,
    target: Option<Member>,
    now: u32,
) -> Result<Transition, TreasuryError> {
    if let Some(kind) = expected {
        if proposal.kind() != kind {
            return Err(TreasuryError::ProposalKindMismatch);
        }
    }
    if proposal.executed {
        return Err(TreasuryError::ProposalAlreadyExecuted);
    }
    if proposal.approval_count < state.threshold {
        return Err(TreasuryError::InsufficientApprovals);
    }
    if quorum::is_expired(proposal.expires_at, now) {
        return Err(TreasuryError::ProposalExpired);
    }

    let mut transition = Transition {
        state: state.clone(),
        proposal: Proposal {
            executed: true,
            executed_at: Some(now),
            ..proposal.clone()
        },
        member: None,
        payout: None,
        previous_threshold: None,
    };

    match &proposal.action {
        ProposalAction::Transfer(recipient, amount) => {
            if *amount <= 0 {
                return Err(TreasuryError::InvalidAmount);
            }
            if *amount > state.balance {
                return Err(TreasuryError::InsufficientBalance);
            }
            transition.state.balance = state
                .balance
                .checked_sub(*amount)
                .ok_or(TreasuryError::ArithmeticOverflow)?;
            transition.payout = Some((recipient.clone(), *amount));
        }
        ProposalAction::AddMember(address, role) => {
            let (next, member) = registry::admit(state, config, target, address, *role, now)?;
            transition.state = next;
            transition.member = Some(MemberChange::Added(member));
        }
        ProposalAction::RemoveMember(_) => {
            let (next, member) = registry::deactivate(state, target)?;
            transition.state = next;
            transition.member = Some(MemberChange::Removed(member));
        }
        ProposalAction::ChangeThreshold(new_threshold) => {
            if *new_threshold < config.min_threshold {
                return Err(TreasuryError::InvalidThreshold);
            }
            transition.previous_threshold = Some(state.threshold);
            transition.state.threshold = *new_threshold;
        }
    }

    Ok(transition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use soroban_sdk::{testutils::Address as _, Env, String};

    fn state(env: &Env, threshold: u32, balance: i128) -> TreasuryState {
        TreasuryState {
            name: String::from_str(env, "Executor"),
            threshold,
            member_count: 1,
            balance,
            is_initialized: true,
        }
    }

    fn proposal(env: &Env, action: ProposalAction, approval_count: u32) -> Proposal {
        Proposal {
            id: 1,
            proposer: Address::generate(env),
            action,
            description: String::from_str(env, "test"),
            created_at: 100,
            expires_at: 1540,
            executed: false,
            executed_at: None,
            approval_count,
        }
    }

    #[test]
    fn test_transfer_debits_exact_amount() {
        let env = Env::default();
        let recipient = Address::generate(&env);
        let p = proposal(&env, ProposalAction::Transfer(recipient.clone(), 400), 1);

        let t = plan(
            &state(&env, 1, 1_000),
            &TreasuryConfig::default(),
            &p,
            Some(ProposalKind::Transfer),
            None,
            200,
        )
        .unwrap();

        assert_eq!(t.state.balance, 600);
        assert_eq!(t.payout, Some((recipient, 400)));
        assert!(t.proposal.executed);
        assert_eq!(t.proposal.executed_at, Some(200));
    }

    #[test]
    fn test_transfer_rechecks_balance() {
        let env = Env::default();
        let p = proposal(&env, ProposalAction::Transfer(Address::generate(&env), 5_000), 1);

        let result = plan(&state(&env, 1, 1_000), &TreasuryConfig::default(), &p, None, None, 200);
        assert_eq!(result, Err(TreasuryError::InsufficientBalance));
    }

    #[test]
    fn test_check_order() {
        let env = Env::default();
        let config = TreasuryConfig::default();
        let treasury = state(&env, 2, 1_000);

        let mut p = proposal(&env, ProposalAction::ChangeThreshold(3), 1);

        // Wrong entry point is reported first
        assert_eq!(
            plan(&treasury, &config, &p, Some(ProposalKind::Transfer), None, 200),
            Err(TreasuryError::ProposalKindMismatch)
        );

        // Below threshold beats expiry
        assert_eq!(
            plan(&treasury, &config, &p, None, None, 5_000),
            Err(TreasuryError::InsufficientApprovals)
        );

        p.approval_count = 2;
        assert_eq!(
            plan(&treasury, &config, &p, None, None, 1540),
            Err(TreasuryError::ProposalExpired)
        );

        p.executed = true;
        assert_eq!(
            plan(&treasury, &config, &p, None, None, 5_000),
            Err(TreasuryError::ProposalAlreadyExecuted)
        );
    }

    #[test]
    fn test_threshold_change() {
        let env = Env::default();
        let p = proposal(&env, ProposalAction::ChangeThreshold(3), 1);

        let t = plan(&state(&env, 1, 0), &TreasuryConfig::default(), &p, None, None, 200).unwrap();
        assert_eq!(t.state.threshold, 3);
        assert_eq!(t.previous_threshold, Some(1));

        let zero = proposal(&env, ProposalAction::ChangeThreshold(0), 1);
        assert_eq!(
            plan(&state(&env, 1, 0), &TreasuryConfig::default(), &zero, None, None, 200),
            Err(TreasuryError::InvalidThreshold)
        );
    }

    #[test]
    fn test_membership_changes() {
        let env = Env::default();
        let config = TreasuryConfig::default();
        let newcomer = Address::generate(&env);

        let add = proposal(&env, ProposalAction::AddMember(newcomer.clone(), Role::Viewer), 1);
        let t = plan(&state(&env, 1, 0), &config, &add, None, None, 300).unwrap();
        assert_eq!(t.state.member_count, 2);
        let added = match t.member {
            Some(MemberChange::Added(m)) => m,
            other => panic!("unexpected change: {:?}", other),
        };
        assert_eq!(added.address, newcomer);
        assert_eq!(added.joined_at, 300);

        let remove = proposal(&env, ProposalAction::RemoveMember(newcomer.clone()), 1);
        let mut two_members = state(&env, 1, 0);
        two_members.member_count = 2;
        let t = plan(&two_members, &config, &remove, None, Some(added.clone()), 400).unwrap();
        assert_eq!(t.state.member_count, 1);
        assert_eq!(t.member, Some(MemberChange::Removed(Member { is_active: false, ..added })));

        // Target already gone
        assert_eq!(
            plan(&two_members, &config, &remove, None, None, 400),
            Err(TreasuryError::NotMember)
        );
    }
}
