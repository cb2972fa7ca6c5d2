//! Member registry rules
//!
//! Pure functions over a [`TreasuryState`] and the target's stored [`Member`]
//! record. They return the updated values and never touch storage, so callers
//! can commit registry changes together with the rest of a transition.

use soroban_sdk::Address;

use crate::error::TreasuryError;
use crate::types::{Member, Role, TreasuryConfig, TreasuryState};

/// True iff the record exists and is active.
pub fn is_member(member: Option<&Member>) -> bool {
    member.map(|m| m.is_active).unwrap_or(false)
}

/// True iff the record is active and its role covers `min_role`.
pub fn has_role(member: Option<&Member>, min_role: Role) -> bool {
    match member {
        Some(m) => m.is_active && m.role.satisfies(min_role),
        None => false,
    }
}

/// Check that `existing` may be admitted into the registry.
pub fn ensure_admissible(
    state: &TreasuryState,
    config: &TreasuryConfig,
    existing: Option<&Member>,
) -> Result<(), TreasuryError> {
    if is_member(existing) {
        return Err(TreasuryError::AlreadyMember);
    }
    if state.member_count >= config.max_members {
        return Err(TreasuryError::CapacityExceeded);
    }
    Ok(())
}

/// Admit `address` with `role`.
///
/// A previously removed member is reactivated with the new role and keeps its
/// original `joined_at`.
pub fn admit(
    state: &TreasuryState,
    config: &TreasuryConfig,
    existing: Option<Member>,
    address: &Address,
    role: Role,
    now: u32,
) -> Result<(TreasuryState, Member), TreasuryError> {
    ensure_admissible(state, config, existing.as_ref())?;

    let member_count = state
        .member_count
        .checked_add(1)
        .ok_or(TreasuryError::ArithmeticOverflow)?;

    let member = match existing {
        Some(previous) => Member {
            role,
            is_active: true,
            ..previous
        },
        None => Member {
            address: address.clone(),
            role,
            joined_at: now,
            is_active: true,
        },
    };

    let mut next = state.clone();
    next.member_count = member_count;
    Ok((next, member))
}

/// Deactivate an active member.
pub fn deactivate(
    state: &TreasuryState,
    existing: Option<Member>,
) -> Result<(TreasuryState, Member), TreasuryError> {
    let member = match existing {
        Some(m) if m.is_active => m,
        _ => return Err(TreasuryError::NotMember),
    };

    let member_count = state
        .member_count
        .checked_sub(1)
        .ok_or(TreasuryError::ArithmeticOverflow)?;

    let mut next = state.clone();
    next.member_count = member_count;
    Ok((
        next,
        Member {
            is_active: false,
            ..member
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Env, String};

    fn state(env: &Env, member_count: u32) -> TreasuryState {
        TreasuryState {
            name: String::from_str(env, "Registry"),
            threshold: 1,
            member_count,
            balance: 0,
            is_initialized: true,
        }
    }

    fn member(address: &Address, role: Role, is_active: bool) -> Member {
        Member {
            address: address.clone(),
            role,
            joined_at: 7,
            is_active,
        }
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Admin.satisfies(Role::Member));
        assert!(Role::Admin.satisfies(Role::Viewer));
        assert!(!Role::Member.satisfies(Role::Admin));
        assert!(Role::Member.satisfies(Role::Member));
        assert!(Role::Member.satisfies(Role::Viewer));
        assert!(!Role::Viewer.satisfies(Role::Member));
        assert!(Role::Viewer.satisfies(Role::Viewer));
    }

    #[test]
    fn test_inactive_member_has_no_role() {
        let env = Env::default();
        let addr = Address::generate(&env);
        let removed = member(&addr, Role::Admin, false);

        assert!(!is_member(Some(&removed)));
        assert!(!has_role(Some(&removed), Role::Viewer));
        assert!(!has_role(None, Role::Viewer));
    }

    #[test]
    fn test_admit_new_member() {
        let env = Env::default();
        let addr = Address::generate(&env);
        let config = TreasuryConfig::default();

        let (next, admitted) =
            admit(&state(&env, 1), &config, None, &addr, Role::Member, 42).unwrap();

        assert_eq!(next.member_count, 2);
        assert_eq!(admitted.address, addr);
        assert_eq!(admitted.role, Role::Member);
        assert_eq!(admitted.joined_at, 42);
        assert!(admitted.is_active);
    }

    #[test]
    fn test_admit_reactivates_and_keeps_joined_at() {
        let env = Env::default();
        let addr = Address::generate(&env);
        let config = TreasuryConfig::default();
        let removed = member(&addr, Role::Viewer, false);

        let (next, readmitted) =
            admit(&state(&env, 1), &config, Some(removed), &addr, Role::Admin, 900).unwrap();

        assert_eq!(next.member_count, 2);
        assert_eq!(readmitted.role, Role::Admin);
        assert_eq!(readmitted.joined_at, 7);
        assert!(readmitted.is_active);
    }

    #[test]
    fn test_admit_rejects_active_member() {
        let env = Env::default();
        let addr = Address::generate(&env);
        let config = TreasuryConfig::default();
        let active = member(&addr, Role::Member, true);

        let result = admit(&state(&env, 1), &config, Some(active), &addr, Role::Member, 1);
        assert_eq!(result, Err(TreasuryError::AlreadyMember));
    }

    #[test]
    fn test_admit_rejects_full_registry() {
        let env = Env::default();
        let addr = Address::generate(&env);
        let config = TreasuryConfig::default();

        let result = admit(&state(&env, config.max_members), &config, None, &addr, Role::Member, 1);
        assert_eq!(result, Err(TreasuryError::CapacityExceeded));
    }

    #[test]
    fn test_deactivate() {
        let env = Env::default();
        let addr = Address::generate(&env);

        let (next, removed) =
            deactivate(&state(&env, 2), Some(member(&addr, Role::Member, true))).unwrap();
        assert_eq!(next.member_count, 1);
        assert!(!removed.is_active);
        assert_eq!(removed.joined_at, 7);

        assert_eq!(deactivate(&state(&env, 1), Some(removed)), Err(TreasuryError::NotMember));
        assert_eq!(deactivate(&state(&env, 1), None), Err(TreasuryError::NotMember));
    }
}
