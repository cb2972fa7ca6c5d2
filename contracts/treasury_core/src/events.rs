use soroban_sdk::{contractevent, Address, Env, String};

#[contractevent(topics = ["TreasuryCore", "INIT"])]
struct TreasuryInitialized {
    name: String,
    founding_member: Address,
    threshold: u32,
    ledger: u32,
}

#[contractevent(topics = ["TreasuryCore", "DEPOSIT"])]
struct DepositRecorded {
    from: Address,
    amount: i128,
    balance: i128,
}

#[contractevent(topics = ["TreasuryCore", "PROPOSED"])]
struct ProposalCreated {
    proposal_id: u64,
    proposer: Address,
    kind: u32, // 1=Transfer, 2=AddMember, 3=RemoveMember, 4=ChangeThreshold
    expires_at: u32,
}

#[contractevent(topics = ["TreasuryCore", "VOTED"])]
struct VoteCast {
    proposal_id: u64,
    voter: Address,
    approved: bool,
    approval_count: u32,
}

#[contractevent(topics = ["TreasuryCore", "EXECUTED"])]
struct ProposalExecuted {
    proposal_id: u64,
    executor: Address,
    kind: u32,
    ledger: u32,
}

#[contractevent(topics = ["TreasuryCore", "PAYOUT"])]
struct PayoutAuthorized {
    proposal_id: u64,
    recipient: Address,
    amount: i128,
    balance: i128,
}

#[contractevent(topics = ["TreasuryCore", "MEMBER_ADD"])]
struct MemberAdded {
    member: Address,
    role: u32,
    proposal_id: u64,
    member_count: u32,
}

#[contractevent(topics = ["TreasuryCore", "MEMBER_REM"])]
struct MemberRemoved {
    member: Address,
    proposal_id: u64,
    member_count: u32,
}

#[contractevent(topics = ["TreasuryCore", "THRESH_UPD"])]
struct ThresholdUpdated {
    old: u32,
    new: u32,
    proposal_id: u64,
}

pub fn emit_initialized(
    env: &Env,
    name: &String,
    founding_member: &Address,
    threshold: u32,
    ledger: u32,
) {
    TreasuryInitialized {
        name: name.clone(),
        founding_member: founding_member.clone(),
        threshold,
        ledger,
    }
    .publish(env);
}

pub fn emit_deposit(env: &Env, from: &Address, amount: i128, balance: i128) {
    DepositRecorded {
        from: from.clone(),
        amount,
        balance,
    }
    .publish(env);
}

pub fn emit_proposal_created(
    env: &Env,
    proposal_id: u64,
    proposer: &Address,
    kind: u32,
    expires_at: u32,
) {
    ProposalCreated {
        proposal_id,
        proposer: proposer.clone(),
        kind,
        expires_at,
    }
    .publish(env);
}

pub fn emit_vote_cast(
    env: &Env,
    proposal_id: u64,
    voter: &Address,
    approved: bool,
    approval_count: u32,
) {
    VoteCast {
        proposal_id,
        voter: voter.clone(),
        approved,
        approval_count,
    }
    .publish(env);
}

pub fn emit_proposal_executed(
    env: &Env,
    proposal_id: u64,
    executor: &Address,
    kind: u32,
    ledger: u32,
) {
    ProposalExecuted {
        proposal_id,
        executor: executor.clone(),
        kind,
        ledger,
    }
    .publish(env);
}

pub fn emit_payout(env: &Env, proposal_id: u64, recipient: &Address, amount: i128, balance: i128) {
    PayoutAuthorized {
        proposal_id,
        recipient: recipient.clone(),
        amount,
        balance,
    }
    .publish(env);
}

pub fn emit_member_added(
    env: &Env,
    member: &Address,
    role: u32,
    proposal_id: u64,
    member_count: u32,
) {
    MemberAdded {
        member: member.clone(),
        role,
        proposal_id,
        member_count,
    }
    .publish(env);
}

pub fn emit_member_removed(env: &Env, member: &Address, proposal_id: u64, member_count: u32) {
    MemberRemoved {
        member: member.clone(),
        proposal_id,
        member_count,
    }
    .publish(env);
}

pub fn emit_threshold_updated(env: &Env, old: u32, new: u32, proposal_id: u64) {
    ThresholdUpdated {
        old,
        new,
        proposal_id,
    }
    .publish(env);
}
