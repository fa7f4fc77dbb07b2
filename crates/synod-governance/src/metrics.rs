//! Prometheus metrics for the governance engine
//!
//! Tracks proposal lifecycle, voting activity, the human-approval gate,
//! and oracle health.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Histogram, IntCounter, IntCounterVec, IntGauge,
};

// ========== Proposal Lifecycle Metrics ==========

/// Number of non-terminal proposals
pub static ACTIVE_PROPOSALS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "synod_governance_active_proposals",
        "Number of non-terminal governance proposals"
    )
    .unwrap()
});

/// Proposals created, by type
pub static PROPOSALS_CREATED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "synod_governance_proposals_created_total",
        "Total proposals created",
        &["kind"]
    )
    .unwrap()
});

/// Proposal lifecycle transitions
pub static PROPOSAL_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "synod_governance_proposal_transitions_total",
        "Total proposal lifecycle transitions",
        &["from_status", "to_status"]
    )
    .unwrap()
});

/// Finalization outcomes
pub static VOTING_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "synod_governance_voting_outcomes_total",
        "Total finalized voting outcomes",
        &["outcome"]
    )
    .unwrap()
});

// ========== Voting Metrics ==========

/// Votes cast, by option
pub static VOTES_CAST: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "synod_governance_votes_cast_total",
        "Total votes cast",
        &["option"]
    )
    .unwrap()
});

/// Vote rejections, by reason
pub static VOTE_REJECTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "synod_governance_vote_rejections_total",
        "Total rejected vote submissions",
        &["reason"]
    )
    .unwrap()
});

/// Quorum checks at finalization
pub static QUORUM_CHECKS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "synod_governance_quorum_checks_total",
        "Total quorum checks performed",
        &["result"]
    )
    .unwrap()
});

/// Tally computation time
pub static TALLY_TIME: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "synod_governance_tally_seconds",
        "Time to tally votes for a proposal"
    )
    .unwrap()
});

// ========== Human Gate Metrics ==========

/// Human approval decisions
pub static HUMAN_DECISIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "synod_governance_human_decisions_total",
        "Total human approval decisions processed",
        &["decision"]
    )
    .unwrap()
});

// ========== Oracle Metrics ==========

/// Oracle call timeouts
pub static ORACLE_TIMEOUTS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "synod_governance_oracle_timeouts_total",
        "Total voting-power-oracle calls that exceeded the deadline"
    )
    .unwrap()
});

/// Cognitive analysis failures (advisory step, never fatal)
pub static COGNITIVE_ANALYSIS_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "synod_governance_cognitive_analysis_failures_total",
        "Total cognitive analysis attempts that failed or timed out"
    )
    .unwrap()
});
