use crate::types::{Vote, VoteOption, VotingConfiguration, VotingOutcome, VotingResults};
use chrono::{DateTime, Utc};
use synod_types::ProposalId;
use tracing::debug;

/// Pure tally computation over a proposal's vote set.
///
/// Deterministic and side-effect free: the same votes, configuration,
/// eligible power, and `as_of` timestamp always produce an identical
/// [`VotingResults`]. The service invokes it both for live in-progress
/// checks during an open window and for final tallying.
pub struct VotingEngine;

impl VotingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute [`VotingResults`] for a vote set.
    ///
    /// Outcome precedence, first match wins:
    /// 1. veto power present on an emergency proposal → `Vetoed`
    /// 2. quorum not achieved → `QuorumNotMet`
    /// 3. approval threshold met → `Approved`
    /// 4. otherwise → `Rejected`
    ///
    /// `execution_authorized` always starts false; only the human
    /// approval step may flip it.
    pub fn tally(
        &self,
        proposal_id: &ProposalId,
        votes: &[Vote],
        config: &VotingConfiguration,
        total_eligible_power: f64,
        emergency: bool,
        as_of: DateTime<Utc>,
    ) -> VotingResults {
        let mut votes_for = 0usize;
        let mut votes_against = 0usize;
        let mut votes_abstain = 0usize;
        let mut votes_veto = 0usize;
        let mut power_for = 0.0f64;
        let mut power_against = 0.0f64;
        let mut power_abstain = 0.0f64;
        let mut power_veto = 0.0f64;
        let mut delegated_votes_count = 0usize;

        for vote in votes {
            match vote.option {
                VoteOption::For => {
                    votes_for += 1;
                    power_for += vote.voting_power;
                }
                VoteOption::Against => {
                    votes_against += 1;
                    power_against += vote.voting_power;
                }
                VoteOption::Abstain => {
                    votes_abstain += 1;
                    power_abstain += vote.voting_power;
                }
                VoteOption::Veto => {
                    votes_veto += 1;
                    power_veto += vote.voting_power;
                }
            }
            if !vote.delegated.is_empty() {
                delegated_votes_count += 1;
            }
        }

        // Abstentions count toward participation and quorum, but not
        // toward the approval-rate numerator.
        let total_voting_power = power_for + power_against + power_abstain + power_veto;

        let participation_rate = if total_eligible_power > 0.0 {
            total_voting_power / total_eligible_power * 100.0
        } else {
            0.0
        };
        // Boundary is inclusive: participation exactly at quorum passes.
        let quorum_achieved = participation_rate >= config.quorum_percentage;

        let approval_rate = if total_voting_power > 0.0 {
            power_for / total_voting_power * 100.0
        } else {
            0.0
        };
        let approval_threshold_met = approval_rate >= config.approval_threshold_percentage;

        let outcome = if power_veto > 0.0 && emergency {
            VotingOutcome::Vetoed
        } else if !quorum_achieved {
            VotingOutcome::QuorumNotMet
        } else if approval_threshold_met {
            VotingOutcome::Approved
        } else {
            VotingOutcome::Rejected
        };

        debug!(
            proposal_id = %proposal_id,
            participation = participation_rate,
            approval = approval_rate,
            outcome = outcome.as_str(),
            "tally computed"
        );

        VotingResults {
            proposal_id: proposal_id.clone(),
            total_votes_cast: votes.len(),
            unique_voters: votes.len(),
            delegated_votes_count,
            votes_for,
            votes_against,
            votes_abstain,
            votes_veto,
            power_for,
            power_against,
            power_abstain,
            power_veto,
            total_voting_power,
            participation_rate,
            quorum_achieved,
            approval_rate,
            approval_threshold_met,
            outcome,
            execution_authorized: false,
            voting_ended_at: as_of,
            finalized_at: as_of,
        }
    }

    /// Advisory early-execution predicate: threshold met with very high
    /// participation on a proposal whose configuration allows it. Never
    /// transitions state and never bypasses the human-approval gate.
    pub fn early_execution_eligible(
        &self,
        results: &VotingResults,
        config: &VotingConfiguration,
    ) -> bool {
        config.early_execution_allowed
            && results.approval_threshold_met
            && results.participation_rate > 75.0
    }
}

impl Default for VotingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VotingPowerMode;
    use synod_types::{AgentId, TxRef};

    fn config(quorum: f64, threshold: f64) -> VotingConfiguration {
        VotingConfiguration {
            quorum_percentage: quorum,
            approval_threshold_percentage: threshold,
            voting_period_hours: 168,
            power_mode: VotingPowerMode::Hybrid,
            delegation_allowed: true,
            early_execution_allowed: false,
        }
    }

    fn vote(id: &ProposalId, voter: &str, option: VoteOption, power: f64) -> Vote {
        Vote {
            proposal_id: id.clone(),
            voter: AgentId::from(voter),
            option,
            voting_power: power,
            reason: None,
            delegated: vec![],
            timestamp: Utc::now(),
            signature: "sig".into(),
            tx_ref: TxRef::generate(),
        }
    }

    #[test]
    fn test_scenario_a_approved() {
        // quorum 20%, threshold 66%, eligible 10000
        // FOR power 3000 across three votes, AGAINST 500
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![
            vote(&id, "ceo", VoteOption::For, 1000.0),
            vote(&id, "cto", VoteOption::For, 1200.0),
            vote(&id, "cfo", VoteOption::For, 800.0),
            vote(&id, "clo", VoteOption::Against, 500.0),
        ];

        let results = engine.tally(&id, &votes, &config(20.0, 66.0), 10_000.0, false, Utc::now());

        assert_eq!(results.total_voting_power, 3500.0);
        assert_eq!(results.participation_rate, 35.0);
        assert!(results.quorum_achieved);
        assert!((results.approval_rate - 3000.0 / 3500.0 * 100.0).abs() < 1e-9);
        assert!(results.approval_threshold_met);
        assert_eq!(results.outcome, VotingOutcome::Approved);
        assert!(!results.execution_authorized);
    }

    #[test]
    fn test_scenario_b_quorum_not_met() {
        // 10% participation against a 20% quorum fails regardless of direction
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![vote(&id, "ceo", VoteOption::For, 1000.0)];

        let results = engine.tally(&id, &votes, &config(20.0, 66.0), 10_000.0, false, Utc::now());

        assert_eq!(results.participation_rate, 10.0);
        assert!(!results.quorum_achieved);
        // 100% approval does not rescue a failed quorum
        assert!(results.approval_threshold_met);
        assert_eq!(results.outcome, VotingOutcome::QuorumNotMet);
    }

    #[test]
    fn test_scenario_c_emergency_veto_wins() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![
            vote(&id, "ceo", VoteOption::For, 5000.0),
            vote(&id, "cto", VoteOption::For, 3000.0),
            vote(&id, "clo", VoteOption::Veto, 1.0),
        ];

        let results = engine.tally(&id, &votes, &config(20.0, 66.0), 10_000.0, true, Utc::now());
        assert_eq!(results.outcome, VotingOutcome::Vetoed);
    }

    #[test]
    fn test_veto_without_emergency_flag_is_not_decisive() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![
            vote(&id, "ceo", VoteOption::For, 5000.0),
            vote(&id, "clo", VoteOption::Veto, 100.0),
        ];

        let results = engine.tally(&id, &votes, &config(20.0, 66.0), 10_000.0, false, Utc::now());
        // Veto power participates but does not kill a non-emergency proposal
        assert_eq!(results.outcome, VotingOutcome::Approved);
    }

    #[test]
    fn test_quorum_boundary_inclusive() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![vote(&id, "ceo", VoteOption::For, 2000.0)];

        // Exactly 20% participation meets a 20% quorum
        let results = engine.tally(&id, &votes, &config(20.0, 66.0), 10_000.0, false, Utc::now());
        assert_eq!(results.participation_rate, 20.0);
        assert!(results.quorum_achieved);
        assert_eq!(results.outcome, VotingOutcome::Approved);
    }

    #[test]
    fn test_zero_votes_divide_by_zero_guard() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();

        let results = engine.tally(&id, &[], &config(20.0, 66.0), 10_000.0, false, Utc::now());
        assert_eq!(results.approval_rate, 0.0);
        assert_eq!(results.participation_rate, 0.0);
        assert_eq!(results.outcome, VotingOutcome::QuorumNotMet);
    }

    #[test]
    fn test_zero_eligible_power_guard() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![vote(&id, "ceo", VoteOption::For, 100.0)];

        let results = engine.tally(&id, &votes, &config(20.0, 66.0), 0.0, false, Utc::now());
        assert_eq!(results.participation_rate, 0.0);
        assert_eq!(results.outcome, VotingOutcome::QuorumNotMet);
    }

    #[test]
    fn test_abstain_counts_toward_quorum_not_approval() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![
            vote(&id, "ceo", VoteOption::For, 1000.0),
            vote(&id, "cto", VoteOption::Abstain, 1500.0),
        ];

        let results = engine.tally(&id, &votes, &config(20.0, 50.0), 10_000.0, false, Utc::now());

        // Abstain power lifts participation past quorum...
        assert_eq!(results.participation_rate, 25.0);
        assert!(results.quorum_achieved);
        // ...but dilutes the approval rate: 1000 / 2500 = 40% < 50%
        assert_eq!(results.approval_rate, 40.0);
        assert_eq!(results.outcome, VotingOutcome::Rejected);
    }

    #[test]
    fn test_tally_is_deterministic() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![
            vote(&id, "ceo", VoteOption::For, 1000.0),
            vote(&id, "cto", VoteOption::Against, 700.0),
            vote(&id, "cfo", VoteOption::Abstain, 300.0),
        ];
        let cfg = config(20.0, 66.0);
        let as_of = Utc::now();

        let first = engine.tally(&id, &votes, &cfg, 10_000.0, false, as_of);
        let second = engine.tally(&id, &votes, &cfg, 10_000.0, false, as_of);
        assert_eq!(first, second);
    }

    #[test]
    fn test_early_execution_predicate() {
        let engine = VotingEngine::new();
        let id = ProposalId::generate();
        let votes = vec![vote(&id, "ceo", VoteOption::For, 8000.0)];

        let mut cfg = config(20.0, 66.0);
        let results = engine.tally(&id, &votes, &cfg, 10_000.0, false, Utc::now());

        // 80% participation, threshold met, but config forbids it
        assert!(!engine.early_execution_eligible(&results, &cfg));

        cfg.early_execution_allowed = true;
        assert!(engine.early_execution_eligible(&results, &cfg));
    }
}
