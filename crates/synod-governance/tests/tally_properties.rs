//! Property tests for the tally engine: power conservation, rate
//! bounds, outcome precedence, and the execution-authorization gate.

use chrono::Utc;
use proptest::prelude::*;
use synod_governance::{
    Vote, VoteOption, VotingConfiguration, VotingEngine, VotingOutcome, VotingPowerMode,
};
use synod_types::{AgentId, ProposalId, TxRef};

fn arb_option() -> impl Strategy<Value = VoteOption> {
    prop_oneof![
        Just(VoteOption::For),
        Just(VoteOption::Against),
        Just(VoteOption::Abstain),
        Just(VoteOption::Veto),
    ]
}

fn arb_votes(id: ProposalId) -> impl Strategy<Value = Vec<Vote>> {
    prop::collection::vec((arb_option(), 0.1f64..10_000.0), 0..50).prop_map(move |raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (option, power))| Vote {
                proposal_id: id.clone(),
                voter: AgentId::from(format!("agent-{i}").as_str()),
                option,
                voting_power: power,
                reason: None,
                delegated: vec![],
                timestamp: Utc::now(),
                signature: "sig".into(),
                tx_ref: TxRef::generate(),
            })
            .collect()
    })
}

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

proptest! {
    #[test]
    fn power_sums_are_conserved(
        (votes, quorum, threshold, eligible, emergency) in (
            Just(ProposalId::generate()).prop_flat_map(arb_votes),
            0.0f64..100.0,
            0.0f64..100.0,
            1.0f64..1_000_000.0,
            any::<bool>(),
        )
    ) {
        let id = votes.first().map(|v| v.proposal_id.clone()).unwrap_or_else(ProposalId::generate);
        let results = VotingEngine::new().tally(
            &id, &votes, &config(quorum, threshold), eligible, emergency, Utc::now(),
        );

        let cast: f64 = votes.iter().map(|v| v.voting_power).sum();
        let summed = results.power_for + results.power_against
            + results.power_abstain + results.power_veto;
        prop_assert!((results.total_voting_power - cast).abs() < 1e-6);
        prop_assert!((summed - cast).abs() < 1e-6);
        prop_assert_eq!(
            results.votes_for + results.votes_against
                + results.votes_abstain + results.votes_veto,
            votes.len()
        );
    }

    #[test]
    fn rates_stay_in_bounds(
        (votes, quorum, threshold) in (
            Just(ProposalId::generate()).prop_flat_map(arb_votes),
            0.0f64..100.0,
            0.0f64..100.0,
        )
    ) {
        let id = votes.first().map(|v| v.proposal_id.clone()).unwrap_or_else(ProposalId::generate);
        let results = VotingEngine::new().tally(
            &id, &votes, &config(quorum, threshold), 1_000_000.0, false, Utc::now(),
        );

        prop_assert!(results.approval_rate >= 0.0 && results.approval_rate <= 100.0);
        prop_assert!(results.participation_rate >= 0.0);
    }

    #[test]
    fn outcome_precedence_holds(
        (votes, quorum, threshold, eligible, emergency) in (
            Just(ProposalId::generate()).prop_flat_map(arb_votes),
            0.0f64..100.0,
            0.0f64..100.0,
            1.0f64..100_000.0,
            any::<bool>(),
        )
    ) {
        let id = votes.first().map(|v| v.proposal_id.clone()).unwrap_or_else(ProposalId::generate);
        let results = VotingEngine::new().tally(
            &id, &votes, &config(quorum, threshold), eligible, emergency, Utc::now(),
        );

        match results.outcome {
            VotingOutcome::Vetoed => {
                prop_assert!(emergency && results.power_veto > 0.0);
            }
            VotingOutcome::QuorumNotMet => {
                prop_assert!(!results.quorum_achieved);
                prop_assert!(!(emergency && results.power_veto > 0.0));
            }
            VotingOutcome::Approved => {
                prop_assert!(results.quorum_achieved);
                prop_assert!(results.approval_threshold_met);
            }
            VotingOutcome::Rejected => {
                prop_assert!(results.quorum_achieved);
                prop_assert!(!results.approval_threshold_met);
            }
        }
    }

    #[test]
    fn tally_never_authorizes_execution(
        (votes, emergency) in (
            Just(ProposalId::generate()).prop_flat_map(arb_votes),
            any::<bool>(),
        )
    ) {
        let id = votes.first().map(|v| v.proposal_id.clone()).unwrap_or_else(ProposalId::generate);
        let results = VotingEngine::new().tally(
            &id, &votes, &config(0.0, 0.0), 1.0, emergency, Utc::now(),
        );
        // Even a unanimous emergency approval needs the human gate
        prop_assert!(!results.execution_authorized);
    }

    #[test]
    fn tally_is_idempotent(
        votes in Just(ProposalId::generate()).prop_flat_map(arb_votes)
    ) {
        let id = votes.first().map(|v| v.proposal_id.clone()).unwrap_or_else(ProposalId::generate);
        let cfg = config(20.0, 66.0);
        let as_of = Utc::now();
        let engine = VotingEngine::new();

        let first = engine.tally(&id, &votes, &cfg, 50_000.0, false, as_of);
        let second = engine.tally(&id, &votes, &cfg, 50_000.0, false, as_of);
        prop_assert_eq!(first, second);
    }
}
