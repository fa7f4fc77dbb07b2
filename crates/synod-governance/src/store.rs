use crate::types::{Proposal, Vote};
use crate::{GovernanceError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use synod_types::ProposalId;
use tokio::sync::RwLock;
use tracing::debug;

/// Repository seam for proposal and vote persistence.
///
/// The governance service is the single writer; a durable backing store
/// can be substituted without touching state-machine logic. Implementations
/// must make `append_vote` atomic: the duplicate-voter check and the insert
/// happen under one critical section.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Insert a new proposal keyed by its id.
    async fn create(&self, proposal: Proposal) -> Result<()>;

    /// Fetch a proposal by id.
    async fn get(&self, id: &ProposalId) -> Result<Proposal>;

    /// Replace the stored proposal (status/result updates).
    async fn put(&self, proposal: Proposal) -> Result<()>;

    /// Append a vote, rejecting duplicates by `(proposal_id, voter)`.
    async fn append_vote(&self, id: &ProposalId, vote: Vote) -> Result<()>;

    /// All votes recorded for a proposal, in cast order.
    async fn votes(&self, id: &ProposalId) -> Result<Vec<Vote>>;

    /// All proposals, unordered.
    async fn list(&self) -> Result<Vec<Proposal>>;
}

struct ProposalRecord {
    proposal: Proposal,
    votes: Vec<Vote>,
}

/// In-memory repository backing the reference deployment.
pub struct MemoryProposalStore {
    records: RwLock<HashMap<ProposalId, ProposalRecord>>,
}

impl MemoryProposalStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProposalRepository for MemoryProposalStore {
    async fn create(&self, proposal: Proposal) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&proposal.id) {
            return Err(GovernanceError::DuplicateId(proposal.id.to_string()));
        }
        debug!(proposal_id = %proposal.id, "proposal inserted");
        records.insert(
            proposal.id.clone(),
            ProposalRecord {
                proposal,
                votes: Vec::new(),
            },
        );
        Ok(())
    }

    async fn get(&self, id: &ProposalId) -> Result<Proposal> {
        let records = self.records.read().await;
        records
            .get(id)
            .map(|r| r.proposal.clone())
            .ok_or_else(|| GovernanceError::NotFound(format!("proposal {id}")))
    }

    async fn put(&self, proposal: Proposal) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&proposal.id)
            .ok_or_else(|| GovernanceError::NotFound(format!("proposal {}", proposal.id)))?;
        record.proposal = proposal;
        Ok(())
    }

    async fn append_vote(&self, id: &ProposalId, vote: Vote) -> Result<()> {
        // Duplicate check and insert under one write guard so concurrent
        // casts for the same voter cannot both pass.
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| GovernanceError::NotFound(format!("proposal {id}")))?;

        if record.votes.iter().any(|v| v.voter == vote.voter) {
            return Err(GovernanceError::DuplicateVote {
                proposal_id: id.to_string(),
                voter: vote.voter.to_string(),
            });
        }

        record.votes.push(vote);
        Ok(())
    }

    async fn votes(&self, id: &ProposalId) -> Result<Vec<Vote>> {
        let records = self.records.read().await;
        records
            .get(id)
            .map(|r| r.votes.clone())
            .ok_or_else(|| GovernanceError::NotFound(format!("proposal {id}")))
    }

    async fn list(&self) -> Result<Vec<Proposal>> {
        let records = self.records.read().await;
        Ok(records.values().map(|r| r.proposal.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ExecutionDetails, ProposalStatus, ProposalTimeline, ProposalType, VoteOption,
        VotingConfiguration, VotingPowerMode,
    };
    use chrono::Utc;
    use synod_types::{AgentId, TxRef};

    fn sample_proposal() -> Proposal {
        Proposal {
            id: ProposalId::generate(),
            title: "Sample".into(),
            description: "Sample proposal".into(),
            proposer: AgentId::from("ceo"),
            kind: ProposalType::Operational,
            status: ProposalStatus::Draft,
            execution: ExecutionDetails {
                phases: vec![],
                success_criteria: vec![],
            },
            budget: None,
            timeline: ProposalTimeline {
                review_period_days: 1,
                voting_period_days: 1,
            },
            voting_config: VotingConfiguration {
                quorum_percentage: 20.0,
                approval_threshold_percentage: 66.0,
                voting_period_hours: 24,
                power_mode: VotingPowerMode::Equal,
                delegation_allowed: false,
                early_execution_allowed: false,
            },
            stakeholders: vec![],
            impacted_agents: vec![],
            emergency: false,
            created_at: Utc::now(),
            submitted_at: None,
            voting_starts_at: None,
            voting_ends_at: None,
            human_approved_at: None,
            voting_results: None,
            cognitive_summary: None,
            human_approval: None,
            execution_record: None,
        }
    }

    fn sample_vote(id: &ProposalId, voter: &str) -> Vote {
        Vote {
            proposal_id: id.clone(),
            voter: AgentId::from(voter),
            option: VoteOption::For,
            voting_power: 100.0,
            reason: None,
            delegated: vec![],
            timestamp: Utc::now(),
            signature: "sig".into(),
            tx_ref: TxRef::generate(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryProposalStore::new();
        let proposal = sample_proposal();
        let id = proposal.id.clone();

        store.create(proposal).await.unwrap();
        let fetched = store.get(&id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.status, ProposalStatus::Draft);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryProposalStore::new();
        let proposal = sample_proposal();
        store.create(proposal.clone()).await.unwrap();

        let result = store.create(proposal).await;
        assert!(matches!(result, Err(GovernanceError::DuplicateId(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryProposalStore::new();
        let result = store.get(&ProposalId::generate()).await;
        assert!(matches!(result, Err(GovernanceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_vote_rejected_and_count_unchanged() {
        let store = MemoryProposalStore::new();
        let proposal = sample_proposal();
        let id = proposal.id.clone();
        store.create(proposal).await.unwrap();

        store.append_vote(&id, sample_vote(&id, "cto")).await.unwrap();
        let result = store.append_vote(&id, sample_vote(&id, "cto")).await;
        assert!(matches!(result, Err(GovernanceError::DuplicateVote { .. })));

        let votes = store.votes(&id).await.unwrap();
        assert_eq!(votes.len(), 1);
    }

    #[tokio::test]
    async fn test_vote_on_missing_proposal() {
        let store = MemoryProposalStore::new();
        let id = ProposalId::generate();
        let result = store.append_vote(&id, sample_vote(&id, "cto")).await;
        assert!(matches!(result, Err(GovernanceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_votes_single_winner() {
        use std::sync::Arc;

        let store = Arc::new(MemoryProposalStore::new());
        let proposal = sample_proposal();
        let id = proposal.id.clone();
        store.create(proposal).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                store.append_vote(&id, sample_vote(&id, "cto")).await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.votes(&id).await.unwrap().len(), 1);
    }
}
