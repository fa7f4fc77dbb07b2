use crate::types::{GovernanceEvent, GovernanceEventType};
use crate::Result;
use async_trait::async_trait;
use synod_types::ProposalId;
use tokio::sync::RwLock;
use tracing::debug;

/// Append-only audit sink for lifecycle events.
///
/// Records are never mutated or deleted after emit. A failed emit must
/// not abort the state transition that produced it; the service logs and
/// continues.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: GovernanceEvent) -> Result<()>;

    /// Events for one proposal, in emit order.
    async fn events_for(&self, proposal_id: &ProposalId) -> Result<Vec<GovernanceEvent>>;

    /// Full log in emit order.
    async fn all_events(&self) -> Result<Vec<GovernanceEvent>>;
}

/// In-memory append-only event log.
pub struct MemoryEventLog {
    events: RwLock<Vec<GovernanceEvent>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    pub async fn count_of(&self, event_type: GovernanceEventType) -> usize {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl Default for MemoryEventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for MemoryEventLog {
    async fn emit(&self, event: GovernanceEvent) -> Result<()> {
        debug!(
            event_id = %event.id,
            event_type = event.event_type.as_str(),
            proposal_id = %event.proposal_id,
            "governance event recorded"
        );
        self.events.write().await.push(event);
        Ok(())
    }

    async fn events_for(&self, proposal_id: &ProposalId) -> Result<Vec<GovernanceEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| &e.proposal_id == proposal_id)
            .cloned()
            .collect())
    }

    async fn all_events(&self) -> Result<Vec<GovernanceEvent>> {
        Ok(self.events.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use synod_types::AgentId;

    fn event(proposal_id: &ProposalId, event_type: GovernanceEventType) -> GovernanceEvent {
        GovernanceEvent::new(
            event_type,
            proposal_id.clone(),
            AgentId::from("ceo"),
            json!({}),
        )
    }

    #[tokio::test]
    async fn test_emit_and_query_preserves_order() {
        let log = MemoryEventLog::new();
        let id = ProposalId::generate();

        log.emit(event(&id, GovernanceEventType::ProposalCreated))
            .await
            .unwrap();
        log.emit(event(&id, GovernanceEventType::ProposalSubmitted))
            .await
            .unwrap();
        log.emit(event(&id, GovernanceEventType::VotingStarted))
            .await
            .unwrap();

        let events = log.events_for(&id).await.unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event_type, GovernanceEventType::ProposalCreated);
        assert_eq!(events[1].event_type, GovernanceEventType::ProposalSubmitted);
        assert_eq!(events[2].event_type, GovernanceEventType::VotingStarted);
    }

    #[tokio::test]
    async fn test_events_filtered_per_proposal() {
        let log = MemoryEventLog::new();
        let a = ProposalId::generate();
        let b = ProposalId::generate();

        log.emit(event(&a, GovernanceEventType::ProposalCreated))
            .await
            .unwrap();
        log.emit(event(&b, GovernanceEventType::ProposalCreated))
            .await
            .unwrap();
        log.emit(event(&a, GovernanceEventType::VoteCast))
            .await
            .unwrap();

        assert_eq!(log.events_for(&a).await.unwrap().len(), 2);
        assert_eq!(log.events_for(&b).await.unwrap().len(), 1);
        assert_eq!(log.all_events().await.unwrap().len(), 3);
    }
}
