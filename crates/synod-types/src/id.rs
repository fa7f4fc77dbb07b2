use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a governance proposal.
///
/// Format: `PROP-<millis hex>-<random hex>`. The time component makes ids
/// roughly sortable by creation; the random component makes collisions
/// practically impossible.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl ProposalId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let random: u32 = rand::thread_rng().gen();
        Self(format!("PROP-{millis:X}-{:06X}", random & 0xFF_FFFF))
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalId({})", self.0)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a voting or proposing agent.
///
/// Opaque to the engine: agent registries, token ledgers, and reputation
/// systems all live behind the voting-power oracle.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Debug for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an audit-trail event.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let random: u16 = rand::thread_rng().gen();
        Self(format!("EVT-{millis:X}-{random:04X}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque transaction reference attached to a recorded vote.
///
/// The engine does not verify these against any ledger; they exist so a
/// settlement layer can be reconciled later.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxRef(String);

impl TxRef {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill(&mut bytes);
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Refs from external stores may be shorter than the preview
        write!(f, "TxRef({}...)", self.0.get(..10).unwrap_or(&self.0))
    }
}

impl fmt::Display for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_id_uniqueness() {
        let ids: Vec<ProposalId> = (0..100).map(|_| ProposalId::generate()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn test_proposal_id_format() {
        let id = ProposalId::generate();
        assert!(id.as_str().starts_with("PROP-"));
        let round_trip = ProposalId::from_string(id.as_str());
        assert_eq!(id, round_trip);
    }

    #[test]
    fn test_tx_ref_shape() {
        let tx = TxRef::generate();
        assert!(tx.as_str().starts_with("0x"));
        assert_eq!(tx.as_str().len(), 2 + 64);
    }

    #[test]
    fn test_short_tx_ref_debug_does_not_panic() {
        let short: TxRef = serde_json::from_str("\"0xab\"").unwrap();
        assert_eq!(format!("{short:?}"), "TxRef(0xab...)");

        let full = TxRef::generate();
        assert!(format!("{full:?}").starts_with("TxRef(0x"));
    }

    #[test]
    fn test_agent_id_roundtrip() {
        let agent = AgentId::from("ceo-mimi");
        assert_eq!(agent.as_str(), "ceo-mimi");
        assert!(!agent.is_empty());
        assert!(AgentId::new("").is_empty());
    }
}
