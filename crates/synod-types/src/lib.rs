/*!
# Synod Shared Types

Identity newtypes used across the Synod governance engine: proposal ids,
agent (voter/proposer) ids, event ids, and transaction references.

Ids are generated, never derived from content, and combine a millisecond
time component with a random component so that collisions are practically
impossible even across concurrently running services.
*/

pub mod id;

pub use id::{AgentId, EventId, ProposalId, TxRef};
