/*!
# Synod Governance Engine

Proposal lifecycle and voting for an agent collective with a mandatory
human-in-the-loop gate:
- Typed proposals (strategic/operational/financial/governance/technical)
  with per-type quorum, threshold, and voting-window defaults
- Strict lifecycle state machine:
  `Draft → Submitted → VotingActive → {PendingHumanApproval → Executed | Rejected} | Rejected`
- Power-weighted voting with delegation, frozen voting power, and an
  inclusive quorum boundary
- Outcome precedence: veto (emergency only) > quorum failure > approval
  threshold
- Advisory cognitive analysis that can never decide an outcome
- Append-only audit event log for every transition

## Core Principles

- **Human gate is mandatory**: no proposal executes without an explicit
  human approval; `execution_authorized` is set on exactly one code path
- **Votes are immutable**: one vote per voter per proposal, power frozen
  at cast time
- **Audit first**: every lifecycle step lands in the event log before
  callers see the result

## Module Structure

- **types**: proposals, votes, results, events, requests
- **config**: service configuration and per-type voting defaults
- **voting**: pure deterministic tally engine
- **store**: repository seam with an in-memory implementation
- **oracle**: voting-power and cognitive-analysis seams
- **events**: append-only audit sink
- **lifecycle**: the governance service driving the state machine
- **error**: governance-specific errors

## Example Usage

```rust
use synod_governance::{GovernanceConfig, VotingEngine};
use synod_governance::types::ProposalType;

let config = GovernanceConfig::default();
let governance = config.voting_config_for(ProposalType::Governance, None);
assert_eq!(governance.quorum_percentage, 35.0);
assert_eq!(governance.approval_threshold_percentage, 80.0);

let engine = VotingEngine::new();
```
*/

pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod metrics;
pub mod oracle;
pub mod store;
pub mod types;
pub mod voting;

pub use config::GovernanceConfig;
pub use error::{GovernanceError, Result};
pub use events::{EventSink, MemoryEventLog};
pub use lifecycle::GovernanceService;
pub use oracle::{
    CognitiveAnalysisProvider, HeuristicCognitiveProvider, StaticVotingPowerOracle,
    VotingPowerOracle,
};
pub use store::{MemoryProposalStore, ProposalRepository};
pub use types::{
    CognitiveSummary, CreateProposalRequest, EscalationLevel, ExecutionDetails, ExecutionPhase,
    ExecutionRecord, GovernanceEvent, GovernanceEventType, HumanApprovalRequest,
    HumanApprovalStatus, HumanDecision, Proposal, ProposalPage, ProposalQuery, ProposalStatus,
    ProposalType, SubmitVoteRequest, Vote, VoteOption, VotingConfigOverrides, VotingConfiguration,
    VotingOutcome, VotingPowerMode, VotingResults,
};
pub use voting::VotingEngine;
