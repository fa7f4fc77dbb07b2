use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use synod_types::{AgentId, EventId, ProposalId, TxRef};

/// Governance proposal classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalType {
    Strategic,
    Operational,
    Financial,
    Governance,
    Technical,
}

impl ProposalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strategic => "strategic",
            Self::Operational => "operational",
            Self::Financial => "financial",
            Self::Governance => "governance",
            Self::Technical => "technical",
        }
    }
}

/// Proposal lifecycle status
///
/// The legal transition graph:
/// `Draft → Submitted → VotingActive → {PendingHumanApproval → Executed | Rejected} | Rejected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Created, editable by nobody but retained as the starting state
    Draft,
    /// Submitted for review, voting window scheduled
    Submitted,
    /// Voting window open
    VotingActive,
    /// Agent vote approved; awaiting the human-in-the-loop gate
    PendingHumanApproval,
    /// Human approved; execution authorized
    Executed,
    /// Rejected at any stage (vote outcome or human decision)
    Rejected,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Rejected)
    }

    pub fn can_transition_to(&self, next: &Self) -> bool {
        use ProposalStatus::*;
        match (self, next) {
            (Draft, Submitted) => true,
            (Submitted, VotingActive) => true,

            // Finalization branches
            (VotingActive, PendingHumanApproval) => true,
            (VotingActive, Rejected) => true,

            // Human gate
            (PendingHumanApproval, Executed) => true,
            (PendingHumanApproval, Rejected) => true,

            // Terminal states cannot transition
            (Executed, _) | (Rejected, _) => false,

            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::VotingActive => "voting_active",
            Self::PendingHumanApproval => "pending_human_approval",
            Self::Executed => "executed",
            Self::Rejected => "rejected",
        }
    }
}

/// Vote choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    For,
    Against,
    Abstain,
    /// Emergency-proposal kill switch; only decisive on emergency proposals
    Veto,
}

impl VoteOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::For => "for",
            Self::Against => "against",
            Self::Abstain => "abstain",
            Self::Veto => "veto",
        }
    }
}

/// How a voter's power is derived by the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingPowerMode {
    StakeWeighted,
    ReputationWeighted,
    Hybrid,
    Equal,
}

/// Per-proposal voting parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingConfiguration {
    /// Minimum participation as % of total eligible power
    pub quorum_percentage: f64,
    /// Minimum FOR share of cast power, in %
    pub approval_threshold_percentage: f64,
    pub voting_period_hours: u64,
    pub power_mode: VotingPowerMode,
    pub delegation_allowed: bool,
    pub early_execution_allowed: bool,
}

/// Partial overrides merged onto a base [`VotingConfiguration`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VotingConfigOverrides {
    pub quorum_percentage: Option<f64>,
    pub approval_threshold_percentage: Option<f64>,
    pub voting_period_hours: Option<u64>,
    pub power_mode: Option<VotingPowerMode>,
    pub delegation_allowed: Option<bool>,
    pub early_execution_allowed: Option<bool>,
}

impl VotingConfigOverrides {
    /// Apply these overrides onto `base`, field by field.
    pub fn apply(&self, base: &mut VotingConfiguration) {
        if let Some(v) = self.quorum_percentage {
            base.quorum_percentage = v;
        }
        if let Some(v) = self.approval_threshold_percentage {
            base.approval_threshold_percentage = v;
        }
        if let Some(v) = self.voting_period_hours {
            base.voting_period_hours = v;
        }
        if let Some(v) = self.power_mode {
            base.power_mode = v;
        }
        if let Some(v) = self.delegation_allowed {
            base.delegation_allowed = v;
        }
        if let Some(v) = self.early_execution_allowed {
            base.early_execution_allowed = v;
        }
    }
}

/// One execution phase of a proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPhase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub objectives: Vec<String>,
    pub deliverables: Vec<String>,
    pub estimated_duration: String,
    pub responsible_agents: Vec<AgentId>,
    pub completion_criteria: Vec<String>,
}

/// Ordered execution plan carried by a proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionDetails {
    pub phases: Vec<ExecutionPhase>,
    pub success_criteria: Vec<String>,
}

impl ExecutionDetails {
    /// Union of responsible agents across all phases, first-seen order.
    pub fn impacted_agents(&self) -> Vec<AgentId> {
        let mut seen = Vec::new();
        for phase in &self.phases {
            for agent in &phase.responsible_agents {
                if !seen.contains(agent) {
                    seen.push(agent.clone());
                }
            }
        }
        seen
    }
}

/// Budget line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub amount: f64,
    pub description: String,
}

/// Funding request attached to a proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRequest {
    pub total_amount: f64,
    pub currency: String,
    pub justification: String,
    pub breakdown: Vec<BudgetLine>,
}

/// Review/voting window durations resolved at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalTimeline {
    pub review_period_days: u32,
    pub voting_period_days: u32,
}

/// A governance proposal and its full lifecycle state.
///
/// Created in `Draft`, mutated only by the governance service, never
/// deleted — terminal proposals stay queryable for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub proposer: AgentId,
    pub kind: ProposalType,
    pub status: ProposalStatus,

    pub execution: ExecutionDetails,
    pub budget: Option<BudgetRequest>,
    pub timeline: ProposalTimeline,
    pub voting_config: VotingConfiguration,

    pub stakeholders: Vec<AgentId>,
    /// Derived: union of responsible agents across execution phases
    pub impacted_agents: Vec<AgentId>,
    pub emergency: bool,

    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub voting_starts_at: Option<DateTime<Utc>>,
    pub voting_ends_at: Option<DateTime<Utc>>,
    pub human_approved_at: Option<DateTime<Utc>>,

    pub voting_results: Option<VotingResults>,
    pub cognitive_summary: Option<CognitiveSummary>,
    pub human_approval: Option<HumanApprovalStatus>,
    pub execution_record: Option<ExecutionRecord>,
}

impl Proposal {
    /// Check if the voting window has closed.
    pub fn voting_ended(&self, now: DateTime<Utc>) -> bool {
        match self.voting_ends_at {
            Some(ends) => now >= ends,
            None => false,
        }
    }
}

/// Delegated voting power folded into a vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegatedVote {
    pub delegator: AgentId,
    pub voting_power: f64,
    pub delegated_at: DateTime<Utc>,
}

/// One voter's recorded position on one proposal.
///
/// Immutable once recorded; `voting_power` is frozen at cast time and
/// never recomputed, even if the oracle's answer would later change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: ProposalId,
    pub voter: AgentId,
    pub option: VoteOption,
    pub voting_power: f64,
    pub reason: Option<String>,
    pub delegated: Vec<DelegatedVote>,
    pub timestamp: DateTime<Utc>,
    /// Opaque; checked for presence only
    pub signature: String,
    pub tx_ref: TxRef,
}

/// Final voting outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingOutcome {
    Approved,
    Rejected,
    QuorumNotMet,
    Vetoed,
}

impl VotingOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::QuorumNotMet => "quorum_not_met",
            Self::Vetoed => "vetoed",
        }
    }
}

/// Snapshot of tallies, quorum, and outcome computed from a proposal's
/// vote set. Derived data — never an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingResults {
    pub proposal_id: ProposalId,

    pub total_votes_cast: usize,
    pub unique_voters: usize,
    pub delegated_votes_count: usize,

    pub votes_for: usize,
    pub votes_against: usize,
    pub votes_abstain: usize,
    pub votes_veto: usize,

    pub power_for: f64,
    pub power_against: f64,
    pub power_abstain: f64,
    pub power_veto: f64,

    /// Sum of all cast power, abstentions included
    pub total_voting_power: f64,
    /// total_voting_power / total_eligible_power × 100
    pub participation_rate: f64,
    pub quorum_achieved: bool,
    /// power_for / total_voting_power × 100 (0 when nothing cast)
    pub approval_rate: f64,
    pub approval_threshold_met: bool,

    pub outcome: VotingOutcome,
    /// True only after a human approval decision of Approved; the tally
    /// always initializes this false regardless of outcome.
    pub execution_authorized: bool,

    pub voting_ended_at: DateTime<Utc>,
    pub finalized_at: DateTime<Utc>,
}

/// Advisory cognitive-analysis enrichment.
///
/// Never allowed to approve or reject a proposal on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveSummary {
    /// 0.0 – 1.0
    pub alignment_score: f64,
    /// 0.0 – 1.0
    pub confidence: f64,
    pub key_insights: Vec<String>,
    pub risk_factors: Vec<String>,
    pub relevant_workstreams: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Human-in-the-loop gate state on a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Decision submitted through the human gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanDecision {
    Approved,
    Rejected,
}

/// Severity attached to a human decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationLevel {
    Standard,
    Elevated,
    Critical,
}

impl EscalationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Elevated => "elevated",
            Self::Critical => "critical",
        }
    }
}

/// Human approval decision request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanApprovalRequest {
    pub proposal_id: ProposalId,
    pub decision: HumanDecision,
    pub approved_by: AgentId,
    pub reasoning: String,
    /// Conditions attached to an approval
    pub conditions: Vec<String>,
    /// Modifications requested alongside a rejection
    pub modifications: Vec<String>,
    pub escalation_level: EscalationLevel,
}

/// Per-phase execution progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub phase_id: String,
    pub state: PhaseState,
    pub progress_percent: f64,
}

/// Execution-status record for an authorized proposal.
///
/// The engine only authorizes execution and tracks this record; carrying
/// out the work belongs to downstream workflow systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub proposal_id: ProposalId,
    pub current_phase: Option<String>,
    pub progress_percent: f64,
    pub phase_statuses: Vec<PhaseProgress>,
    pub authorized_at: DateTime<Utc>,
}

impl ExecutionRecord {
    /// Fresh record at authorization time: all phases not started.
    pub fn initial(proposal: &Proposal, authorized_at: DateTime<Utc>) -> Self {
        Self {
            proposal_id: proposal.id.clone(),
            current_phase: proposal.execution.phases.first().map(|p| p.id.clone()),
            progress_percent: 0.0,
            phase_statuses: proposal
                .execution
                .phases
                .iter()
                .map(|p| PhaseProgress {
                    phase_id: p.id.clone(),
                    state: PhaseState::NotStarted,
                    progress_percent: 0.0,
                })
                .collect(),
            authorized_at,
        }
    }
}

/// Audit-trail event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceEventType {
    ProposalCreated,
    ProposalSubmitted,
    VotingStarted,
    VoteCast,
    CognitiveAnalysisCompleted,
    HumanApprovalRequested,
    HumanApprovalGranted,
    HumanApprovalRejected,
    ProposalExecuted,
}

impl GovernanceEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProposalCreated => "proposal_created",
            Self::ProposalSubmitted => "proposal_submitted",
            Self::VotingStarted => "voting_started",
            Self::VoteCast => "vote_cast",
            Self::CognitiveAnalysisCompleted => "cognitive_analysis_completed",
            Self::HumanApprovalRequested => "human_approval_requested",
            Self::HumanApprovalGranted => "human_approval_granted",
            Self::HumanApprovalRejected => "human_approval_rejected",
            Self::ProposalExecuted => "proposal_executed",
        }
    }
}

/// Append-only audit record consumed by downstream notification and
/// workflow systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceEvent {
    pub id: EventId,
    pub event_type: GovernanceEventType,
    pub proposal_id: ProposalId,
    pub triggered_by: AgentId,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl GovernanceEvent {
    pub fn new(
        event_type: GovernanceEventType,
        proposal_id: ProposalId,
        triggered_by: AgentId,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::generate(),
            event_type,
            proposal_id,
            triggered_by,
            timestamp: Utc::now(),
            data,
        }
    }
}

/// Request to create a proposal in Draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProposalRequest {
    pub title: String,
    pub description: String,
    pub kind: ProposalType,
    pub proposer: AgentId,
    pub execution: ExecutionDetails,
    pub budget: Option<BudgetRequest>,
    pub stakeholders: Vec<AgentId>,
    pub emergency: bool,
    pub voting_overrides: Option<VotingConfigOverrides>,
    /// Caller override for the review period; defaults from config
    pub review_period_days: Option<u32>,
}

/// Request to cast a vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitVoteRequest {
    pub proposal_id: ProposalId,
    pub voter: AgentId,
    pub option: VoteOption,
    pub reason: Option<String>,
    pub delegated: Vec<DelegatedVote>,
    pub signature: String,
}

/// Sort key for proposal queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    VotingEndsAt,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Read-only filter + pagination over the proposal store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalQuery {
    pub status: Option<ProposalStatus>,
    pub kind: Option<ProposalType>,
    pub proposer: Option<AgentId>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub voting_active: bool,
    pub page: usize,
    pub limit: usize,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl Default for ProposalQuery {
    fn default() -> Self {
        Self {
            status: None,
            kind: None,
            proposer: None,
            created_after: None,
            created_before: None,
            voting_active: false,
            page: 1,
            limit: 10,
            sort_by: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// One page of query results, with the pre-pagination total for
/// caller-side pagination UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalPage {
    pub proposals: Vec<Proposal>,
    pub total_count: usize,
    pub page: usize,
    pub limit: usize,
}
