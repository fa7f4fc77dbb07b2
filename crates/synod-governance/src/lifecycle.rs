use crate::config::GovernanceConfig;
use crate::events::EventSink;
use crate::metrics;
use crate::oracle::{CognitiveAnalysisProvider, VotingPowerOracle};
use crate::store::ProposalRepository;
use crate::types::{
    CreateProposalRequest, GovernanceEvent, GovernanceEventType, HumanApprovalRequest,
    HumanApprovalStatus, HumanDecision, Proposal, ProposalPage, ProposalQuery, ProposalStatus,
    ProposalTimeline, SortField, SortOrder, SubmitVoteRequest, Vote, VotingOutcome, VotingResults,
};
use crate::voting::VotingEngine;
use crate::{GovernanceError, Result};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use synod_types::{AgentId, ProposalId, TxRef};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Governance proposal service
///
/// Single writer over the proposal store. Drives the lifecycle
/// `Draft → Submitted → VotingActive → {PendingHumanApproval → Executed | Rejected} | Rejected`
/// and emits an append-only audit event for every transition.
///
/// Mutations of the same proposal are serialized through a per-proposal
/// lock, so concurrent finalize/approve/vote calls observe a consistent
/// status before acting on it.
pub struct GovernanceService {
    config: GovernanceConfig,
    engine: VotingEngine,
    store: Arc<dyn ProposalRepository>,
    oracle: Arc<dyn VotingPowerOracle>,
    cognitive: Option<Arc<dyn CognitiveAnalysisProvider>>,
    events: Arc<dyn EventSink>,
    op_locks: RwLock<HashMap<ProposalId, Arc<Mutex<()>>>>,
}

impl GovernanceService {
    pub fn new(
        config: GovernanceConfig,
        store: Arc<dyn ProposalRepository>,
        oracle: Arc<dyn VotingPowerOracle>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config,
            engine: VotingEngine::new(),
            store,
            oracle,
            cognitive: None,
            events,
            op_locks: RwLock::new(HashMap::new()),
        }
    }

    /// Attach an advisory cognitive-analysis provider.
    pub fn with_cognitive_provider(mut self, provider: Arc<dyn CognitiveAnalysisProvider>) -> Self {
        self.cognitive = Some(provider);
        self
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Create a proposal in `Draft`.
    ///
    /// Resolves the voting configuration (caller overrides > type
    /// overrides > defaults) and derives impacted agents from the
    /// execution plan.
    pub async fn create_proposal(&self, request: CreateProposalRequest) -> Result<Proposal> {
        if request.title.trim().is_empty() {
            return Err(GovernanceError::validation("title", "must not be empty"));
        }
        if request.description.trim().is_empty() {
            return Err(GovernanceError::validation(
                "description",
                "must not be empty",
            ));
        }
        if request.proposer.is_empty() {
            return Err(GovernanceError::validation("proposer", "must not be empty"));
        }
        if request.execution.phases.is_empty() {
            return Err(GovernanceError::validation(
                "execution.phases",
                "at least one execution phase is required",
            ));
        }
        if let Some(budget) = &request.budget {
            if budget.total_amount <= 0.0 {
                return Err(GovernanceError::validation(
                    "budget.total_amount",
                    "must be positive",
                ));
            }
        }

        let voting_config = self
            .config
            .voting_config_for(request.kind, request.voting_overrides.as_ref());
        let review_period_days = request
            .review_period_days
            .unwrap_or(self.config.review_period_days);
        let impacted_agents = request.execution.impacted_agents();

        let proposal = Proposal {
            id: ProposalId::generate(),
            title: request.title,
            description: request.description,
            proposer: request.proposer.clone(),
            kind: request.kind,
            status: ProposalStatus::Draft,
            execution: request.execution,
            budget: request.budget,
            timeline: ProposalTimeline {
                review_period_days,
                voting_period_days: (voting_config.voting_period_hours as u32).div_ceil(24),
            },
            voting_config,
            stakeholders: request.stakeholders,
            impacted_agents,
            emergency: request.emergency,
            created_at: Utc::now(),
            submitted_at: None,
            voting_starts_at: None,
            voting_ends_at: None,
            human_approved_at: None,
            voting_results: None,
            cognitive_summary: None,
            human_approval: None,
            execution_record: None,
        };

        self.store.create(proposal.clone()).await?;

        metrics::PROPOSALS_CREATED
            .with_label_values(&[proposal.kind.as_str()])
            .inc();
        metrics::ACTIVE_PROPOSALS.inc();

        self.emit(GovernanceEvent::new(
            GovernanceEventType::ProposalCreated,
            proposal.id.clone(),
            request.proposer,
            json!({
                "title": proposal.title.clone(),
                "kind": proposal.kind.as_str(),
                "emergency": proposal.emergency,
            }),
        ))
        .await;

        info!(
            proposal_id = %proposal.id,
            kind = proposal.kind.as_str(),
            proposer = %proposal.proposer,
            emergency = proposal.emergency,
            "📝 Proposal created"
        );

        Ok(proposal)
    }

    /// Submit a draft for review and schedule its voting window.
    ///
    /// Emergency proposals skip the review period and open for voting at
    /// submission time. Cognitive analysis runs here when a provider is
    /// attached; its failure is logged and never blocks submission.
    pub async fn submit_proposal(&self, id: &ProposalId, actor: &AgentId) -> Result<Proposal> {
        let lock = self.proposal_lock(id).await;
        let _guard = lock.lock().await;

        let mut proposal = self.store.get(id).await?;
        self.transition(&mut proposal, ProposalStatus::Submitted, "submit_proposal")?;

        let now = Utc::now();
        let review = if proposal.emergency {
            ChronoDuration::zero()
        } else {
            ChronoDuration::days(i64::from(proposal.timeline.review_period_days))
        };
        proposal.submitted_at = Some(now);
        proposal.voting_starts_at = Some(now + review);
        proposal.voting_ends_at = Some(
            now + review + ChronoDuration::hours(proposal.voting_config.voting_period_hours as i64),
        );

        let mut analysis_event = None;
        if let Some(provider) = &self.cognitive {
            match self
                .with_oracle_timeout(provider.analyze(&proposal))
                .await
            {
                Ok(summary) => {
                    analysis_event = Some(json!({
                        "alignment_score": summary.alignment_score,
                        "confidence": summary.confidence,
                        "risk_factors": summary.risk_factors.len(),
                    }));
                    proposal.cognitive_summary = Some(summary);
                }
                Err(e) => {
                    metrics::COGNITIVE_ANALYSIS_FAILURES.inc();
                    warn!(
                        proposal_id = %proposal.id,
                        error = %e,
                        "cognitive analysis failed, continuing without summary"
                    );
                }
            }
        }

        self.store.put(proposal.clone()).await?;

        if let Some(data) = analysis_event {
            self.emit(GovernanceEvent::new(
                GovernanceEventType::CognitiveAnalysisCompleted,
                proposal.id.clone(),
                actor.clone(),
                data,
            ))
            .await;
        }

        self.emit(GovernanceEvent::new(
            GovernanceEventType::ProposalSubmitted,
            proposal.id.clone(),
            actor.clone(),
            json!({
                "voting_starts_at": proposal.voting_starts_at,
                "voting_ends_at": proposal.voting_ends_at,
            }),
        ))
        .await;

        info!(
            proposal_id = %proposal.id,
            voting_starts_at = ?proposal.voting_starts_at,
            voting_ends_at = ?proposal.voting_ends_at,
            "📨 Proposal submitted"
        );

        Ok(proposal)
    }

    /// Open the voting window on a submitted proposal.
    ///
    /// Rejects the call while the review period is still running.
    pub async fn start_voting(&self, id: &ProposalId, actor: &AgentId) -> Result<Proposal> {
        let lock = self.proposal_lock(id).await;
        let _guard = lock.lock().await;

        let mut proposal = self.store.get(id).await?;
        let now = Utc::now();

        if let Some(starts) = proposal.voting_starts_at {
            if now < starts {
                return Err(GovernanceError::validation(
                    "voting_starts_at",
                    format!("review period runs until {starts}"),
                ));
            }
        }

        self.transition(&mut proposal, ProposalStatus::VotingActive, "start_voting")?;
        self.store.put(proposal.clone()).await?;

        self.emit(GovernanceEvent::new(
            GovernanceEventType::VotingStarted,
            proposal.id.clone(),
            actor.clone(),
            json!({
                "quorum_percentage": proposal.voting_config.quorum_percentage,
                "approval_threshold_percentage": proposal.voting_config.approval_threshold_percentage,
                "voting_ends_at": proposal.voting_ends_at,
            }),
        ))
        .await;

        info!(
            proposal_id = %proposal.id,
            voting_ends_at = ?proposal.voting_ends_at,
            "🗳️ Voting opened"
        );

        Ok(proposal)
    }

    /// Cast a vote on a proposal in its open window.
    ///
    /// The voter's power is resolved through the oracle under the
    /// configured deadline and frozen onto the vote record. One vote per
    /// voter per proposal; duplicates are rejected atomically by the
    /// store.
    pub async fn cast_vote(&self, request: SubmitVoteRequest) -> Result<Vote> {
        let lock = self.proposal_lock(&request.proposal_id).await;
        let _guard = lock.lock().await;

        let proposal = self.store.get(&request.proposal_id).await?;

        if proposal.status != ProposalStatus::VotingActive {
            metrics::VOTE_REJECTIONS
                .with_label_values(&["illegal_state"])
                .inc();
            return Err(GovernanceError::illegal_state(
                "cast_vote",
                proposal.status.as_str(),
                ProposalStatus::VotingActive.as_str(),
            ));
        }
        let now = Utc::now();
        if proposal.voting_ended(now) {
            metrics::VOTE_REJECTIONS
                .with_label_values(&["window_closed"])
                .inc();
            return Err(GovernanceError::validation(
                "voting_ends_at",
                "voting window has closed",
            ));
        }
        if request.voter.is_empty() {
            return Err(GovernanceError::validation("voter", "must not be empty"));
        }
        if request.signature.trim().is_empty() {
            metrics::VOTE_REJECTIONS
                .with_label_values(&["missing_signature"])
                .inc();
            return Err(GovernanceError::validation(
                "signature",
                "must not be empty",
            ));
        }
        if !request.delegated.is_empty() && !proposal.voting_config.delegation_allowed {
            metrics::VOTE_REJECTIONS
                .with_label_values(&["delegation_forbidden"])
                .inc();
            return Err(GovernanceError::validation(
                "delegated",
                "delegation is not allowed on this proposal",
            ));
        }

        let own_power = self
            .with_oracle_timeout(
                self.oracle
                    .voting_power(&request.voter, proposal.voting_config.power_mode),
            )
            .await?;
        if own_power <= 0.0 {
            metrics::VOTE_REJECTIONS
                .with_label_values(&["no_voting_power"])
                .inc();
            return Err(GovernanceError::validation(
                "voter",
                "voter holds no voting power",
            ));
        }
        let delegated_power: f64 = request.delegated.iter().map(|d| d.voting_power).sum();

        let vote = Vote {
            proposal_id: request.proposal_id.clone(),
            voter: request.voter.clone(),
            option: request.option,
            voting_power: own_power + delegated_power,
            reason: request.reason,
            delegated: request.delegated,
            timestamp: now,
            signature: request.signature,
            tx_ref: TxRef::generate(),
        };

        match self.store.append_vote(&request.proposal_id, vote.clone()).await {
            Ok(()) => {}
            Err(e @ GovernanceError::DuplicateVote { .. }) => {
                metrics::VOTE_REJECTIONS
                    .with_label_values(&["duplicate"])
                    .inc();
                return Err(e);
            }
            Err(e) => return Err(e),
        }

        metrics::VOTES_CAST
            .with_label_values(&[vote.option.as_str()])
            .inc();

        self.emit(GovernanceEvent::new(
            GovernanceEventType::VoteCast,
            request.proposal_id.clone(),
            request.voter.clone(),
            json!({
                "option": vote.option.as_str(),
                "voting_power": vote.voting_power,
                "delegated_count": vote.delegated.len(),
                "tx_ref": vote.tx_ref.clone(),
            }),
        ))
        .await;

        info!(
            proposal_id = %request.proposal_id,
            voter = %request.voter,
            option = vote.option.as_str(),
            voting_power = vote.voting_power,
            "🗳️ Vote cast"
        );

        Ok(vote)
    }

    /// Voting results for a proposal: the stored snapshot once
    /// finalized, a live recomputation while the window is open.
    /// Read-only; never transitions state.
    pub async fn voting_results(&self, id: &ProposalId) -> Result<VotingResults> {
        let proposal = self.store.get(id).await?;
        if let Some(results) = proposal.voting_results {
            return Ok(results);
        }
        if proposal.status != ProposalStatus::VotingActive {
            return Err(GovernanceError::NotFound(format!(
                "voting results for proposal {id}"
            )));
        }
        self.tally(&proposal).await
    }

    /// Execution record of an executed proposal.
    pub async fn execution_status(&self, id: &ProposalId) -> Result<crate::types::ExecutionRecord> {
        let proposal = self.store.get(id).await?;
        proposal.execution_record.ok_or_else(|| {
            GovernanceError::NotFound(format!("execution record for proposal {id}"))
        })
    }

    /// Attach or refresh an advisory analysis summary out of band.
    ///
    /// Additive only: legal at any non-terminal status and never touches
    /// status, votes, or results.
    pub async fn attach_cognitive_summary(
        &self,
        id: &ProposalId,
        summary: crate::types::CognitiveSummary,
        actor: &AgentId,
    ) -> Result<Proposal> {
        let lock = self.proposal_lock(id).await;
        let _guard = lock.lock().await;

        let mut proposal = self.store.get(id).await?;
        if proposal.status.is_terminal() {
            return Err(GovernanceError::illegal_state(
                "attach_cognitive_summary",
                proposal.status.as_str(),
                "any non-terminal status",
            ));
        }

        let event_data = json!({
            "alignment_score": summary.alignment_score,
            "confidence": summary.confidence,
            "risk_factors": summary.risk_factors.len(),
        });
        proposal.cognitive_summary = Some(summary);
        self.store.put(proposal.clone()).await?;

        // Audit only what actually persisted
        self.emit(GovernanceEvent::new(
            GovernanceEventType::CognitiveAnalysisCompleted,
            proposal.id.clone(),
            actor.clone(),
            event_data,
        ))
        .await;

        Ok(proposal)
    }

    /// Whether an open vote already qualifies for early execution.
    /// Advisory only: it never shortens the window or skips the human
    /// gate.
    pub async fn early_execution_eligible(&self, id: &ProposalId) -> Result<bool> {
        let proposal = self.store.get(id).await?;
        if proposal.status != ProposalStatus::VotingActive {
            return Ok(false);
        }
        let results = self.tally(&proposal).await?;
        Ok(self
            .engine
            .early_execution_eligible(&results, &proposal.voting_config))
    }

    /// Close a voting window and apply its outcome.
    ///
    /// `Approved` moves the proposal to the human gate; every other
    /// outcome rejects it. Calling finalize twice, or before the window
    /// has closed, is an error.
    pub async fn finalize_voting(&self, id: &ProposalId, actor: &AgentId) -> Result<Proposal> {
        self.finalize(id, actor, false).await
    }

    /// Force-close an open voting window and tally whatever votes are
    /// in, regardless of `voting_ends_at`. Operator trigger; all other
    /// finalize semantics apply unchanged.
    pub async fn force_finalize_voting(
        &self,
        id: &ProposalId,
        actor: &AgentId,
    ) -> Result<Proposal> {
        self.finalize(id, actor, true).await
    }

    async fn finalize(&self, id: &ProposalId, actor: &AgentId, force: bool) -> Result<Proposal> {
        let lock = self.proposal_lock(id).await;
        let _guard = lock.lock().await;

        let mut proposal = self.store.get(id).await?;
        if proposal.status != ProposalStatus::VotingActive {
            return Err(GovernanceError::illegal_state(
                "finalize_voting",
                proposal.status.as_str(),
                ProposalStatus::VotingActive.as_str(),
            ));
        }
        let now = Utc::now();
        if !force && !proposal.voting_ended(now) {
            return Err(GovernanceError::validation(
                "voting_ends_at",
                "voting window is still open",
            ));
        }
        if force && !proposal.voting_ended(now) {
            proposal.voting_ends_at = Some(now);
        }

        let results = self.tally(&proposal).await?;

        metrics::QUORUM_CHECKS
            .with_label_values(&[if results.quorum_achieved { "met" } else { "not_met" }])
            .inc();
        metrics::VOTING_OUTCOMES
            .with_label_values(&[results.outcome.as_str()])
            .inc();

        let next = match results.outcome {
            VotingOutcome::Approved => ProposalStatus::PendingHumanApproval,
            VotingOutcome::Rejected | VotingOutcome::QuorumNotMet | VotingOutcome::Vetoed => {
                ProposalStatus::Rejected
            }
        };
        self.transition(&mut proposal, next, "finalize_voting")?;
        proposal.voting_results = Some(results.clone());
        if next == ProposalStatus::PendingHumanApproval {
            proposal.human_approval = Some(HumanApprovalStatus::Pending);
        }
        if next.is_terminal() {
            metrics::ACTIVE_PROPOSALS.dec();
        }
        self.store.put(proposal.clone()).await?;

        if next == ProposalStatus::PendingHumanApproval {
            self.emit(GovernanceEvent::new(
                GovernanceEventType::HumanApprovalRequested,
                proposal.id.clone(),
                actor.clone(),
                json!({
                    "approval_rate": results.approval_rate,
                    "participation_rate": results.participation_rate,
                }),
            ))
            .await;
        }

        info!(
            proposal_id = %proposal.id,
            outcome = results.outcome.as_str(),
            participation = results.participation_rate,
            approval = results.approval_rate,
            status = proposal.status.as_str(),
            "📊 Voting finalized"
        );

        Ok(proposal)
    }

    /// Apply a human approval decision to a proposal at the gate.
    ///
    /// Approval marks the proposal `Executed`, flips
    /// `execution_authorized`, and opens an execution record. Rejection
    /// is terminal. This is the only code path that sets
    /// `execution_authorized` to true.
    pub async fn process_human_approval(
        &self,
        request: HumanApprovalRequest,
    ) -> Result<Proposal> {
        if request.reasoning.trim().is_empty() {
            return Err(GovernanceError::validation(
                "reasoning",
                "must not be empty",
            ));
        }

        let lock = self.proposal_lock(&request.proposal_id).await;
        let _guard = lock.lock().await;

        let mut proposal = self.store.get(&request.proposal_id).await?;
        if proposal.status != ProposalStatus::PendingHumanApproval {
            return Err(GovernanceError::illegal_state(
                "process_human_approval",
                proposal.status.as_str(),
                ProposalStatus::PendingHumanApproval.as_str(),
            ));
        }

        let now = Utc::now();
        metrics::HUMAN_DECISIONS
            .with_label_values(&[match request.decision {
                HumanDecision::Approved => "approved",
                HumanDecision::Rejected => "rejected",
            }])
            .inc();

        match request.decision {
            HumanDecision::Approved => {
                self.transition(&mut proposal, ProposalStatus::Executed, "process_human_approval")?;
                proposal.human_approval = Some(HumanApprovalStatus::Approved);
                proposal.human_approved_at = Some(now);
                if let Some(results) = proposal.voting_results.as_mut() {
                    results.execution_authorized = true;
                }
                proposal.execution_record = Some(crate::types::ExecutionRecord::initial(
                    &proposal, now,
                ));
                metrics::ACTIVE_PROPOSALS.dec();
                self.store.put(proposal.clone()).await?;

                self.emit(GovernanceEvent::new(
                    GovernanceEventType::HumanApprovalGranted,
                    proposal.id.clone(),
                    request.approved_by.clone(),
                    json!({
                        "reasoning": request.reasoning,
                        "conditions": request.conditions,
                        "escalation_level": request.escalation_level.as_str(),
                    }),
                ))
                .await;
                self.emit(GovernanceEvent::new(
                    GovernanceEventType::ProposalExecuted,
                    proposal.id.clone(),
                    request.approved_by.clone(),
                    json!({
                        "authorized_at": now,
                        "phases": proposal.execution.phases.len(),
                    }),
                ))
                .await;

                info!(
                    proposal_id = %proposal.id,
                    approved_by = %request.approved_by,
                    "✅ Human approval granted, execution authorized"
                );
            }
            HumanDecision::Rejected => {
                self.transition(&mut proposal, ProposalStatus::Rejected, "process_human_approval")?;
                proposal.human_approval = Some(HumanApprovalStatus::Rejected);
                metrics::ACTIVE_PROPOSALS.dec();
                self.store.put(proposal.clone()).await?;

                self.emit(GovernanceEvent::new(
                    GovernanceEventType::HumanApprovalRejected,
                    proposal.id.clone(),
                    request.approved_by.clone(),
                    json!({
                        "reasoning": request.reasoning,
                        "modifications": request.modifications,
                        "escalation_level": request.escalation_level.as_str(),
                    }),
                ))
                .await;

                info!(
                    proposal_id = %proposal.id,
                    approved_by = %request.approved_by,
                    "🚫 Human approval rejected"
                );
            }
        }

        Ok(proposal)
    }

    pub async fn get_proposal(&self, id: &ProposalId) -> Result<Proposal> {
        self.store.get(id).await
    }

    pub async fn get_votes(&self, id: &ProposalId) -> Result<Vec<Vote>> {
        self.store.votes(id).await
    }

    /// Audit trail for one proposal, in emit order.
    pub async fn audit_trail(&self, id: &ProposalId) -> Result<Vec<GovernanceEvent>> {
        self.events.events_for(id).await
    }

    /// Filter, sort, and paginate proposals.
    pub async fn query_proposals(&self, query: &ProposalQuery) -> Result<ProposalPage> {
        let now = Utc::now();
        let mut proposals: Vec<Proposal> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|p| query.status.map_or(true, |s| p.status == s))
            .filter(|p| query.kind.map_or(true, |k| p.kind == k))
            .filter(|p| {
                query
                    .proposer
                    .as_ref()
                    .map_or(true, |proposer| &p.proposer == proposer)
            })
            .filter(|p| query.created_after.map_or(true, |t| p.created_at > t))
            .filter(|p| query.created_before.map_or(true, |t| p.created_at < t))
            .filter(|p| {
                !query.voting_active
                    || (p.status == ProposalStatus::VotingActive && !p.voting_ended(now))
            })
            .collect();

        proposals.sort_by(|a, b| {
            let ordering = match query.sort_by {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::VotingEndsAt => a.voting_ends_at.cmp(&b.voting_ends_at),
                SortField::Title => a.title.cmp(&b.title),
            };
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total_count = proposals.len();
        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let proposals = proposals
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok(ProposalPage {
            proposals,
            total_count,
            page,
            limit,
        })
    }

    async fn tally(&self, proposal: &Proposal) -> Result<VotingResults> {
        let timer = metrics::TALLY_TIME.start_timer();
        let votes = self.store.votes(&proposal.id).await?;
        let total_eligible = self
            .with_oracle_timeout(
                self.oracle
                    .total_eligible_power(proposal.voting_config.power_mode),
            )
            .await?;
        let results = self.engine.tally(
            &proposal.id,
            &votes,
            &proposal.voting_config,
            total_eligible,
            proposal.emergency,
            Utc::now(),
        );
        timer.observe_duration();
        Ok(results)
    }

    fn transition(
        &self,
        proposal: &mut Proposal,
        next: ProposalStatus,
        operation: &str,
    ) -> Result<()> {
        if !proposal.status.can_transition_to(&next) {
            return Err(GovernanceError::illegal_state(
                operation,
                proposal.status.as_str(),
                next.as_str(),
            ));
        }
        metrics::PROPOSAL_TRANSITIONS
            .with_label_values(&[proposal.status.as_str(), next.as_str()])
            .inc();
        proposal.status = next;
        Ok(())
    }

    async fn with_oracle_timeout<T>(
        &self,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.config.oracle_timeout(), fut).await {
            Ok(result) => result,
            Err(_) => {
                metrics::ORACLE_TIMEOUTS.inc();
                Err(GovernanceError::OracleUnavailable(
                    "call exceeded deadline".to_string(),
                ))
            }
        }
    }

    /// Audit emission is best-effort: a sink failure is logged and never
    /// aborts the transition that produced the event.
    async fn emit(&self, event: GovernanceEvent) {
        if let Err(e) = self.events.emit(event).await {
            warn!(error = %e, "failed to record governance event");
        }
    }

    async fn proposal_lock(&self, id: &ProposalId) -> Arc<Mutex<()>> {
        let mut locks = self.op_locks.write().await;
        locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
