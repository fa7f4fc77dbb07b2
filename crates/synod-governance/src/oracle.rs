use crate::types::{CognitiveSummary, Proposal, VotingPowerMode};
use crate::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use synod_types::AgentId;
use tokio::sync::RwLock;

/// Source of truth for voter eligibility and weight.
///
/// The governance service calls both methods under a bounded timeout and
/// maps elapsed deadlines to `OracleUnavailable`; implementations should
/// not retry internally.
#[async_trait]
pub trait VotingPowerOracle: Send + Sync {
    /// Power the voter wields under the given mode, at call time.
    async fn voting_power(&self, voter: &AgentId, mode: VotingPowerMode) -> Result<f64>;

    /// Total power of all eligible voters, the quorum denominator.
    async fn total_eligible_power(&self, mode: VotingPowerMode) -> Result<f64>;
}

/// Advisory analysis enrichment for submitted proposals.
///
/// Output is informational only; the engine never lets it approve,
/// reject, or transition a proposal.
#[async_trait]
pub trait CognitiveAnalysisProvider: Send + Sync {
    async fn analyze(&self, proposal: &Proposal) -> Result<CognitiveSummary>;
}

/// Fixed-table oracle for local deployments and tests.
pub struct StaticVotingPowerOracle {
    powers: RwLock<HashMap<AgentId, f64>>,
}

impl StaticVotingPowerOracle {
    pub fn new() -> Self {
        Self {
            powers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn set_power(&self, voter: AgentId, power: f64) {
        self.powers.write().await.insert(voter, power);
    }
}

impl Default for StaticVotingPowerOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VotingPowerOracle for StaticVotingPowerOracle {
    async fn voting_power(&self, voter: &AgentId, mode: VotingPowerMode) -> Result<f64> {
        if mode == VotingPowerMode::Equal {
            return Ok(1.0);
        }
        let powers = self.powers.read().await;
        Ok(powers.get(voter).copied().unwrap_or(0.0))
    }

    async fn total_eligible_power(&self, mode: VotingPowerMode) -> Result<f64> {
        let powers = self.powers.read().await;
        if mode == VotingPowerMode::Equal {
            return Ok(powers.len() as f64);
        }
        Ok(powers.values().sum())
    }
}

/// Heuristic analysis provider: scores proposals from their own content
/// without any external reasoning backend.
pub struct HeuristicCognitiveProvider;

impl HeuristicCognitiveProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicCognitiveProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CognitiveAnalysisProvider for HeuristicCognitiveProvider {
    async fn analyze(&self, proposal: &Proposal) -> Result<CognitiveSummary> {
        let mut score: f64 = 0.5;
        let mut insights = Vec::new();
        let mut risks = Vec::new();

        if !proposal.execution.success_criteria.is_empty() {
            score += 0.15;
            insights.push(format!(
                "{} explicit success criteria defined",
                proposal.execution.success_criteria.len()
            ));
        } else {
            risks.push("no success criteria defined".to_string());
        }

        if proposal.execution.phases.len() > 1 {
            score += 0.1;
            insights.push(format!(
                "phased execution plan with {} phases",
                proposal.execution.phases.len()
            ));
        }

        match &proposal.budget {
            Some(budget) if budget.breakdown.is_empty() => {
                risks.push("budget requested without a line-item breakdown".to_string());
            }
            Some(budget) => {
                insights.push(format!(
                    "budget of {} {} broken into {} lines",
                    budget.total_amount,
                    budget.currency,
                    budget.breakdown.len()
                ));
                score += 0.05;
            }
            None => {}
        }

        if proposal.emergency {
            risks.push("emergency proposal bypasses the standard review pace".to_string());
            score -= 0.1;
        }

        Ok(CognitiveSummary {
            alignment_score: score.clamp(0.0, 1.0),
            confidence: 0.6,
            key_insights: insights,
            risk_factors: risks,
            relevant_workstreams: vec![proposal.kind.as_str().to_string()],
            analyzed_at: Utc::now(),
        })
    }
}
