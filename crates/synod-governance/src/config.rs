use crate::types::{
    ProposalType, VotingConfigOverrides, VotingConfiguration, VotingPowerMode,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for the governance service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Review window between submission and voting start
    pub review_period_days: u32,
    /// Bound on voting-power-oracle and cognitive-provider calls
    pub oracle_timeout_secs: u64,
    /// Baseline voting parameters
    pub default_voting: VotingConfiguration,
    /// Per-proposal-type overrides merged onto the baseline
    pub type_overrides: HashMap<ProposalType, VotingConfigOverrides>,
}

impl GovernanceConfig {
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Resolve the voting configuration for a proposal.
    ///
    /// Precedence: caller overrides > type-specific overrides > default.
    pub fn voting_config_for(
        &self,
        kind: ProposalType,
        caller_overrides: Option<&VotingConfigOverrides>,
    ) -> VotingConfiguration {
        let mut config = self.default_voting.clone();
        if let Some(type_overrides) = self.type_overrides.get(&kind) {
            type_overrides.apply(&mut config);
        }
        if let Some(overrides) = caller_overrides {
            overrides.apply(&mut config);
        }
        config
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        let mut type_overrides = HashMap::new();
        type_overrides.insert(
            ProposalType::Strategic,
            VotingConfigOverrides {
                quorum_percentage: Some(30.0),
                approval_threshold_percentage: Some(75.0),
                voting_period_hours: Some(336),
                ..Default::default()
            },
        );
        type_overrides.insert(
            ProposalType::Financial,
            VotingConfigOverrides {
                quorum_percentage: Some(25.0),
                approval_threshold_percentage: Some(70.0),
                voting_period_hours: Some(240),
                ..Default::default()
            },
        );
        type_overrides.insert(
            ProposalType::Governance,
            VotingConfigOverrides {
                quorum_percentage: Some(35.0),
                approval_threshold_percentage: Some(80.0),
                voting_period_hours: Some(504),
                ..Default::default()
            },
        );
        type_overrides.insert(
            ProposalType::Technical,
            VotingConfigOverrides {
                voting_period_hours: Some(120),
                ..Default::default()
            },
        );
        type_overrides.insert(
            ProposalType::Operational,
            VotingConfigOverrides {
                quorum_percentage: Some(15.0),
                approval_threshold_percentage: Some(60.0),
                voting_period_hours: Some(96),
                ..Default::default()
            },
        );

        Self {
            review_period_days: 3,
            oracle_timeout_secs: 5,
            default_voting: VotingConfiguration {
                quorum_percentage: 20.0,
                approval_threshold_percentage: 66.0,
                voting_period_hours: 168,
                power_mode: VotingPowerMode::Hybrid,
                delegation_allowed: true,
                early_execution_allowed: false,
            },
            type_overrides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sane() {
        let config = GovernanceConfig::default();
        assert_eq!(config.default_voting.quorum_percentage, 20.0);
        assert_eq!(config.default_voting.approval_threshold_percentage, 66.0);
        assert_eq!(config.default_voting.voting_period_hours, 168);
    }

    #[test]
    fn test_type_override_applied() {
        let config = GovernanceConfig::default();
        let governance = config.voting_config_for(ProposalType::Governance, None);
        assert_eq!(governance.quorum_percentage, 35.0);
        assert_eq!(governance.approval_threshold_percentage, 80.0);
        assert_eq!(governance.voting_period_hours, 504);
    }

    #[test]
    fn test_caller_override_beats_type_override() {
        let config = GovernanceConfig::default();
        let overrides = VotingConfigOverrides {
            quorum_percentage: Some(10.0),
            ..Default::default()
        };
        let resolved = config.voting_config_for(ProposalType::Governance, Some(&overrides));
        // Caller wins on quorum, type override still wins elsewhere
        assert_eq!(resolved.quorum_percentage, 10.0);
        assert_eq!(resolved.approval_threshold_percentage, 80.0);
    }

    #[test]
    fn test_type_without_override_uses_defaults() {
        let mut config = GovernanceConfig::default();
        config.type_overrides.clear();
        let resolved = config.voting_config_for(ProposalType::Technical, None);
        assert_eq!(resolved, config.default_voting);
    }
}
