//! Aggregate statistics record.

use serde::{Deserialize, Serialize};

/// Aggregate statistics over indexed blocks and proofs.
///
/// Produced by a [`StatRepository`](crate::traits::StatRepository) and
/// forwarded to clients as-is. Optional figures are omitted from the JSON
/// form when the source did not compute them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    /// Total number of blocks indexed
    pub total_blocks: u64,
    /// Number of proofs submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_proofs: Option<u64>,
    /// Number of blocks that have been verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_verified_blocks: Option<u64>,
    /// Number of blocks assigned to a prover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_blocks_assigned: Option<u64>,
    /// Average proof time in seconds, as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_proof_time: Option<String>,
    /// Average proof reward in base units, as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_proof_reward: Option<String>,
}

impl Stat {
    /// Creates a record carrying only the block total.
    pub fn new(total_blocks: u64) -> Self {
        Self {
            total_blocks,
            ..Self::default()
        }
    }

    /// Sets the proof count.
    pub fn with_proofs(mut self, num_proofs: u64) -> Self {
        self.num_proofs = Some(num_proofs);
        self
    }

    /// Sets the verified block count.
    pub fn with_verified_blocks(mut self, num_verified_blocks: u64) -> Self {
        self.num_verified_blocks = Some(num_verified_blocks);
        self
    }

    /// Sets the assigned block count.
    pub fn with_blocks_assigned(mut self, num_blocks_assigned: u64) -> Self {
        self.num_blocks_assigned = Some(num_blocks_assigned);
        self
    }

    /// Sets the average proof time.
    pub fn with_average_proof_time(mut self, seconds: impl Into<String>) -> Self {
        self.average_proof_time = Some(seconds.into());
        self
    }

    /// Sets the average proof reward.
    pub fn with_average_proof_reward(mut self, reward: impl Into<String>) -> Self {
        self.average_proof_reward = Some(reward.into());
        self
    }
}
