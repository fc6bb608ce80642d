use serde::Serialize;

const MIB: f64 = 1024.0 * 1024.0;

/// Storage consumption for one user against the fixed quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageUsage {
    pub used: u64,
    pub limit: u64,
}

impl StorageUsage {
    pub fn new(used: u64, limit: u64) -> Self {
        Self { used, limit }
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }

    pub fn percentage_used(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        self.used as f64 / self.limit as f64 * 100.0
    }

    /// Whether adding `incoming` bytes keeps the user within quota.
    pub fn fits(&self, incoming: u64) -> bool {
        self.used
            .checked_add(incoming)
            .is_some_and(|projected| projected <= self.limit)
    }

    pub fn report(&self) -> UsageReport {
        UsageReport {
            used: self.used,
            limit: self.limit,
            used_mb: format_mb(self.used),
            limit_mb: self.limit / (1024 * 1024),
            percentage_used: format!("{:.2}", self.percentage_used()),
            remaining: self.remaining(),
            remaining_mb: format_mb(self.remaining()),
        }
    }
}

pub fn format_mb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / MIB)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UsageReport {
    pub used: u64,
    pub limit: u64,
    #[serde(rename = "usedMB")]
    pub used_mb: String,
    #[serde(rename = "limitMB")]
    pub limit_mb: u64,
    #[serde(rename = "percentageUsed")]
    pub percentage_used: String,
    pub remaining: u64,
    #[serde(rename = "remainingMB")]
    pub remaining_mb: String,
}
