use serde::{Deserialize, Serialize};

pub const MIB: u64 = 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct StorageLimits {
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: u64,
    #[serde(rename = "userQuota")]
    pub user_quota: u64,
}

impl Default for StorageLimits {
    fn default() -> Self {
        Self {
            max_upload_size: 50 * MIB,
            user_quota: 100 * MIB,
        }
    }
}
