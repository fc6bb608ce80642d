pub mod app;
pub mod limits;
pub mod storage;

pub use app::AppConfig;
pub use limits::StorageLimits;
pub use storage::{Provider, StorageSecrets};
