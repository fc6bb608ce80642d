mod memory_session_repository;
mod pg_file_repository;
mod pg_folder_repository;
mod pg_share_link_repository;
mod pg_user_repository;
mod redis_session_repository;

pub use memory_session_repository::MemorySessionRepository;
pub use pg_file_repository::PgFileRepository;
pub use pg_folder_repository::PgFolderRepository;
pub use pg_share_link_repository::PgShareLinkRepository;
pub use pg_user_repository::PgUserRepository;
pub use redis_session_repository::RedisSessionRepository;
