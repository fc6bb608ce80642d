pub mod file_repository;
pub mod folder_repository;
pub mod session_repository;
pub mod share_link_repository;
pub mod user_repository;
