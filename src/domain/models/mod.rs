pub mod file;
pub mod folder;
pub mod share_link;
pub mod usage;
pub mod user;
