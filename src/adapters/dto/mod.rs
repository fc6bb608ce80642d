pub mod file_dto;
pub mod folder_dto;
pub mod share_link_dto;
pub mod user_dto;
