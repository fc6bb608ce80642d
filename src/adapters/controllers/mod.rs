pub mod auth_controller;
pub mod file_controller;
pub mod folder_controller;
pub mod health_controller;
pub mod share_controller;
