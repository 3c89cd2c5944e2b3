pub mod classifier_client;
pub mod image_intake;
pub mod preview_service;
pub mod render;
