pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod panel;
pub mod services;
pub mod telemetry;

pub use commands::panel::PanelHandle;
pub use config::{ClassifierConfig, DEFAULT_ENDPOINT};
pub use error::AppError;
pub use models::classify_types::{ClassificationResult, PetClass, Probabilities};
pub use models::view_types::{PanelPhase, PanelView};
pub use panel::{Panel, PanelState};
