use crate::models::classify_types::PetClass;
use crate::models::image_types::Preview;
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelPhase {
    Idle,
    FileSelected,
    Submitting,
    Result,
    Failed,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProbabilityRow {
    pub class_name: PetClass,
    pub icon: &'static str,
    pub percent_text: String,
    pub bar_width: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResultView {
    pub predicted_class: PetClass,
    pub icon: &'static str,
    pub confidence_text: String,
    pub confidence_level: ConfidenceLevel,
    pub probabilities: Vec<ProbabilityRow>,
}

/// Snapshot of the panel that a renderer can draw without looking at the
/// state machine.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PanelView {
    pub phase: PanelPhase,
    pub file_name: Option<String>,
    pub preview: Option<Preview>,
    pub loading: bool,
    pub can_submit: bool,
    pub error: Option<String>,
    pub result: Option<ResultView>,
    pub show_empty_hint: bool,
}
