//! Upload/classify panel state machine.
//!
//! The panel never awaits anything itself. Operations that need async work
//! (deriving a preview, posting to the service) hand back a job; the caller
//! runs it without holding the panel and feeds the outcome back. Outcomes
//! that no longer match the current state are dropped.

use crate::models::classify_types::ClassificationResult;
use crate::models::image_types::{Preview, SelectedImage};
use crate::models::view_types::PanelView;
use crate::services::classifier_client::{ClassifierClient, ClassifyError};
use crate::services::image_intake::{self, IntakeError};
use crate::services::preview_service::{self, PreviewError};
use crate::services::render;
use tracing::{debug, info, warn};

pub const MSG_NOT_AN_IMAGE: &str = "Please select only image files.";
pub const MSG_PREVIEW_FAILED: &str = "Could not read the image.";
pub const MSG_NO_FILE: &str = "Please select an image first.";
pub const MSG_CLASSIFY_PREFIX: &str = "Could not classify the image: ";

/// An accepted image together with its rendered preview.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub image: SelectedImage,
    pub preview: Preview,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewStatus {
    Pending,
    Ready(Preview),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    FileSelected {
        image: SelectedImage,
        preview: PreviewStatus,
    },
    Submitting {
        selection: Selection,
        attempt: u64,
    },
    Result {
        selection: Selection,
        result: ClassificationResult,
    },
    /// `selection` is kept when the failure happened after a valid selection
    /// (HTTP or network), so the user can submit again.
    Failed {
        selection: Option<Selection>,
        message: String,
    },
}

/// Preview derivation for the selection made at `generation`.
#[derive(Debug)]
pub struct PreviewJob {
    generation: u64,
    image: SelectedImage,
}

impl PreviewJob {
    pub async fn run(self) -> PreviewOutcome {
        let result = preview_service::derive_preview(self.image).await;
        PreviewOutcome {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug)]
pub struct PreviewOutcome {
    generation: u64,
    result: Result<Preview, PreviewError>,
}

/// One classification attempt.
#[derive(Debug)]
pub struct SubmitJob {
    attempt: u64,
    image: SelectedImage,
}

impl SubmitJob {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub async fn run(self, client: &ClassifierClient) -> SubmitOutcome {
        let result = client.classify(&self.image).await;
        SubmitOutcome {
            attempt: self.attempt,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SubmitOutcome {
    attempt: u64,
    result: Result<ClassificationResult, ClassifyError>,
}

#[derive(Debug, Default)]
pub struct Panel {
    state: PanelState,
    // Bumped on every transition away from FileSelected.
    generation: u64,
    next_attempt: u64,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn view(&self) -> PanelView {
        render::panel_view(&self.state)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::Submitting { .. })
    }

    pub fn can_submit(&self) -> bool {
        matches!(
            self.state,
            PanelState::FileSelected {
                preview: PreviewStatus::Ready(_),
                ..
            } | PanelState::Result { .. }
                | PanelState::Failed {
                    selection: Some(_),
                    ..
                }
        )
    }

    /// Start a new selection. Non-image files are rejected on the spot;
    /// accepted ones return the preview job to run.
    pub fn select(&mut self, image: SelectedImage) -> Option<PreviewJob> {
        self.generation += 1;

        if let Err(err) = image_intake::accept(&image) {
            self.reject(&err);
            return None;
        }

        debug!(
            file = %image.file_name,
            mime = %image.mime_type,
            generation = self.generation,
            "image selected, deriving preview"
        );
        self.state = PanelState::FileSelected {
            image: image.clone(),
            preview: PreviewStatus::Pending,
        };
        Some(PreviewJob {
            generation: self.generation,
            image,
        })
    }

    /// A selection that never produced an image. A wrong type leaves the
    /// previous ready selection in place; an unreadable file does not.
    pub fn reject(&mut self, err: &IntakeError) {
        self.generation += 1;
        warn!(error = %err, "image rejected");

        let (selection, message) = match err {
            IntakeError::NotAnImage { .. } => {
                let kept = match std::mem::take(&mut self.state) {
                    PanelState::FileSelected {
                        image,
                        preview: PreviewStatus::Ready(preview),
                    } => Some(Selection { image, preview }),
                    PanelState::Submitting { selection, .. } | PanelState::Result { selection, .. } => {
                        Some(selection)
                    }
                    PanelState::Failed { selection, .. } => selection,
                    PanelState::Idle
                    | PanelState::FileSelected {
                        preview: PreviewStatus::Pending,
                        ..
                    } => None,
                };
                (kept, MSG_NOT_AN_IMAGE)
            }
            IntakeError::Unreadable { .. } => (None, MSG_PREVIEW_FAILED),
        };

        self.state = PanelState::Failed {
            selection,
            message: message.to_string(),
        };
    }

    pub fn apply_preview(&mut self, outcome: PreviewOutcome) {
        let pending = matches!(
            self.state,
            PanelState::FileSelected {
                preview: PreviewStatus::Pending,
                ..
            }
        );
        if outcome.generation != self.generation || !pending {
            debug!(
                outcome_generation = outcome.generation,
                current_generation = self.generation,
                "dropping stale preview"
            );
            return;
        }

        match outcome.result {
            Ok(preview) => {
                if let PanelState::FileSelected { preview: status, .. } = &mut self.state {
                    debug!(width = ?preview.width, height = ?preview.height, "preview ready");
                    *status = PreviewStatus::Ready(preview);
                }
            }
            Err(err) => {
                warn!(error = %err, "preview derivation failed");
                self.generation += 1;
                self.state = PanelState::Failed {
                    selection: None,
                    message: MSG_PREVIEW_FAILED.to_string(),
                };
            }
        }
    }

    /// Begin a classification attempt. Without a ready selection this
    /// short-circuits to an error; while a request is outstanding it does
    /// nothing.
    pub fn submit(&mut self) -> Option<SubmitJob> {
        let selection = match std::mem::take(&mut self.state) {
            PanelState::FileSelected {
                image,
                preview: PreviewStatus::Ready(preview),
            } => Selection { image, preview },
            PanelState::Result { selection, .. } => selection,
            PanelState::Failed {
                selection: Some(selection),
                ..
            } => selection,
            state @ (PanelState::Submitting { .. }
            | PanelState::FileSelected {
                preview: PreviewStatus::Pending,
                ..
            }) => {
                debug!("submit ignored while the trigger is disabled");
                self.state = state;
                return None;
            }
            PanelState::Idle | PanelState::Failed { selection: None, .. } => {
                self.state = PanelState::Failed {
                    selection: None,
                    message: MSG_NO_FILE.to_string(),
                };
                return None;
            }
        };

        self.next_attempt += 1;
        let attempt = self.next_attempt;
        let image = selection.image.clone();
        info!(attempt, file = %image.file_name, "classification started");
        self.state = PanelState::Submitting { selection, attempt };
        Some(SubmitJob { attempt, image })
    }

    pub fn apply_submission(&mut self, outcome: SubmitOutcome) {
        let current = match &self.state {
            PanelState::Submitting { attempt, .. } => Some(*attempt),
            _ => None,
        };
        if current != Some(outcome.attempt) {
            debug!(attempt = outcome.attempt, "dropping stale classification outcome");
            return;
        }

        let PanelState::Submitting { selection, .. } = std::mem::take(&mut self.state) else {
            return;
        };

        self.state = match outcome.result {
            Ok(result) => {
                info!(
                    attempt = outcome.attempt,
                    class = %result.predicted_class,
                    confidence = result.confidence,
                    "classification finished"
                );
                PanelState::Result { selection, result }
            }
            Err(err) => {
                warn!(attempt = outcome.attempt, error = %err, "classification failed");
                PanelState::Failed {
                    selection: Some(selection),
                    message: format!("{}{}", MSG_CLASSIFY_PREFIX, err),
                }
            }
        };
    }

    /// Back to the initial state. Pending work started before this point is
    /// dropped when it reports back.
    pub fn reset(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, "panel reset");
        self.state = PanelState::Idle;
    }
}
