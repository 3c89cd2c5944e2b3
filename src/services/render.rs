use crate::models::classify_types::{ClassificationResult, PetClass};
use crate::models::view_types::{ConfidenceLevel, PanelPhase, PanelView, ProbabilityRow, ResultView};
use crate::panel::{PanelState, PreviewStatus};

const HIGH_CONFIDENCE: f64 = 0.8;
const MEDIUM_CONFIDENCE: f64 = 0.6;
const TEXT_BAR_WIDTH: usize = 20;

pub fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn confidence_level(confidence: f64) -> ConfidenceLevel {
    if confidence >= HIGH_CONFIDENCE {
        ConfidenceLevel::High
    } else if confidence >= MEDIUM_CONFIDENCE {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

pub fn result_view(result: &ClassificationResult) -> ResultView {
    let probabilities = PetClass::ALL
        .iter()
        .map(|&class| {
            let value = result.probabilities.get(class);
            ProbabilityRow {
                class_name: class,
                icon: class.icon(),
                percent_text: percent(value),
                bar_width: (value * 100.0).clamp(0.0, 100.0),
            }
        })
        .collect();

    ResultView {
        predicted_class: result.predicted_class,
        icon: result.predicted_class.icon(),
        confidence_text: percent(result.confidence),
        confidence_level: confidence_level(result.confidence),
        probabilities,
    }
}

pub fn panel_view(state: &PanelState) -> PanelView {
    let mut view = PanelView {
        phase: PanelPhase::Idle,
        file_name: None,
        preview: None,
        loading: false,
        can_submit: false,
        error: None,
        result: None,
        show_empty_hint: false,
    };

    match state {
        PanelState::Idle => {
            view.show_empty_hint = true;
        }
        PanelState::FileSelected { image, preview } => {
            view.phase = PanelPhase::FileSelected;
            view.file_name = Some(image.file_name.clone());
            if let PreviewStatus::Ready(preview) = preview {
                view.preview = Some(preview.clone());
                view.can_submit = true;
            }
        }
        PanelState::Submitting { selection, .. } => {
            view.phase = PanelPhase::Submitting;
            view.file_name = Some(selection.image.file_name.clone());
            view.preview = Some(selection.preview.clone());
            view.loading = true;
        }
        PanelState::Result { selection, result } => {
            view.phase = PanelPhase::Result;
            view.file_name = Some(selection.image.file_name.clone());
            view.preview = Some(selection.preview.clone());
            view.can_submit = true;
            view.result = Some(result_view(result));
        }
        PanelState::Failed { selection, message } => {
            view.phase = PanelPhase::Failed;
            if let Some(selection) = selection {
                view.file_name = Some(selection.image.file_name.clone());
                view.preview = Some(selection.preview.clone());
                view.can_submit = true;
            }
            view.error = Some(message.clone());
        }
    }

    view
}

/// Plain-text rendering used by the command-line front-end.
pub fn render_text(view: &PanelView) -> String {
    let mut out = String::new();

    if let Some(file_name) = &view.file_name {
        out.push_str(&format!("File: {}", file_name));
        if let Some((width, height)) = view
            .preview
            .as_ref()
            .and_then(|preview| preview.width.zip(preview.height))
        {
            out.push_str(&format!(" ({}x{})", width, height));
        }
        out.push('\n');
    }

    match view.phase {
        PanelPhase::Idle => out.push_str("Drop or pick a photo of your pet to classify it.\n"),
        PanelPhase::FileSelected => out.push_str("Ready to classify.\n"),
        PanelPhase::Submitting => out.push_str("Classifying...\n"),
        PanelPhase::Result | PanelPhase::Failed => {}
    }

    if let Some(result) = &view.result {
        out.push_str(&format!("Prediction: {} {}\n", result.icon, result.predicted_class));
        let level = match result.confidence_level {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        };
        out.push_str(&format!("Confidence: {} ({})\n", result.confidence_text, level));
        for row in &result.probabilities {
            let filled = ((row.bar_width / 100.0) * TEXT_BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(TEXT_BAR_WIDTH);
            out.push_str(&format!(
                "  {} {:<4}{:>7}  [{}{}]\n",
                row.icon,
                row.class_name,
                row.percent_text,
                "#".repeat(filled),
                " ".repeat(TEXT_BAR_WIDTH - filled),
            ));
        }
    }

    if let Some(error) = &view.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    out
}
