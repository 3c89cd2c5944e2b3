use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PetClass {
    Cat,
    Dog,
}

impl PetClass {
    pub const ALL: [PetClass; 2] = [PetClass::Cat, PetClass::Dog];

    pub fn label(&self) -> &'static str {
        match self {
            PetClass::Cat => "cat",
            PetClass::Dog => "dog",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PetClass::Cat => "\u{1F431}",
            PetClass::Dog => "\u{1F415}",
        }
    }
}

impl fmt::Display for PetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Per-class probabilities. They are expected to sum to ~1 but nothing here
/// checks it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Probabilities {
    pub cat: f64,
    pub dog: f64,
}

impl Probabilities {
    pub fn get(&self, class: PetClass) -> f64 {
        match class {
            PetClass::Cat => self.cat,
            PetClass::Dog => self.dog,
        }
    }
}

/// Body of a 2xx response from the classification service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassificationResult {
    pub predicted_class: PetClass,
    pub confidence: f64,
    pub probabilities: Probabilities,
}

/// Body of a non-2xx response. `detail` is optional and only used when it is
/// a non-empty string.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn into_detail(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}
