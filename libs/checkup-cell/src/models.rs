use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CATALOG MODELS
// ==============================================================================

/// A single lab analysis (`GET /medical-tests`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalTest {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomTag {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistRef {
    pub uuid: Uuid,
    pub name: String,
}

/// Bundle of tests tagged with the symptoms it screens for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkup {
    pub uuid: Uuid,
    pub title: String,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub symptoms: Vec<SymptomTag>,
    #[serde(default)]
    pub medical_tests: Vec<MedicalTest>,
    #[serde(default)]
    pub specialization: Option<SpecialistRef>,
}

// ==============================================================================
// RECOMMENDATION VIEW MODELS
// ==============================================================================

/// Items shown on one card plus how many were cut off.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardSummary {
    pub items: Vec<String>,
    pub remaining: usize,
}

impl CardSummary {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationCards {
    pub checkups: CardSummary,
    pub tests: CardSummary,
    pub related: CardSummary,
    pub specialist: CardSummary,
}

impl RecommendationCards {
    pub fn is_empty(&self) -> bool {
        self.checkups.is_empty() && self.tests.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorState {
    /// Nothing selected; show the prompt.
    Idle,
    Loading,
    Ready(RecommendationCards),
    Empty,
    /// Localized error message; the caller offers a retry.
    Failed(String),
}
