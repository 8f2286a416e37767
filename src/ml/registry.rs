// ============================================================
// Layer 5 — Model Registry
// ============================================================
// The catalogue of extractive QA models the tool knows about.
//
// The engine itself treats a model id as an opaque string; the
// registry exists for the CLI (listing models, recommending one
// for a context size) and for extractors that want to reject ids
// they cannot serve.
//
//   id                                                     size
//   distilbert-base-uncased-distilled-squad                265 MB
//   deepset/roberta-base-squad2                            480 MB
//   bert-large-uncased-whole-word-masking-finetuned-squad 1250 MB
//   google/electra-small-discriminator                      55 MB

use serde::Serialize;

pub const DISTILBERT:    &str = "distilbert-base-uncased-distilled-squad";
pub const ROBERTA_BASE:  &str = "deepset/roberta-base-squad2";
pub const BERT_LARGE:    &str = "bert-large-uncased-whole-word-masking-finetuned-squad";
pub const ELECTRA_SMALL: &str = "google/electra-small-discriminator";

/// Human-readable description of one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id:          String,
    pub name:        String,
    pub description: String,
    /// Approximate download size in megabytes
    pub size_mb:     u32,
}

impl ModelInfo {
    pub fn new(
        id:          impl Into<String>,
        name:        impl Into<String>,
        description: impl Into<String>,
        size_mb:     u32,
    ) -> Self {
        Self {
            id:          id.into(),
            name:        name.into(),
            description: description.into(),
            size_mb,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelInfo>,
}

impl ModelRegistry {
    /// The four SQuAD-style models shipped with the tool.
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelInfo::new(
                    DISTILBERT,
                    "DistilBERT",
                    "Lightweight model, good balance of speed and accuracy",
                    265,
                ),
                ModelInfo::new(
                    ROBERTA_BASE,
                    "RoBERTa Base",
                    "Higher accuracy on SQuAD 2.0 dataset",
                    480,
                ),
                ModelInfo::new(
                    BERT_LARGE,
                    "BERT Large",
                    "High accuracy but slower performance",
                    1250,
                ),
                ModelInfo::new(
                    ELECTRA_SMALL,
                    "ELECTRA Small",
                    "Small and fast model",
                    55,
                ),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelInfo> {
        self.models.iter()
    }

    /// Suggest a model for a context of `context_chars` characters:
    /// faster models for larger inputs, the accurate one for small ones.
    pub fn recommend_for_context(&self, context_chars: usize) -> &'static str {
        if context_chars > 10_000 {
            ELECTRA_SMALL
        } else if context_chars > 5_000 {
            DISTILBERT
        } else {
            ROBERTA_BASE
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
