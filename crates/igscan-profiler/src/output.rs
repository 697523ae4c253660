//! Caller-facing rendering of a pipeline result.

use igscan_core::FeatureRecord;
use serde::Serialize;

use crate::classify::ErrorCategory;
use crate::error::ProfileError;

/// Either the feature mapping or a single-key `{"error": ...}` object.
///
/// The category is kept alongside for programmatic dispatch but is not part
/// of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProfileOutput {
    Features(FeatureRecord),
    Error {
        error: String,
        #[serde(skip)]
        category: ErrorCategory,
    },
}

impl ProfileOutput {
    #[must_use]
    pub fn category(&self) -> Option<&ErrorCategory> {
        match self {
            Self::Features(_) => None,
            Self::Error { category, .. } => Some(category),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl From<Result<FeatureRecord, ProfileError>> for ProfileOutput {
    fn from(result: Result<FeatureRecord, ProfileError>) -> Self {
        match result {
            Ok(record) => Self::Features(record),
            Err(err) => Self::Error {
                error: err.user_message(),
                category: err.category(),
            },
        }
    }
}
