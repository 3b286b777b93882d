//! Declarative dataset schema loaded from `settings/schema.yaml`.

use serde::{Deserialize, Serialize};

/// Schema rules applied by the ingestion stage.
///
/// Unknown keys are ignored so the file can grow validation rules without
/// breaking ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    insignificant_columns: Option<Vec<String>>,
}

impl SchemaConfig {
    pub fn with_insignificant_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            insignificant_columns: Some(columns.into_iter().map(Into::into).collect()),
        }
    }

    /// Columns to drop; empty when the key is absent.
    pub fn insignificant_columns(&self) -> &[String] {
        self.insignificant_columns.as_deref().unwrap_or(&[])
    }

    /// Whether the schema declared the key at all.
    pub fn declares_insignificant_columns(&self) -> bool {
        self.insignificant_columns.is_some()
    }
}
