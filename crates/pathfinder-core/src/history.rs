//! Completed-assessment history.
//!
//! Append-only. Records are stored in insertion order; `recent_first` is a
//! view and does not reorder storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flow::TestType;

/// Identifier derived from the creation time in epoch milliseconds.
pub type AssessmentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedAssessment {
    pub id: AssessmentId,
    pub completed_at: DateTime<Utc>,
    pub tests: Vec<TestType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentHistory {
    records: Vec<CompletedAssessment>,
    /// Highest id handed out so far, including ids not yet appended.
    #[serde(default)]
    last_id: AssessmentId,
}

impl AssessmentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record stamped `at`, with an id strictly greater than every
    /// id issued before. Two records created in the same millisecond get
    /// consecutive ids.
    pub fn create_record(&mut self, at: DateTime<Utc>, tests: Vec<TestType>) -> CompletedAssessment {
        let id = at.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        CompletedAssessment {
            id,
            completed_at: at,
            tests,
        }
    }

    pub fn append(&mut self, record: CompletedAssessment) {
        self.last_id = self.last_id.max(record.id);
        self.records.push(record);
    }

    pub fn resolve(&self, id: AssessmentId) -> Option<&CompletedAssessment> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[CompletedAssessment] {
        &self.records
    }

    pub fn recent_first(&self) -> impl Iterator<Item = &CompletedAssessment> {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&CompletedAssessment> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
