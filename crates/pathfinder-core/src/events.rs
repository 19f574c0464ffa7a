use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flow::TestType;
use crate::history::AssessmentId;
use crate::navigation::Page;
use crate::profile::{Language, UserProfile};

/// Every state change of the session produces an Event.
/// Front ends render from them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SetupCompleted {
        profile: UserProfile,
        at: DateTime<Utc>,
    },
    LanguageChanged {
        language: Language,
        at: DateTime<Utc>,
    },
    ProfileUpdated {
        profile: UserProfile,
        at: DateTime<Utc>,
    },
    LoggedOut {
        at: DateTime<Utc>,
    },
    Navigated {
        page: Page,
        show_results: bool,
        selected_assessment: Option<AssessmentId>,
        at: DateTime<Utc>,
    },
    FlowStarted {
        first_test: TestType,
        total_tests: usize,
        at: DateTime<Utc>,
    },
    ProgressSaved {
        test_type: TestType,
        progress: u8,
        current_question_index: usize,
        at: DateTime<Utc>,
    },
    TestCompleted {
        reported: TestType,
        expected: Option<TestType>,
        next_test: TestType,
        at: DateTime<Utc>,
    },
    AssessmentCompleted {
        assessment_id: AssessmentId,
        tests: Vec<TestType>,
        reported: TestType,
        expected: Option<TestType>,
        at: DateTime<Utc>,
    },
    /// `complete_test` after the flow already finished.
    CompletionIgnored {
        reported: TestType,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        page: Page,
        show_results: bool,
        selected_assessment: Option<AssessmentId>,
        setup_complete: bool,
        current_test: Option<TestType>,
        current_test_index: usize,
        total_tests: usize,
        completed_assessments: usize,
        profile: UserProfile,
        at: DateTime<Utc>,
    },
}
