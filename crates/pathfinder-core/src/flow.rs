//! Assessment flow tracking.
//!
//! A flow is a fixed, duplicate-free sequence of tests taken in order. The
//! tracker holds the index of the test being taken; the in-progress answers
//! for that test live in a single [`SavedAssessment`].
//!
//! ## State Transitions
//!
//! ```text
//! start -> Taking(0) -> Taking(1) -> ... -> Taking(n-1) -> Finished
//!            ^                                                |
//!            +--------------------- start --------------------+
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Aptitude,
    Values,
    Personal,
}

impl TestType {
    pub const ALL: [TestType; 3] = [TestType::Aptitude, TestType::Values, TestType::Personal];

    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Aptitude => "aptitude",
            TestType::Values => "values",
            TestType::Personal => "personal",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FlowError::UnknownTest(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("assessment flow must contain at least one test")]
    Empty,

    #[error("test '{0}' appears more than once in the flow")]
    Duplicate(TestType),

    #[error("unknown test type: {0}")]
    UnknownTest(String),

    #[error("question {question} is out of range for a test of {total} questions")]
    QuestionOutOfRange { question: usize, total: usize },
}

/// Ordered, duplicate-free sequence of tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TestType>", into = "Vec<TestType>")]
pub struct AssessmentFlow {
    tests: Vec<TestType>,
}

impl AssessmentFlow {
    pub fn new(tests: Vec<TestType>) -> Result<Self, FlowError> {
        if tests.is_empty() {
            return Err(FlowError::Empty);
        }
        for (i, t) in tests.iter().enumerate() {
            if tests[..i].contains(t) {
                return Err(FlowError::Duplicate(*t));
            }
        }
        Ok(Self { tests })
    }

    pub fn tests(&self) -> &[TestType] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// First test of the flow. A flow is never empty.
    pub fn first(&self) -> TestType {
        self.tests[0]
    }

    pub fn get(&self, index: usize) -> Option<TestType> {
        self.tests.get(index).copied()
    }

    pub fn last_index(&self) -> usize {
        self.tests.len() - 1
    }
}

impl Default for AssessmentFlow {
    fn default() -> Self {
        Self {
            tests: TestType::ALL.to_vec(),
        }
    }
}

impl TryFrom<Vec<TestType>> for AssessmentFlow {
    type Error = FlowError;

    fn try_from(tests: Vec<TestType>) -> Result<Self, Self::Error> {
        Self::new(tests)
    }
}

impl From<AssessmentFlow> for Vec<TestType> {
    fn from(flow: AssessmentFlow) -> Self {
        flow.tests
    }
}

/// Answers for the single test currently in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAssessment {
    pub test_type: TestType,
    /// 0..=100
    pub progress: u8,
    /// Question index -> chosen answer.
    pub answers: BTreeMap<usize, String>,
    pub current_question_index: usize,
}

impl SavedAssessment {
    pub fn new(test_type: TestType) -> Self {
        Self {
            test_type,
            progress: 0,
            answers: BTreeMap::new(),
            current_question_index: 0,
        }
    }

    /// Record an answer and recompute progress against `total_questions`.
    ///
    /// # Errors
    /// [`FlowError::QuestionOutOfRange`] when `question >= total_questions`;
    /// nothing is recorded.
    pub fn record_answer(
        &mut self,
        question: usize,
        answer: &str,
        total_questions: usize,
    ) -> Result<(), FlowError> {
        if question >= total_questions {
            return Err(FlowError::QuestionOutOfRange {
                question,
                total: total_questions,
            });
        }
        self.answers.insert(question, answer.to_string());
        self.current_question_index = question + 1;
        let answered = self.answers.range(..total_questions).count();
        self.progress = progress_pct(answered, total_questions);
        Ok(())
    }
}

/// Percentage of answered questions, clamped to 0..=100.
pub fn progress_pct(answered: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (answered.saturating_mul(100) / total).min(100) as u8
}

/// What a `complete_test` call did to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// Moved on to the next test in the flow.
    Advanced { next: TestType },
    /// The last test was completed; the flow is finished.
    Finished,
    /// The flow was already finished; nothing changed.
    Ignored,
}

/// Result of `complete_test`, carrying the test the tracker expected so
/// callers can notice when the reported test differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCompletion {
    pub reported: TestType,
    pub expected: Option<TestType>,
    pub step: FlowStep,
}

impl TestCompletion {
    pub fn is_mismatch(&self) -> bool {
        self.expected.is_some_and(|e| e != self.reported)
    }
}

/// Position within the assessment flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowTracker {
    flow: AssessmentFlow,
    current_index: usize,
    #[serde(default)]
    finished: bool,
}

impl FlowTracker {
    pub fn new(flow: AssessmentFlow) -> Self {
        Self {
            flow,
            current_index: 0,
            finished: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn flow(&self) -> &AssessmentFlow {
        &self.flow
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The test being taken, or `None` once the flow is finished.
    pub fn current_test(&self) -> Option<TestType> {
        if self.finished {
            None
        } else {
            self.flow.get(self.current_index)
        }
    }

    pub fn total_tests(&self) -> usize {
        self.flow.len()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Rewind to the first test.
    pub fn start(&mut self) {
        self.current_index = 0;
        self.finished = false;
    }

    /// Mark the current test done.
    ///
    /// `reported` is not checked against the expected test; the tracker
    /// advances regardless and the mismatch is only visible through the
    /// returned [`TestCompletion`].
    pub fn complete(&mut self, reported: TestType) -> TestCompletion {
        let expected = self.current_test();
        let step = if self.finished {
            FlowStep::Ignored
        } else if self.current_index < self.flow.last_index() {
            self.current_index += 1;
            match self.flow.get(self.current_index) {
                Some(next) => FlowStep::Advanced { next },
                None => FlowStep::Finished,
            }
        } else {
            self.finished = true;
            FlowStep::Finished
        };
        TestCompletion {
            reported,
            expected,
            step,
        }
    }
}

impl Default for FlowTracker {
    fn default() -> Self {
        Self::new(AssessmentFlow::default())
    }
}
