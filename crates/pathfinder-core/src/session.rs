//! Application session controller.
//!
//! [`AppSession`] owns every piece of client state: profile, navigation,
//! flow tracker, the in-progress answers and the completed-assessment
//! history. Front ends read through the query methods and change state only
//! through the commands, each of which returns the [`Event`] it produced.
//!
//! ## Usage
//!
//! ```ignore
//! let store = SqliteStore::open()?;
//! let mut session = AppSession::boot(&store, AssessmentFlow::default())?;
//! session.start_assessment_flow();
//! session.complete_test(TestType::Aptitude);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, StorageError};
use crate::events::Event;
use crate::flow::{AssessmentFlow, FlowStep, FlowTracker, SavedAssessment, TestType};
use crate::history::{AssessmentHistory, AssessmentId, CompletedAssessment};
use crate::navigation::{Navigator, Page};
use crate::profile::{Language, UserProfile};
use crate::setup::SetupForm;
use crate::storage::{keys, LocalStore};

/// Serializable copy of the in-memory session, used by front ends that do
/// not stay resident between user actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub profile: UserProfile,
    pub setup_complete: bool,
    pub navigator: Navigator,
    pub tracker: FlowTracker,
    #[serde(default)]
    pub saved_assessment: Option<SavedAssessment>,
    #[serde(default)]
    pub history: AssessmentHistory,
}

pub struct AppSession<S: LocalStore> {
    store: S,
    profile: UserProfile,
    setup_complete: bool,
    navigator: Navigator,
    tracker: FlowTracker,
    saved_assessment: Option<SavedAssessment>,
    history: AssessmentHistory,
}

impl<S: LocalStore> AppSession<S> {
    /// Start a session the way a fresh process does.
    ///
    /// With the setup flag present the stored profile is loaded and the
    /// session opens on the home page; otherwise it opens on setup with the
    /// default profile.
    pub fn boot(store: S, flow: AssessmentFlow) -> Result<Self> {
        let setup_complete = is_setup_complete(&store)?;
        let (profile, page) = if setup_complete {
            (UserProfile::load(&store)?, Page::Home)
        } else {
            (UserProfile::default(), Page::Setup)
        };
        info!(%page, setup_complete, "session started");
        Ok(Self {
            store,
            profile,
            setup_complete,
            navigator: Navigator::new(page),
            tracker: FlowTracker::new(flow),
            saved_assessment: None,
            history: AssessmentHistory::new(),
        })
    }

    /// Rebuild a session from a snapshot taken earlier in the same logical
    /// session.
    pub fn from_snapshot(store: S, snapshot: SessionSnapshot) -> Self {
        debug!(page = %snapshot.navigator.page(), "session restored from snapshot");
        Self {
            store,
            profile: snapshot.profile,
            setup_complete: snapshot.setup_complete,
            navigator: snapshot.navigator,
            tracker: snapshot.tracker,
            saved_assessment: snapshot.saved_assessment,
            history: snapshot.history,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn page(&self) -> Page {
        self.navigator.page()
    }

    pub fn tracker(&self) -> &FlowTracker {
        &self.tracker
    }

    pub fn current_test(&self) -> Option<TestType> {
        self.tracker.current_test()
    }

    pub fn saved_assessment(&self) -> Option<&SavedAssessment> {
        self.saved_assessment.as_ref()
    }

    pub fn history(&self) -> &AssessmentHistory {
        &self.history
    }

    /// The record behind the selected assessment id, if it is in history.
    pub fn selected_assessment(&self) -> Option<&CompletedAssessment> {
        self.navigator
            .selected_assessment()
            .and_then(|id| self.history.resolve(id))
    }

    pub fn resolve(&self, id: AssessmentId) -> Option<&CompletedAssessment> {
        self.history.resolve(id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            profile: self.profile.clone(),
            setup_complete: self.setup_complete,
            navigator: self.navigator.clone(),
            tracker: self.tracker.clone(),
            saved_assessment: self.saved_assessment.clone(),
            history: self.history.clone(),
        }
    }

    /// Build a full state snapshot event.
    pub fn state_event(&self) -> Event {
        Event::StateSnapshot {
            page: self.navigator.page(),
            show_results: self.navigator.show_results(),
            selected_assessment: self.navigator.selected_assessment(),
            setup_complete: self.setup_complete,
            current_test: self.tracker.current_test(),
            current_test_index: self.tracker.current_index(),
            total_tests: self.tracker.total_tests(),
            completed_assessments: self.history.len(),
            profile: self.profile.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn navigate_to(
        &mut self,
        page: Page,
        show_results: Option<bool>,
        selected_assessment: Option<AssessmentId>,
    ) -> Event {
        self.navigator
            .navigate_to(page, show_results, selected_assessment);
        debug!(%page, show_results = self.navigator.show_results(), "navigated");
        Event::Navigated {
            page,
            show_results: self.navigator.show_results(),
            selected_assessment: self.navigator.selected_assessment(),
            at: Utc::now(),
        }
    }

    /// Validate the setup form and, if it passes, persist the profile and
    /// the setup flag together and open the home page.
    ///
    /// # Errors
    /// [`CoreError::Setup`](crate::CoreError::Setup) with per-field messages
    /// when validation fails; a storage error if the write fails. In both
    /// cases nothing is persisted and the session is unchanged.
    pub fn complete_setup(&mut self, form: &SetupForm) -> Result<Event> {
        let valid = form.validate(self.profile.language)?;

        let language = self.profile.language.code();
        self.store.set_many(&[
            (keys::SETUP_COMPLETE, "true"),
            (keys::USER_NAME, valid.name.as_str()),
            (keys::USER_GRADE, valid.grade.as_str()),
            (keys::USER_AGE, valid.age.as_str()),
            (keys::USER_LANGUAGE, language),
        ])?;

        self.profile = UserProfile {
            name: valid.name,
            class: valid.grade,
            age: Some(valid.age),
            ..self.profile.clone()
        };
        self.setup_complete = true;
        self.navigate_to(Page::Home, None, None);
        info!(name = %self.profile.name, "setup completed");

        Ok(Event::SetupCompleted {
            profile: self.profile.clone(),
            at: Utc::now(),
        })
    }

    /// Change the UI language and persist it right away, whether or not
    /// setup has been completed.
    pub fn set_language(&mut self, language: Language) -> Result<Event> {
        self.store.set(keys::USER_LANGUAGE, language.code())?;
        self.profile.language = language;
        debug!(%language, "language changed");
        Ok(Event::LanguageChanged {
            language,
            at: Utc::now(),
        })
    }

    /// Replace the profile wholesale (settings page) and persist it.
    pub fn update_profile(&mut self, profile: UserProfile) -> Result<Event> {
        profile.persist(&self.store)?;
        self.profile = profile;
        info!("profile updated");
        Ok(Event::ProfileUpdated {
            profile: self.profile.clone(),
            at: Utc::now(),
        })
    }

    /// Soft logout.
    ///
    /// Only the setup flag is removed from storage; profile fields stay so
    /// that a returning student keeps their data. In-memory state goes back
    /// to the setup page with an empty flow position.
    pub fn logout(&mut self) -> Result<Event> {
        self.store.remove(keys::SETUP_COMPLETE)?;
        self.setup_complete = false;
        self.navigator.reset(Page::Setup);
        self.tracker.start();
        self.saved_assessment = None;
        info!("logged out");
        Ok(Event::LoggedOut { at: Utc::now() })
    }

    /// Rewind the flow to its first test and open the test form.
    pub fn start_assessment_flow(&mut self) -> Event {
        self.tracker.start();
        self.saved_assessment = None;
        self.navigate_to(Page::TestForm, None, None);
        let first_test = self.tracker.flow().first();
        info!(%first_test, total = self.tracker.total_tests(), "assessment flow started");
        Event::FlowStarted {
            first_test,
            total_tests: self.tracker.total_tests(),
            at: Utc::now(),
        }
    }

    /// Replace the in-progress answers. Progress is capped at 100.
    pub fn save_progress(&mut self, mut saved: SavedAssessment) -> Event {
        saved.progress = saved.progress.min(100);
        let event = Event::ProgressSaved {
            test_type: saved.test_type,
            progress: saved.progress,
            current_question_index: saved.current_question_index,
            at: Utc::now(),
        };
        self.saved_assessment = Some(saved);
        event
    }

    /// Record one answer for the current test, starting a fresh answer set
    /// if the saved one belongs to another test. Returns `None` when no test
    /// is in progress.
    ///
    /// # Errors
    /// [`CoreError::Flow`](crate::CoreError::Flow) when `question` is not
    /// below `total_questions`; the saved answers are left as they were.
    pub fn record_answer(
        &mut self,
        question: usize,
        answer: &str,
        total_questions: usize,
    ) -> Result<Option<Event>> {
        let Some(test_type) = self.tracker.current_test() else {
            return Ok(None);
        };
        let mut saved = match &self.saved_assessment {
            Some(s) if s.test_type == test_type => s.clone(),
            _ => SavedAssessment::new(test_type),
        };
        saved.record_answer(question, answer, total_questions)?;
        Ok(Some(self.save_progress(saved)))
    }

    /// Mark a test as done.
    ///
    /// Advances to the next test, or, after the last one, appends a
    /// completed assessment to history, selects it and opens the processing
    /// page. `test_type` is not checked against the expected test; a
    /// mismatch is logged and reported in the event.
    pub fn complete_test(&mut self, test_type: TestType) -> Event {
        let completion = self.tracker.complete(test_type);
        if completion.is_mismatch() {
            warn!(
                reported = %test_type,
                expected = ?completion.expected,
                "completed test does not match the flow position"
            );
        }

        let now = Utc::now();
        match completion.step {
            FlowStep::Advanced { next } => {
                self.saved_assessment = None;
                info!(completed = %test_type, %next, "test completed");
                Event::TestCompleted {
                    reported: completion.reported,
                    expected: completion.expected,
                    next_test: next,
                    at: now,
                }
            }
            FlowStep::Finished => {
                self.saved_assessment = None;
                let record = self
                    .history
                    .create_record(now, self.tracker.flow().tests().to_vec());
                let assessment_id = record.id;
                let tests = record.tests.clone();
                self.history.append(record);
                self.navigate_to(Page::Processing, None, Some(assessment_id));
                info!(assessment_id, "assessment completed");
                Event::AssessmentCompleted {
                    assessment_id,
                    tests,
                    reported: completion.reported,
                    expected: completion.expected,
                    at: now,
                }
            }
            FlowStep::Ignored => {
                warn!(reported = %test_type, "flow already finished; completion ignored");
                Event::CompletionIgnored {
                    reported: completion.reported,
                    at: now,
                }
            }
        }
    }
}

fn is_setup_complete<S: LocalStore>(store: &S) -> std::result::Result<bool, StorageError> {
    Ok(store.get(keys::SETUP_COMPLETE)?.as_deref() == Some("true"))
}
