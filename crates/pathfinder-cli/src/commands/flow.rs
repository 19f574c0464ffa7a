use clap::Subcommand;
use pathfinder_core::TestType;
use serde_json::json;

use super::state::{print_json, with_session, CliResult};

#[derive(Subcommand)]
pub enum FlowAction {
    /// Start the assessment flow from its first test
    Start,
    /// Record an answer for the current test
    Answer {
        /// Zero-based question index
        question: usize,
        answer: String,
        /// Number of questions in the current test
        #[arg(long)]
        total: usize,
    },
    /// Mark a test as completed (aptitude, values, personal)
    Complete { test_type: TestType },
    /// Print flow position and in-progress answers as JSON
    Status,
}

pub fn run(action: FlowAction) -> CliResult {
    with_session(|session| match action {
        FlowAction::Start => print_json(&session.start_assessment_flow()),
        FlowAction::Answer {
            question,
            answer,
            total,
        } => match session.record_answer(question, &answer, total)? {
            Some(event) => print_json(&event),
            None => Err("no test in progress; run `flow start` first".into()),
        },
        FlowAction::Complete { test_type } => print_json(&session.complete_test(test_type)),
        FlowAction::Status => {
            let tracker = session.tracker();
            print_json(&json!({
                "tests": tracker.flow().tests(),
                "current_test_index": tracker.current_index(),
                "current_test": tracker.current_test(),
                "finished": tracker.is_finished(),
                "saved_assessment": session.saved_assessment(),
            }))
        }
    })
}
