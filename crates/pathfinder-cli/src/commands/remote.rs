//! Backend API commands.
//!
//! Each subcommand maps to one gateway call and prints the decoded response
//! as JSON. Tokens from `login`/`setup-account` are kept in the local store.

use clap::Subcommand;
use pathfinder_core::api::models::{
    ChatMessageRequest, LoginRequest, ProfileUpdate, SaveProgressRequest, SetupRequest,
    StartAssessmentRequest, SubmitTestRequest,
};
use pathfinder_core::{ApiClient, Config, SavedAssessment, SqliteStore, TestType};

use super::state::{load_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum RemoteAction {
    /// Create a backend account
    SetupAccount {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "10th")]
        grade: String,
        #[arg(long)]
        age: Option<u32>,
    },
    /// Log in and store access tokens
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Invalidate the refresh token and forget stored tokens
    Logout,
    /// Fetch the home dashboard summary
    Home,
    /// Start or resume an assessment
    Start {
        /// Question count of the aptitude test
        #[arg(long)]
        aptitude_questions: Option<u32>,
    },
    /// Fetch the test response record of one test
    Test {
        assessment_id: i64,
        test_type: TestType,
    },
    /// Upload the locally saved answers
    SaveProgress {
        #[arg(long)]
        test_response: i64,
    },
    /// Submit the locally saved answers for a test
    Submit {
        #[arg(long)]
        test_response: i64,
        /// Question count of the next test
        #[arg(long)]
        next_total: Option<usize>,
    },
    /// List completed assessments
    History,
    /// Fetch all answers of an assessment
    Responses { assessment_id: i64 },
    /// Send a message to the advisor chatbot
    Chat {
        message: String,
        #[arg(long)]
        assessment: Option<i64>,
    },
    /// Fetch chat history
    ChatHistory {
        #[arg(long)]
        assessment: Option<i64>,
    },
    /// Update profile fields on the backend
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Permanently delete the backend account
    DeleteAccount,
}

pub fn run(action: RemoteAction) -> CliResult {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    let client = ApiClient::new(&config.api, &store)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match action {
        RemoteAction::SetupAccount {
            username,
            password,
            name,
            grade,
            age,
        } => {
            let request = SetupRequest {
                username,
                password,
                name,
                grade,
                age,
            };
            print_json(&runtime.block_on(client.setup(&request))?)
        }
        RemoteAction::Login { username, password } => {
            let request = LoginRequest { username, password };
            print_json(&runtime.block_on(client.login(&request))?)
        }
        RemoteAction::Logout => {
            runtime.block_on(client.logout())?;
            println!("logged out");
            Ok(())
        }
        RemoteAction::Home => print_json(&runtime.block_on(client.home())?),
        RemoteAction::Start { aptitude_questions } => {
            let request = StartAssessmentRequest {
                aptitude_total_questions: aptitude_questions,
            };
            print_json(&runtime.block_on(client.start_assessment(&request))?)
        }
        RemoteAction::Test {
            assessment_id,
            test_type,
        } => print_json(&runtime.block_on(client.test_response(assessment_id, test_type))?),
        RemoteAction::SaveProgress { test_response } => {
            let saved = local_answers(&store, &config)?;
            let request = SaveProgressRequest::from_saved(test_response, &saved);
            print_json(&runtime.block_on(client.save_progress(&request))?)
        }
        RemoteAction::Submit {
            test_response,
            next_total,
        } => {
            let saved = local_answers(&store, &config)?;
            let request = SubmitTestRequest {
                test_response_id: test_response,
                answers: saved.answers,
                total_questions: next_total,
            };
            print_json(&runtime.block_on(client.submit_test(&request))?)
        }
        RemoteAction::History => print_json(&runtime.block_on(client.history())?),
        RemoteAction::Responses { assessment_id } => {
            print_json(&runtime.block_on(client.responses(assessment_id))?)
        }
        RemoteAction::Chat {
            message,
            assessment,
        } => {
            let request = ChatMessageRequest {
                message,
                assessment_id: assessment,
            };
            print_json(&runtime.block_on(client.send_chat_message(&request))?)
        }
        RemoteAction::ChatHistory { assessment } => {
            print_json(&runtime.block_on(client.chat_history(assessment))?)
        }
        RemoteAction::UpdateProfile {
            name,
            grade,
            age,
            email,
            phone,
        } => {
            let update = ProfileUpdate {
                name,
                grade,
                age,
                email,
                phone,
            };
            print_json(&runtime.block_on(client.update_profile(&update))?)
        }
        RemoteAction::DeleteAccount => print_json(&runtime.block_on(client.delete_account())?),
    }
}

/// The answers recorded with `flow answer` for the current test.
fn local_answers(store: &SqliteStore, config: &Config) -> CliResult<SavedAssessment> {
    let session = load_session(store, config)?;
    session
        .saved_assessment()
        .cloned()
        .ok_or_else(|| "no saved answers; record some with `flow answer` first".into())
}
