//! # PathFinder Core Library
//!
//! Client-side logic for PathFinder, a career-assessment tool for school
//! students. A student completes a one-time setup, takes a fixed sequence of
//! tests (aptitude, values, personal), and each finished sequence becomes a
//! completed assessment that results and the chatbot refer to.
//!
//! All behaviour lives here; the CLI binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Session**: [`AppSession`] owns profile, navigation, flow position and
//!   assessment history, and turns commands into [`Event`]s
//! - **Flow**: the ordered test sequence and its tracker
//! - **Storage**: a string key/value store (SQLite or in-memory) and TOML
//!   configuration
//! - **API**: a typed client for the backend REST endpoints
//!
//! ## Key Components
//!
//! - [`AppSession`]: Session controller
//! - [`FlowTracker`]: Position within the assessment flow
//! - [`SqliteStore`]: Durable key/value storage
//! - [`Config`]: Application configuration management
//! - [`ApiClient`]: Backend gateway

pub mod api;
pub mod error;
pub mod events;
pub mod flow;
pub mod history;
pub mod i18n;
pub mod navigation;
pub mod profile;
pub mod session;
pub mod setup;
pub mod storage;

pub use api::ApiClient;
pub use error::{ApiError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use flow::{AssessmentFlow, FlowError, FlowStep, FlowTracker, SavedAssessment, TestType};
pub use history::{AssessmentHistory, AssessmentId, CompletedAssessment};
pub use navigation::{Navigator, Page};
pub use profile::{Language, UserProfile};
pub use session::{AppSession, SessionSnapshot};
pub use setup::{SetupErrors, SetupField, SetupForm};
pub use storage::{Config, LocalStore, MemoryStore, SqliteStore};
