//! Durable storage keys shared by the session and the gateway.

pub const SETUP_COMPLETE: &str = "pathfinder_setup_complete";
pub const USER_NAME: &str = "pathfinder_user_name";
pub const USER_GRADE: &str = "pathfinder_user_grade";
pub const USER_AGE: &str = "pathfinder_user_age";
pub const USER_LANGUAGE: &str = "pathfinder_user_language";

pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";

/// CLI-only: serialized session snapshot carried between invocations.
pub const CLI_SESSION: &str = "pathfinder_cli_session";
