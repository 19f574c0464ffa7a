use clap::Args;
use pathfinder_core::storage::keys;
use pathfinder_core::{Config, CoreError, Language, LocalStore, SetupForm, SqliteStore};

use super::state::{boot_session, print_json, save_session, with_session, CliResult};

#[derive(Args)]
pub struct SetupArgs {
    /// Student name
    #[arg(long)]
    pub name: String,
    /// School grade
    #[arg(long, default_value = "10th")]
    pub grade: String,
    /// Age in years
    #[arg(long)]
    pub age: String,
    /// Agree to the terms and privacy policy
    #[arg(long)]
    pub consent: bool,
    /// Switch language before validating (en, hi, te, ta, bn, gu)
    #[arg(long)]
    pub language: Option<Language>,
}

/// Print the current session state as JSON.
pub fn status() -> CliResult {
    with_session(|session| print_json(&session.state_event()))
}

/// Drop the saved session and boot as a newly started app would.
pub fn boot() -> CliResult {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    store.remove(keys::CLI_SESSION)?;
    let session = boot_session(&store, &config)?;
    print_json(&session.state_event())?;
    save_session(&session)
}

pub fn setup(args: SetupArgs) -> CliResult {
    with_session(|session| {
        if let Some(language) = args.language {
            session.set_language(language)?;
        }
        let form = SetupForm {
            name: args.name,
            grade: args.grade,
            age: args.age,
            consent: args.consent,
        };
        match session.complete_setup(&form) {
            Ok(event) => print_json(&event),
            Err(CoreError::Setup(errors)) => {
                for (field, message) in &errors.fields {
                    eprintln!("  {}: {message}", format!("{field:?}").to_lowercase());
                }
                Err(errors.into())
            }
            Err(e) => Err(e.into()),
        }
    })
}

pub fn language(code: Language) -> CliResult {
    with_session(|session| print_json(&session.set_language(code)?))
}

pub fn logout() -> CliResult {
    with_session(|session| print_json(&session.logout()?))
}
