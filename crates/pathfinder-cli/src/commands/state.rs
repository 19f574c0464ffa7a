//! Session persistence between CLI invocations.
//!
//! A desktop UI keeps its session in memory; the CLI stores a snapshot in
//! the kv table after every command and restores it on the next one.

use pathfinder_core::storage::keys;
use pathfinder_core::{AppSession, Config, LocalStore, SessionSnapshot, SqliteStore};
use serde::Serialize;
use tracing::warn;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn load_session<'a>(
    store: &'a SqliteStore,
    config: &Config,
) -> CliResult<AppSession<&'a SqliteStore>> {
    if let Some(json) = store.get(keys::CLI_SESSION)? {
        match serde_json::from_str::<SessionSnapshot>(&json) {
            Ok(snapshot) => return Ok(AppSession::from_snapshot(store, snapshot)),
            Err(e) => warn!(error = %e, "discarding unreadable session snapshot"),
        }
    }
    boot_session(store, config)
}

/// Boot as a fresh process would, ignoring any saved snapshot.
pub fn boot_session<'a>(
    store: &'a SqliteStore,
    config: &Config,
) -> CliResult<AppSession<&'a SqliteStore>> {
    Ok(AppSession::boot(store, config.assessment_flow()?)?)
}

pub fn save_session(session: &AppSession<&SqliteStore>) -> CliResult {
    let json = serde_json::to_string(&session.snapshot())?;
    session.store().set(keys::CLI_SESSION, &json)?;
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Open the store, run `f` on the restored session, then save it back.
pub fn with_session<F>(f: F) -> CliResult
where
    F: FnOnce(&mut AppSession<&SqliteStore>) -> CliResult,
{
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    let mut session = load_session(&store, &config)?;
    f(&mut session)?;
    save_session(&session)
}
