use clap::Subcommand;
use pathfinder_core::AssessmentId;

use super::state::{print_json, with_session, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed assessments, most recent first
    List,
    /// Show one completed assessment
    Show { id: AssessmentId },
}

pub fn run(action: HistoryAction) -> CliResult {
    with_session(|session| match action {
        HistoryAction::List => {
            let records: Vec<_> = session.history().recent_first().collect();
            print_json(&records)
        }
        HistoryAction::Show { id } => match session.resolve(id) {
            Some(record) => print_json(record),
            None => Err(format!("assessment not found: {id}").into()),
        },
    })
}
