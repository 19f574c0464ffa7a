use clap::Args;
use pathfinder_core::{AssessmentId, Page};

use super::state::{print_json, with_session, CliResult};

#[derive(Args)]
pub struct NavArgs {
    /// Target page (setup, home, chatbot, test-selection, test-form,
    /// processing, results, assessment-history, assessment-responses, settings)
    pub page: Page,
    /// Show results on the target page
    #[arg(long)]
    pub results: Option<bool>,
    /// Select a completed assessment
    #[arg(long)]
    pub assessment: Option<AssessmentId>,
}

pub fn run(args: NavArgs) -> CliResult {
    with_session(|session| {
        print_json(&session.navigate_to(args.page, args.results, args.assessment))
    })
}
