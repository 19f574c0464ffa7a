use clap::Subcommand;
use pathfinder_core::UserProfile;

use super::state::{print_json, with_session, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the current profile
    Show,
    /// Edit profile fields; omitted fields keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

pub fn run(action: ProfileAction) -> CliResult {
    with_session(|session| match action {
        ProfileAction::Show => print_json(session.profile()),
        ProfileAction::Update {
            name,
            grade,
            age,
            email,
            phone,
        } => {
            let current = session.profile().clone();
            let profile = UserProfile {
                name: name.unwrap_or(current.name),
                class: grade.unwrap_or(current.class),
                age: age.or(current.age),
                email: email.or(current.email),
                phone: phone.or(current.phone),
                ..current
            };
            print_json(&session.update_profile(profile)?)
        }
    })
}
