pub mod account;
pub mod config;
pub mod flow;
pub mod history;
pub mod nav;
pub mod profile;
pub mod remote;
mod state;
