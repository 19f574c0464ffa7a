//! Page navigation.
//!
//! A flat state machine: any page may follow any other. Besides the current
//! page the navigator carries the results-visible flag and the id of the
//! selected assessment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::history::AssessmentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Setup,
    Home,
    Chatbot,
    TestSelection,
    TestForm,
    Processing,
    Results,
    AssessmentHistory,
    AssessmentResponses,
    Settings,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Setup,
        Page::Home,
        Page::Chatbot,
        Page::TestSelection,
        Page::TestForm,
        Page::Processing,
        Page::Results,
        Page::AssessmentHistory,
        Page::AssessmentResponses,
        Page::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Setup => "setup",
            Page::Home => "home",
            Page::Chatbot => "chatbot",
            Page::TestSelection => "test-selection",
            Page::TestForm => "test-form",
            Page::Processing => "processing",
            Page::Results => "results",
            Page::AssessmentHistory => "assessment-history",
            Page::AssessmentResponses => "assessment-responses",
            Page::Settings => "settings",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown page: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigator {
    page: Page,
    show_results: bool,
    selected_assessment: Option<AssessmentId>,
}

impl Navigator {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            show_results: false,
            selected_assessment: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn show_results(&self) -> bool {
        self.show_results
    }

    pub fn selected_assessment(&self) -> Option<AssessmentId> {
        self.selected_assessment
    }

    /// Move to `page`.
    ///
    /// Leaving `show_results` out clears the flag; leaving
    /// `selected_assessment` out keeps the previous selection.
    pub fn navigate_to(
        &mut self,
        page: Page,
        show_results: Option<bool>,
        selected_assessment: Option<AssessmentId>,
    ) {
        self.show_results = show_results.unwrap_or(false);
        if let Some(id) = selected_assessment {
            self.selected_assessment = Some(id);
        }
        self.page = page;
    }

    /// Drop every auxiliary flag and land on `page`.
    pub fn reset(&mut self, page: Page) {
        *self = Self::new(page);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Page::Setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_names_roundtrip() {
        for page in Page::ALL {
            assert_eq!(page.as_str().parse::<Page>().unwrap(), page);
            assert_eq!(
                serde_json::to_string(&page).unwrap(),
                format!("\"{}\"", page.as_str())
            );
        }
    }

    #[test]
    fn omitted_results_flag_is_cleared() {
        let mut nav = Navigator::new(Page::Home);
        nav.navigate_to(Page::Chatbot, Some(true), None);
        assert!(nav.show_results());
        nav.navigate_to(Page::Chatbot, None, None);
        assert!(!nav.show_results());
    }

    #[test]
    fn selection_survives_plain_navigation() {
        let mut nav = Navigator::new(Page::Home);
        nav.navigate_to(Page::Chatbot, Some(true), Some(42));
        assert!(nav.show_results());
        assert_eq!(nav.selected_assessment(), Some(42));

        nav.navigate_to(Page::Home, None, None);
        assert_eq!(nav.selected_assessment(), Some(42));
        assert!(!nav.show_results());
        assert_eq!(nav.page(), Page::Home);
    }

    #[test]
    fn navigation_is_idempotent() {
        let mut once = Navigator::new(Page::Setup);
        once.navigate_to(Page::AssessmentResponses, Some(false), Some(7));
        let mut twice = once.clone();
        twice.navigate_to(Page::AssessmentResponses, Some(false), Some(7));
        assert_eq!(once, twice);
    }

    #[test]
    fn any_transition_is_legal() {
        let mut nav = Navigator::new(Page::Setup);
        nav.navigate_to(Page::Processing, None, None);
        assert_eq!(nav.page(), Page::Processing);
    }

    #[test]
    fn reset_clears_selection() {
        let mut nav = Navigator::new(Page::Home);
        nav.navigate_to(Page::Results, Some(true), Some(3));
        nav.reset(Page::Setup);
        assert_eq!(nav, Navigator::new(Page::Setup));
    }
}
