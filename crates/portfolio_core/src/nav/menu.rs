//! Navigation menu entries shown on protected pages.

use crate::nav::route::{Route, ABOUT_PATH, FREELANCER_PATH, HOME_PATH, PROJECTS_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

impl NavItem {
    /// Whether this entry should be highlighted while `current` is shown.
    pub fn is_active(&self, current: &Route) -> bool {
        Route::parse(self.path) == *current
    }
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Home",
        path: HOME_PATH,
    },
    NavItem {
        label: "About",
        path: ABOUT_PATH,
    },
    NavItem {
        label: "Projects",
        path: PROJECTS_PATH,
    },
    NavItem {
        label: "Freelancer",
        path: FREELANCER_PATH,
    },
];

pub fn nav_items() -> &'static [NavItem] {
    NAV_ITEMS
}
