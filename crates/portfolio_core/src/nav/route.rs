//! Fixed route table.

use std::fmt::{Display, Formatter};

pub const HOME_PATH: &str = "/";
pub const ABOUT_PATH: &str = "/about";
pub const PROJECTS_PATH: &str = "/projects";
pub const FREELANCER_PATH: &str = "/freelancer";
pub const LOGIN_PATH: &str = "/login";

/// A resolved page. Unknown paths keep the requested path for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Projects,
    Freelancer,
    Login,
    NotFound(String),
}

impl Route {
    /// Matches `path` against the route table.
    ///
    /// Matching ignores case, a query string, a fragment and one trailing
    /// slash, so `/About/?tab=1` resolves to [`Route::About`].
    pub fn parse(path: &str) -> Self {
        let normalized = normalize_path(path);
        match normalized.as_str() {
            HOME_PATH => Self::Home,
            ABOUT_PATH => Self::About,
            PROJECTS_PATH => Self::Projects,
            FREELANCER_PATH => Self::Freelancer,
            LOGIN_PATH => Self::Login,
            _ => Self::NotFound(path.trim().to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Home => HOME_PATH,
            Self::About => ABOUT_PATH,
            Self::Projects => PROJECTS_PATH,
            Self::Freelancer => FREELANCER_PATH,
            Self::Login => LOGIN_PATH,
            Self::NotFound(path) => path.as_str(),
        }
    }

    /// Pages that require an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::About | Self::Projects | Self::Freelancer
        )
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Self::Login)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let bare = &trimmed[..end];
    let bare = if bare.len() > 1 {
        bare.strip_suffix('/').unwrap_or(bare)
    } else {
        bare
    };
    if bare.is_empty() {
        return HOME_PATH.to_string();
    }
    bare.to_ascii_lowercase()
}
