//! Views and the links between them.
//!
//! ```text
//! Landing ──► Form ──submit──► Report
//!              ▲                  │
//!              └──── back / no record
//! ```

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Landing,
    Form,
    Report,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Form => "/form",
            Route::Report => "/report",
        }
    }

    /// Where the view's back link goes, if it has one.
    pub fn back(self) -> Option<Route> {
        match self {
            Route::Landing => None,
            Route::Form => Some(Route::Landing),
            Route::Report => Some(Route::Form),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
