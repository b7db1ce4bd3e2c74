use regex::Regex;
use std::fmt;
use thiserror::Error;

use super::error::RouterResult;

/// Anchored grammar for page routes: `/<action>/<title>`
pub const ROUTE_PATTERN: &str = r"^/(view|edit|save)/([a-zA-Z0-9]+)$";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid page path")]
pub struct ValidationError;

pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Edit,
    Save,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Save => "save",
        }
    }

    /// URL path for this action on a title
    pub fn path_for(&self, title: &str) -> String {
        format!("/{}/{}", self.as_str(), title)
    }

    fn from_capture(s: &str) -> Option<Self> {
        match s {
            "view" => Some(Action::View),
            "edit" => Some(Action::Edit),
            "save" => Some(Action::Save),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated page route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub action: Action,
    pub title: String,
}

/// Matches request paths against [`ROUTE_PATTERN`].
///
/// Titles outside `[a-zA-Z0-9]+` are rejected, never sanitized, so a title
/// can always be turned into a file name without escaping the data directory.
#[derive(Debug, Clone)]
pub struct PathValidator {
    pattern: Regex,
}

impl PathValidator {
    pub fn new() -> RouterResult<Self> {
        Ok(Self {
            pattern: Regex::new(ROUTE_PATTERN)?,
        })
    }

    pub fn validate(&self, path: &str) -> ValidationResult<Route> {
        let caps = self.pattern.captures(path).ok_or(ValidationError)?;
        let action = Action::from_capture(&caps[1]).ok_or(ValidationError)?;
        Ok(Route {
            action,
            title: caps[2].to_string(),
        })
    }
}
