//! Views and where each operation sends the user

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Landing,
    Login,
    Dashboard,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Landing => "/",
            View::Login => "/login",
            View::Dashboard => "/dashboard",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, View::Dashboard)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/').to_lowercase().as_str() {
            "" | "landing" | "index" => Ok(View::Landing),
            "login" => Ok(View::Login),
            "dashboard" => Ok(View::Dashboard),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// The result of a successful operation plus the view to show next.
#[derive(Debug, Clone, Serialize)]
pub struct Navigation<T> {
    pub data: T,
    pub redirect: View,
}

impl<T> Navigation<T> {
    pub fn new(data: T, redirect: View) -> Self {
        Self { data, redirect }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_views() {
        assert_eq!("/".parse::<View>().unwrap(), View::Landing);
        assert_eq!("login".parse::<View>().unwrap(), View::Login);
        assert_eq!("/Dashboard".parse::<View>().unwrap(), View::Dashboard);
        assert!("settings".parse::<View>().is_err());
    }

    #[test]
    fn test_only_dashboard_requires_auth() {
        assert!(View::Dashboard.requires_auth());
        assert!(!View::Login.requires_auth());
        assert!(!View::Landing.requires_auth());
    }
}
