//! Authentication boundary. Who the user is gets decided elsewhere; this
//! module only routes between the landing page and the dashboard.

use crate::config::LandingTheme;
use crate::error::AppError;

const USER_ENV_VAR: &str = "TODOFLOW_USER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated { name: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing(LandingTheme),
    Dashboard,
}

impl Session {
    /// Reads the session handed over by the external sign-in guard.
    /// A set but empty variable is a signed-in user without a display name.
    pub fn from_env() -> Self {
        match std::env::var(USER_ENV_VAR) {
            Ok(value) => Self::authenticated(&value),
            Err(_) => Self::Anonymous,
        }
    }

    pub fn authenticated(name: &str) -> Self {
        let trimmed = name.trim();
        Self::Authenticated {
            name: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn require(&self) -> Result<(), AppError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthenticated)
        }
    }

    pub fn screen(&self, theme: LandingTheme) -> Screen {
        if self.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Landing(theme)
        }
    }

    pub fn welcome_line(&self) -> String {
        let name = match self {
            Self::Authenticated { name: Some(name) } => name.as_str(),
            _ => "there",
        };
        format!("Welcome back, {name}!")
    }
}

#[cfg(test)]
mod tests {
    use super::{Screen, Session};
    use crate::config::LandingTheme;

    #[test]
    fn anonymous_sessions_see_the_landing_page() {
        let session = Session::Anonymous;

        assert_eq!(
            session.screen(LandingTheme::Noir),
            Screen::Landing(LandingTheme::Noir)
        );
        assert_eq!(session.require().unwrap_err().code(), "unauthenticated");
    }

    #[test]
    fn authenticated_sessions_see_the_dashboard() {
        let session = Session::authenticated("Ada");

        assert_eq!(session.screen(LandingTheme::Classic), Screen::Dashboard);
        assert!(session.require().is_ok());
        assert_eq!(session.welcome_line(), "Welcome back, Ada!");
    }

    #[test]
    fn nameless_users_are_greeted_generically() {
        let session = Session::authenticated("   ");

        assert!(session.is_authenticated());
        assert_eq!(session.welcome_line(), "Welcome back, there!");
    }
}
