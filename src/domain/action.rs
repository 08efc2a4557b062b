//! Registration action - what to do with a course.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The operation requested against the registration endpoint.
///
/// The configured value is honored literally: `"drop"` drops. Anything other
/// than `add`/`drop` is rejected at configuration time rather than silently
/// rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationAction {
    #[default]
    Add,
    Drop,
}

impl RegistrationAction {
    /// Wire value used in the outbound request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationAction::Add => "add",
            RegistrationAction::Drop => "drop",
        }
    }
}

impl fmt::Display for RegistrationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unrecognized action strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown registration action '{0}' (expected 'add' or 'drop')")]
pub struct UnknownAction(pub String);

impl FromStr for RegistrationAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(RegistrationAction::Add),
            "drop" => Ok(RegistrationAction::Drop),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_and_drop() {
        assert_eq!("add".parse::<RegistrationAction>(), Ok(RegistrationAction::Add));
        assert_eq!("drop".parse::<RegistrationAction>(), Ok(RegistrationAction::Drop));
    }

    #[test]
    fn drop_is_not_rewritten_to_add() {
        let action = "drop".parse::<RegistrationAction>().unwrap();
        assert_eq!(action.as_str(), "drop");
    }

    #[test]
    fn rejects_unknown_action() {
        assert!("swap".parse::<RegistrationAction>().is_err());
        assert!("".parse::<RegistrationAction>().is_err());
    }
}
