//! IF-MIB interface status values.
//!
//! Query layers hand back `ifAdminStatus` / `ifOperStatus` either as the bare
//! integer (`"1"`), the enumeration label (`"up"`), or both (`"up(1)"`). All three
//! spellings parse to the same variant.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative state of an interface (`ifAdminStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    /// up(1)
    Up,
    /// down(2)
    Down,
    /// testing(3)
    Testing,
}

impl AdminState {
    pub const fn is_up(&self) -> bool {
        matches!(self, AdminState::Up)
    }

    pub const fn code(&self) -> u8 {
        match self {
            AdminState::Up => 1,
            AdminState::Down => 2,
            AdminState::Testing => 3,
        }
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminState::Up => write!(f, "up"),
            AdminState::Down => write!(f, "down"),
            AdminState::Testing => write!(f, "testing"),
        }
    }
}

impl FromStr for AdminState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "1" | "up" => Ok(AdminState::Up),
            "2" | "down" => Ok(AdminState::Down),
            "3" | "testing" => Ok(AdminState::Testing),
            _ => Err(ParseError::InvalidStatus(format!(
                "invalid admin status: {}",
                s
            ))),
        }
    }
}

/// Operational state of an interface (`ifOperStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperState {
    /// up(1)
    Up,
    /// down(2)
    Down,
    /// testing(3)
    Testing,
    /// unknown(4)
    Unknown,
    /// dormant(5)
    Dormant,
    /// notPresent(6)
    NotPresent,
    /// lowerLayerDown(7)
    LowerLayerDown,
}

impl OperState {
    pub const fn is_up(&self) -> bool {
        matches!(self, OperState::Up)
    }

    pub const fn code(&self) -> u8 {
        match self {
            OperState::Up => 1,
            OperState::Down => 2,
            OperState::Testing => 3,
            OperState::Unknown => 4,
            OperState::Dormant => 5,
            OperState::NotPresent => 6,
            OperState::LowerLayerDown => 7,
        }
    }
}

impl fmt::Display for OperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperState::Up => "up",
            OperState::Down => "down",
            OperState::Testing => "testing",
            OperState::Unknown => "unknown",
            OperState::Dormant => "dormant",
            OperState::NotPresent => "notPresent",
            OperState::LowerLayerDown => "lowerLayerDown",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for OperState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status(s).as_str() {
            "1" | "up" => Ok(OperState::Up),
            "2" | "down" => Ok(OperState::Down),
            "3" | "testing" => Ok(OperState::Testing),
            "4" | "unknown" => Ok(OperState::Unknown),
            "5" | "dormant" => Ok(OperState::Dormant),
            "6" | "notpresent" => Ok(OperState::NotPresent),
            "7" | "lowerlayerdown" => Ok(OperState::LowerLayerDown),
            _ => Err(ParseError::InvalidStatus(format!(
                "invalid oper status: {}",
                s
            ))),
        }
    }
}

/// Lowercases and reduces `label(code)` to `label`.
fn normalize_status(s: &str) -> String {
    let s = s.trim();
    let label = match s.split_once('(') {
        Some((label, _)) if !label.is_empty() => label,
        _ => s,
    };
    label.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_admin_state_spellings() {
        assert_eq!("1".parse::<AdminState>().unwrap(), AdminState::Up);
        assert_eq!("up".parse::<AdminState>().unwrap(), AdminState::Up);
        assert_eq!("down(2)".parse::<AdminState>().unwrap(), AdminState::Down);
        assert_eq!(" TESTING ".parse::<AdminState>().unwrap(), AdminState::Testing);
        assert!("4".parse::<AdminState>().is_err());
    }

    #[test]
    fn test_oper_state_spellings() {
        assert_eq!("1".parse::<OperState>().unwrap(), OperState::Up);
        assert_eq!("7".parse::<OperState>().unwrap(), OperState::LowerLayerDown);
        assert_eq!(
            "notPresent(6)".parse::<OperState>().unwrap(),
            OperState::NotPresent
        );
        assert!("".parse::<OperState>().is_err());
        assert!("bogus".parse::<OperState>().is_err());
    }

    #[test]
    fn test_codes_roundtrip_through_parse() {
        for code in 1..=7u8 {
            let state: OperState = code.to_string().parse().unwrap();
            assert_eq!(state.code(), code);
        }
        assert_eq!(AdminState::Testing.code(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(AdminState::Up.to_string(), "up");
        assert_eq!(OperState::LowerLayerDown.to_string(), "lowerLayerDown");
        assert!(OperState::Up.is_up());
        assert!(!AdminState::Down.is_up());
    }
}
