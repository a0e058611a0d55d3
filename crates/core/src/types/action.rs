//! Cart line actions.

use core::fmt;
use core::str::FromStr;

use super::ParseEnumError;

/// Direction of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Action carried by a cart line control, keyed by its action name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartAction {
    Adjust(Direction),
    Remove,
}

impl CartAction {
    pub const INCREASE: Self = Self::Adjust(Direction::Increase);
    pub const DECREASE: Self = Self::Adjust(Direction::Decrease);

    /// Action name as carried by line controls.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adjust(Direction::Increase) => "increase",
            Self::Adjust(Direction::Decrease) => "decrease",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CartAction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "increase" => Ok(Self::INCREASE),
            "decrease" => Ok(Self::DECREASE),
            "remove" => Ok(Self::Remove),
            other => Err(ParseEnumError::new("cart action", other)),
        }
    }
}
