use alloc::borrow::{Cow, ToOwned};
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::GameError;

/// Content of a single board cell, shared by the mine layout and the visible field.
///
/// On the wire every cell is a short string token:
///
/// | cell        | token          |
/// |-------------|----------------|
/// | `Hidden`    | `" "`          |
/// | `Count(n)`  | `"0"` .. `"8"` |
/// | `Mine`      | `"X"`          |
/// | `Marked`    | `"M"`          |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Not revealed yet, only ever appears in the visible field.
    Hidden,
    /// Safe cell with the number of adjacent mines.
    Count(u8),
    /// A mine, visible to the player only after the game is lost.
    Mine,
    /// Unopened mine shown after the game is won.
    Marked,
}

impl Cell {
    pub const HIDDEN_TOKEN: &'static str = " ";
    pub const MINE_TOKEN: &'static str = "X";
    pub const MARKED_TOKEN: &'static str = "M";

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Whether this cell is a zero count, the only kind that expands a reveal.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Count(0))
    }

    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Count(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => f.write_str(Self::HIDDEN_TOKEN),
            Self::Count(count) => write!(f, "{count}"),
            Self::Mine => f.write_str(Self::MINE_TOKEN),
            Self::Marked => f.write_str(Self::MARKED_TOKEN),
        }
    }
}

impl FromStr for Cell {
    type Err = GameError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            Self::HIDDEN_TOKEN => Ok(Self::Hidden),
            Self::MINE_TOKEN => Ok(Self::Mine),
            Self::MARKED_TOKEN => Ok(Self::Marked),
            _ => match token.parse::<u8>() {
                Ok(count) if count <= 8 && token.len() == 1 => Ok(Self::Count(count)),
                _ => Err(GameError::InvalidCellToken(token.to_owned())),
            },
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = Cow::<'de, str>::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
