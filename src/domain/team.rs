//! Teams and the per-team head count.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the two factions a player commits to when joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Red paint.
    Red,
    /// Blue paint.
    Blue,
}

impl Team {
    /// Returns the wire name of the team.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of joined players on each team.
///
/// Derived from the registry contents: incremented on join, decremented
/// on leave. Between handler invocations `red + blue` equals the
/// registry size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TeamCounts {
    /// Players on [`Team::Red`].
    pub red: usize,
    /// Players on [`Team::Blue`].
    pub blue: usize,
}

impl TeamCounts {
    /// Returns the count for `team`.
    #[must_use]
    pub const fn get(&self, team: Team) -> usize {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }

    /// Sum of both teams.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.red + self.blue
    }

    pub(crate) fn increment(&mut self, team: Team) {
        let slot = self.slot_mut(team);
        *slot = slot.saturating_add(1);
    }

    pub(crate) fn decrement(&mut self, team: Team) {
        let slot = self.slot_mut(team);
        *slot = slot.saturating_sub(1);
    }

    fn slot_mut(&mut self, team: Team) -> &mut usize {
        match team {
            Team::Red => &mut self.red,
            Team::Blue => &mut self.blue,
        }
    }
}

impl fmt::Display for TeamCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "red={} blue={}", self.red, self.blue)
    }
}
