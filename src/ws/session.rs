//! Per-connection lifecycle.
//!
//! A connection starts [`SessionPhase::Unjoined`] and becomes
//! [`SessionPhase::Joined`] after a successful `joinGame`. The phase is
//! owned by the connection task and handed to the relay by `&mut`, so
//! "update before join" and "double join" are explicit match arms rather
//! than registry misses.

use chrono::{DateTime, Utc};

use crate::domain::Team;

/// Where a single connection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Connected, no player record.
    #[default]
    Unjoined,
    /// Owns a player record in the registry.
    Joined {
        /// Team chosen at join.
        team: Team,
        /// When the join was accepted.
        joined_at: DateTime<Utc>,
    },
}

impl SessionPhase {
    /// Transition taken on an accepted `joinGame`.
    #[must_use]
    pub fn joined(team: Team) -> Self {
        Self::Joined {
            team,
            joined_at: Utc::now(),
        }
    }

    /// Returns `true` once the connection owns a player record.
    #[must_use]
    pub const fn is_joined(&self) -> bool {
        matches!(self, Self::Joined { .. })
    }

    /// Team of the joined player, if any.
    #[must_use]
    pub const fn team(&self) -> Option<Team> {
        match self {
            Self::Unjoined => None,
            Self::Joined { team, .. } => Some(*team),
        }
    }
}
