//! Token countdown state and reconciliation logic

use serde::{Deserialize, Serialize};

/// Authoritative token status reported by the backend.
///
/// The backend owns all expiry math; this status is never derived locally.
/// Unrecognised strings deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    Active,
    Expired,
    Error,
    NotGenerated,
    #[serde(other)]
    Unknown,
}

impl Default for TokenStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Countdown state for a single token-bearing connection.
///
/// The backend's `seconds_left` is the single source of truth; between polls
/// the ticker decrements a local copy. The `last_seen_authoritative` field is
/// how the ticker tells "a fresh poll landed" apart from its own decrements:
/// the tick path compares the current authoritative value against it and
/// resyncs instead of decrementing when they differ.
#[derive(Debug, Clone, Default)]
pub struct TokenTimerState {
    /// Last `seconds_left` received from the backend. May be negative
    /// (already expired) or `None` (no token).
    authoritative_seconds_left: Option<i64>,
    /// Locally decremented value driving the rendered countdown, floored at 0.
    display_seconds: u64,
    /// Authoritative value the ticker acted on most recently.
    last_seen_authoritative: Option<i64>,
    token_status: TokenStatus,
    /// Display-only timestamps, passed through verbatim from the backend.
    expires_at: Option<String>,
    last_refreshed_at: Option<String>,
    next_auto_refresh_at: Option<String>,
}

impl TokenTimerState {
    /// Create a token-less state (placeholder display).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh authoritative snapshot from the backend.
    ///
    /// For an instance that already holds a countdown this only records the
    /// value; the next `tick` detects the change and resyncs the display.
    /// For a fresh (or previously cleared) instance the display is seeded
    /// immediately so the first render does not wait a full tick.
    pub fn on_authoritative_update(
        &mut self,
        seconds_left: Option<i64>,
        status: TokenStatus,
        expires_at: Option<String>,
        last_refreshed_at: Option<String>,
        next_auto_refresh_at: Option<String>,
    ) {
        match seconds_left {
            Some(secs) => {
                self.authoritative_seconds_left = Some(secs);
                self.token_status = status;
                self.expires_at = expires_at;
                self.last_refreshed_at = last_refreshed_at;
                self.next_auto_refresh_at = next_auto_refresh_at;

                if self.last_seen_authoritative.is_none() {
                    self.display_seconds = secs.max(0) as u64;
                    self.last_seen_authoritative = Some(secs);
                }
            }
            // Token removed: never hold a stale countdown.
            None => self.clear(),
        }
    }

    /// Advance the countdown by one second, or resync if a fresh
    /// authoritative value has landed since the last tick.
    pub fn tick(&mut self) {
        let Some(current) = self.authoritative_seconds_left else {
            // No token: nothing to count down.
            return;
        };

        if self.last_seen_authoritative != Some(current) {
            // A poll landed between ticks: adopt the backend's value,
            // overriding the decrement this tick.
            self.display_seconds = current.max(0) as u64;
            self.last_seen_authoritative = Some(current);
        } else {
            self.display_seconds = self.display_seconds.saturating_sub(1);
        }
    }

    /// Reset to the token-less placeholder state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether an authoritative countdown is present at all.
    pub fn has_token(&self) -> bool {
        self.authoritative_seconds_left.is_some()
    }

    pub fn display_seconds(&self) -> u64 {
        self.display_seconds
    }

    pub fn token_status(&self) -> TokenStatus {
        self.token_status
    }

    pub fn expires_at(&self) -> Option<&str> {
        self.expires_at.as_deref()
    }

    pub fn last_refreshed_at(&self) -> Option<&str> {
        self.last_refreshed_at.as_deref()
    }

    pub fn next_auto_refresh_at(&self) -> Option<&str> {
        self.next_auto_refresh_at.as_deref()
    }
}
