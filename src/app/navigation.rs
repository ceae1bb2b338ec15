//! Navigation destinations and the pending-route slot.
//!
//! Screens never navigate directly. Handling an action may leave a [`Route`] in
//! the session's [`NavigationSlot`]; the presentation layer takes it and performs
//! the transition. The slot holds at most one route and the last write wins.

use crate::domain::error::WordBridgeError;
use crate::domain::WordId;
use std::fmt;
use std::str::FromStr;

/// A navigation destination, addressable by its path string.
///
/// # Example
///
/// ```rust
/// use wordbridge::app::Route;
/// use wordbridge::domain::WordId;
///
/// let route = Route::WordUpdate(WordId::new(12));
/// assert_eq!(route.to_string(), "word_update/12");
/// assert_eq!("word_update/12".parse::<Route>().unwrap(), route);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Words,
    WordAdd,
    WordUpdate(WordId),
    Favorite,
    Settings,
    WidgetSetting,
}

const WORD_UPDATE_PREFIX: &str = "word_update/";

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Words => f.write_str("words"),
            Self::WordAdd => f.write_str("word_add"),
            Self::WordUpdate(id) => write!(f, "{WORD_UPDATE_PREFIX}{id}"),
            Self::Favorite => f.write_str("favorite"),
            Self::Settings => f.write_str("settings"),
            Self::WidgetSetting => f.write_str("widget_setting"),
        }
    }
}

impl FromStr for Route {
    type Err = WordBridgeError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path {
            "words" => Ok(Self::Words),
            "word_add" => Ok(Self::WordAdd),
            "favorite" => Ok(Self::Favorite),
            "settings" => Ok(Self::Settings),
            "widget_setting" => Ok(Self::WidgetSetting),
            _ => path
                .strip_prefix(WORD_UPDATE_PREFIX)
                .and_then(|id| id.parse::<i64>().ok())
                .filter(|id| *id > 0)
                .map(|id| Self::WordUpdate(WordId::new(id)))
                .ok_or_else(|| WordBridgeError::Validation(format!("unknown route: {path}"))),
        }
    }
}

/// Single pending navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationSlot {
    pending: Option<Route>,
}

impl NavigationSlot {
    /// Stores `route`, replacing any route not consumed yet.
    pub fn set(&mut self, route: Route) {
        if let Some(previous) = self.pending.replace(route) {
            tracing::debug!(%previous, %route, "pending route overwritten");
        }
    }

    /// Consumes the pending route.
    pub fn take(&mut self) -> Option<Route> {
        self.pending.take()
    }

    #[must_use]
    pub const fn peek(&self) -> Option<Route> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes_round_trip_through_paths() {
        for route in [
            Route::Words,
            Route::WordAdd,
            Route::Favorite,
            Route::Settings,
            Route::WidgetSetting,
        ] {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn malformed_update_paths_are_rejected() {
        assert!("word_update/".parse::<Route>().is_err());
        assert!("word_update/abc".parse::<Route>().is_err());
        assert!("word_update/0".parse::<Route>().is_err());
        assert!("home".parse::<Route>().is_err());
    }

    #[test]
    fn slot_is_last_write_wins_and_consumed_once() {
        let mut slot = NavigationSlot::default();
        slot.set(Route::WordUpdate(WordId::new(1)));
        slot.set(Route::WordUpdate(WordId::new(2)));

        assert_eq!(slot.peek(), Some(Route::WordUpdate(WordId::new(2))));
        assert_eq!(slot.take(), Some(Route::WordUpdate(WordId::new(2))));
        assert_eq!(slot.take(), None);
    }
}
