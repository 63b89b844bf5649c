//! Top-level view routing.
//!
//! One tab is selected at a time; the rendered view depends on the tab and
//! on whether a user is signed in. There is no history stack.

use strum::{Display, EnumIter, EnumString};

use crate::user::User;

pub const DISCOVER_PLACEHOLDER: &str = "Discover page coming soon";
pub const INBOX_PLACEHOLDER: &str = "No new messages";

/// Bottom tab bar entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Tab {
    #[default]
    #[strum(to_string = "feed", serialize = "home")]
    Feed,
    #[strum(to_string = "discover", serialize = "search")]
    Discover,
    #[strum(to_string = "inbox")]
    Inbox,
    #[strum(to_string = "profile", serialize = "me")]
    Profile,
}

impl Tab {
    /// Tabs that render the authentication view when nobody is signed in.
    pub fn requires_session(self) -> bool {
        matches!(self, Tab::Inbox | Tab::Profile)
    }
}

/// The view rendered for the selected tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Feed,
    Discover,
    Inbox,
    Profile(User),
    Auth,
}

/// Resolves the view for a tab given the current session.
pub fn resolve_view(tab: Tab, user: Option<&User>) -> View {
    match (tab, user) {
        (Tab::Feed, _) => View::Feed,
        (Tab::Discover, _) => View::Discover,
        (Tab::Inbox, Some(_)) => View::Inbox,
        (Tab::Profile, Some(user)) => View::Profile(user.clone()),
        (Tab::Inbox | Tab::Profile, None) => View::Auth,
    }
}

/// Holds the selected tab.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    tab: Tab,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Selects a tab, returning the previously selected one.
    pub fn select(&mut self, tab: Tab) -> Tab {
        std::mem::replace(&mut self.tab, tab)
    }

    pub fn view(&self, user: Option<&User>) -> View {
        resolve_view(self.tab, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserStats;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn user() -> User {
        User {
            id: "u_123".to_string(),
            username: "a".to_string(),
            email: "a@b.com".to_string(),
            avatar: String::new(),
            bio: String::new(),
            stats: UserStats::zero(),
        }
    }

    #[test]
    fn test_parse_tab_aliases() {
        assert_eq!(Tab::from_str("home").unwrap(), Tab::Feed);
        assert_eq!(Tab::from_str("Feed").unwrap(), Tab::Feed);
        assert_eq!(Tab::from_str("search").unwrap(), Tab::Discover);
        assert_eq!(Tab::from_str("me").unwrap(), Tab::Profile);
        assert!(Tab::from_str("settings").is_err());
        assert_eq!(Tab::Inbox.to_string(), "inbox");
    }

    #[test]
    fn test_protected_tabs_without_session_render_auth() {
        for tab in Tab::iter() {
            let view = resolve_view(tab, None);
            if tab.requires_session() {
                assert_eq!(view, View::Auth, "{tab} should require a session");
            } else {
                assert_ne!(view, View::Auth);
            }
        }
    }

    #[test]
    fn test_protected_tabs_with_session() {
        let user = user();
        assert_eq!(resolve_view(Tab::Inbox, Some(&user)), View::Inbox);
        assert_eq!(resolve_view(Tab::Profile, Some(&user)), View::Profile(user.clone()));
    }

    #[test]
    fn test_router_select_replaces() {
        let mut router = ViewRouter::new();
        assert_eq!(router.tab(), Tab::Feed);
        assert_eq!(router.select(Tab::Discover), Tab::Feed);
        assert_eq!(router.view(None), View::Discover);
    }
}
