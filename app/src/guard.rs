//! Route access guard.
//!
//! The guard is a pure classification over the session slice: it decides,
//! it does not navigate. Callers must show a neutral loading view while the
//! decision is [`RouteAccess::Pending`] to avoid a flash of incorrect
//! redirect before the boot-time auth check completes.

use crate::state::SessionState;

/// Access rule attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRule {
    /// Anyone may visit
    Public,
    /// Requires a logged-in user
    Protected,
    /// Only for logged-out visitors (login, register, password reset)
    GuestOnly,
}

/// Guard decision for one route visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Auth check not finished; render a neutral loading state
    Pending,
    /// Render the route
    Allow,
    /// Send the visitor to the login page, preserving where they came from
    RedirectToLogin {
        /// Origin path to return to after login
        from: String,
    },
    /// Logged-in user on a guest-only route; send them away
    RedirectAway,
}

/// Classify a route visit against the current session.
#[must_use]
pub fn route_access(rule: RouteRule, path: &str, session: &SessionState) -> RouteAccess {
    if !session.is_auth_checked {
        return RouteAccess::Pending;
    }

    match rule {
        RouteRule::Public => RouteAccess::Allow,
        RouteRule::Protected => {
            if session.is_authenticated {
                RouteAccess::Allow
            } else {
                RouteAccess::RedirectToLogin {
                    from: path.to_string(),
                }
            }
        },
        RouteRule::GuestOnly => {
            if session.is_authenticated {
                RouteAccess::RedirectAway
            } else {
                RouteAccess::Allow
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::User;

    fn unchecked() -> SessionState {
        SessionState::default()
    }

    fn guest() -> SessionState {
        SessionState {
            is_auth_checked: true,
            ..SessionState::default()
        }
    }

    fn logged_in() -> SessionState {
        SessionState {
            is_auth_checked: true,
            is_authenticated: true,
            user: Some(User {
                email: "user@example.com".to_string(),
                name: "User".to_string(),
            }),
            error: None,
        }
    }

    #[test]
    fn every_rule_is_pending_before_auth_check() {
        for rule in [RouteRule::Public, RouteRule::Protected, RouteRule::GuestOnly] {
            assert_eq!(
                route_access(rule, "/profile", &unchecked()),
                RouteAccess::Pending
            );
        }
    }

    #[test]
    fn protected_route_redirects_guests_preserving_origin() {
        assert_eq!(
            route_access(RouteRule::Protected, "/profile/orders", &guest()),
            RouteAccess::RedirectToLogin {
                from: "/profile/orders".to_string()
            }
        );
    }

    #[test]
    fn protected_route_allows_logged_in_users() {
        assert_eq!(
            route_access(RouteRule::Protected, "/profile", &logged_in()),
            RouteAccess::Allow
        );
    }

    #[test]
    fn guest_only_route_redirects_logged_in_users_away() {
        assert_eq!(
            route_access(RouteRule::GuestOnly, "/login", &logged_in()),
            RouteAccess::RedirectAway
        );
        assert_eq!(
            route_access(RouteRule::GuestOnly, "/login", &guest()),
            RouteAccess::Allow
        );
    }

    #[test]
    fn public_routes_always_render_after_auth_check() {
        assert_eq!(
            route_access(RouteRule::Public, "/", &guest()),
            RouteAccess::Allow
        );
        assert_eq!(
            route_access(RouteRule::Public, "/", &logged_in()),
            RouteAccess::Allow
        );
    }
}
