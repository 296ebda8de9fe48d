//! Role-based route gating.
//!
//! The dashboard gates everything under `/dashboard` by admin role. The
//! decision is a static routing table over an [`AuthContext`] that callers
//! populate once at request entry; nothing here reads ambient state, so the
//! same context flows unchanged through one whole request.

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path prefix protected by the gate.
pub const DASHBOARD_PREFIX: &str = "/dashboard";
/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Landing page for admins bounced off a restricted route.
const DASHBOARD_HOME: &str = "/dashboard";
/// Admin management area, superadmin only.
const ADMINS_PREFIX: &str = "/dashboard/admins";
/// The only dashboard area a support role may use.
const REPORTS_PREFIX: &str = "/dashboard/reports";

/// Back-office roles, in decreasing order of reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    Admin,
    Support,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Superadmin => "superadmin",
            AdminRole::Admin => "admin",
            AdminRole::Support => "support",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(AdminRole::Superadmin),
            "admin" => Ok(AdminRole::Admin),
            "support" => Ok(AdminRole::Support),
            _ => Err(DashboardError::UnknownRole(s.to_string())),
        }
    }
}

/// Request-scoped authorization state, populated once at request entry and
/// never mutated mid-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthContext {
    role: Option<AdminRole>,
}

impl AuthContext {
    /// A context with no authenticated role.
    pub fn anonymous() -> Self {
        AuthContext { role: None }
    }

    pub fn with_role(role: AdminRole) -> Self {
        AuthContext { role: Some(role) }
    }

    /// Build from the raw role string carried by the request, if any.
    /// Unrecognized roles are treated as unauthenticated.
    pub fn from_role_str(raw: Option<&str>) -> Self {
        let role = raw.and_then(|s| match s.parse::<AdminRole>() {
            Ok(role) => Some(role),
            Err(_) => {
                log::debug!("ignoring unrecognized role value '{}'", s);
                None
            }
        });
        AuthContext { role }
    }

    pub fn role(&self) -> Option<AdminRole> {
        self.role
    }
}

/// Outcome of gating one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Send the client to this location instead.
    Redirect(String),
}

/// Gate `path` for the given context.
///
/// Paths outside the dashboard prefix are always allowed; the gate only
/// protects the back office. Unauthenticated requests are sent to the login
/// page carrying the originally requested path for post-login redirect.
pub fn route_decision(ctx: &AuthContext, path: &str) -> RouteDecision {
    if !path.starts_with(DASHBOARD_PREFIX) {
        return RouteDecision::Allow;
    }

    let Some(role) = ctx.role() else {
        return RouteDecision::Redirect(login_redirect(path));
    };

    match role {
        AdminRole::Superadmin => RouteDecision::Allow,
        AdminRole::Admin => {
            if path.starts_with(ADMINS_PREFIX) {
                RouteDecision::Redirect(DASHBOARD_HOME.to_string())
            } else {
                RouteDecision::Allow
            }
        }
        AdminRole::Support => {
            if path.starts_with(REPORTS_PREFIX) {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect(REPORTS_PREFIX.to_string())
            }
        }
    }
}

fn login_redirect(path: &str) -> String {
    format!("{}?redirect={}", LOGIN_PATH, urlencoding::encode(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_outside_the_dashboard_are_open() {
        let ctx = AuthContext::anonymous();
        assert_eq!(route_decision(&ctx, "/login"), RouteDecision::Allow);
        assert_eq!(route_decision(&ctx, "/"), RouteDecision::Allow);
    }

    #[test]
    fn anonymous_requests_are_sent_to_login_with_the_original_path() {
        let ctx = AuthContext::anonymous();
        assert_eq!(
            route_decision(&ctx, "/dashboard/orders"),
            RouteDecision::Redirect("/login?redirect=%2Fdashboard%2Forders".to_string())
        );
    }

    #[test]
    fn unrecognized_roles_count_as_unauthenticated() {
        let ctx = AuthContext::from_role_str(Some("intern"));
        assert_eq!(ctx.role(), None);
        assert!(matches!(
            route_decision(&ctx, "/dashboard"),
            RouteDecision::Redirect(_)
        ));
    }

    #[test]
    fn superadmin_reaches_everything() {
        let ctx = AuthContext::with_role(AdminRole::Superadmin);
        assert_eq!(route_decision(&ctx, "/dashboard/admins"), RouteDecision::Allow);
        assert_eq!(route_decision(&ctx, "/dashboard/reports"), RouteDecision::Allow);
    }

    #[test]
    fn admin_is_bounced_off_admin_management() {
        let ctx = AuthContext::with_role(AdminRole::Admin);
        assert_eq!(
            route_decision(&ctx, "/dashboard/admins"),
            RouteDecision::Redirect("/dashboard".to_string())
        );
        assert_eq!(route_decision(&ctx, "/dashboard/orders"), RouteDecision::Allow);
    }

    #[test]
    fn support_only_reaches_reports() {
        let ctx = AuthContext::with_role(AdminRole::Support);
        assert_eq!(route_decision(&ctx, "/dashboard/reports"), RouteDecision::Allow);
        assert_eq!(
            route_decision(&ctx, "/dashboard/reports/123"),
            RouteDecision::Allow
        );
        assert_eq!(
            route_decision(&ctx, "/dashboard/users"),
            RouteDecision::Redirect("/dashboard/reports".to_string())
        );
    }

    #[test]
    fn role_strings_round_trip() {
        for role in [AdminRole::Superadmin, AdminRole::Admin, AdminRole::Support] {
            assert_eq!(role.as_str().parse::<AdminRole>().unwrap(), role);
        }
        assert_eq!(
            "root".parse::<AdminRole>().unwrap_err(),
            DashboardError::UnknownRole("root".to_string())
        );
    }
}
