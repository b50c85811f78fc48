//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The sales dashboard.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for the dashboard report as JSON.
pub const DASHBOARD_SUMMARY_API: &str = "/api/summary";
