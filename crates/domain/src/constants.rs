//! Graph API endpoint constants

/// Base URL for Microsoft Graph resource calls.
pub const API_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Base URL for the Microsoft identity platform OAuth2 endpoints.
pub const AUTH_BASE_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0";
