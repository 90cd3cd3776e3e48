//! API route paths shared by the server and the client

/// Path of the settings endpoint
pub const SETTINGS_PATH: &str = "/api/settings";

/// Path of the liveness endpoint
pub const HEALTH_PATH: &str = "/health";
