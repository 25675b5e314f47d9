//! Build information embedded by `build.rs`

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Compile time in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("RECIPE_PLANNER_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile the binary was built with (debug / release)
pub const BUILD_PROFILE: &str = match option_env!("RECIPE_PLANNER_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_timestamp: BUILD_TIMESTAMP,
            build_profile: BUILD_PROFILE,
        }
    }

    /// One-line version string, e.g. `recipe-planner 1.0.0 (release, 2026-10-19T08:00:00Z)`
    pub fn version_line(&self) -> String {
        format!(
            "{} {} ({}, {})",
            self.name, self.version, self.build_profile, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("Recipe Planner | {}", BuildInfo::current().version_line());
}
