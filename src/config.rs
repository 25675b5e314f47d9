//! Runtime configuration from the environment

use std::path::PathBuf;

/// Environment variable overriding the database file location
pub const DATABASE_PATH_ENV: &str = "RECIPE_PLANNER_DATABASE_PATH";

/// Default log directive when RUST_LOG is unset
pub const DEFAULT_LOG_DIRECTIVE: &str = "recipe_planner=info";

/// Get the database path from the environment, or `<project>/data/recipe_planner.db`
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_database_path())
}

fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("recipe_planner.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_file_name() {
        let path = default_database_path();
        assert!(path.ends_with("data/recipe_planner.db"));
    }
}
