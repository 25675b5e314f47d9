//! Embeds the compile timestamp and cargo profile for the status tool.

fn main() {
    println!("cargo:rerun-if-changed=src");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=RECIPE_PLANNER_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=RECIPE_PLANNER_BUILD_PROFILE={}", profile);
}
