/// Log the application name and version.
///
/// On Android this goes through the `log` crate (handled by android_logger),
/// elsewhere through `tracing`.
pub fn log_version_info(app_name: &str, version: &str) {
    #[cfg(target_os = "android")]
    log::info!("{}", short_version_info(app_name, version));
    #[cfg(not(target_os = "android"))]
    tracing::info!("{}", short_version_info(app_name, version));
}

pub fn short_version_info(app_name: &str, version: &str) -> String {
    format!(
        "{} {} ({} build, {})",
        app_name,
        version,
        if cfg!(debug_assertions) { "debug" } else { "release" },
        std::env::consts::OS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_version_info() {
        let info = short_version_info("Route Planner", "0.1.0");
        assert!(info.starts_with("Route Planner 0.1.0 ("));
        assert!(info.contains(std::env::consts::OS));
    }
}
