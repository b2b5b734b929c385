//! Compile-time build information, generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line printed by `pairs --version`.
pub fn version_line() -> String {
    format!(
        "pairs {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_mentions_package_version() {
        let line = version_line();
        assert!(line.starts_with("pairs "));
        assert!(line.contains(env!("CARGO_PKG_VERSION")));
        assert!(line.contains(BUILD_DATE));
    }
}
