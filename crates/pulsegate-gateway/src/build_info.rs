//! Build identity resolved from the environment at startup.
//!
//! `GIT_SHA` and `BUILD_TIME` are injected by the deploy pipeline; in local
//! runs they fall back to development placeholders.

#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Short git sha (7 chars).
    pub sha: String,
    pub build_time: String,
}

impl BuildInfo {
    pub fn from_env() -> Self {
        let sha: String = std::env::var("GIT_SHA")
            .unwrap_or_else(|_| "dev".to_string())
            .chars()
            .take(7)
            .collect();
        let build_time =
            std::env::var("BUILD_TIME").unwrap_or_else(|_| "unknown".to_string());
        Self { sha, build_time }
    }
}
