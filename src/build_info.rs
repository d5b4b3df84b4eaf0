/// Version and commit stamped into the binary at compile time.
///
/// Set `AFFVIZ_COMMIT` when building to record the commit; otherwise it reads `dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    commit: match option_env!("AFFVIZ_COMMIT") {
        Some(c) => c,
        None => "dev",
    },
};

impl BuildInfo {
    pub fn label(&self) -> String {
        format!("v{} ({})", self.version, self.commit)
    }
}
