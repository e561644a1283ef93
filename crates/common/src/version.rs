use std::fmt;

/// Build metadata captured by the binary crate's `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub profile: &'static str,
    pub features: &'static str,
    pub repo_version: &'static str,
    pub build_timestamp: &'static str,
    pub rust_version: &'static str,
    pub target: Option<&'static str>,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version:    {}", self.version)?;
        writeln!(f, "repo:       {}", self.repo_version)?;
        writeln!(f, "profile:    {}", self.profile)?;
        writeln!(f, "features:   {}", self.features)?;
        writeln!(f, "built at:   {}", self.build_timestamp)?;
        write!(f, "rustc:      {}", self.rust_version)?;
        if let Some(target) = self.target {
            write!(f, "\ntarget:     {}", target)?;
        }
        Ok(())
    }
}

/// Expands to a [`BuildInfo`] for the crate it is invoked in.
///
/// The invoking crate must export the variables from a build script.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::BuildInfo {
            version: env!("CARGO_PKG_VERSION"),
            profile: env!("BUILD_PROFILE"),
            features: env!("BUILD_FEATURES"),
            repo_version: env!("REPO_VERSION"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rust_version: env!("RUST_VERSION"),
            target: option_env!("BUILD_TARGET"),
        }
    };
}
