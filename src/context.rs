//! Per-invocation build context
//!
//! All build steps take an explicit [`BuildContext`] instead of ambient
//! globals: paths, version label, banner, conventions and the progress
//! reporter are constructed once per invocation and passed by reference.

use std::path::PathBuf;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::BuildConventions;
use crate::progress::ProgressReporter;
use crate::template;

/// Context threaded through every library build step
pub struct BuildContext<'a> {
    /// Root of the framework sources (contains or wraps a `src/` directory)
    pub source: PathBuf,

    /// Target directory the distribution is written into
    pub target: PathBuf,

    /// Version label embedded in banner and manifest
    pub version: String,

    /// Timestamp of this build, RFC 3339
    pub build_time: String,

    /// Copyright banner substituted for the placeholder token
    pub banner: String,

    /// Framework source tree conventions
    pub conventions: BuildConventions,

    /// Progress sink shared by all steps
    pub reporter: &'a dyn ProgressReporter,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        source: PathBuf,
        target: PathBuf,
        version: String,
        conventions: BuildConventions,
        reporter: &'a dyn ProgressReporter,
    ) -> Self {
        let build_time = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        let banner = template::copyright_banner(&version, &build_time);
        Self {
            source,
            target,
            version,
            build_time,
            banner,
            conventions,
            reporter,
        }
    }
}
