//! Error types and handling for uikiln
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for uikiln operations
#[derive(Error, Diagnostic, Debug)]
pub enum KilnError {
    // Configuration errors
    #[error("Missing required parameter: {name}")]
    #[diagnostic(
        code(uikiln::config::missing_parameter),
        help("Pass --{name} or set it in uikiln.yaml")
    )]
    MissingParameter { name: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(uikiln::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(uikiln::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Build errors
    #[error("No 'src' directory found under: {path}")]
    #[diagnostic(
        code(uikiln::build::source_tree_invalid),
        help("The source path must contain a src/ directory, at the root or one level deep")
    )]
    SourceTreeInvalid { path: String },

    #[error("Core entry include not found: {path}")]
    #[diagnostic(
        code(uikiln::build::include_not_found),
        help("Every raw: directive must point at a script already copied to the target tree")
    )]
    IncludeNotFound { path: String },

    #[error("Invalid glob pattern: {pattern}")]
    #[diagnostic(code(uikiln::build::invalid_glob))]
    InvalidGlob { pattern: String, reason: String },

    // Cache buster errors
    #[error("Resource roots marker not found in: {path}")]
    #[diagnostic(
        code(uikiln::bust::marker_not_found),
        help("The HTML entry must carry exactly one single-quoted resource-roots attribute")
    )]
    ResourceRootsMissing { path: String },

    #[error("Resource roots marker found {count} times in: {path}")]
    #[diagnostic(
        code(uikiln::bust::marker_ambiguous),
        help("The HTML entry must carry exactly one single-quoted resource-roots attribute")
    )]
    ResourceRootsAmbiguous { path: String, count: usize },

    #[error("Malformed resource roots mapping in: {path}")]
    #[diagnostic(code(uikiln::bust::malformed_mapping))]
    ResourceRootsMalformed { path: String, reason: String },

    // Fetch errors
    #[error("Failed to download: {url}")]
    #[diagnostic(
        code(uikiln::fetch::download_failed),
        help("Check that the URL is correct and reachable")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to unpack archive: {path}")]
    #[diagnostic(code(uikiln::fetch::archive_invalid))]
    ArchiveInvalid { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(uikiln::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(uikiln::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to rename '{from}' to '{to}'")]
    #[diagnostic(code(uikiln::fs::rename_failed))]
    RenameFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(uikiln::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for KilnError {
    fn from(err: std::io::Error) -> Self {
        KilnError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for KilnError {
    fn from(err: serde_yaml::Error) -> Self {
        KilnError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for KilnError {
    fn from(err: serde_json::Error) -> Self {
        KilnError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, KilnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KilnError::MissingParameter {
            name: "version".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required parameter: version");
    }

    #[test]
    fn test_error_code() {
        let err = KilnError::SourceTreeInvalid {
            path: "/tmp/lib".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("uikiln::build::source_tree_invalid".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let kiln_err: KilnError = io_err.into();
        assert!(matches!(kiln_err, KilnError::IoError { .. }));
    }

    #[test]
    fn test_marker_ambiguous_error() {
        let err = KilnError::ResourceRootsAmbiguous {
            path: "index.html".to_string(),
            count: 2,
        };
        assert!(err.to_string().contains("2 times"));
        assert!(err.to_string().contains("index.html"));
    }

    #[test]
    fn test_rename_failed_error() {
        let err = KilnError::RenameFailed {
            from: "webapp/my-app".to_string(),
            to: "webapp/a1b2c3d4".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("webapp/my-app"));
        assert!(err.to_string().contains("webapp/a1b2c3d4"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: yaml: content: [unclosed";
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str(yaml_str);
        let yaml_err = parse_result.unwrap_err();
        let kiln_err: KilnError = yaml_err.into();
        assert!(matches!(kiln_err, KilnError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "not json";
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str(json_str);
        let json_err = parse_result.unwrap_err();
        let kiln_err: KilnError = json_err.into();
        assert!(matches!(kiln_err, KilnError::ConfigParseFailed { .. }));
    }
}
