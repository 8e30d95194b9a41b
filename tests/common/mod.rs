//! Common test utilities for uikiln integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test project directory for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Seed a minimal framework source tree under `root`.
    ///
    /// Two modules: the core module with a composed entry script and one
    /// regular control module. No theme packages, so builds run without a
    /// LESS compiler installed.
    pub fn seed_library_source(&self, root: &str) {
        self.write_file(
            &format!("{root}/src/sap.ui.core/src/sap-ui-core.js"),
            "raw:sap/ui/core/Boot.js\n",
        );
        self.write_file(
            &format!("{root}/src/sap.ui.core/src/sap/ui/core/Boot.js"),
            "/* ${copyright} */\nvar Boot = 1;\n",
        );
        self.write_file(
            &format!("{root}/src/sap.ui.core/src/sap/ui/core/Core.js"),
            "var Core = 1;\n",
        );
        self.write_file(
            &format!("{root}/src/sap.m/src/sap/m/Button.js"),
            "// button\nvar Button = 1;\n",
        );
        self.write_file(&format!("{root}/LICENSE.txt"), "license text\n");
    }

    /// Seed an application directory with a cache-bustable entry point.
    ///
    /// Returns the project-relative path of the HTML entry.
    pub fn seed_app(&self, root: &str) -> String {
        self.write_file(
            &format!("{root}/my-app/Component-preload.js"),
            "preload content\n",
        );
        self.write_file(
            &format!("{root}/index.html"),
            concat!(
                "<!DOCTYPE html>\n<html>\n<head>\n",
                "<script id=\"bootstrap\"\n",
                "    data-sap-ui-resourceroots='{\"my.app\": \"./my-app\"}'\n",
                "    src=\"ui5/sap-ui-core.js\"></script>\n",
                "</head>\n<body></body>\n</html>\n"
            ),
        );
        format!("{root}/index.html")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.path.exists());
    }

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::new();
        project.write_file("test/file.txt", "hello");
        assert!(project.file_exists("test/file.txt"));
        assert_eq!(project.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_seed_library_source() {
        let project = TestProject::new();
        project.seed_library_source("ui5/download-1.52.5");
        assert!(project.file_exists("ui5/download-1.52.5/src/sap.ui.core/src/sap-ui-core.js"));
        assert!(project.file_exists("ui5/download-1.52.5/src/sap.m/src/sap/m/Button.js"));
    }

    #[test]
    fn test_seed_app() {
        let project = TestProject::new();
        let entry = project.seed_app("webapp");
        assert_eq!(entry, "webapp/index.html");
        assert!(project.file_exists("webapp/my-app/Component-preload.js"));
    }
}
