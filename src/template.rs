//! Placeholder substitution shared by the build steps
//!
//! Framework sources carry a `${copyright}` token in script headers and theme
//! stylesheets; every emitted copy gets the token replaced with the banner of
//! the current build.

/// Placeholder token replaced with the copyright banner
pub const COPYRIGHT_TOKEN: &str = "${copyright}";

/// A single placeholder replacement rule
pub struct Replacement<'a> {
    pub token: &'a str,
    pub content: &'a str,
}

/// Replace every occurrence of each rule's token in `input`
pub fn replace_placeholders(input: &str, rules: &[Replacement<'_>]) -> String {
    rules
        .iter()
        .fold(input.to_string(), |acc, rule| acc.replace(rule.token, rule.content))
}

/// Replace the copyright token with the given banner
pub fn apply_banner(input: &str, banner: &str) -> String {
    replace_placeholders(
        input,
        &[Replacement {
            token: COPYRIGHT_TOKEN,
            content: banner,
        }],
    )
}

/// Compose the copyright banner embedded into emitted sources and the version
/// manifest.
pub fn copyright_banner(version: &str, build_time: &str) -> String {
    format!(
        "UI development toolkit for HTML5\n * Licensed under the Apache License, Version 2.0 - see LICENSE.txt.\n * Built by uikiln, version {version}, buildtime {build_time}."
    )
}
