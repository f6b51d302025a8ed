//! Placement validation: classified findings for a candidate object

mod geo_provider;
mod validator;

pub use geo_provider::{BuiltinGeo, GeoProvider};
pub use validator::{Candidate, PlacementValidator};

use serde::{Deserialize, Serialize};

/// Finding classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        write!(f, "{}", s)
    }
}

/// One classified validation result with a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Result of running all placement checks, in evaluation order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub passed_clearance: bool,
    pub passed_roads: bool,
    pub passed_sidewalks: bool,
    pub passed_adjacency: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            findings: Vec::new(),
            passed_clearance: true,
            passed_roads: true,
            passed_sidewalks: true,
            passed_adjacency: true,
        }
    }

    pub(crate) fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub(crate) fn add_clearance(&mut self, finding: Finding) {
        if finding.severity == Severity::Error {
            self.passed_clearance = false;
        }
        self.findings.push(finding);
    }

    pub(crate) fn add_road(&mut self, finding: Finding) {
        if finding.severity == Severity::Error {
            self.passed_roads = false;
        }
        self.findings.push(finding);
    }

    pub(crate) fn add_sidewalk(&mut self, finding: Finding) {
        if finding.severity == Severity::Error {
            self.passed_sidewalks = false;
        }
        self.findings.push(finding);
    }

    pub(crate) fn add_adjacency(&mut self, finding: Finding) {
        if finding.severity == Severity::Error {
            self.passed_adjacency = false;
        }
        self.findings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Warning)
    }

    /// Commit policy: any ERROR blocks automatic commit. The caller may
    /// still force commit after an explicit user override.
    pub fn blocks_commit(&self) -> bool {
        self.has_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tracks_stage_flags() {
        let mut report = ValidationReport::new();
        report.add_clearance(Finding::error("too close"));
        report.add_road(Finding::info("clearance ok"));

        assert!(!report.passed_clearance);
        assert!(report.passed_roads);
        assert!(report.has_errors());
        assert!(report.blocks_commit());
    }

    #[test]
    fn test_warnings_do_not_block_commit() {
        let mut report = ValidationReport::new();
        report.add_sidewalk(Finding::warning("narrow sidewalk"));
        assert!(report.has_warnings());
        assert!(!report.blocks_commit());
    }

    #[test]
    fn test_finding_display() {
        let f = Finding::error("too close to bench");
        assert_eq!(f.to_string(), "ERROR: too close to bench");
    }
}
