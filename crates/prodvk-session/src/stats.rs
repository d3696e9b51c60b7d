//! Pass/fail bookkeeping and report lines for test scripts.

use std::fmt;

use serde::Serialize;

/// Command counts accumulated by a dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestStats {
    /// Commands dispatched.
    pub verifications: u32,
    /// Commands the board answered with a nonzero status.
    pub errors: u32,
}

impl TestStats {
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    /// Process exit status for a test script: 0 when nothing failed.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Prefix for a failed check line.
pub fn failed_prefix(title: &str) -> String {
    format!("Test Failed: {title}: ")
}

/// Prefix for a passed check line.
pub fn passed_prefix(title: &str) -> String {
    format!("Test Passed: {title}: ")
}

/// Banner logged when a test starts.
pub fn header(title: &str) -> String {
    format!("==============> Start Test: {title}:")
}

/// Closing line for a test.
pub fn summary(title: &str, stats: &TestStats) -> String {
    Summary { title, stats }.to_string()
}

struct Summary<'a> {
    title: &'a str,
    stats: &'a TestStats,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stats.passed() {
            write!(
                f,
                "TEST PASSED: {}:  Total Verifications={}",
                self.title, self.stats.verifications
            )
        } else {
            write!(
                f,
                "TEST FAILED: {}:  Total Verifications={} Total Errors= {}",
                self.title, self.stats.verifications, self.stats.errors
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_summary() {
        let stats = TestStats {
            verifications: 12,
            errors: 0,
        };
        assert!(stats.passed());
        assert_eq!(stats.exit_code(), 0);
        assert_eq!(
            summary("Current", &stats),
            "TEST PASSED: Current:  Total Verifications=12"
        );
    }

    #[test]
    fn failing_summary() {
        let stats = TestStats {
            verifications: 12,
            errors: 2,
        };
        assert_eq!(stats.exit_code(), 1);
        assert_eq!(
            summary("Current", &stats),
            "TEST FAILED: Current:  Total Verifications=12 Total Errors= 2"
        );
    }

    #[test]
    fn line_prefixes() {
        assert_eq!(failed_prefix("PER"), "Test Failed: PER: ");
        assert_eq!(passed_prefix("PER"), "Test Passed: PER: ");
        assert_eq!(header("PER"), "==============> Start Test: PER:");
    }
}
