//! Output formatter trait

use debate_domain::DebateReport;

/// Trait for formatting debate reports
pub trait OutputFormatter {
    /// Format the complete report: every round, then the synthesis
    fn format(&self, report: &DebateReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &DebateReport) -> String;

    /// Format synthesis only (concise output)
    fn format_synthesis_only(&self, report: &DebateReport) -> String;
}
