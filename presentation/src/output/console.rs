//! Console output formatter for debate reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use debate_domain::{
    ArchitectureDocument, CannedProblem, DebateReport, RoundRecord, parse_architecture,
};

/// Formats debate reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report: every round, then the synthesis
    pub fn format(report: &DebateReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Expert Panel Debate"));
        output.push('\n');

        if let Some(problem) = &report.problem {
            output.push_str(&format!("{} {}\n", "Problem:".cyan().bold(), problem));
        }
        if let Some(session_id) = &report.session_id {
            output.push_str(&format!("{} {}\n", "Session:".dimmed(), session_id));
        }
        output.push('\n');

        for round in &report.rounds {
            output.push_str(&Self::format_round(round));
        }

        match (&report.synthesis, &report.error) {
            (Some(_), _) => {
                output.push_str(&Self::section_header("Synthesis"));
                output.push_str(&Self::format_architecture(report));
            }
            (None, Some(error)) => {
                output.push_str(&format!("\n{} {}\n", "Error:".red().bold(), error));
            }
            (None, None) => {}
        }

        let degraded = report.degraded_turns();
        if degraded > 0 {
            output.push_str(&format!(
                "\n{}\n",
                format!("{} persona turn(s) had no response", degraded).yellow()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &DebateReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis_only(report: &DebateReport) -> String {
        match (&report.synthesis, &report.error) {
            (Some(_), _) => {
                let mut output = format!("{}\n\n", "=== Panel Architecture ===".cyan().bold());
                output.push_str(&Self::format_architecture(report));
                output
            }
            (None, Some(error)) => format!("{} {}\n", "Error:".red().bold(), error),
            (None, None) => String::new(),
        }
    }

    /// Canned problems, one per line
    pub fn format_problem_list(problems: &[CannedProblem]) -> String {
        let mut output = format!("{}\n", "Canned problems:".cyan().bold());
        for problem in problems {
            output.push_str(&format!(
                "\n  {} {}\n{}\n",
                problem.id.bold(),
                format!("({})", problem.title).dimmed(),
                Self::indent(&Self::wrap(problem.statement, 72), "    ")
            ));
        }
        output
    }

    fn format_round(round: &RoundRecord) -> String {
        let mut output = Self::section_header(&format!(
            "Round {} ({})",
            round.round.as_u8(),
            round.round_type
        ));

        for contribution in &round.contributions {
            let title = format!("── {} ──", contribution.persona);
            if contribution.failed {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    title.red().bold(),
                    contribution.response.dimmed()
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    title.yellow().bold(),
                    contribution.response
                ));
            }
        }
        output
    }

    /// Synthesis text, with a compact summary of the parsed document when
    /// the model followed the expected layout.
    fn format_architecture(report: &DebateReport) -> String {
        let text = report.synthesis.as_deref().unwrap_or_default();
        let doc = parse_architecture(text, report.problem.as_deref().unwrap_or_default());

        let mut output = format!("{}\n", text.trim_end());
        if let Some(summary) = Self::summary(&doc) {
            output.push('\n');
            output.push_str(&summary);
        }
        output
    }

    fn summary(doc: &ArchitectureDocument) -> Option<String> {
        if doc.components.is_empty() && doc.trade_offs.is_empty() {
            return None;
        }

        let mut output = format!(
            "{} {}\n",
            "Feature:".cyan().bold(),
            doc.feature_name.green()
        );

        if !doc.components.is_empty() {
            output.push_str(&format!("\n{}\n", "Components:".cyan().bold()));
            for component in &doc.components {
                output.push_str(&format!(
                    "  * {} {}\n",
                    component.name.bold(),
                    format!("[{}]", component.service_type).dimmed()
                ));
            }
        }

        if !doc.trade_offs.is_empty() {
            output.push_str(&format!("\n{}\n", "Trade-offs:".yellow().bold()));
            for trade_off in &doc.trade_offs {
                output.push_str(&format!("  * {}\n", trade_off.aspect));
            }
        }

        if doc.diagram.is_empty() {
            output.push_str(&format!("\n{}\n", "(no diagram in synthesis)".dimmed()));
        }

        Some(output)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Greedy word wrap at `width` columns
    fn wrap(text: &str, width: usize) -> String {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines.join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &DebateReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &DebateReport) -> String {
        Self::format_json(report)
    }

    fn format_synthesis_only(&self, report: &DebateReport) -> String {
        Self::format_synthesis_only(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{
        Contribution, DebateStatus, Persona, ProblemCatalog, RoundNumber, SessionId, TurnOutcome,
    };

    const SYNTHESIS: &str = "## Architecture Overview\nCells.\n\n## Core Components\n- AWS Lambda: compute\n\n## Mermaid Diagram\n```mermaid\ngraph TD\n  A-->B\n```\n\n## Trade-offs\n- Cost vs isolation";

    fn report() -> DebateReport {
        let mut round = RoundRecord::new(RoundNumber::One);
        round.contributions.push(Contribution::new(
            Persona::JeffBarr,
            "",
            TurnOutcome::Delivered("Here's the simple approach...".to_string()),
        ));
        round.contributions.push(Contribution::new(
            Persona::Swami,
            "",
            TurnOutcome::Degraded {
                reason: "timeout".to_string(),
            },
        ));

        DebateReport {
            session_id: Some(SessionId::new("debate_abc")),
            status: DebateStatus::Complete,
            problem: Some("Build a todo app".to_string()),
            synthesis: Some(SYNTHESIS.to_string()),
            diagram: Some("graph TD\n  A-->B".to_string()),
            error: None,
            rounds: vec![round],
        }
    }

    #[test]
    fn test_full_output_lists_rounds_and_synthesis() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&report());
        assert!(output.contains("Problem: Build a todo app"));
        assert!(output.contains("Round 1 (debate)"));
        assert!(output.contains("── Jeff Barr ──"));
        assert!(output.contains("[Response unavailable]"));
        assert!(output.contains("## Architecture Overview"));
        assert!(output.contains("Feature: build-a-todo-app"));
        assert!(output.contains("1 persona turn(s) had no response"));
    }

    #[test]
    fn test_synthesis_only_omits_rounds() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_synthesis_only(&report());
        assert!(output.contains("## Trade-offs"));
        assert!(!output.contains("Round 1"));
    }

    #[test]
    fn test_error_report() {
        colored::control::set_override(false);
        let report = DebateReport::rejected("Problem statement cannot be empty");
        let output = ConsoleFormatter::format_synthesis_only(&report);
        assert_eq!(output, "Error: Problem statement cannot be empty\n");
    }

    #[test]
    fn test_json_uses_report_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&report())).unwrap();
        assert_eq!(json["status"], "complete");
        assert_eq!(json["sessionId"], "debate_abc");
        assert_eq!(json["rounds"][0]["contributions"][1]["failed"], true);
    }

    #[test]
    fn test_problem_list_shows_every_key() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_problem_list(ProblemCatalog::all());
        for problem in ProblemCatalog::all() {
            assert!(output.contains(problem.id));
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(ConsoleFormatter::wrap("a bb ccc dddd", 6), "a bb\nccc\ndddd");
    }
}
