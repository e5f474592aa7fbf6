//! Progress reporting for a running debate

use colored::Colorize;
use debate_application::DebateProgressNotifier;
use debate_domain::{Persona, RoundNumber, SessionId};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one bar per round and a spinner for synthesis
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
    synthesis_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
            synthesis_spinner: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn round_display_name(round: RoundNumber) -> String {
        format!("Round {} ({})", round.as_u8(), round.round_type())
    }

    fn turn_status(persona: Persona, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), persona)
        } else {
            format!("{} {} (no response)", "x".red(), persona)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_debate_start(&self, session_id: &SessionId) {
        let _ = self
            .multi
            .println(format!("{} {}", "Session".dimmed(), session_id));
    }

    fn on_round_start(&self, round: RoundNumber, total_turns: usize) {
        let pb = self.multi.add(ProgressBar::new(total_turns as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(Self::round_display_name(round));
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut bar) = self.round_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_turn_complete(&self, _round: RoundNumber, persona: Persona, success: bool) {
        if let Ok(bar) = self.round_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::turn_status(persona, success));
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: RoundNumber) {
        if let Ok(mut bar) = self.round_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("Round {} complete!", round.as_u8()).green().to_string());
        }
    }

    fn on_pacing(&self, delay: Duration) {
        if let Ok(bar) = self.round_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!("pausing {}s", delay.as_secs()).dimmed().to_string());
        }
    }

    fn on_synthesis_start(&self) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Synthesis");
        spinner.set_message("Folding the debate into one architecture...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.synthesis_spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn on_synthesis_complete(&self, success: bool) {
        if let Ok(mut slot) = self.synthesis_spinner.lock()
            && let Some(spinner) = slot.take()
        {
            let message = if success {
                "done".green().to_string()
            } else {
                "failed".red().to_string()
            };
            spinner.finish_with_message(message);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_debate_start(&self, session_id: &SessionId) {
        println!("{} {}", "Session".dimmed(), session_id);
    }

    fn on_round_start(&self, round: RoundNumber, total_turns: usize) {
        println!(
            "{} {} ({} turns)",
            "->".cyan(),
            ProgressReporter::round_display_name(round).bold(),
            total_turns
        );
    }

    fn on_turn_complete(&self, _round: RoundNumber, persona: Persona, success: bool) {
        println!("  {}", ProgressReporter::turn_status(persona, success));
    }

    fn on_round_complete(&self, _round: RoundNumber) {
        println!();
    }

    fn on_pacing(&self, delay: Duration) {
        println!("  {}", format!("pausing {}s", delay.as_secs()).dimmed());
    }

    fn on_synthesis_start(&self) {
        println!("{} {}", "->".cyan(), "Synthesis".bold());
    }

    fn on_synthesis_complete(&self, success: bool) {
        if success {
            println!("  {} architecture ready\n", "v".green());
        } else {
            println!("  {} synthesis failed\n", "x".red());
        }
    }
}
