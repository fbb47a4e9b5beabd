use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const SPINNER_TICKS: &[&str] = &["🧶 ", "🧶·", "🧶•", "🧶●", "🧶•", "🧶·", "✓"];

/// Progress output on stderr
///
/// Every method that may run inside a rayon fan-out takes `&self`.
pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        let style = ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(SPINNER_TICKS);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    fn clear_spinner(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
    }

    pub fn start_discovery(&mut self, root: &Path) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Discovering project configs under {}...",
            style("🔍").cyan(),
            style(root.display()).dim()
        );
        let spinner = self.create_spinner("Scanning for tsconfig.json files...");
        self.current_bar = Some(spinner);
    }

    pub fn checking_config(&self, path: &Path) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Checking: {}...", path.display()));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Checking: {}... ",
                style(self.next_frame()).cyan(),
                style(path.display()).dim()
            );
        }
    }

    pub fn finish_discovery(&mut self, configs: usize, resolvers: usize) {
        self.clear_spinner();
        if configs == 0 {
            eprintln!(
                "\r{} No project configs found, using package resolution only",
                style("✗").red()
            );
        } else {
            eprintln!(
                "\r{} Discovery complete: {} {} ({} with path mapping)",
                style("✓").green(),
                style(configs).yellow().bold(),
                pluralize("config", configs),
                resolvers
            );
        }
    }

    pub fn start_traversal(&mut self, entry: &Path) {
        eprintln!(
            "{} Following imports from {}...",
            style("🧭").cyan(),
            style(entry.display()).green()
        );
        let spinner = self.create_spinner("Reading entry file...");
        self.current_bar = Some(spinner);
    }

    pub fn visiting_file(&self, path: &Path, discovered: usize) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("[{discovered}] {}", path.display()));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Visiting: {}... ",
                style(self.next_frame()).yellow(),
                style(path.display()).dim()
            );
        }
    }

    pub fn finish_traversal(&mut self, files: usize) {
        self.clear_spinner();
        eprintln!(
            "\r{} Graph complete: {} {}",
            style("✓").green(),
            style(files).yellow().bold(),
            pluralize("file", files)
        );
    }

    pub fn start_cycle_detection(&self) {
        eprintln!("\n{} Collecting cycle context...", style("🔄").yellow());
    }

    pub fn finish_cycle_detection(&self, cycles_found: usize) {
        if cycles_found == 0 {
            eprintln!(
                "{} No cycles detected! {}",
                style("✓").green().bold(),
                style("🎉").dim()
            );
        } else {
            eprintln!(
                "{} Found {} {}",
                style("⚠").yellow().bold(),
                style(cycles_found).red().bold(),
                pluralize("cycle", cycles_found)
            );
        }
    }
}
