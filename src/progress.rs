//! Progress bar display for staging runs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for staging, hidden when stdout is not a terminal
pub struct ProgressDisplay {
    package_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total package count
    pub fn new(total_packages: u64) -> Self {
        let package_pb = if console::Term::stdout().is_term() && total_packages > 1 {
            ProgressBar::new(total_packages)
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        package_pb.set_style(style);

        Self { package_pb }
    }

    /// Update to show current package being staged
    pub fn update_package(&self, package: &str, current: usize, total: usize) {
        self.package_pb
            .set_message(format!("({current}/{total}) {package}"));
    }

    /// Increment package progress
    pub fn inc_package(&self) {
        self.package_pb.inc(1);
    }

    pub fn finish(&self) {
        self.package_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.package_pb.abandon();
    }
}
