use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over the module run.
///
/// Hidden in quiet mode or when stderr is not a TTY, and always written to
/// stderr so stdout report mode stays clean.
pub struct ModuleProgress {
    bar: ProgressBar,
}

impl ModuleProgress {
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        let bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} modules")
                    .expect("valid template")
                    .progress_chars("█▓░"),
            );
            bar
        };
        Self { bar }
    }

    pub fn start_module(&self, id: &str) {
        self.bar.set_message(id.to_string());
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
