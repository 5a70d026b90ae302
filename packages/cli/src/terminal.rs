use std::sync::atomic::{AtomicUsize, Ordering};

use console::style;
use dispatcher::{Notice, NoticeLevel, ResultBlock, UiSurface};
use tracing::debug;

/// Prints results and success notices to stdout, error notices to stderr.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    errors: AtomicUsize,
}

impl TerminalSurface {
    /// Number of error notices shown so far.
    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl UiSurface for TerminalSurface {
    fn render(&self, container_id: &str, block: ResultBlock) {
        println!("{}", style(format!("[{container_id}]")).dim());
        println!("{}", block.text);
    }

    fn add_class(&self, element_id: &str, class: &str) {
        debug!(element = element_id, class, "Marker added");
    }

    fn remove_class(&self, element_id: &str, class: &str) {
        debug!(element = element_id, class, "Marker removed");
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => {
                println!("{} {}", style("✔").green().bold(), notice.message);
            }
            NoticeLevel::Error => {
                self.errors.fetch_add(1, Ordering::SeqCst);
                eprintln!("{} {}", style("✘").red().bold(), notice.message);
                if let Some(detail) = notice.detail {
                    eprintln!("  {}: {}", style(detail.kind).yellow(), detail.message);
                }
            }
        }
    }
}
