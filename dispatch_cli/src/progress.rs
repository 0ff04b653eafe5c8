use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Runs `work` while a ticking bar shows the elapsed time against `budget`.
pub fn with_budget_bar<T>(
    budget: jiff::SignedDuration,
    work: impl FnOnce() -> T,
) -> Result<T, anyhow::Error> {
    let bar = ProgressBar::new(budget.as_secs().max(1) as u64);
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} [{elapsed_precise}] solving (budget {len}s)")?,
    );
    bar.enable_steady_tick(Duration::from_millis(250));

    let result = work();

    bar.finish_and_clear();

    Ok(result)
}
