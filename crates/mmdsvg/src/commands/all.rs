//! `mmdsvg --all` implementation.

use mmdsvg_config::Config;
use mmdsvg_convert::{Discovery, run_batch};

use crate::output::Output;

/// Convert every diagram in the project layout and print the tally.
///
/// Individual failures are reported but never fail the command.
pub(crate) fn execute(config: &Config) {
    let output = Output::new();

    let discovery = Discovery::new(&config.project_root, config.discovery.clone());
    let jobs = discovery.discover();
    if jobs.is_empty() {
        output.warning("No .mmd files found.");
        return;
    }

    let client = super::kroki_client(config);
    let summary = run_batch(&jobs, &client, |job, result| {
        super::report(&output, job, result);
    });

    if summary.failed() > 0 {
        tracing::warn!(failed = summary.failed(), "Some diagrams were not converted");
    }
    output.info("");
    output.info(&format!(
        "Converted {}/{} files.",
        summary.succeeded, summary.attempted
    ));
}
