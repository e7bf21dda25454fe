//! Sequential batch conversion.

use mmdsvg_kroki::Renderer;

use crate::error::ConvertError;
use crate::job::ConversionJob;

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Convert `jobs` in order, reporting each outcome to `on_result`.
///
/// A failed job is reported and counted; the remaining jobs still run.
pub fn run_batch<F>(
    jobs: &[ConversionJob],
    renderer: &dyn Renderer,
    mut on_result: F,
) -> BatchSummary
where
    F: FnMut(&ConversionJob, &Result<(), ConvertError>),
{
    let mut summary = BatchSummary::default();
    for job in jobs {
        let result = job.run(renderer);
        summary.attempted += 1;
        match &result {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                tracing::debug!(input = %job.input.display(), error = %e, "Conversion failed");
            }
        }
        on_result(job, &result);
    }
    summary
}
