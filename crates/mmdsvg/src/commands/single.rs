//! `mmdsvg <INPUT> <OUTPUT>` implementation.

use std::path::Path;

use mmdsvg_config::Config;
use mmdsvg_convert::ConversionJob;

use crate::error::CliError;
use crate::output::Output;

/// Convert one file; a failed conversion is a failed command.
pub(crate) fn execute(config: &Config, input: &Path, output_path: &Path) -> Result<(), CliError> {
    let output = Output::new();
    let client = super::kroki_client(config);

    let job = ConversionJob::new(input, output_path);
    let result = job.run(&client);
    super::report(&output, &job, &result);

    result.map_err(|_| CliError::ConversionFailed)
}
