//! CLI command implementations.

pub(crate) mod all;
pub(crate) mod single;

use mmdsvg_config::Config;
use mmdsvg_convert::{ConversionJob, ConvertError};
use mmdsvg_kroki::KrokiClient;

use crate::output::Output;

/// Kroki client for the configured server and timeout.
fn kroki_client(config: &Config) -> KrokiClient {
    KrokiClient::with_timeout(&config.kroki.url, config.kroki.timeout())
}

/// Print the `OK:`/`FAIL:` line for one finished job.
fn report(output: &Output, job: &ConversionJob, result: &Result<(), ConvertError>) {
    match result {
        Ok(()) => output.success(&format!(
            "OK: {} -> {}",
            job.input.display(),
            job.output.display()
        )),
        Err(e) => output.error(&format!("FAIL: {} -> {e}", job.input.display())),
    }
}
