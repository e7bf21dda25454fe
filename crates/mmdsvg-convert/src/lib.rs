//! Mermaid to SVG conversion jobs.
//!
//! - [`ConversionJob`]: one input `.mmd` file rendered to one output `.svg` file
//! - [`Discovery`]: finds jobs in the `apps/<group>/.../doc/mermaid` layout
//! - [`run_batch`]: converts jobs one after another, isolating failures
//!
//! Rendering goes through [`mmdsvg_kroki::Renderer`], so every job can run
//! against a stub renderer in tests.

mod batch;
mod discovery;
mod error;
mod job;

pub use batch::{BatchSummary, run_batch};
pub use discovery::Discovery;
pub use error::ConvertError;
pub use job::ConversionJob;
