//! Single-file conversion.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use mmdsvg_kroki::Renderer;
use mmdsvg_kroki::svg::postprocess;

use crate::error::ConvertError;

/// One `.mmd` input paired with the `.svg` path it renders to.
///
/// Jobs order by input path, then output path, each compared as a whole
/// string rather than component by component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Read the input, render it, post-process the SVG and write the output.
    ///
    /// Missing parent directories of the output are created and an existing
    /// output file is overwritten. Nothing is written unless rendering
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] naming the step and path that failed.
    pub fn run(&self, renderer: &dyn Renderer) -> Result<(), ConvertError> {
        let source = fs::read_to_string(&self.input).map_err(|e| ConvertError::ReadInput {
            path: self.input.clone(),
            source: e,
        })?;

        let svg = renderer.render(&source).map_err(|e| ConvertError::Render {
            path: self.input.clone(),
            source: e,
        })?;
        let svg = postprocess(&svg);

        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_parent(parent)?;
        }

        fs::write(&self.output, svg).map_err(|e| ConvertError::WriteOutput {
            path: self.output.clone(),
            source: e,
        })?;

        tracing::info!(
            input = %self.input.display(),
            output = %self.output.display(),
            "Converted diagram"
        );
        Ok(())
    }
}

impl Ord for ConversionJob {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.input.as_os_str(), self.output.as_os_str())
            .cmp(&(other.input.as_os_str(), other.output.as_os_str()))
    }
}

impl PartialOrd for ConversionJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn create_parent(dir: &Path) -> Result<(), ConvertError> {
    fs::create_dir_all(dir).map_err(|e| ConvertError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}
