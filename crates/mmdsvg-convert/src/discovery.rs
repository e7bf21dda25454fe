//! Job discovery by walking the project layout.
//!
//! Diagrams live next to the code they document:
//!
//! ```text
//! apps/
//!   sensorgrid_v1/
//!     doc/mermaid/system.mmd      -> doc/img/system.svg
//!     server_v1/
//!       doc/mermaid/states.mmd    -> server_v1/doc/img/states.svg
//! ```
//!
//! Folder names come from [`DiscoveryConfig`]; the example uses the defaults.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use mmdsvg_config::DiscoveryConfig;

use crate::job::ConversionJob;

/// Extension of diagram sources, with the dot.
const SOURCE_SUFFIX: &str = ".mmd";

/// Extension of rendered files, without the dot.
const OUTPUT_EXTENSION: &str = "svg";

/// Finds conversion jobs under a project root.
pub struct Discovery {
    root: PathBuf,
    layout: DiscoveryConfig,
}

impl Discovery {
    /// Create a discovery over `root` using the given folder layout.
    pub fn new(root: impl Into<PathBuf>, layout: DiscoveryConfig) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Collect every job in the layout, sorted by input then output path
    /// compared as whole strings.
    ///
    /// Returns an empty Vec if the apps directory doesn't exist. Unreadable
    /// folders below it are skipped.
    pub fn discover(&self) -> Vec<ConversionJob> {
        let apps_root = self.root.join(&self.layout.apps_dir);
        if !apps_root.is_dir() {
            tracing::warn!(path = %apps_root.display(), "Apps directory not found");
            return Vec::new();
        }

        let mut jobs = Vec::new();
        for group in subdirectories(&apps_root)
            .into_iter()
            .filter(|dir| self.is_group(dir))
        {
            self.collect_diagrams(&group, &mut jobs);
            for app in subdirectories(&group) {
                self.collect_diagrams(&app, &mut jobs);
            }
        }

        jobs.sort();
        tracing::debug!(count = jobs.len(), "Discovered diagrams");
        jobs
    }

    fn is_group(&self, dir: &Path) -> bool {
        dir.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(&self.layout.group_prefix))
    }

    /// Add a job for each `.mmd` file in `base`'s source folder.
    fn collect_diagrams(&self, base: &Path, jobs: &mut Vec<ConversionJob>) {
        let source_dir = base.join(&self.layout.source_dir);
        let Ok(entries) = fs::read_dir(&source_dir) else {
            return;
        };
        let output_dir = base.join(&self.layout.output_dir);

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(output_name) = output_file_name(&entry.file_name()) else {
                continue;
            };
            jobs.push(ConversionJob::new(path, output_dir.join(output_name)));
        }
    }
}

/// Rendered file name for a source named `name`, or None if it is not `.mmd`.
///
/// Names need not be UTF-8; only the suffix is inspected.
fn output_file_name(name: &OsStr) -> Option<OsString> {
    if !name.as_encoded_bytes().ends_with(SOURCE_SUFFIX.as_bytes()) {
        return None;
    }
    Some(
        Path::new(name)
            .with_extension(OUTPUT_EXTENSION)
            .into_os_string(),
    )
}

/// Immediate subdirectories of `dir`; empty if it cannot be read.
fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "graph TD; A-->B").unwrap();
    }

    fn discover(root: &Path) -> Vec<ConversionJob> {
        Discovery::new(root, DiscoveryConfig::default()).discover()
    }

    #[test]
    fn test_missing_apps_dir_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path()).is_empty());
    }

    #[test]
    fn test_layout_without_diagrams_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let group = dir.path().join("apps/sensorgrid_v1");
        fs::create_dir_all(group.join("doc/mermaid")).unwrap();
        fs::create_dir_all(group.join("server_v1/src")).unwrap();
        fs::write(group.join("doc/mermaid/README.md"), "notes").unwrap();

        assert!(discover(dir.path()).is_empty());
    }

    #[test]
    fn test_group_level_diagrams() {
        let dir = tempfile::tempdir().unwrap();
        let group = dir.path().join("apps/sensorgrid_v2");
        touch(&group.join("doc/mermaid/system.mmd"));

        assert_eq!(
            discover(dir.path()),
            vec![ConversionJob::new(
                group.join("doc/mermaid/system.mmd"),
                group.join("doc/img/system.svg"),
            )]
        );
    }

    #[test]
    fn test_app_level_diagrams_go_to_app_img_dir() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("apps/sensorgrid_v3/server_v3");
        touch(&app.join("doc/mermaid/states.mmd"));

        assert_eq!(
            discover(dir.path()),
            vec![ConversionJob::new(
                app.join("doc/mermaid/states.mmd"),
                app.join("doc/img/states.svg"),
            )]
        );
    }

    #[test]
    fn test_ignores_other_groups_and_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let apps = dir.path().join("apps");
        touch(&apps.join("pong/doc/mermaid/game.mmd"));
        touch(&apps.join("sensorgrid_v1/doc/mermaid/notes.txt"));
        touch(&apps.join("sensorgrid_v1/doc/mermaid/old.mmd.bak"));
        touch(&apps.join("sensorgrid_v1/doc/other/extra.mmd"));
        touch(&apps.join("sensorgrid_v1/doc/mermaid/kept.mmd"));
        // A file with the group prefix is not a group.
        fs::write(apps.join("sensorgrid_notes.mmd"), "").unwrap();

        let jobs = discover(dir.path());

        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].input.ends_with("sensorgrid_v1/doc/mermaid/kept.mmd"));
    }

    #[test]
    fn test_directory_named_like_diagram_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mermaid = dir.path().join("apps/sensorgrid_v1/doc/mermaid");
        fs::create_dir_all(mermaid.join("folder.mmd")).unwrap();

        assert!(discover(dir.path()).is_empty());
    }

    #[test]
    fn test_jobs_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let apps = dir.path().join("apps");
        touch(&apps.join("sensorgrid_v2/doc/mermaid/b.mmd"));
        touch(&apps.join("sensorgrid_v2/client_v2/doc/mermaid/z.mmd"));
        touch(&apps.join("sensorgrid_v1/server_v1/doc/mermaid/a.mmd"));
        touch(&apps.join("sensorgrid_v1/doc/mermaid/c.mmd"));

        let jobs = discover(dir.path());
        let inputs: Vec<_> = jobs
            .iter()
            .map(|job| job.input.strip_prefix(&apps).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            inputs,
            vec![
                PathBuf::from("sensorgrid_v1/doc/mermaid/c.mmd"),
                PathBuf::from("sensorgrid_v1/server_v1/doc/mermaid/a.mmd"),
                PathBuf::from("sensorgrid_v2/client_v2/doc/mermaid/z.mmd"),
                PathBuf::from("sensorgrid_v2/doc/mermaid/b.mmd"),
            ]
        );
    }

    #[test]
    fn test_jobs_sort_as_strings_across_groups() {
        let dir = tempfile::tempdir().unwrap();
        let apps = dir.path().join("apps");
        touch(&apps.join("sensorgrid_v1/doc/mermaid/a.mmd"));
        touch(&apps.join("sensorgrid_v1.5/doc/mermaid/a.mmd"));

        let jobs = discover(dir.path());
        let discovered: Vec<_> = jobs
            .iter()
            .map(|job| {
                (
                    job.input.to_str().unwrap().to_owned(),
                    job.output.to_str().unwrap().to_owned(),
                )
            })
            .collect();
        let mut as_strings = discovered.clone();
        as_strings.sort();

        assert_eq!(discovered, as_strings);
        assert!(jobs[0].input.starts_with(apps.join("sensorgrid_v1.5")));
        assert!(jobs[1].input.starts_with(apps.join("sensorgrid_v1")));
    }

    #[test]
    fn test_output_name_keeps_inner_dots() {
        assert_eq!(
            output_file_name(OsStr::new("net.v2.mmd")),
            Some(OsString::from("net.v2.svg"))
        );
        assert_eq!(output_file_name(OsStr::new("notes.md")), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_discovered() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let mermaid = dir.path().join("apps/sensorgrid_v1/doc/mermaid");
        fs::create_dir_all(&mermaid).unwrap();
        fs::write(mermaid.join(OsStr::from_bytes(b"caf\xe9.mmd")), "graph TD").unwrap();

        let jobs = discover(dir.path());

        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].output.file_name().unwrap().as_bytes(),
            b"caf\xe9.svg"
        );
    }

    #[test]
    fn test_custom_layout() {
        let dir = tempfile::tempdir().unwrap();
        let group = dir.path().join("projects/grid_a");
        touch(&group.join("diagrams/flow.mmd"));

        let layout = DiscoveryConfig {
            apps_dir: "projects".to_owned(),
            group_prefix: "grid_".to_owned(),
            source_dir: "diagrams".to_owned(),
            output_dir: "images".to_owned(),
        };
        let jobs = Discovery::new(dir.path(), layout).discover();

        assert_eq!(
            jobs,
            vec![ConversionJob::new(
                group.join("diagrams/flow.mmd"),
                group.join("images/flow.svg"),
            )]
        );
    }
}
