//! Whole-file templates rendered to a sibling output file

use super::render::{render_template, RenderContext};
use super::report::BatchReport;
use crate::error::Result;
use crate::fs::FileSystem;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Derive where a template's output goes.
///
/// Paths containing `.tpl` lose every occurrence of it
/// (`config.tpl.json` -> `config.json`); any other path gets `.new` before its
/// extension (`version.js` -> `version.new.js`, `Makefile` -> `Makefile.new`).
pub fn template_output_path(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if text.contains(".tpl") {
        return PathBuf::from(text.replace(".tpl", ""));
    }

    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(extension)) => {
            let mut name = OsString::from(stem);
            name.push(".new.");
            name.push(extension);
            path.with_file_name(name)
        }
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".new");
            PathBuf::from(name)
        }
    }
}

/// Render each template file as a whole and write it to
/// [template_output_path]. Templates are never modified; existing outputs are
/// replaced. Files are processed strictly in order, and a failed write aborts
/// the batch with [crate::error::ReleaseError::BatchWrite].
pub fn process_template_files<F, P>(
    fs: &F,
    paths: &[P],
    ctx: &RenderContext,
) -> Result<BatchReport>
where
    F: FileSystem,
    P: AsRef<Path>,
{
    let mut report = BatchReport::default();

    for (position, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let template = match report.read_input(fs, path) {
            Some(template) => template,
            None => continue,
        };

        let output_path = template_output_path(path);
        let rendered = render_template(&template, ctx);

        if let Err(e) = fs.write_file(&output_path, &rendered) {
            return Err(report.into_write_error(output_path, &paths[position + 1..], e));
        }
        report.written.push(output_path);
    }

    Ok(report)
}
