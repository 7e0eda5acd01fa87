//! In-place rewriting of marker regions (`%%tool: ... %%`) inside source files

use super::region::{Markers, Scan, TemplateRegion};
use super::render::{render_template, RenderContext};
use super::report::BatchReport;
use crate::boundary::BoundaryWarning;
use crate::error::Result;
use crate::fs::FileSystem;
use std::path::Path;

/// Result of rewriting one buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub content: String,
    pub regions: Vec<TemplateRegion>,
    /// One-based line numbers of openers whose region never closed
    pub unterminated: Vec<usize>,
}

/// Re-render every template region of `content`.
///
/// Marker lines and template lines are copied verbatim. The implementation
/// block after each region is as long as the rendered template: that many
/// following lines are replaced, fewer when the file ends or another opener
/// comes first. Every line keeps its own ending, so files mixing `\n` and
/// `\r\n` survive; rendered lines take the endings of the lines they replace.
pub fn rewrite_markers(content: &str, markers: &Markers, ctx: &RenderContext) -> Rewrite {
    let (lines, endings): (Vec<&str>, Vec<&str>) =
        content.split_inclusive('\n').map(split_ending).unzip();
    let fallback = endings
        .iter()
        .copied()
        .find(|ending| !ending.is_empty())
        .unwrap_or("\n");

    let mut output: Vec<(String, &str)> = Vec::with_capacity(lines.len());
    let mut regions = Vec::new();
    let mut unterminated = Vec::new();

    let mut index = 0;
    while index < lines.len() {
        match markers.scan(&lines, index) {
            Scan::Plain => {
                output.push((lines[index].to_string(), endings[index]));
                index += 1;
            }
            Scan::Unterminated => {
                unterminated.push(index + 1);
                output.push((lines[index].to_string(), endings[index]));
                index += 1;
            }
            Scan::Region(region) => {
                output.extend(
                    (region.start_line..=region.end_line)
                        .map(|i| (lines[i].to_string(), endings[i])),
                );

                let rendered = render_template(&region.template, ctx);
                let rendered_lines: Vec<&str> = rendered.split('\n').collect();

                let mut next = region.end_line + 1;
                let mut discarded: Vec<&str> = Vec::new();
                while discarded.len() < rendered_lines.len()
                    && next < lines.len()
                    && !markers.opens(lines[next])
                {
                    discarded.push(endings[next]);
                    next += 1;
                }

                // The closing line at EOF has no ending of its own.
                let closer_ending = endings[region.end_line];
                let newline = if closer_ending.is_empty() {
                    fallback
                } else {
                    closer_ending
                };
                if let Some(closer) = output.last_mut() {
                    closer.1 = newline;
                }

                let last = rendered_lines.len() - 1;
                for (i, line) in rendered_lines.iter().enumerate() {
                    let ending = if i == last {
                        match discarded.last() {
                            Some(ending) => *ending,
                            None if closer_ending.is_empty() => "",
                            None => newline,
                        }
                    } else {
                        match discarded.get(i) {
                            Some(ending) if !ending.is_empty() => *ending,
                            _ => newline,
                        }
                    };
                    output.push((line.to_string(), ending));
                }

                regions.push(region);
                index = next;
            }
        }
    }

    let content: String = output
        .iter()
        .map(|(line, ending)| format!("{}{}", line, ending))
        .collect();

    Rewrite {
        content,
        regions,
        unterminated,
    }
}

/// Split a line produced by `split_inclusive('\n')` into text and ending
fn split_ending(line: &str) -> (&str, &str) {
    if let Some(text) = line.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = line.strip_suffix('\n') {
        (text, "\n")
    } else {
        (line, "")
    }
}

/// Rewrite the marker regions of each file in place, strictly in order.
///
/// Missing or unreadable files and unterminated regions are reported as
/// warnings. A failed write aborts the batch with
/// [crate::error::ReleaseError::BatchWrite].
pub fn process_version_files<F, P>(
    fs: &F,
    paths: &[P],
    markers: &Markers,
    ctx: &RenderContext,
) -> Result<BatchReport>
where
    F: FileSystem,
    P: AsRef<Path>,
{
    let mut report = BatchReport::default();

    for (position, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let content = match report.read_input(fs, path) {
            Some(content) => content,
            None => continue,
        };

        let rewrite = rewrite_markers(&content, markers, ctx);
        report
            .warnings
            .extend(
                rewrite
                    .unterminated
                    .iter()
                    .map(|line| BoundaryWarning::UnterminatedTemplate {
                        path: path.to_path_buf(),
                        line: *line,
                    }),
            );

        if rewrite.content == content {
            report.unchanged.push(path.to_path_buf());
            continue;
        }

        if let Err(e) = fs.write_file(path, &rewrite.content) {
            return Err(report.into_write_error(path.to_path_buf(), &paths[position + 1..], e));
        }
        report.written.push(path.to_path_buf());
    }

    Ok(report)
}
