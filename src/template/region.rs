/// Closing token of every template region
pub const CLOSING_MARKER: &str = "%%";

/// Marker tokens for one tool: `%%<tool_name>:` opens, `%%` closes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    opening: String,
}

impl Markers {
    /// `tool_name` is validated by [crate::config::Config::validate]
    pub fn new(tool_name: &str) -> Self {
        Markers {
            opening: format!("%%{}:", tool_name),
        }
    }

    pub fn opening(&self) -> &str {
        &self.opening
    }

    pub fn opens(&self, line: &str) -> bool {
        line.contains(&self.opening)
    }

    /// Inspect `lines[index]` for the start of a template region
    pub fn scan(&self, lines: &[&str], index: usize) -> Scan {
        let line = lines[index];
        let open_at = match line.find(&self.opening) {
            Some(at) => at,
            None => return Scan::Plain,
        };
        let after = &line[open_at + self.opening.len()..];

        if let Some(close_at) = after.find(CLOSING_MARKER) {
            return Scan::Region(TemplateRegion {
                start_line: index,
                end_line: index,
                template: after[..close_at].trim().to_string(),
                is_multi_line: false,
            });
        }

        let mut parts = vec![after.trim_start()];
        for (offset, candidate) in lines[index + 1..].iter().enumerate() {
            // Another opener means this region was never closed.
            if self.opens(candidate) {
                return Scan::Unterminated;
            }

            if let Some(close_at) = candidate.find(CLOSING_MARKER) {
                parts.push(&candidate[..close_at]);
                return Scan::Region(TemplateRegion {
                    start_line: index,
                    end_line: index + 1 + offset,
                    template: join_template_lines(&parts),
                    is_multi_line: true,
                });
            }
            parts.push(candidate);
        }

        Scan::Unterminated
    }
}

/// Drop blank lines around the template and trailing whitespace; keep indentation.
fn join_template_lines(parts: &[&str]) -> String {
    let first = parts
        .iter()
        .position(|p| !p.trim().is_empty())
        .unwrap_or(parts.len());
    let last = parts
        .iter()
        .rposition(|p| !p.trim().is_empty())
        .map_or(first, |i| i + 1);

    if first >= last {
        return String::new();
    }
    parts[first..last].join("\n").trim_end().to_string()
}

/// A located marker block. Line indexes are zero-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRegion {
    pub start_line: usize,
    pub end_line: usize,
    pub template: String,
    pub is_multi_line: bool,
}

/// Result of inspecting one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    Plain,
    Region(TemplateRegion),
    Unterminated,
}
