use crate::domain::Version;

/// Values substituted into templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// `major.minor.patch`
    pub version: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl RenderContext {
    pub fn new(version: &Version) -> Self {
        RenderContext {
            version: format!("{}.{}.{}", version.major, version.minor, version.patch),
            major: version.major.to_string(),
            minor: version.minor.to_string(),
            patch: version.patch.to_string(),
        }
    }

    fn lookup(&self, tail: &str) -> Option<(usize, &str)> {
        [
            ("{{version}}", self.version.as_str()),
            ("{{major}}", self.major.as_str()),
            ("{{minor}}", self.minor.as_str()),
            ("{{patch}}", self.patch.as_str()),
        ]
        .into_iter()
        .find(|(token, _)| tail.starts_with(token))
        .map(|(token, value)| (token.len(), value))
    }
}

impl From<&Version> for RenderContext {
    fn from(version: &Version) -> Self {
        RenderContext::new(version)
    }
}

/// Substitute `{{version}}`, `{{major}}`, `{{minor}}` and `{{patch}}`.
///
/// Single left-to-right pass: substituted values are never rescanned and any
/// other `{{...}}` token is copied verbatim.
pub fn render_template(template: &str, ctx: &RenderContext) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];

        match ctx.lookup(tail) {
            Some((token_len, value)) => {
                output.push_str(value);
                rest = &tail[token_len..];
            }
            None => {
                output.push('{');
                rest = &tail[1..];
            }
        }
    }

    output.push_str(rest);
    output
}
