//! Text rewrite stages: marker detection, import insertion, body wrapping
//!
//! These work on plain strings with regexes. They know nothing about Dart
//! syntax beyond the few line shapes they look for.

use regex::Regex;

use crate::config::PatchConfig;
use crate::error::PatchError;

/// A body field rewritten to hold the wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyWrap {
    /// The rewritten text
    pub text: String,
    /// Container that matched
    pub container: String,
    /// Byte offset of the wrapped container's opening parenthesis in `text`
    pub open_paren: usize,
    /// Indentation of the line holding `body:`
    pub indent: String,
    /// Line ending of the line holding `body:`
    pub newline: &'static str,
}

/// Compiled rewrite rules for one configuration
#[derive(Debug, Clone)]
pub struct RewriteRules {
    markers: Vec<String>,
    import_line: String,
    wrapper: String,
    import_re: Regex,
    bodies: Vec<(String, Regex)>,
}

impl RewriteRules {
    /// Compile the rules for a config
    pub fn new(config: &PatchConfig) -> Result<Self, PatchError> {
        let bodies = config
            .containers
            .iter()
            .map(|name| {
                let re = Regex::new(&format!(r"(\s+body:\s+){}\(", regex::escape(name)))?;
                Ok((name.clone(), re))
            })
            .collect::<Result<Vec<_>, PatchError>>()?;

        // the wrapper name is always a marker
        let mut markers: Vec<String> =
            config.markers.iter().filter(|m| !m.is_empty()).cloned().collect();
        if !markers.iter().any(|m| config.wrapper.contains(m.as_str())) {
            markers.push(config.wrapper.clone());
        }

        Ok(Self {
            markers,
            import_line: config.import_line.trim().to_string(),
            wrapper: config.wrapper.clone(),
            import_re: Regex::new(r"(?m)^import .*?;\r?\n")?,
            bodies,
        })
    }

    /// Whether the text already carries the wrapper
    #[must_use]
    pub fn has_marker(&self, content: &str) -> bool {
        self.markers.iter().any(|m| content.contains(m.as_str()))
    }

    /// Insert the import line right after the first import statement.
    ///
    /// Returns `None` when the text has no import line to anchor on.
    #[must_use]
    pub fn insert_import(&self, content: &str) -> Option<String> {
        let m = self.import_re.find(content)?;
        let newline = if m.as_str().ends_with("\r\n") { "\r\n" } else { "\n" };

        let mut out = String::with_capacity(content.len() + self.import_line.len() + 2);
        out.push_str(&content[..m.end()]);
        out.push_str(&self.import_line);
        out.push_str(newline);
        out.push_str(&content[m.end()..]);
        Some(out)
    }

    /// Wrap the first `body:` container found, trying containers in priority order.
    ///
    /// Only the first occurrence of the first matching container is rewritten.
    #[must_use]
    pub fn wrap_body(&self, content: &str) -> Option<BodyWrap> {
        let (container, caps) = self
            .bodies
            .iter()
            .find_map(|(name, re)| re.captures(content).map(|caps| (name, caps)))?;

        let whole = caps.get(0)?;
        let prefix = caps.get(1)?;
        let body_pos = prefix.start() + prefix.as_str().find("body:")?;
        let indent = line_indent(content, body_pos);
        let newline = line_ending(content, whole.end());

        let replacement = format!(
            "{}{}({newline}{indent}  child: {container}(",
            prefix.as_str(),
            self.wrapper
        );

        let mut text = String::with_capacity(content.len() + replacement.len());
        text.push_str(&content[..whole.start()]);
        text.push_str(&replacement);
        text.push_str(&content[whole.end()..]);

        Some(BodyWrap {
            text,
            container: container.clone(),
            open_paren: whole.start() + replacement.len() - 1,
            indent: indent.to_string(),
            newline,
        })
    }
}

/// Line ending of the line containing `pos`, `\n` when it has none
fn line_ending(content: &str, pos: usize) -> &'static str {
    match content[pos..].find('\n') {
        Some(i) if content[..pos + i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Leading whitespace of the line containing `pos`
fn line_indent(content: &str, pos: usize) -> &str {
    let line_start = content[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &content[line_start..pos];
    let end = line.find(|c: char| c != ' ' && c != '\t').unwrap_or(line.len());
    &line[..end]
}
