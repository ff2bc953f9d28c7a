//! Embedded pattern templates inside expected cells.
//!
//! Rendered text is often nondeterministic (timestamps, sizes, generated
//! ids), so an expected cell may embed partial regular expressions instead of
//! literal text: `attachment.txt #{/\d+\.\d{2} KB/}`. Before the structural
//! comparison runs, each eligible expected cell is matched against its actual
//! counterpart; on a match the actual text is substituted in place so the
//! downstream comparator sees literal equality, and on a miss the template is
//! left literal so the failure message shows what was asked for.
//!
//! Token grammar: `#{/<pattern>/<flags>}` with flags drawn from `i` (case
//! insensitive), `m` (multiline), `x` (free-spacing). A token preceded by a
//! backslash is always de-escaped to literal `#{...}` text, whether or not
//! templating is enabled for that cell.

use crate::error::DiffError;
use crate::grid::{Cell, Grid, Row};
use crate::keys::normalize_key;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::trace;

/// Pattern flags local to one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplateFlags {
    pub ignore_case: bool,
    pub multiline: bool,
    pub extended: bool,
}

impl TemplateFlags {
    fn parse(flags: &str) -> TemplateFlags {
        TemplateFlags {
            ignore_case: flags.contains('i'),
            multiline: flags.contains('m'),
            extended: flags.contains('x'),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.ignore_case || self.multiline || self.extended)
    }

    fn inline(&self) -> String {
        let mut out = String::new();
        if self.ignore_case {
            out.push('i');
        }
        if self.multiline {
            out.push('m');
        }
        if self.extended {
            out.push('x');
        }
        out
    }
}

/// One parsed `#{/pattern/flags}` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateToken {
    pub pattern: String,
    pub flags: TemplateFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Token(TemplateToken),
}

/// Which columns of the expected grid may expand templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnWhitelist {
    All,
    Columns(BTreeSet<usize>),
}

impl ColumnWhitelist {
    pub fn allows(&self, column: usize) -> bool {
        match self {
            ColumnWhitelist::All => true,
            ColumnWhitelist::Columns(columns) => columns.contains(&column),
        }
    }
}

/// A caller-facing column reference, resolved against the actual header once
/// per comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Matched via [`normalize_key`] against the actual extracted header.
    Name(String),
    /// 1-based column index.
    Index(usize),
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> ColumnSelector {
        ColumnSelector::Name(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> ColumnSelector {
        ColumnSelector::Name(name)
    }
}

impl From<usize> for ColumnSelector {
    fn from(index: usize) -> ColumnSelector {
        ColumnSelector::Index(index)
    }
}

/// Template configuration carried by a differ.
#[derive(Debug, Clone, Default)]
pub struct TemplateConfig {
    pub enabled: bool,
    /// Empty means every column.
    pub columns: Vec<ColumnSelector>,
}

impl TemplateConfig {
    pub fn all_columns() -> TemplateConfig {
        TemplateConfig {
            enabled: true,
            columns: Vec::new(),
        }
    }

    pub fn columns(columns: Vec<ColumnSelector>) -> TemplateConfig {
        TemplateConfig {
            enabled: true,
            columns,
        }
    }
}

/// Split a cell's text into literal segments and tokens in one left-to-right
/// scan. `\#{` de-escapes to a literal `#{` (the backslash is dropped). An
/// opening `#{/` with no terminating `/flags}` is a malformed token.
pub(crate) fn scan(text: &str) -> Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if rest.starts_with("\\#{") {
            literal.push_str("#{");
            i += 3;
            continue;
        }
        if rest.starts_with("#{/") {
            let body = &rest[3..];
            let mut token_end = None;
            for (at, ch) in body.char_indices() {
                if ch != '/' {
                    continue;
                }
                let after = &body[at + 1..];
                let flag_len = after
                    .chars()
                    .take_while(|c| matches!(c, 'i' | 'm' | 'x'))
                    .count();
                if after[flag_len..].starts_with('}') {
                    token_end = Some((at, flag_len));
                    break;
                }
            }
            let Some((at, flag_len)) = token_end else {
                return Err("unterminated pattern token".to_string());
            };
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Token(TemplateToken {
                pattern: body[..at].to_string(),
                flags: TemplateFlags::parse(&body[at + 1..at + 1 + flag_len]),
            }));
            i += 3 + at + 1 + flag_len + 1;
            continue;
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        literal.push(ch);
        i += ch.len_utf8();
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn has_token(segments: &[Segment]) -> bool {
    segments
        .iter()
        .any(|segment| matches!(segment, Segment::Token(_)))
}

/// Render segments back to displayable text: literals de-escaped, tokens in
/// their original `#{/pattern/flags}` spelling.
pub(crate) fn render_literal(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Token(token) => {
                out.push_str("#{/");
                out.push_str(&token.pattern);
                out.push('/');
                out.push_str(&token.flags.inline());
                out.push('}');
            }
        }
    }
    out
}

/// Build the anchored full-string pattern for one cell: literals escaped,
/// each token a non-capturing group with its flags applied locally.
pub(crate) fn build_pattern(segments: &[Segment]) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("^");
    for segment in segments {
        match segment {
            Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
            Segment::Token(token) => {
                if token.flags.is_empty() {
                    pattern.push_str("(?:");
                } else {
                    pattern.push_str("(?");
                    pattern.push_str(&token.flags.inline());
                    pattern.push(':');
                }
                pattern.push_str(&token.pattern);
                pattern.push(')');
            }
        }
    }
    pattern.push('$');
    Regex::new(&pattern)
}

/// Resolve the caller's column selectors against the actual extracted header.
pub(crate) fn resolve_whitelist(
    selectors: &[ColumnSelector],
    actual_header: Option<&Row>,
) -> ColumnWhitelist {
    if selectors.is_empty() {
        return ColumnWhitelist::All;
    }
    let header_keys: Vec<String> = actual_header
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| whitelist_key(&cell.text, i))
                .collect()
        })
        .unwrap_or_default();
    let mut columns = BTreeSet::new();
    for selector in selectors {
        match selector {
            ColumnSelector::Index(index) => {
                if *index >= 1 {
                    columns.insert(index - 1);
                }
            }
            ColumnSelector::Name(name) => {
                let wanted = normalize_key(name);
                for (i, key) in header_keys.iter().enumerate() {
                    if *key == wanted {
                        columns.insert(i);
                    }
                }
            }
        }
    }
    ColumnWhitelist::Columns(columns)
}

fn whitelist_key(text: &str, index: usize) -> String {
    let key = normalize_key(text);
    if !key.is_empty() {
        key
    } else if !text.is_empty() {
        text.to_string()
    } else {
        (index + 1).to_string()
    }
}

/// Rewrite the expected grid for comparison.
///
/// Eligible cells (templating enabled, column whitelisted, at least one
/// unescaped token) are replaced by the actual cell's text when the built
/// pattern matches it in full, and by their de-escaped literal rendition when
/// it does not. Ineligible cells are only de-escaped.
pub(crate) fn apply(
    expected: &Grid,
    actual: &Grid,
    config: &TemplateConfig,
) -> Result<Grid, DiffError> {
    let whitelist = if config.enabled {
        resolve_whitelist(&config.columns, actual.header())
    } else {
        ColumnWhitelist::Columns(BTreeSet::new())
    };
    let mut rows = Vec::with_capacity(expected.rows.len());
    for (i, row) in expected.rows.iter().enumerate() {
        let mut out = Row::with_capacity(row.len());
        for (j, cell) in row.iter().enumerate() {
            let segments = scan(&cell.text).map_err(|detail| DiffError::InvalidTemplate {
                row: i,
                col: j,
                cell: cell.text.clone(),
                detail,
            })?;
            let eligible = config.enabled && whitelist.allows(j) && has_token(&segments);
            if !eligible {
                out.push(Cell::synthesized(render_literal(&segments)));
                continue;
            }
            let pattern =
                build_pattern(&segments).map_err(|err| DiffError::InvalidTemplate {
                    row: i,
                    col: j,
                    cell: cell.text.clone(),
                    detail: err.to_string(),
                })?;
            let actual_text = actual
                .rows
                .get(i)
                .and_then(|actual_row| actual_row.get(j))
                .map(|actual_cell| actual_cell.text.as_str())
                .unwrap_or("");
            if pattern.is_match(actual_text) {
                trace!(row = i, col = j, "template matched, substituting actual text");
                out.push(Cell::synthesized(actual_text));
            } else {
                out.push(Cell::synthesized(render_literal(&segments)));
            }
        }
        rows.push(out);
    }
    Ok(Grid { rows })
}
