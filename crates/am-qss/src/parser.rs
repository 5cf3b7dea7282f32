//! QSS Parser
//!
//! Hand-written scanner for the Qt stylesheet dialect. A malformed
//! rule is reported and skipped; the rest of the sheet still loads.

use crate::selector::Selector;
use crate::values::{split_top_level, PropertyId, PropertyValue};
use crate::{Declaration, Diagnostic, QssError, Rule, Stylesheet};

/// QSS Parser
pub struct QssParser;

impl QssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a QSS stylesheet
    pub fn parse(&self, qss: &str) -> Result<Stylesheet, QssError> {
        let src = strip_comments(qss)?;
        let mut sheet = Stylesheet::default();
        let mut pos = 0;

        while pos < src.len() {
            let rest = &src[pos..];
            let skip = rest.len() - rest.trim_start().len();
            pos += skip;
            if pos >= src.len() {
                break;
            }

            let sel_start = pos;
            let Some(brace) = src[pos..].find('{').map(|i| pos + i) else {
                sheet.diagnostics.push(Diagnostic {
                    line: line_at(&src, pos),
                    message: format!(
                        "expected '{{' after selector '{}'",
                        src[pos..].trim().chars().take(40).collect::<String>()
                    ),
                });
                break;
            };
            let Some(close) = src[brace..].find('}').map(|i| brace + i) else {
                sheet.diagnostics.push(Diagnostic {
                    line: line_at(&src, brace),
                    message: "missing closing brace".to_string(),
                });
                break;
            };

            let selector_text = src[sel_start..brace].trim();
            let block = &src[brace + 1..close];
            let block_offset = brace + 1;
            pos = close + 1;

            if selector_text.is_empty() {
                sheet.diagnostics.push(Diagnostic {
                    line: line_at(&src, brace),
                    message: "rule without a selector".to_string(),
                });
                continue;
            }

            let mut selectors = Vec::new();
            let mut bad_selector = false;
            for part in split_top_level(selector_text, ',') {
                match Selector::parse(part) {
                    Ok(sel) => selectors.push(sel),
                    Err(e) => {
                        tracing::warn!("skipping rule: {e}");
                        sheet.diagnostics.push(Diagnostic {
                            line: line_at(&src, sel_start),
                            message: e.to_string(),
                        });
                        bad_selector = true;
                        break;
                    }
                }
            }
            if bad_selector {
                continue;
            }

            let declarations = parse_declarations(&src, block, block_offset, &mut sheet.diagnostics);
            sheet.rules.push(Rule {
                selectors,
                declarations,
            });
        }

        tracing::debug!(
            rules = sheet.rules.len(),
            diagnostics = sheet.diagnostics.len(),
            "parsed stylesheet"
        );
        Ok(sheet)
    }
}

impl Default for QssParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_declarations(
    src: &str,
    block: &str,
    block_offset: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut offset = 0;

    for segment in block.split(';') {
        let seg_offset = offset;
        offset += segment.len() + 1;

        let text = segment.trim();
        if text.is_empty() {
            continue;
        }
        let line = line_at(src, block_offset + seg_offset);

        let Some((name, value_text)) = text.split_once(':') else {
            diagnostics.push(Diagnostic {
                line,
                message: format!("expected ':' in declaration '{text}'"),
            });
            continue;
        };

        let name = name.trim().to_ascii_lowercase();
        let Some(property) = PropertyId::from_name(&name) else {
            // Forward-compatible: keep loading, drop the declaration.
            tracing::warn!("unknown property '{name}' at line {line}");
            diagnostics.push(Diagnostic {
                line,
                message: format!("unknown property '{name}'"),
            });
            continue;
        };

        let mut value_text = value_text.trim();
        if let Some(stripped) = value_text.strip_suffix("!important") {
            // Not part of the QSS dialect; tolerate and drop the marker.
            diagnostics.push(Diagnostic {
                line,
                message: "'!important' is not supported; ignored".to_string(),
            });
            value_text = stripped.trim_end();
        }

        match PropertyValue::parse(value_text) {
            Some(value) => declarations.push(Declaration { property, value }),
            None => diagnostics.push(Diagnostic {
                line,
                message: format!("invalid value '{value_text}' for '{name}'"),
            }),
        }
    }
    declarations
}

/// Replace `/* ... */` comments with spaces, keeping newlines so line
/// numbers in diagnostics stay accurate
fn strip_comments(src: &str) -> Result<String, QssError> {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        if ch == '/' && matches!(chars.peek(), Some((_, '*'))) {
            chars.next();
            let start_line = line_at(src, i);
            let mut closed = false;
            out.push_str("  ");
            while let Some((_, c)) = chars.next() {
                if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    out.push_str("  ");
                    closed = true;
                    break;
                }
                out.push(if c == '\n' { '\n' } else { ' ' });
            }
            if !closed {
                return Err(QssError::UnterminatedComment { line: start_line });
            }
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}

/// 1-based line number of a byte offset
fn line_at(src: &str, offset: usize) -> usize {
    src.as_bytes()[..offset.min(src.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
