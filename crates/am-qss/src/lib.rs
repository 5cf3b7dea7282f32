//! AudioMine QSS Parser & Style Resolver
//!
//! Parses Qt-dialect stylesheets (QSS) and computes the final visual
//! properties for a widget from its type, object name, classes and
//! interaction states.

mod cascade;
mod parser;
mod selector;
mod snapshot;
mod values;

pub use cascade::{ResolvedStyle, StyleResolver};
pub use parser::QssParser;
pub use selector::{
    Combinator, Compound, PseudoState, Selector, SelectorParseError, Specificity, StateTerm,
    SubControl,
};
pub use snapshot::{WidgetInfo, WidgetSnapshot, WidgetStates};
pub use values::{
    Color, GradientStop, Keyword, Length, LengthUnit, LinearGradient, PropertyId, PropertyValue,
};

use std::fmt;

/// Parse a QSS stylesheet
pub fn parse_stylesheet(qss: &str) -> Result<Stylesheet, QssError> {
    QssParser::new().parse(qss)
}

/// Parsed stylesheet
///
/// Immutable after parsing; safe to share across threads. Rules that
/// could not be parsed are dropped and reported in `diagnostics`.
#[derive(Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Stylesheet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialize back to QSS text.
    ///
    /// The output is not byte-identical to the input, but re-parsing it
    /// yields the same selectors and values.
    pub fn to_qss(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&rule.to_string());
            out.push('\n');
        }
        out
    }
}

/// QSS rule: one or more selectors sharing a declaration block
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sel) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{sel}")?;
        }
        f.write_str(" {\n")?;
        for decl in &self.declarations {
            writeln!(f, "    {}: {};", decl.property.name(), decl.value)?;
        }
        f.write_str("}\n")
    }
}

/// QSS declaration (property: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: PropertyId,
    pub value: PropertyValue,
}

/// A recoverable problem found while parsing
///
/// Carries the source line of the offending rule or declaration. The
/// surrounding rule set stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Fatal QSS parsing error
///
/// Per-rule problems are reported as [`Diagnostic`]s instead; an error
/// is only returned when the scanner cannot resynchronize at all.
#[derive(Debug, thiserror::Error)]
pub enum QssError {
    #[error("unterminated comment starting at line {line}")]
    UnterminatedComment { line: usize },
}
