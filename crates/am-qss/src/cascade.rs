//! Style Cascade & Resolver
//!
//! Computes the final style for a widget snapshot by:
//! 1. Matching selectors against the snapshot
//! 2. Sorting by specificity, sheet order and source order
//! 3. Applying declarations last-write-wins per property

use std::fmt;

use crate::selector::Specificity;
use crate::snapshot::WidgetSnapshot;
use crate::values::{PropertyId, PropertyValue};
use crate::{Declaration, Stylesheet};

/// Style resolver - an ordered stack of immutable stylesheets.
///
/// Sheets added later act like widget-level overrides: at equal
/// specificity their rules win over earlier sheets. The resolver never
/// mutates a sheet, so it can be shared freely across threads.
#[derive(Debug, Default)]
pub struct StyleResolver {
    sheets: Vec<Stylesheet>,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(sheet: Stylesheet) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }

    /// Add a stylesheet on top of the current stack
    pub fn add_stylesheet(&mut self, sheet: Stylesheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[Stylesheet] {
        &self.sheets
    }

    /// Resolve the style for one widget snapshot.
    ///
    /// Pure function of the resolver's sheets and the snapshot: same
    /// inputs, same output. A snapshot matching nothing yields an empty
    /// style - the toolkit's built-in defaults apply.
    pub fn resolve(&self, snapshot: &WidgetSnapshot) -> ResolvedStyle {
        let mut matches: Vec<(&Declaration, Specificity, usize, usize)> = Vec::new();

        for (sheet_idx, sheet) in self.sheets.iter().enumerate() {
            for (rule_idx, rule) in sheet.rules.iter().enumerate() {
                for selector in &rule.selectors {
                    if selector.matches(snapshot) {
                        let spec = selector.specificity();
                        for decl in &rule.declarations {
                            matches.push((decl, spec, sheet_idx, rule_idx));
                        }
                    }
                }
            }
        }

        // Specificity first, then sheet order, then source order.
        matches.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| a.2.cmp(&b.2))
                .then_with(|| a.3.cmp(&b.3))
        });

        let mut style = ResolvedStyle::default();
        for (decl, _, _, _) in matches {
            style.set(decl.property, decl.value.clone());
        }

        tracing::trace!(
            widget = %snapshot.widget.type_name,
            properties = style.len(),
            "resolved style"
        );
        style
    }
}

/// Final property map for one widget instance
///
/// Insertion-ordered; later writes replace earlier values for the same
/// property. Properties absent here fall back to toolkit defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    entries: Vec<(PropertyId, PropertyValue)>,
}

impl ResolvedStyle {
    pub fn get(&self, property: PropertyId) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }

    pub fn set(&mut self, property: PropertyId, value: PropertyValue) {
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyValue)> {
        self.entries.iter().map(|(p, v)| (*p, v))
    }
}

impl fmt::Display for ResolvedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (property, value) in &self.entries {
            writeln!(f, "{}: {};", property.name(), value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::WidgetInfo;
    use crate::values::Color;
    use crate::QssParser;

    fn resolver(qss: &str) -> StyleResolver {
        StyleResolver::with_sheet(QssParser::new().parse(qss).unwrap())
    }

    #[test]
    fn test_id_beats_type_regardless_of_order() {
        let r = resolver(
            "QPushButton#playButton { color: #1db954; }\n\
             QPushButton { color: white; }",
        );
        let snapshot = WidgetSnapshot::of(
            WidgetInfo::new("QPushButton").with_object_name("playButton"),
        );
        assert_eq!(
            r.resolve(&snapshot).get(PropertyId::Color),
            Some(&PropertyValue::Color(Color::rgb(0x1d, 0xb9, 0x54)))
        );
    }

    #[test]
    fn test_equal_specificity_source_order() {
        let r = resolver(
            "QLabel { color: red; }\n\
             QLabel { color: blue; }",
        );
        let snapshot = WidgetSnapshot::of(WidgetInfo::new("QLabel"));
        assert_eq!(
            r.resolve(&snapshot).get(PropertyId::Color),
            Some(&PropertyValue::Color(Color::rgb(0, 0, 255)))
        );
    }

    #[test]
    fn test_later_sheet_overrides() {
        let mut r = resolver("QLabel { color: red; }");
        r.add_stylesheet(
            QssParser::new()
                .parse("QLabel { color: white; }")
                .unwrap(),
        );
        let snapshot = WidgetSnapshot::of(WidgetInfo::new("QLabel"));
        assert_eq!(
            r.resolve(&snapshot).get(PropertyId::Color),
            Some(&PropertyValue::Color(Color::WHITE))
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let r = resolver("QPushButton { color: white; }");
        let snapshot = WidgetSnapshot::of(WidgetInfo::new("QSpinBox"));
        let style = r.resolve(&snapshot);
        assert!(style.is_empty());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let r = resolver(
            "QPushButton { background-color: #1db954; padding: 8px 16px; }\n\
             QPushButton:hover { background-color: #1ed760; }",
        );
        let snapshot = WidgetSnapshot::of(WidgetInfo::new("QPushButton").hovered());
        let first = r.resolve(&snapshot);
        for _ in 0..10 {
            assert_eq!(r.resolve(&snapshot), first);
        }
    }
}
