//! QSS Selector Model & Matching
//!
//! Selectors are chains of compound segments joined by descendant or
//! child combinators. A compound names a widget type, object name,
//! style classes, an optional sub-control and pseudo-states.

use std::fmt;

use crate::snapshot::{WidgetInfo, WidgetSnapshot, WidgetStates};

/// Combinator between two compound segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any ancestor
    Descendant,
    /// `>`: immediate parent
    Child,
}

/// Pseudo-state (`:hover`, `:pressed`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoState {
    Hover,
    Pressed,
    Disabled,
    Enabled,
    Selected,
    Checked,
    Unchecked,
    Focus,
    On,
    Off,
    Horizontal,
    Vertical,
}

impl PseudoState {
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "hover" => Self::Hover,
            "pressed" => Self::Pressed,
            "disabled" => Self::Disabled,
            "enabled" => Self::Enabled,
            "selected" => Self::Selected,
            "checked" => Self::Checked,
            "unchecked" => Self::Unchecked,
            "focus" => Self::Focus,
            "on" => Self::On,
            "off" => Self::Off,
            "horizontal" => Self::Horizontal,
            "vertical" => Self::Vertical,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Pressed => "pressed",
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
            Self::Selected => "selected",
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
            Self::Focus => "focus",
            Self::On => "on",
            Self::Off => "off",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// Whether this state is currently active on a widget
    pub fn is_active(&self, states: &WidgetStates) -> bool {
        match self {
            Self::Hover => states.hover,
            Self::Pressed => states.pressed,
            Self::Disabled => states.disabled,
            Self::Enabled => !states.disabled,
            Self::Selected => states.selected,
            Self::Checked => states.checked,
            Self::Unchecked => !states.checked,
            Self::Focus => states.focused,
            Self::On => states.on,
            Self::Off => !states.on,
            Self::Horizontal => states.horizontal,
            Self::Vertical => states.vertical,
        }
    }
}

/// Sub-control (`::handle`, `::item`, ...) - the separately painted
/// part of a complex widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubControl {
    Groove,
    Handle,
    AddLine,
    SubLine,
    AddPage,
    SubPage,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    Item,
    Pane,
    Tab,
    Title,
    Indicator,
    Chunk,
    DropDown,
    Branch,
    Section,
    Corner,
    Separator,
    Text,
}

impl SubControl {
    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "groove" => Self::Groove,
            "handle" => Self::Handle,
            "add-line" => Self::AddLine,
            "sub-line" => Self::SubLine,
            "add-page" => Self::AddPage,
            "sub-page" => Self::SubPage,
            "up-arrow" => Self::UpArrow,
            "down-arrow" => Self::DownArrow,
            "left-arrow" => Self::LeftArrow,
            "right-arrow" => Self::RightArrow,
            "item" => Self::Item,
            "pane" => Self::Pane,
            "tab" => Self::Tab,
            "title" => Self::Title,
            "indicator" => Self::Indicator,
            "chunk" => Self::Chunk,
            "drop-down" => Self::DropDown,
            "branch" => Self::Branch,
            "section" => Self::Section,
            "corner" => Self::Corner,
            "separator" => Self::Separator,
            "text" => Self::Text,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Groove => "groove",
            Self::Handle => "handle",
            Self::AddLine => "add-line",
            Self::SubLine => "sub-line",
            Self::AddPage => "add-page",
            Self::SubPage => "sub-page",
            Self::UpArrow => "up-arrow",
            Self::DownArrow => "down-arrow",
            Self::LeftArrow => "left-arrow",
            Self::RightArrow => "right-arrow",
            Self::Item => "item",
            Self::Pane => "pane",
            Self::Tab => "tab",
            Self::Title => "title",
            Self::Indicator => "indicator",
            Self::Chunk => "chunk",
            Self::DropDown => "drop-down",
            Self::Branch => "branch",
            Self::Section => "section",
            Self::Corner => "corner",
            Self::Separator => "separator",
            Self::Text => "text",
        }
    }
}

/// One pseudo-state term, possibly negated (`:!selected`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTerm {
    pub state: PseudoState,
    pub negated: bool,
}

/// Compound segment: everything between two combinators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    /// Widget type name; `None` means universal (`*` or omitted)
    pub type_name: Option<String>,
    /// `#objectName`
    pub object_name: Option<String>,
    /// `.class` terms
    pub classes: Vec<String>,
    /// `::sub-control`
    pub sub_control: Option<SubControl>,
    /// `:state` / `:!state` terms
    pub states: Vec<StateTerm>,
}

impl Compound {
    /// Match against a widget, ignoring sub-control (used for ancestors)
    fn matches_widget(&self, widget: &WidgetInfo) -> bool {
        if let Some(type_name) = &self.type_name {
            if widget.type_name != *type_name {
                return false;
            }
        }
        if let Some(object_name) = &self.object_name {
            if widget.object_name.as_deref() != Some(object_name.as_str()) {
                return false;
            }
        }
        if !self
            .classes
            .iter()
            .all(|c| widget.classes.iter().any(|w| w == c))
        {
            return false;
        }
        self.states
            .iter()
            .all(|term| term.state.is_active(&widget.states) != term.negated)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_name {
            Some(t) => f.write_str(t)?,
            None => {
                if self.object_name.is_none()
                    && self.classes.is_empty()
                    && self.sub_control.is_none()
                    && self.states.is_empty()
                {
                    f.write_str("*")?;
                }
            }
        }
        if let Some(name) = &self.object_name {
            write!(f, "#{name}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        if let Some(sc) = self.sub_control {
            write!(f, "::{}", sc.name())?;
        }
        for term in &self.states {
            if term.negated {
                write!(f, ":!{}", term.state.name())?;
            } else {
                write!(f, ":{}", term.state.name())?;
            }
        }
        Ok(())
    }
}

/// Malformed selector text
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid selector '{selector}': {message}")]
pub struct SelectorParseError {
    pub selector: String,
    pub message: String,
}

/// A full selector: compound segments joined by combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Left-to-right; the last compound names the subject widget
    pub compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Parse one selector (no commas)
    pub fn parse(text: &str) -> Result<Self, SelectorParseError> {
        let err = |message: String| SelectorParseError {
            selector: text.trim().to_string(),
            message,
        };

        let mut compounds = Vec::new();
        let mut combinators = Vec::new();
        let mut pending_child = false;

        for token in tokenize(text) {
            if token == ">" {
                if compounds.is_empty() || pending_child {
                    return Err(err("misplaced '>' combinator".to_string()));
                }
                pending_child = true;
                continue;
            }
            let compound = parse_compound(token).map_err(&err)?;
            if !compounds.is_empty() {
                combinators.push(if pending_child {
                    Combinator::Child
                } else {
                    Combinator::Descendant
                });
            }
            pending_child = false;
            compounds.push(compound);
        }

        if pending_child {
            return Err(err("dangling '>' combinator".to_string()));
        }
        if compounds.is_empty() {
            return Err(err("empty selector".to_string()));
        }
        // Sub-controls only make sense on the subject widget.
        if compounds[..compounds.len() - 1]
            .iter()
            .any(|c| c.sub_control.is_some())
        {
            return Err(err("sub-control on a non-subject segment".to_string()));
        }
        Ok(Self {
            compounds,
            combinators,
        })
    }

    /// Cascade specificity: (object names, classes + states, types + sub-controls)
    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity(0, 0, 0);
        for compound in &self.compounds {
            if compound.object_name.is_some() {
                spec.0 += 1;
            }
            spec.1 += (compound.classes.len() + compound.states.len()) as u32;
            if compound.type_name.is_some() {
                spec.2 += 1;
            }
            if compound.sub_control.is_some() {
                spec.2 += 1;
            }
        }
        spec
    }

    /// Check whether this selector matches a widget snapshot
    pub fn matches(&self, snapshot: &WidgetSnapshot) -> bool {
        let Some(subject) = self.compounds.last() else {
            return false;
        };
        if subject.sub_control != snapshot.sub_control {
            return false;
        }
        if !subject.matches_widget(&snapshot.widget) {
            return false;
        }
        let rest = &self.compounds[..self.compounds.len() - 1];
        matches_ancestors(rest, &self.combinators, &snapshot.ancestors)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                match self.combinators[i - 1] {
                    Combinator::Descendant => f.write_str(" ")?,
                    Combinator::Child => f.write_str(" > ")?,
                }
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

/// Match the non-subject compounds against the ancestor chain.
///
/// `ancestors` is nearest-parent-first. Descendant combinators may skip
/// ancestors, so the matcher backtracks over candidate positions.
fn matches_ancestors(
    compounds: &[Compound],
    combinators: &[Combinator],
    ancestors: &[WidgetInfo],
) -> bool {
    let Some((compound, rest)) = compounds.split_last() else {
        return true;
    };
    // Combinator between `compound` and the segment to its right.
    let Some(&combinator) = combinators.get(rest.len()) else {
        return false;
    };
    match combinator {
        Combinator::Child => match ancestors.split_first() {
            Some((parent, outer)) => {
                compound.matches_widget(parent) && matches_ancestors(rest, combinators, outer)
            }
            None => false,
        },
        Combinator::Descendant => {
            for (i, ancestor) in ancestors.iter().enumerate() {
                if compound.matches_widget(ancestor)
                    && matches_ancestors(rest, combinators, &ancestors[i + 1..])
                {
                    return true;
                }
            }
            false
        }
    }
}

/// Specificity score, ordered lexicographically
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// Split selector text into compound tokens and `>` symbols
fn tokenize(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, ch) in text.char_indices() {
        if ch == '>' {
            if let Some(s) = start.take() {
                out.push(&text[s..i]);
            }
            out.push(">");
        } else if ch.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(&text[s..i]);
            }
        } else {
            start.get_or_insert(i);
        }
    }
    if let Some(s) = start {
        out.push(&text[s..]);
    }
    out
}

fn parse_compound(token: &str) -> Result<Compound, String> {
    let bytes = token.as_bytes();
    let mut compound = Compound::default();
    let mut i = 0;

    if i < bytes.len() && bytes[i] == b'*' {
        i += 1;
    } else {
        let (ident, next) = read_ident(token, i);
        if !ident.is_empty() {
            compound.type_name = Some(ident.to_string());
            i = next;
        }
    }

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                let (ident, next) = read_ident(token, i + 1);
                if ident.is_empty() {
                    return Err("expected object name after '#'".to_string());
                }
                compound.object_name = Some(ident.to_string());
                i = next;
            }
            b'.' => {
                let (ident, next) = read_ident(token, i + 1);
                if ident.is_empty() {
                    return Err("expected class name after '.'".to_string());
                }
                compound.classes.push(ident.to_string());
                i = next;
            }
            b':' if bytes.get(i + 1) == Some(&b':') => {
                let (ident, next) = read_ident(token, i + 2);
                let sc = SubControl::from_name(ident)
                    .ok_or_else(|| format!("unknown sub-control '::{ident}'"))?;
                if compound.sub_control.replace(sc).is_some() {
                    return Err("multiple sub-controls in one segment".to_string());
                }
                i = next;
            }
            b':' => {
                let mut j = i + 1;
                let negated = bytes.get(j) == Some(&b'!');
                if negated {
                    j += 1;
                }
                let (ident, next) = read_ident(token, j);
                let state = PseudoState::from_name(ident)
                    .ok_or_else(|| format!("unknown pseudo-state ':{ident}'"))?;
                compound.states.push(StateTerm { state, negated });
                i = next;
            }
            other => {
                return Err(format!("unexpected character '{}'", other as char));
            }
        }
    }
    Ok(compound)
}

/// Read an identifier (ASCII alphanumerics, '_', '-') starting at `from`
fn read_ident(token: &str, from: usize) -> (&str, usize) {
    let bytes = token.as_bytes();
    let mut end = from;
    while end < bytes.len()
        && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_' || bytes[end] == b'-')
    {
        end += 1;
    }
    (&token[from..end], end)
}
