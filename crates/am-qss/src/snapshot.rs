//! Widget Snapshots
//!
//! The resolver's view of one widget at resolution time: type, object
//! name, style classes, interaction states and containment path. The
//! GUI layer builds a fresh snapshot whenever a widget repaints or its
//! state changes; rules themselves never change.

use crate::selector::SubControl;

/// Interaction state flags at resolution time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetStates {
    pub hover: bool,
    pub pressed: bool,
    pub disabled: bool,
    pub selected: bool,
    pub checked: bool,
    pub focused: bool,
    pub on: bool,
    pub horizontal: bool,
    pub vertical: bool,
}

/// Static identity and current states of one widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetInfo {
    pub type_name: String,
    pub object_name: Option<String>,
    pub classes: Vec<String>,
    pub states: WidgetStates,
}

impl WidgetInfo {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn hovered(mut self) -> Self {
        self.states.hover = true;
        self
    }

    pub fn pressed(mut self) -> Self {
        self.states.pressed = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.states.disabled = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.states.selected = true;
        self
    }

    pub fn checked(mut self) -> Self {
        self.states.checked = true;
        self
    }

    pub fn focused(mut self) -> Self {
        self.states.focused = true;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.states.horizontal = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.states.vertical = true;
        self
    }
}

/// Everything the resolver needs to know about one widget instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub widget: WidgetInfo,
    /// The sub-control being painted, if any (slider handle, tab, ...)
    pub sub_control: Option<SubControl>,
    /// Containment path, nearest parent first
    pub ancestors: Vec<WidgetInfo>,
}

impl WidgetSnapshot {
    pub fn of(widget: WidgetInfo) -> Self {
        Self {
            widget,
            ..Self::default()
        }
    }

    pub fn with_sub_control(mut self, sub_control: SubControl) -> Self {
        self.sub_control = Some(sub_control);
        self
    }

    /// Append the next enclosing widget. Call once per level, innermost
    /// parent first.
    pub fn inside(mut self, ancestor: WidgetInfo) -> Self {
        self.ancestors.push(ancestor);
        self
    }
}
