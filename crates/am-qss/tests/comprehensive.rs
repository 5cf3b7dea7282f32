//! Comprehensive tests for am-qss
//!
//! Parsing edge cases, cascade behavior and serialization.

use am_qss::{
    parse_stylesheet, Color, Keyword, Length, PropertyId, PropertyValue, QssParser, StyleResolver,
    SubControl, WidgetInfo, WidgetSnapshot,
};

const BUTTON_THEME: &str = r#"
    QPushButton {
        background-color: #1db954;
        border-radius: 16px;
        color: white;
        padding: 8px 16px;
        font-weight: bold;
    }

    QPushButton:hover {
        background-color: #1ed760;
    }

    QPushButton:pressed {
        background-color: #1aa34a;
    }

    QPushButton:disabled {
        background-color: #3e3e3e;
    }
"#;

fn button(hover: bool, pressed: bool, disabled: bool) -> WidgetSnapshot {
    let mut info = WidgetInfo::new("QPushButton");
    info.states.hover = hover;
    info.states.pressed = pressed;
    info.states.disabled = disabled;
    WidgetSnapshot::of(info)
}

fn bg(resolver: &StyleResolver, snapshot: &WidgetSnapshot) -> Color {
    match resolver.resolve(snapshot).get(PropertyId::BackgroundColor) {
        Some(PropertyValue::Color(c)) => *c,
        other => panic!("expected background color, got {other:?}"),
    }
}

#[test]
fn test_hover_lightens_button() {
    let resolver = StyleResolver::with_sheet(parse_stylesheet(BUTTON_THEME).unwrap());

    let base = bg(&resolver, &button(false, false, false));
    let hover = bg(&resolver, &button(true, false, false));

    assert_eq!(base, Color::rgb(0x1d, 0xb9, 0x54));
    assert_eq!(hover, Color::rgb(0x1e, 0xd7, 0x60));
    // The hover green is strictly lighter than the base green.
    assert!(hover.g > base.g && hover.b > base.b);
}

#[test]
fn test_disabled_hover_conflict_pinned_by_order() {
    // :hover and :disabled have equal specificity; the sheet declares
    // :disabled last, so a disabled-but-hovered button stays grey.
    let resolver = StyleResolver::with_sheet(parse_stylesheet(BUTTON_THEME).unwrap());
    let conflicted = bg(&resolver, &button(true, false, true));
    assert_eq!(conflicted, Color::rgb(0x3e, 0x3e, 0x3e));
}

#[test]
fn test_pressed_state() {
    let resolver = StyleResolver::with_sheet(parse_stylesheet(BUTTON_THEME).unwrap());
    assert_eq!(
        bg(&resolver, &button(false, true, false)),
        Color::rgb(0x1a, 0xa3, 0x4a)
    );
}

#[test]
fn test_unmatched_state_keeps_base_properties() {
    // State rules only override what they declare; padding stays.
    let resolver = StyleResolver::with_sheet(parse_stylesheet(BUTTON_THEME).unwrap());
    let style = resolver.resolve(&button(true, false, false));
    assert_eq!(
        style.get(PropertyId::Padding),
        Some(&PropertyValue::List(vec![
            PropertyValue::Length(Length::px(8.0)),
            PropertyValue::Length(Length::px(16.0)),
        ]))
    );
    assert_eq!(
        style.get(PropertyId::FontWeight),
        Some(&PropertyValue::Keyword(Keyword::Bold))
    );
}

#[test]
fn test_slider_handle_hover_widens() {
    let qss = r#"
        QSlider::handle:horizontal {
            background: #1db954;
            width: 16px;
            margin: -5px 0;
        }
        QSlider::handle:horizontal:hover {
            background: #1ed760;
            width: 18px;
            margin: -6px 0;
        }
    "#;
    let resolver = StyleResolver::with_sheet(parse_stylesheet(qss).unwrap());

    let handle = WidgetSnapshot::of(WidgetInfo::new("QSlider").horizontal())
        .with_sub_control(SubControl::Handle);
    let style = resolver.resolve(&handle);
    assert_eq!(
        style.get(PropertyId::Width),
        Some(&PropertyValue::Length(Length::px(16.0)))
    );

    let hovered = WidgetSnapshot::of(WidgetInfo::new("QSlider").horizontal().hovered())
        .with_sub_control(SubControl::Handle);
    let style = resolver.resolve(&hovered);
    assert_eq!(
        style.get(PropertyId::Width),
        Some(&PropertyValue::Length(Length::px(18.0)))
    );
    assert_eq!(
        style.get(PropertyId::Margin),
        Some(&PropertyValue::List(vec![
            PropertyValue::Length(Length::px(-6.0)),
            PropertyValue::Length(Length::px(0.0)),
        ]))
    );

    // The slider body itself picks up no handle styling.
    let body = WidgetSnapshot::of(WidgetInfo::new("QSlider").horizontal());
    assert!(resolver.resolve(&body).is_empty());
}

#[test]
fn test_tab_hover_only_when_unselected() {
    let qss = r#"
        QTabBar::tab { background-color: #282828; }
        QTabBar::tab:selected { background-color: #333333; }
        QTabBar::tab:hover:!selected { background-color: #3a3a3a; }
    "#;
    let resolver = StyleResolver::with_sheet(parse_stylesheet(qss).unwrap());

    let tab = |hover: bool, selected: bool| {
        let mut info = WidgetInfo::new("QTabBar");
        info.states.hover = hover;
        info.states.selected = selected;
        WidgetSnapshot::of(info).with_sub_control(SubControl::Tab)
    };

    assert_eq!(bg(&resolver, &tab(false, false)), Color::rgb(0x28, 0x28, 0x28));
    assert_eq!(bg(&resolver, &tab(true, false)), Color::rgb(0x3a, 0x3a, 0x3a));
    // Hovering a selected tab must not trigger the :!selected rule.
    assert_eq!(bg(&resolver, &tab(true, true)), Color::rgb(0x33, 0x33, 0x33));
}

#[test]
fn test_descendant_and_child_combinators() {
    let qss = r#"
        QMainWindow QLabel { color: #b3b3b3; }
        QGroupBox > QLabel { color: #1db954; }
    "#;
    let resolver = StyleResolver::with_sheet(parse_stylesheet(qss).unwrap());

    let direct_child = WidgetSnapshot::of(WidgetInfo::new("QLabel"))
        .inside(WidgetInfo::new("QGroupBox"))
        .inside(WidgetInfo::new("QMainWindow"));
    // Both rules match at equal specificity; the later rule wins.
    assert_eq!(
        resolver.resolve(&direct_child).get(PropertyId::Color),
        Some(&PropertyValue::Color(Color::rgb(0x1d, 0xb9, 0x54)))
    );

    let grandchild = WidgetSnapshot::of(WidgetInfo::new("QLabel"))
        .inside(WidgetInfo::new("QFrame"))
        .inside(WidgetInfo::new("QMainWindow"));
    assert_eq!(
        resolver.resolve(&grandchild).get(PropertyId::Color),
        Some(&PropertyValue::Color(Color::rgb(0xb3, 0xb3, 0xb3)))
    );

    let orphan = WidgetSnapshot::of(WidgetInfo::new("QLabel"));
    assert!(resolver.resolve(&orphan).is_empty());
}

#[test]
fn test_class_selector() {
    let qss = ".muted { color: #b3b3b3; }";
    let resolver = StyleResolver::with_sheet(parse_stylesheet(qss).unwrap());

    let plain = WidgetSnapshot::of(WidgetInfo::new("QLabel"));
    assert!(resolver.resolve(&plain).is_empty());

    let muted = WidgetSnapshot::of(WidgetInfo::new("QLabel").with_class("muted"));
    assert_eq!(
        resolver.resolve(&muted).get(PropertyId::Color),
        Some(&PropertyValue::Color(Color::rgb(0xb3, 0xb3, 0xb3)))
    );
}

#[test]
fn test_gradient_background() {
    let qss = r#"
        QMainWindow {
            background: qlineargradient(
                x1:0, y1:0, x2:0, y2:1,
                stop:0 #191414,
                stop:1 #121212
            );
        }
    "#;
    let resolver = StyleResolver::with_sheet(parse_stylesheet(qss).unwrap());
    let style = resolver.resolve(&WidgetSnapshot::of(WidgetInfo::new("QMainWindow")));
    let Some(PropertyValue::Gradient(grad)) = style.get(PropertyId::Background) else {
        panic!("expected gradient background");
    };
    assert_eq!(grad.stops.len(), 2);
    assert_eq!(grad.stops[1].color, Color::rgb(0x12, 0x12, 0x12));
}

#[test]
fn test_broken_rule_does_not_disturb_neighbors() {
    let qss = r#"
        QPushButton { background-color: #1db954; }
        QSlider::bogus { background: red; }
        QLabel { unknown-thing: 3; color: white; }
        QMenu { background-color: #282828; }
    "#;
    let sheet = parse_stylesheet(qss).unwrap();
    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet.diagnostics.len(), 2);

    let resolver = StyleResolver::with_sheet(sheet);
    assert_eq!(
        resolver
            .resolve(&WidgetSnapshot::of(WidgetInfo::new("QMenu")))
            .get(PropertyId::BackgroundColor),
        Some(&PropertyValue::Color(Color::rgb(0x28, 0x28, 0x28)))
    );
}

#[test]
fn test_serialization_roundtrip() {
    let qss = r#"
        QMainWindow {
            background: qlineargradient(x1:0, y1:0, x2:0, y2:1, stop:0 #191414, stop:1 #121212);
            color: #ffffff;
        }
        QPushButton#playButton:hover { background-color: #1ed760; }
        QSlider::handle:horizontal { margin: -5px 0; border: 1px solid #1db954; }
        QListWidget, QTreeWidget { alternate-background-color: #1e1e1e; }
        QToolTip { color: white; image: url(icons/hint.png); }
    "#;
    let sheet = QssParser::new().parse(qss).unwrap();
    assert!(sheet.diagnostics.is_empty());

    let reparsed = QssParser::new().parse(&sheet.to_qss()).unwrap();
    assert!(reparsed.diagnostics.is_empty());
    assert_eq!(sheet.rules, reparsed.rules);
}

#[test]
fn test_resolved_style_display() {
    let qss = "QToolTip { background-color: #282828; border: 1px solid #1db954; }";
    let resolver = StyleResolver::with_sheet(parse_stylesheet(qss).unwrap());
    let style = resolver.resolve(&WidgetSnapshot::of(WidgetInfo::new("QToolTip")));
    let text = style.to_string();
    assert!(text.contains("background-color: #282828;"));
    assert!(text.contains("border: 1px solid #1db954;"));
}

#[test]
fn test_parse_large_stylesheet() {
    let mut qss = String::new();
    for i in 0..500 {
        qss.push_str(&format!(
            "QWidget#w{} {{ color: #{:06x}; margin: {}px; }}\n",
            i,
            i * 100,
            i
        ));
    }
    let sheet = parse_stylesheet(&qss).unwrap();
    assert_eq!(sheet.len(), 500);
    assert!(sheet.diagnostics.is_empty());
}
