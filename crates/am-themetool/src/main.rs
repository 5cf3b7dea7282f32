//! AudioMine Theme Inspector - Main Entry Point
//!
//! Usage: `am-themetool [theme.qss] <query>`
//!
//! The query is selector-shaped and describes one widget, e.g.
//! `QPushButton#playButton:hover` or `QMainWindow QSlider::handle:horizontal`.
//! Segments left of the last one become the widget's ancestor chain.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use am_qss::{Selector, StyleResolver, WidgetInfo, WidgetSnapshot};
use am_theme::Theme;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (theme, query) = match args.as_slice() {
        [query] => (Theme::dark(), query.as_str()),
        [file, query] => {
            let path = Path::new(file);
            let theme = Theme::try_load(path)
                .with_context(|| format!("cannot load theme {}", path.display()))?;
            (theme, query.as_str())
        }
        _ => bail!("usage: am-themetool [theme.qss] <query>"),
    };

    for diag in &theme.stylesheet.diagnostics {
        eprintln!("warning: {diag}");
    }
    tracing::info!(
        theme = %theme.name,
        rules = theme.stylesheet.len(),
        "theme loaded"
    );

    let snapshot = snapshot_from_query(query)?;
    let resolver = StyleResolver::with_sheet(theme.stylesheet);
    let style = resolver.resolve(&snapshot);

    if style.is_empty() {
        println!("/* no matching rules; toolkit defaults apply */");
    } else {
        print!("{style}");
    }
    Ok(())
}

/// Build a widget snapshot from a selector-shaped query.
///
/// States in the query are taken as active. Negated states are
/// rejected: a concrete widget either has a state or it does not.
fn snapshot_from_query(query: &str) -> Result<WidgetSnapshot> {
    let selector = Selector::parse(query).context("invalid query")?;
    if selector
        .compounds
        .iter()
        .flat_map(|c| &c.states)
        .any(|term| term.negated)
    {
        bail!("negated states make no sense in a query: a widget either has the state or not");
    }

    let mut infos = Vec::new();
    for compound in &selector.compounds {
        let Some(type_name) = &compound.type_name else {
            bail!("each query segment needs a widget type name");
        };
        let mut info = WidgetInfo::new(type_name.clone());
        info.object_name = compound.object_name.clone();
        info.classes = compound.classes.clone();
        for term in &compound.states {
            let states = &mut info.states;
            match term.state {
                am_qss::PseudoState::Hover => states.hover = true,
                am_qss::PseudoState::Pressed => states.pressed = true,
                am_qss::PseudoState::Disabled => states.disabled = true,
                am_qss::PseudoState::Enabled => states.disabled = false,
                am_qss::PseudoState::Selected => states.selected = true,
                am_qss::PseudoState::Checked => states.checked = true,
                am_qss::PseudoState::Unchecked => states.checked = false,
                am_qss::PseudoState::Focus => states.focused = true,
                am_qss::PseudoState::On => states.on = true,
                am_qss::PseudoState::Off => states.on = false,
                am_qss::PseudoState::Horizontal => states.horizontal = true,
                am_qss::PseudoState::Vertical => states.vertical = true,
            }
        }
        infos.push(info);
    }

    let subject = infos.pop().context("empty query")?;
    let mut snapshot = WidgetSnapshot::of(subject);
    if let Some(sub_control) = selector.compounds.last().and_then(|c| c.sub_control) {
        snapshot = snapshot.with_sub_control(sub_control);
    }
    // Query reads outermost-first; ancestors store nearest-first.
    for ancestor in infos.into_iter().rev() {
        snapshot = snapshot.inside(ancestor);
    }
    Ok(snapshot)
}
