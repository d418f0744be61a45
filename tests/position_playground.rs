//! Positioning playground: classes, offsets, themed snippets.

use css_playground::controls::EventKind;
use css_playground::dom::{Document, SnippetSlot, Surface, Target};
use css_playground::theme::{Appearance, ColorScheme, ThemeSet};
use css_playground::{PositionController, PlaygroundConfig};
use pretty_assertions::assert_eq;

fn controller(scheme: ColorScheme) -> PositionController {
    PositionController::new(
        PlaygroundConfig::default().position,
        ThemeSet::default(),
        Appearance::new(scheme),
    )
}

fn rendered(position: &PositionController) -> Document {
    let mut doc = Document::new();
    doc.apply_all(&position.render());
    doc
}

#[test]
fn test_initial_page() {
    let position = controller(ColorScheme::Light);
    let doc = rendered(&position);

    assert!(!doc.element(&Target::Parent).has_class("relative"));
    let child = doc.element(&Target::Child);
    assert_eq!(child.class_name(), "positioned-item static");
    assert_eq!(child.style.get("position"), "static");
    assert_eq!(child.style.get("top"), "auto");
    assert!(!doc.element(&Target::Control("parent-position".into())).checked);
    assert_eq!(position.child_snippet().to_text().lines().count(), 9);
}

#[test]
fn test_parent_checkbox_toggles_relative_class() {
    let mut position = controller(ColorScheme::Light);
    let mut doc = rendered(&position);

    position
        .handle_control_event("parent-position", EventKind::Change, true.into())
        .unwrap();
    doc.apply_all(&position.render());
    assert!(doc.element(&Target::Parent).has_class("relative"));
    assert_eq!(position.parent_snippet().value_of("position"), Some("relative"));

    position
        .handle_control_event("parent-position", EventKind::Change, false.into())
        .unwrap();
    doc.apply_all(&position.render());
    assert!(!doc.element(&Target::Parent).has_class("relative"));
    assert_eq!(position.parent_snippet().value_of("position"), Some("static"));
}

#[test]
fn test_mode_class_is_replaced_not_accumulated() {
    let mut position = controller(ColorScheme::Light);
    position.handle_control_event("position", EventKind::Change, "absolute".into()).unwrap();
    position.handle_control_event("position", EventKind::Change, "fixed".into()).unwrap();

    let doc = rendered(&position);
    assert_eq!(doc.element(&Target::Child).class_name(), "positioned-item fixed");
    assert_eq!(doc.element(&Target::Child).style.get("position"), "fixed");
}

#[test]
fn test_empty_offset_falls_back_to_auto() {
    let mut position = controller(ColorScheme::Light);
    position.handle_control_event("left", EventKind::Input, "20px".into()).unwrap();
    position.handle_control_event("top", EventKind::Input, "".into()).unwrap();

    let doc = rendered(&position);
    let child = doc.element(&Target::Child);
    assert_eq!(child.style.get("left"), "20px");
    assert_eq!(child.style.get("top"), "auto");
    assert_eq!(position.child_snippet().value_of("top"), Some("auto"));
    assert_eq!(doc.element(&Target::Control("top".into())).value, "");
}

#[test]
fn test_snippet_colors_follow_scheme() {
    let themes = ThemeSet::default();
    let mut position = controller(ColorScheme::Light);
    let light_value = themes.get(ColorScheme::Light).code_colors().value;
    let dark_value = themes.get(ColorScheme::Dark).code_colors().value;
    assert!(rendered(&position)
        .element(&Target::Snippet(SnippetSlot::Child))
        .markup
        .contains(&format!("color: {light_value}")));

    position.color_scheme_changed(ColorScheme::Dark);
    let markup = rendered(&position).element(&Target::Snippet(SnippetSlot::Child)).markup.clone();
    assert!(markup.contains(&format!("color: {dark_value}")));
}

#[test]
fn test_shared_appearance_sync() {
    let appearance = Appearance::new(ColorScheme::Light);
    let mut position = PositionController::new(
        PlaygroundConfig::default().position,
        ThemeSet::default(),
        appearance.clone(),
    );
    assert!(!position.sync_color_scheme());

    appearance.set_scheme(ColorScheme::Dark);
    assert!(position.sync_color_scheme());
    assert!(!position.sync_color_scheme());
    assert_eq!(position.theme().scheme, ColorScheme::Dark);
}

#[test]
fn test_reset_all_is_idempotent() {
    let mut position = controller(ColorScheme::Dark);
    position.handle_control_event("parent-position", EventKind::Change, true.into()).unwrap();
    position.handle_control_event("position", EventKind::Change, "sticky".into()).unwrap();
    position.handle_control_event("bottom", EventKind::Input, "5px".into()).unwrap();

    position.reset_all();
    let once = position.render();
    position.reset_all();
    assert_eq!(position.render(), once);

    let doc = rendered(&position);
    assert!(!doc.element(&Target::Parent).has_class("relative"));
    assert_eq!(doc.element(&Target::Child).class_name(), "positioned-item static");
    assert_eq!(doc.element(&Target::Control("bottom".into())).value, "auto");
}
