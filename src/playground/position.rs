//! Positioning playground controller.
//!
//! One parent, one child. The parent is either `static` or `relative` (a
//! checkbox); the child takes a position mode and four offsets. Snippet colors
//! come from the active theme, so a system color scheme change regenerates
//! them.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::config::PositionDefaults;
use crate::controls::{Control, ControlGroup, ControlInput, ControlPanel, EventKind};
use crate::dom::{InlineStyle, Patch, SnippetSlot, Target};
use crate::error::Result;
use crate::snippet::Snippet;
use crate::theme::{Appearance, ColorScheme, Theme, ThemeSet};
use crate::types::PositionMode;

/// Class the parent carries while it is a containing block.
pub const RELATIVE_CLASS: &str = "relative";
/// Base class of the child; the position mode is added next to it.
pub const CHILD_CLASS: &str = "positioned-item";

/// Offset properties, in snippet order.
pub const OFFSETS: [&str; 4] = ["top", "left", "bottom", "right"];

const PARENT_POSITION: &str = "parent-position";

// =============================================================================
// PositionStyles
// =============================================================================

/// Snapshot of every control, keyed the way the style map normalizes ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionStyles {
    pub parent_position: bool,
    pub position: String,
    pub top: String,
    pub left: String,
    pub bottom: String,
    pub right: String,
}

impl PositionStyles {
    /// Build from a flat `id -> value` map. Ids are normalized (`-` to `_`).
    pub fn from_map(map: &BTreeMap<String, String>, parent_position: bool) -> Self {
        let take = |key: &str| map.get(key).cloned().unwrap_or_default();
        Self {
            parent_position,
            position: take("position"),
            top: take("top"),
            left: take("left"),
            bottom: take("bottom"),
            right: take("right"),
        }
    }

    /// Mode the parent snippet shows.
    pub fn parent_mode(&self) -> &'static str {
        if self.parent_position { "relative" } else { "static" }
    }

    /// Offset value by property name, `auto` when empty.
    pub fn offset(&self, property: &str) -> &str {
        let value = match property {
            "top" => &self.top,
            "left" => &self.left,
            "bottom" => &self.bottom,
            "right" => &self.right,
            _ => return "auto",
        };
        if value.is_empty() { "auto" } else { value.as_str() }
    }
}

// =============================================================================
// PositionController
// =============================================================================

/// State and operations of the positioning playground.
#[derive(Debug, Clone)]
pub struct PositionController {
    defaults: PositionDefaults,
    controls: ControlPanel,
    parent_relative: bool,
    child_classes: Vec<String>,
    child_style: InlineStyle,
    parent_snippet: Snippet,
    child_snippet: Snippet,
    themes: ThemeSet,
    appearance: Appearance,
    /// Scheme the current snippets were colored with.
    rendered_scheme: ColorScheme,
}

impl PositionController {
    /// Build the page and run the initial reset.
    pub fn new(defaults: PositionDefaults, themes: ThemeSet, appearance: Appearance) -> Self {
        let controls = position_panel(&defaults);
        let rendered_scheme = appearance.scheme();
        let mut controller = Self {
            defaults,
            controls,
            parent_relative: false,
            child_classes: vec![CHILD_CLASS.to_string()],
            child_style: InlineStyle::new(),
            parent_snippet: Snippet::default(),
            child_snippet: Snippet::default(),
            themes,
            appearance,
            rendered_scheme,
        };
        controller.reset_all();
        controller
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    pub fn parent_relative(&self) -> bool {
        self.parent_relative
    }

    pub fn child_classes(&self) -> &[String] {
        &self.child_classes
    }

    pub fn child_class_name(&self) -> String {
        self.child_classes.join(" ")
    }

    pub fn child_style(&self) -> &InlineStyle {
        &self.child_style
    }

    /// Child position mode as a keyword, static for unknown values.
    pub fn position_mode(&self) -> PositionMode {
        PositionMode::from_css(self.child_style.get("position")).unwrap_or_default()
    }

    pub fn parent_snippet(&self) -> &Snippet {
        &self.parent_snippet
    }

    pub fn child_snippet(&self) -> &Snippet {
        &self.child_snippet
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Theme matching the current system scheme.
    pub fn theme(&self) -> &Theme {
        self.themes.get(self.appearance.scheme())
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Read every control into a [`PositionStyles`].
    pub fn styles(&self) -> PositionStyles {
        let map: BTreeMap<String, String> = self
            .controls
            .iter()
            .filter(|c| !c.is_checkbox())
            .map(|c| (c.id.replace('-', "_"), c.value.clone()))
            .collect();
        PositionStyles::from_map(&map, self.controls.checked(PARENT_POSITION))
    }

    /// Push the control state onto the parent and child, then regenerate snippets.
    pub fn apply_styles(&mut self) {
        let styles = self.styles();

        self.parent_relative = styles.parent_position;

        self.child_classes = vec![CHILD_CLASS.to_string()];
        if !styles.position.is_empty() && !self.child_classes.contains(&styles.position) {
            self.child_classes.push(styles.position.clone());
        }

        self.child_style.set("position", &styles.position);
        for property in OFFSETS {
            self.child_style.set(property, styles.offset(property));
        }

        debug!(
            "position styles applied: parent {}, child {}",
            styles.parent_mode(),
            self.child_style.css_text()
        );
        self.update_code_snippets(&styles);
    }

    /// Regenerate both snippets with the active theme's code colors.
    pub fn update_code_snippets(&mut self, styles: &PositionStyles) {
        let scheme = self.appearance.scheme();
        let colors = self.themes.get(scheme).code_colors();

        self.parent_snippet = Snippet::new("Parent Styles", ".parent")
            .declare("position", styles.parent_mode())
            .with_colors(colors.clone());

        let mut child = Snippet::new("Child Styles", ".child").declare("position", styles.position.as_str());
        for property in OFFSETS {
            child = child.declare(property, styles.offset(property));
        }
        self.child_snippet = child.with_colors(colors);

        self.rendered_scheme = scheme;
        trace!("position snippets regenerated for {} scheme", scheme.as_str());
    }

    /// Restore every control to its default, then apply.
    pub fn reset_all(&mut self) {
        self.controls.set_checked(PARENT_POSITION, self.defaults.parent_position);
        self.controls.set_value("position", &self.defaults.position);
        self.controls.set_value("top", &self.defaults.top);
        self.controls.set_value("left", &self.defaults.left);
        self.controls.set_value("bottom", &self.defaults.bottom);
        self.controls.set_value("right", &self.defaults.right);
        debug!("position playground reset");
        self.apply_styles();
    }

    // =========================================================================
    // Color scheme
    // =========================================================================

    /// The system color scheme changed.
    pub fn color_scheme_changed(&mut self, scheme: ColorScheme) {
        self.appearance.set_scheme(scheme);
        self.apply_styles();
    }

    /// Catch up with a scheme change made through a shared [`Appearance`].
    ///
    /// Returns whether styles were re-applied.
    pub fn sync_color_scheme(&mut self) -> bool {
        if self.appearance.scheme() == self.rendered_scheme {
            return false;
        }
        self.apply_styles();
        true
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn handle_control_event(&mut self, id: &str, event: EventKind, input: ControlInput) -> Result<()> {
        if self.controls.dispatch(id, event, input)? {
            self.apply_styles();
        }
        Ok(())
    }

    // =========================================================================
    // Render
    // =========================================================================

    pub fn render(&self) -> Vec<Patch> {
        let mut patches = Vec::new();

        patches.push(if self.parent_relative {
            Patch::AddClass {
                target: Target::Parent,
                class: RELATIVE_CLASS.to_string(),
            }
        } else {
            Patch::RemoveClass {
                target: Target::Parent,
                class: RELATIVE_CLASS.to_string(),
            }
        });

        patches.push(Patch::SetClassName {
            target: Target::Child,
            class_name: self.child_class_name(),
        });
        for property in ["position"].into_iter().chain(OFFSETS) {
            patches.push(Patch::style(Target::Child, property, self.child_style.get(property)));
        }

        for control in self.controls.iter() {
            let target = Target::Control(control.id.clone());
            patches.push(if control.is_checkbox() {
                Patch::SetChecked {
                    target,
                    checked: control.checked,
                }
            } else {
                Patch::SetValue {
                    target,
                    value: control.value.clone(),
                }
            });
        }

        patches.push(Patch::SetMarkup {
            target: Target::Snippet(SnippetSlot::Parent),
            markup: self.parent_snippet.to_markup(),
        });
        patches.push(Patch::SetMarkup {
            target: Target::Snippet(SnippetSlot::Child),
            markup: self.child_snippet.to_markup(),
        });
        patches
    }
}

fn position_panel(defaults: &PositionDefaults) -> ControlPanel {
    ControlPanel::new(
        ControlGroup::Position,
        vec![
            Control::checkbox(PARENT_POSITION, "Parent position: relative", defaults.parent_position),
            Control::select("position", "Position", PositionMode::options(), &defaults.position),
            Control::text("top", "Top", &defaults.top),
            Control::text("left", "Left", &defaults.left),
            Control::text("bottom", "Bottom", &defaults.bottom),
            Control::text("right", "Right", &defaults.right),
        ],
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{CODE_COMMENT, CODE_VALUE};

    fn controller(scheme: ColorScheme) -> PositionController {
        PositionController::new(PositionDefaults::default(), ThemeSet::default(), Appearance::new(scheme))
    }

    #[test]
    fn test_initial_state() {
        let pos = controller(ColorScheme::Dark);
        assert!(!pos.parent_relative());
        assert_eq!(pos.child_class_name(), "positioned-item static");
        assert_eq!(pos.child_style().get("position"), "static");
        assert_eq!(pos.child_style().get("top"), "auto");
        assert_eq!(pos.parent_snippet().value_of("position"), Some("static"));
        assert_eq!(pos.position_mode(), PositionMode::Static);
    }

    #[test]
    fn test_absolute_child_in_relative_parent() {
        let mut pos = controller(ColorScheme::Dark);
        pos.handle_control_event("parent-position", EventKind::Change, true.into())
            .unwrap();
        pos.handle_control_event("position", EventKind::Change, "absolute".into())
            .unwrap();
        pos.handle_control_event("top", EventKind::Input, "10px".into()).unwrap();

        assert!(pos.parent_relative());
        assert_eq!(pos.child_class_name(), "positioned-item absolute");
        assert_eq!(pos.child_style().get("top"), "10px");
        assert_eq!(pos.child_style().get("left"), "auto");

        let text = pos.child_snippet().to_text();
        assert!(text.contains("position: absolute;"));
        assert!(text.contains("top: 10px;"));
        assert_eq!(pos.parent_snippet().value_of("position"), Some("relative"));
    }

    #[test]
    fn test_select_needs_change_event() {
        let mut pos = controller(ColorScheme::Dark);
        pos.handle_control_event("position", EventKind::Input, "fixed".into())
            .unwrap();
        assert_eq!(pos.child_style().get("position"), "static");
    }

    #[test]
    fn test_empty_offset_falls_back_to_auto() {
        let mut pos = controller(ColorScheme::Dark);
        pos.handle_control_event("right", EventKind::Input, "".into()).unwrap();
        assert_eq!(pos.child_style().get("right"), "auto");
        assert_eq!(pos.child_snippet().value_of("right"), Some("auto"));
    }

    #[test]
    fn test_offsets_pass_through_verbatim() {
        let mut pos = controller(ColorScheme::Dark);
        pos.handle_control_event("bottom", EventKind::Input, "not a length".into())
            .unwrap();
        assert_eq!(pos.child_style().get("bottom"), "not a length");
    }

    #[test]
    fn test_reset_all() {
        let mut pos = controller(ColorScheme::Light);
        pos.handle_control_event("parent-position", EventKind::Change, true.into())
            .unwrap();
        pos.handle_control_event("position", EventKind::Change, "sticky".into())
            .unwrap();
        pos.handle_control_event("left", EventKind::Input, "5%".into()).unwrap();

        pos.reset_all();
        assert!(!pos.parent_relative());
        assert!(!pos.controls().checked("parent-position"));
        assert_eq!(pos.child_class_name(), "positioned-item static");
        assert_eq!(pos.controls().value("left"), "auto");
        assert_eq!(pos.child_style().get("left"), "auto");
    }

    #[test]
    fn test_snippet_colors_follow_scheme() {
        let mut pos = controller(ColorScheme::Light);
        let light = Theme::for_scheme(ColorScheme::Light);
        let colors = pos.child_snippet().colors().unwrap().clone();
        assert_eq!(colors.comment, light.property_value(CODE_COMMENT));

        pos.color_scheme_changed(ColorScheme::Dark);
        let dark = Theme::for_scheme(ColorScheme::Dark);
        assert_eq!(
            pos.parent_snippet().colors().unwrap().value,
            dark.property_value(CODE_VALUE)
        );
        assert!(pos.parent_snippet().to_markup().contains(&dark.property_value(CODE_VALUE)));
    }

    #[test]
    fn test_sync_with_shared_appearance() {
        let appearance = Appearance::new(ColorScheme::Dark);
        let mut pos = PositionController::new(PositionDefaults::default(), ThemeSet::default(), appearance.clone());
        assert!(!pos.sync_color_scheme());

        appearance.set_scheme(ColorScheme::Light);
        assert!(pos.sync_color_scheme());
        assert_eq!(pos.theme().scheme, ColorScheme::Light);
        assert!(!pos.sync_color_scheme());
    }

    #[test]
    fn test_styles_from_map_normalizes() {
        let mut map = BTreeMap::new();
        map.insert("position".to_string(), "fixed".to_string());
        map.insert("top".to_string(), "".to_string());
        let styles = PositionStyles::from_map(&map, true);
        assert_eq!(styles.parent_mode(), "relative");
        assert_eq!(styles.offset("top"), "auto");
        assert_eq!(styles.offset("left"), "auto");
        assert_eq!(styles.position, "fixed");
    }
}
