//! Flexbox playground controller.
//!
//! Owns the container's inline style, the ordered item collection, the
//! single-item selection and the two snippet blocks. Container controls write
//! to the container; item controls write to whichever item is selected.
//!
//! Item ids come from a counter that only ever grows, so removing an item and
//! adding one back yields a fresh id.

use log::{debug, trace, warn};

use crate::config::{FlexConfig, ItemDefaults, MAX_INITIAL_ITEMS};
use crate::controls::{Control, ControlGroup, ControlInput, ControlPanel, EventKind};
use crate::dom::{InlineStyle, Patch, SnippetSlot, Target};
use crate::error::Result;
use crate::snippet::Snippet;
use crate::types::{AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent};

use super::solution::Solutions;

/// Container control ids, in snippet order. Each id is also the CSS property it drives.
pub const CONTAINER_PROPERTIES: [&str; 6] = [
    "flex-direction",
    "justify-content",
    "align-items",
    "flex-wrap",
    "align-content",
    "gap",
];

/// Item control ids, in snippet order. Each id is also the CSS property it drives.
pub const ITEM_PROPERTIES: [&str; 5] = ["order", "flex-grow", "flex-shrink", "flex-basis", "align-self"];

/// Marker class of the selected item.
pub const SELECTED_CLASS: &str = "selected";
/// Class every item carries.
pub const ITEM_CLASS: &str = "flex-item";
pub const NO_ITEM_SELECTED: &str = "No item selected";

// =============================================================================
// Types
// =============================================================================

/// Where a click inside the container landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Item(u32),
    /// The container itself, between or around items.
    Background,
}

/// One flex item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexItem {
    id: u32,
    style: InlineStyle,
}

impl FlexItem {
    fn new(id: u32) -> Self {
        Self {
            id,
            style: InlineStyle::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// The item's text content.
    pub fn label(&self) -> String {
        self.id.to_string()
    }

    pub fn style(&self) -> &InlineStyle {
        &self.style
    }
}

// =============================================================================
// FlexController
// =============================================================================

/// State and operations of the flexbox playground.
#[derive(Debug, Clone)]
pub struct FlexController {
    config: FlexConfig,
    container_controls: ControlPanel,
    item_controls: ControlPanel,
    container_style: InlineStyle,
    items: Vec<FlexItem>,
    item_counter: u32,
    selected: Option<u32>,
    selected_label: String,
    container_snippet: Snippet,
    item_snippet: Option<Snippet>,
    solutions: Solutions,
}

impl Default for FlexController {
    fn default() -> Self {
        Self::new(FlexConfig::default())
    }
}

impl FlexController {
    /// Build the page and run the initial reset.
    pub fn new(config: FlexConfig) -> Self {
        let container_controls = container_panel(&config);
        let item_controls = item_panel(&config.item);
        let initial = config.initial_item_count.min(MAX_INITIAL_ITEMS);
        let items = (1..=initial).map(FlexItem::new).collect();
        let solutions = Solutions::new(&config.challenges);

        let mut controller = Self {
            item_counter: initial,
            config,
            container_controls,
            item_controls,
            container_style: InlineStyle::new(),
            items,
            selected: None,
            selected_label: NO_ITEM_SELECTED.to_string(),
            container_snippet: Snippet::default(),
            item_snippet: None,
            solutions,
        };
        controller.reset_playground();
        controller
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn container_controls(&self) -> &ControlPanel {
        &self.container_controls
    }

    pub fn item_controls(&self) -> &ControlPanel {
        &self.item_controls
    }

    pub fn container_style(&self) -> &InlineStyle {
        &self.container_style
    }

    pub fn items(&self) -> &[FlexItem] {
        &self.items
    }

    pub fn item(&self, id: u32) -> Option<&FlexItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_ids(&self) -> Vec<u32> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Number of items currently in the container.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Highest id handed out so far.
    pub fn item_counter(&self) -> u32 {
        self.item_counter
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        &self.selected_label
    }

    pub fn container_snippet(&self) -> &Snippet {
        &self.container_snippet
    }

    /// The item snippet, `None` while it is hidden.
    pub fn item_snippet(&self) -> Option<&Snippet> {
        self.item_snippet.as_ref()
    }

    pub fn solutions(&self) -> &Solutions {
        &self.solutions
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Copy every container control onto the container's inline style.
    pub fn apply_container_styles(&mut self) {
        for property in CONTAINER_PROPERTIES {
            let value = self.container_controls.value(property);
            let value = if property == "gap" {
                format!("{value}px")
            } else {
                value.to_string()
            };
            self.container_style.set(property, &value);
        }
        debug!("container styles applied: {}", self.container_style.css_text());
        self.update_code_snippets();
    }

    /// Copy every item control onto the selected item. No-op without a selection.
    pub fn apply_item_styles(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return;
        };
        for property in ITEM_PROPERTIES {
            item.style.set(property, self.item_controls.value(property));
        }
        debug!("item {id} styles applied: {}", item.style.css_text());
        self.update_code_snippets();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Handle a click inside the container.
    ///
    /// Background clicks deselect, clicking the selected item toggles it off,
    /// clicking another item moves the selection and loads its styles into the
    /// item controls.
    pub fn select_item(&mut self, target: ClickTarget) {
        let id = match target {
            ClickTarget::Item(id) if self.item(id).is_some() => id,
            _ => {
                self.deselect_all_items(true);
                return;
            }
        };

        if self.selected == Some(id) {
            self.deselect_all_items(true);
            return;
        }

        // Keep the controls as they are; they are overwritten just below.
        self.deselect_all_items(false);

        self.selected = Some(id);
        self.selected_label = format!("Editing Item {id}");

        let fallbacks = ItemDefaults::default();
        if let Some(item) = self.items.iter().find(|item| item.id == id) {
            for property in ITEM_PROPERTIES {
                let fallback = fallbacks.get(property).unwrap_or_default();
                let value = item.style.get_or(property, fallback);
                self.item_controls.set_value(property, value);
            }
        }

        self.item_controls.set_all_disabled(false);
        debug!("selected item {id}");
        self.update_code_snippets();
    }

    /// Clear the selection and disable the item controls.
    ///
    /// With `clear_controls` the item controls are also reset to their defaults
    /// and the snippets regenerated. Without it nothing else changes, which lets
    /// a new selection fill the controls without showing defaults in between.
    pub fn deselect_all_items(&mut self, clear_controls: bool) {
        if let Some(id) = self.selected.take() {
            debug!("deselected item {id}");
        }
        self.selected_label = NO_ITEM_SELECTED.to_string();
        self.item_controls.set_all_disabled(true);

        if clear_controls {
            for property in ITEM_PROPERTIES {
                let default = self.config.item.get(property).unwrap_or_default().to_string();
                self.item_controls.set_value(property, &default);
            }
            self.update_code_snippets();
        }
    }

    // =========================================================================
    // Item collection
    // =========================================================================

    /// Append a new item with the next id. Returns that id, or `None` once
    /// the id space is exhausted.
    pub fn add_item(&mut self) -> Option<u32> {
        let Some(id) = self.item_counter.checked_add(1) else {
            warn!("item ids exhausted, not adding an item");
            return None;
        };
        self.item_counter = id;
        self.items.push(FlexItem::new(id));
        debug!("added item {id} ({} items)", self.items.len());
        Some(id)
    }

    /// Remove the last item, deselecting it first if needed. Returns its id.
    pub fn remove_item(&mut self) -> Option<u32> {
        let last = self.items.last()?.id;
        if self.selected == Some(last) {
            self.deselect_all_items(true);
        }
        self.items.pop();
        debug!("removed item {last} ({} items)", self.items.len());
        Some(last)
    }

    /// Restore container defaults, deselect, and reset every item's styles.
    pub fn reset_playground(&mut self) {
        for property in CONTAINER_PROPERTIES {
            let default = self.config.container.get(property).unwrap_or_default().to_string();
            self.container_controls.set_value(property, &default);
        }
        self.apply_container_styles();

        self.deselect_all_items(true);

        for item in &mut self.items {
            for property in ITEM_PROPERTIES {
                item.style.set(property, self.config.item.get(property).unwrap_or_default());
            }
        }

        debug!("playground reset");
        self.update_code_snippets();
    }

    // =========================================================================
    // Snippets
    // =========================================================================

    /// Regenerate both snippet blocks from the live inline styles.
    pub fn update_code_snippets(&mut self) {
        let style = &self.container_style;
        self.container_snippet = Snippet::new("Container Styles", ".container")
            .declare("display", "flex")
            .declare("flex-direction", style.get_or("flex-direction", "row"))
            .declare("justify-content", style.get_or("justify-content", "flex-start"))
            .declare("align-items", style.get_or("align-items", "stretch"))
            .declare("flex-wrap", style.get_or("flex-wrap", "nowrap"))
            .declare("align-content", style.get_or("align-content", "stretch"))
            .declare("gap", style.get_or("gap", "10px"));

        self.item_snippet = self.selected.and_then(|id| self.item(id)).map(|item| {
            let style = &item.style;
            Snippet::new(format!("Styles for Item {}", item.id), format!(".item-{}", item.id))
                .declare("order", style.get_or("order", "0"))
                .declare("flex-grow", style.get_or("flex-grow", "0"))
                .declare("flex-shrink", style.get_or("flex-shrink", "1"))
                .declare("flex-basis", style.get_or("flex-basis", "auto"))
                .declare("align-self", style.get_or("align-self", "auto"))
        });

        trace!("snippets regenerated (item block visible: {})", self.item_snippet.is_some());
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Deliver a control event to whichever group owns the control.
    pub fn handle_control_event(&mut self, id: &str, event: EventKind, input: ControlInput) -> Result<()> {
        if self.container_controls.contains(id) {
            if self.container_controls.dispatch(id, event, input)? {
                self.apply_container_styles();
            }
            return Ok(());
        }

        if self.item_controls.dispatch(id, event, input)? {
            self.apply_item_styles();
        }
        Ok(())
    }

    /// Flip challenge solution `index`. Returns the new visibility.
    pub fn toggle_solution(&mut self, index: usize) -> Option<bool> {
        self.solutions.toggle(index)
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Describe the whole page as patches.
    pub fn render(&self) -> Vec<Patch> {
        let mut patches = Vec::new();

        for property in CONTAINER_PROPERTIES {
            patches.push(Patch::style(Target::Container, property, self.container_style.get(property)));
        }
        patches.push(Patch::SetChildren {
            target: Target::Container,
            items: self.item_ids(),
        });

        for item in &self.items {
            let target = Target::Item(item.id);
            let class_name = if self.selected == Some(item.id) {
                format!("{ITEM_CLASS} {SELECTED_CLASS}")
            } else {
                ITEM_CLASS.to_string()
            };
            patches.push(Patch::SetClassName {
                target: target.clone(),
                class_name,
            });
            patches.push(Patch::SetText {
                target: target.clone(),
                text: item.label(),
            });
            for property in ITEM_PROPERTIES {
                patches.push(Patch::style(target.clone(), property, item.style.get(property)));
            }
        }

        patches.push(Patch::SetText {
            target: Target::SelectedLabel,
            text: self.selected_label.clone(),
        });

        for control in self.container_controls.iter().chain(self.item_controls.iter()) {
            let target = Target::Control(control.id.clone());
            patches.push(Patch::SetValue {
                target: target.clone(),
                value: control.value.clone(),
            });
            patches.push(Patch::SetDisabled {
                target,
                disabled: control.disabled,
            });
        }

        patches.push(Patch::SetMarkup {
            target: Target::Snippet(SnippetSlot::Container),
            markup: self.container_snippet.to_markup(),
        });
        if let Some(snippet) = &self.item_snippet {
            patches.push(Patch::SetMarkup {
                target: Target::Snippet(SnippetSlot::Item),
                markup: snippet.to_markup(),
            });
        }
        patches.push(Patch::SetVisible {
            target: Target::Snippet(SnippetSlot::Item),
            visible: self.item_snippet.is_some(),
        });

        self.solutions.render(&mut patches);
        patches
    }
}

// =============================================================================
// Control panels
// =============================================================================

fn container_panel(config: &FlexConfig) -> ControlPanel {
    let defaults = &config.container;
    ControlPanel::new(
        ControlGroup::FlexContainer,
        vec![
            Control::select("flex-direction", "Direction", FlexDirection::options(), &defaults.flex_direction),
            Control::select("justify-content", "Justify Content", JustifyContent::options(), &defaults.justify_content),
            Control::select("align-items", "Align Items", AlignItems::options(), &defaults.align_items),
            Control::select("flex-wrap", "Wrap", FlexWrap::options(), &defaults.flex_wrap),
            Control::select("align-content", "Align Content", AlignContent::options(), &defaults.align_content),
            Control::range("gap", "Gap (px)", 0, config.max_gap as i32, &defaults.gap),
        ],
    )
}

fn item_panel(defaults: &ItemDefaults) -> ControlPanel {
    let mut panel = ControlPanel::new(
        ControlGroup::FlexItem,
        vec![
            Control::number("order", "Order", &defaults.order),
            Control::number("flex-grow", "Grow", &defaults.flex_grow),
            Control::number("flex-shrink", "Shrink", &defaults.flex_shrink),
            Control::text("flex-basis", "Basis", &defaults.flex_basis),
            Control::select("align-self", "Align Self", AlignSelf::options(), &defaults.align_self),
        ],
    );
    panel.set_all_disabled(true);
    panel
}

// =============================================================================
// Tests
// =============================================================================
