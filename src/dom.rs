//! Render description.
//!
//! Controllers never touch a rendering surface directly. They expose their
//! state, and `render()` turns that state into a list of [`Patch`]es: "set this
//! inline style", "replace this class list", "show this panel". Anything that
//! implements [`Surface`] can apply them. [`Document`] is an in-memory element
//! store that does exactly what a browser DOM would do with the same patches,
//! which makes the observable behavior testable without a browser.

use std::collections::BTreeMap;

// =============================================================================
// Targets
// =============================================================================

/// Which snippet output block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnippetSlot {
    Container,
    Item,
    Parent,
    Child,
}

/// An addressable element of either playground.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// The flex container.
    Container,
    /// A flex item by its numeric id.
    Item(u32),
    /// "Editing Item N" / "No item selected".
    SelectedLabel,
    /// The positioning parent.
    Parent,
    /// The positioned child.
    Child,
    Snippet(SnippetSlot),
    /// A form control by id.
    Control(String),
    /// Challenge solution panel by index.
    SolutionPanel(usize),
    /// The button toggling a solution panel.
    SolutionButton(usize),
}

// =============================================================================
// Patches
// =============================================================================

/// One visual update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Set an inline style property; an empty value removes it.
    SetStyle {
        target: Target,
        property: String,
        value: String,
    },
    /// Replace the whole class list (space separated).
    SetClassName { target: Target, class_name: String },
    AddClass { target: Target, class: String },
    RemoveClass { target: Target, class: String },
    SetText { target: Target, text: String },
    /// Replace inner markup.
    SetMarkup { target: Target, markup: String },
    /// `display: block` / `display: none`.
    SetVisible { target: Target, visible: bool },
    SetDisabled { target: Target, disabled: bool },
    SetValue { target: Target, value: String },
    SetChecked { target: Target, checked: bool },
    /// Replace the item children of the container, in order.
    SetChildren { target: Target, items: Vec<u32> },
}

impl Patch {
    pub fn target(&self) -> &Target {
        match self {
            Self::SetStyle { target, .. }
            | Self::SetClassName { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetText { target, .. }
            | Self::SetMarkup { target, .. }
            | Self::SetVisible { target, .. }
            | Self::SetDisabled { target, .. }
            | Self::SetValue { target, .. }
            | Self::SetChecked { target, .. }
            | Self::SetChildren { target, .. } => target,
        }
    }

    pub fn style(target: Target, property: &str, value: &str) -> Self {
        Self::SetStyle {
            target,
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// Anything that can apply a render description.
pub trait Surface {
    fn apply(&mut self, patch: &Patch);

    fn apply_all(&mut self, patches: &[Patch]) {
        for patch in patches {
            self.apply(patch);
        }
    }
}

// =============================================================================
// InlineStyle
// =============================================================================

/// An element's inline `style` attribute.
///
/// Reading an unset property yields the empty string, which is what lets the
/// snippet templates fall back with `value || default`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    properties: BTreeMap<String, String>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Property value, or `""` when unset.
    pub fn get(&self, property: &str) -> &str {
        self.properties.get(property).map(String::as_str).unwrap_or("")
    }

    /// Property value, or `fallback` when unset or empty.
    pub fn get_or<'a>(&'a self, property: &str, fallback: &'a str) -> &'a str {
        match self.get(property) {
            "" => fallback,
            value => value,
        }
    }

    /// Set a property; the empty string removes it.
    pub fn set(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.properties.remove(property);
        } else {
            self.properties.insert(property.to_string(), value.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialized like the `style` attribute: `a: 1; b: 2;`.
    pub fn css_text(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Document
// =============================================================================

/// State of one element in a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub classes: Vec<String>,
    pub style: InlineStyle,
    pub text: String,
    pub markup: String,
    pub visible: bool,
    pub disabled: bool,
    pub value: String,
    pub checked: bool,
    pub children: Vec<u32>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            style: InlineStyle::new(),
            text: String::new(),
            markup: String::new(),
            visible: true,
            disabled: false,
            value: String::new(),
            checked: false,
            children: Vec::new(),
        }
    }
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

/// In-memory element store that applies patches the way a DOM would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: BTreeMap<Target, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &Target) -> Option<&Element> {
        self.elements.get(target)
    }

    /// Element lookup that panics on a missing element; for tests and examples.
    pub fn element(&self, target: &Target) -> &Element {
        match self.elements.get(target) {
            Some(element) => element,
            None => panic!("no element for {target:?}"),
        }
    }

    pub fn contains(&self, target: &Target) -> bool {
        self.elements.contains_key(target)
    }

    /// Item ids currently attached to the container.
    pub fn item_ids(&self) -> Vec<u32> {
        self.get(&Target::Container)
            .map(|c| c.children.clone())
            .unwrap_or_default()
    }

    fn entry(&mut self, target: &Target) -> &mut Element {
        self.elements.entry(target.clone()).or_default()
    }
}

impl Surface for Document {
    fn apply(&mut self, patch: &Patch) {
        match patch {
            Patch::SetStyle {
                target,
                property,
                value,
            } => self.entry(target).style.set(property, value),
            Patch::SetClassName { target, class_name } => {
                self.entry(target).classes = class_name.split_whitespace().map(str::to_string).collect();
            }
            Patch::AddClass { target, class } => {
                let element = self.entry(target);
                if !element.has_class(class) {
                    element.classes.push(class.clone());
                }
            }
            Patch::RemoveClass { target, class } => {
                self.entry(target).classes.retain(|c| c != class);
            }
            Patch::SetText { target, text } => {
                let element = self.entry(target);
                element.text = text.clone();
                element.markup.clear();
            }
            Patch::SetMarkup { target, markup } => self.entry(target).markup = markup.clone(),
            Patch::SetVisible { target, visible } => self.entry(target).visible = *visible,
            Patch::SetDisabled { target, disabled } => self.entry(target).disabled = *disabled,
            Patch::SetValue { target, value } => self.entry(target).value = value.clone(),
            Patch::SetChecked { target, checked } => self.entry(target).checked = *checked,
            Patch::SetChildren { target, items } => {
                let previous = std::mem::replace(&mut self.entry(target).children, items.clone());
                for gone in previous.iter().filter(|id| !items.contains(id)) {
                    self.elements.remove(&Target::Item(*gone));
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
