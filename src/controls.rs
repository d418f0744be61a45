//! Form controls.
//!
//! A control mirrors an HTML form element: it has an id, a kind (select, range,
//! number, text, checkbox), a current value or checked state, and a disabled
//! flag. Controls belong to a [`ControlGroup`], which decides which DOM event
//! (`input` or `change`) the group's listener is wired to for each kind.
//!
//! # Event wiring
//!
//! | Group          | `input`                  | `change`             |
//! |----------------|--------------------------|----------------------|
//! | FlexContainer  | range, number            | everything else      |
//! | FlexItem       | range, number, text      | everything else      |
//! | Position       | range, text              | everything else      |

use std::collections::BTreeMap;

use log::trace;

use crate::error::{PlaygroundError, Result};

// =============================================================================
// Events
// =============================================================================

/// The two DOM events a control can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fired continuously while the value is being edited.
    Input,
    /// Fired when an edit is committed.
    Change,
}

/// What the user did to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlInput {
    /// New value for select/range/number/text controls.
    Value(String),
    /// New checked state for checkboxes.
    Checked(bool),
}

impl From<&str> for ControlInput {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for ControlInput {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<bool> for ControlInput {
    fn from(checked: bool) -> Self {
        Self::Checked(checked)
    }
}

// =============================================================================
// Control
// =============================================================================

/// Kind of form element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    /// Dropdown with a fixed option list.
    Select { options: Vec<String> },
    /// Slider.
    Range { min: i32, max: i32, step: i32 },
    /// Numeric field.
    Number,
    /// Free text field.
    Text,
    /// Checkbox; its state lives in `checked`, not `value`.
    Checkbox,
}

impl ControlKind {
    /// The HTML `type` name, used in log output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Range { .. } => "range",
            Self::Number => "number",
            Self::Text => "text",
            Self::Checkbox => "checkbox",
        }
    }
}

/// One form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub label: String,
    pub kind: ControlKind,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
}

impl Control {
    fn new(id: &str, label: &str, kind: ControlKind, value: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            value: value.to_string(),
            checked: false,
            disabled: false,
        }
    }

    pub fn select(id: &str, label: &str, options: Vec<String>, value: &str) -> Self {
        Self::new(id, label, ControlKind::Select { options }, value)
    }

    pub fn range(id: &str, label: &str, min: i32, max: i32, value: &str) -> Self {
        Self::new(id, label, ControlKind::Range { min, max, step: 1 }, value)
    }

    pub fn number(id: &str, label: &str, value: &str) -> Self {
        Self::new(id, label, ControlKind::Number, value)
    }

    pub fn text(id: &str, label: &str, value: &str) -> Self {
        Self::new(id, label, ControlKind::Text, value)
    }

    pub fn checkbox(id: &str, label: &str, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(id, label, ControlKind::Checkbox, "on")
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.kind, ControlKind::Checkbox)
    }

    /// Store what the user entered. Values are not validated.
    pub fn apply_input(&mut self, input: ControlInput) {
        match input {
            ControlInput::Value(value) => self.value = value,
            ControlInput::Checked(checked) => self.checked = checked,
        }
    }

    /// Move a select or numeric control one step, as arrow keys would.
    ///
    /// Text and checkbox controls return `None`. Selects wrap around; range
    /// controls clamp; a non-numeric value restarts from zero.
    pub fn stepped_value(&self, forward: bool) -> Option<String> {
        match &self.kind {
            ControlKind::Select { options } if !options.is_empty() => {
                let current = options.iter().position(|o| *o == self.value).unwrap_or(0);
                let next = if forward {
                    (current + 1) % options.len()
                } else {
                    (current + options.len() - 1) % options.len()
                };
                Some(options[next].clone())
            }
            ControlKind::Range { min, max, step } => {
                let current = self.value.trim().parse::<i32>().unwrap_or(*min);
                let next = if forward { current.saturating_add(*step) } else { current.saturating_sub(*step) };
                Some(next.clamp(*min, *max).to_string())
            }
            ControlKind::Number => {
                let current = self.value.trim().parse::<f64>().unwrap_or(0.0);
                let next = if forward { current + 1.0 } else { current - 1.0 };
                Some(format_number(next))
            }
            _ => None,
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// =============================================================================
// Group wiring
// =============================================================================

/// Which listener a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlGroup {
    FlexContainer,
    FlexItem,
    Position,
}

impl ControlGroup {
    /// The event this group listens for on a control of the given kind.
    pub fn listens_for(self, kind: &ControlKind) -> EventKind {
        let continuous = match self {
            Self::FlexContainer => {
                matches!(kind, ControlKind::Range { .. } | ControlKind::Number)
            }
            Self::FlexItem => matches!(
                kind,
                ControlKind::Range { .. } | ControlKind::Number | ControlKind::Text
            ),
            Self::Position => matches!(kind, ControlKind::Range { .. } | ControlKind::Text),
        };
        if continuous {
            EventKind::Input
        } else {
            EventKind::Change
        }
    }
}

// =============================================================================
// ControlPanel
// =============================================================================

/// An ordered set of controls sharing one listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    group: ControlGroup,
    controls: Vec<Control>,
}

impl ControlPanel {
    pub fn new(group: ControlGroup, controls: Vec<Control>) -> Self {
        Self { group, controls }
    }

    pub fn group(&self) -> ControlGroup {
        self.group
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    /// Current value of a control, empty when the id is unknown.
    pub fn value(&self, id: &str) -> &str {
        self.get(id).map(|c| c.value.as_str()).unwrap_or("")
    }

    /// Checked state of a control, false when the id is unknown.
    pub fn checked(&self, id: &str) -> bool {
        self.get(id).is_some_and(|c| c.checked)
    }

    /// Set a control's value without firing anything. Unknown ids are ignored.
    pub fn set_value(&mut self, id: &str, value: &str) {
        if let Some(control) = self.get_mut(id) {
            control.value = value.to_string();
        }
    }

    /// Set a checkbox's state without firing anything. Unknown ids are ignored.
    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(control) = self.get_mut(id) {
            control.checked = checked;
        }
    }

    pub fn set_all_disabled(&mut self, disabled: bool) {
        for control in &mut self.controls {
            control.disabled = disabled;
        }
    }

    /// Every control value keyed by id, like building `styles[control.id] = control.value`.
    pub fn values(&self) -> BTreeMap<&str, &str> {
        self.controls
            .iter()
            .map(|c| (c.id.as_str(), c.value.as_str()))
            .collect()
    }

    /// Deliver a DOM event to a control.
    ///
    /// The control always takes the new input (the browser updates the element
    /// regardless of listeners). Returns whether the group's listener fires:
    /// the event must be the one the control is wired to, and disabled controls
    /// never fire.
    pub fn dispatch(&mut self, id: &str, event: EventKind, input: ControlInput) -> Result<bool> {
        let group = self.group;
        let control = self
            .get_mut(id)
            .ok_or_else(|| PlaygroundError::UnknownControl(id.to_string()))?;

        if control.disabled {
            trace!("{event:?} on disabled {} `{id}` ignored", control.kind.type_name());
            return Ok(false);
        }

        control.apply_input(input);
        let fires = group.listens_for(&control.kind) == event;
        trace!("{event:?} on {} `{id}` (listener fires: {fires})", control.kind.type_name());
        Ok(fires)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(group: ControlGroup) -> ControlPanel {
        ControlPanel::new(
            group,
            vec![
                Control::select("mode", "Mode", vec!["a".into(), "b".into(), "c".into()], "a"),
                Control::range("gap", "Gap", 0, 50, "10"),
                Control::number("order", "Order", "0"),
                Control::text("basis", "Basis", "auto"),
                Control::checkbox("flag", "Flag", false),
            ],
        )
    }

    #[test]
    fn test_container_wiring() {
        let group = ControlGroup::FlexContainer;
        let p = panel(group);
        let kinds: Vec<EventKind> = p.iter().map(|c| group.listens_for(&c.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Change,
                EventKind::Input,
                EventKind::Input,
                EventKind::Change,
                EventKind::Change
            ]
        );
    }

    #[test]
    fn test_item_wiring_treats_text_as_continuous() {
        assert_eq!(ControlGroup::FlexItem.listens_for(&ControlKind::Text), EventKind::Input);
        assert_eq!(ControlGroup::FlexContainer.listens_for(&ControlKind::Text), EventKind::Change);
    }

    #[test]
    fn test_position_wiring() {
        let group = ControlGroup::Position;
        assert_eq!(group.listens_for(&ControlKind::Text), EventKind::Input);
        assert_eq!(group.listens_for(&ControlKind::Number), EventKind::Change);
        assert_eq!(group.listens_for(&ControlKind::Checkbox), EventKind::Change);
    }

    #[test]
    fn test_dispatch_updates_value_even_when_listener_does_not_fire() {
        let mut p = panel(ControlGroup::FlexContainer);
        let fired = p.dispatch("mode", EventKind::Input, "b".into()).unwrap();
        assert!(!fired);
        assert_eq!(p.value("mode"), "b");

        let fired = p.dispatch("mode", EventKind::Change, "c".into()).unwrap();
        assert!(fired);
        assert_eq!(p.value("mode"), "c");
    }

    #[test]
    fn test_dispatch_disabled_control_is_ignored() {
        let mut p = panel(ControlGroup::FlexItem);
        p.set_all_disabled(true);
        let fired = p.dispatch("basis", EventKind::Input, "100px".into()).unwrap();
        assert!(!fired);
        assert_eq!(p.value("basis"), "auto");
    }

    #[test]
    fn test_dispatch_unknown_control() {
        let mut p = panel(ControlGroup::Position);
        let err = p.dispatch("nope", EventKind::Change, "x".into()).unwrap_err();
        assert!(matches!(err, PlaygroundError::UnknownControl(id) if id == "nope"));
    }

    #[test]
    fn test_checkbox_input() {
        let mut p = panel(ControlGroup::Position);
        assert!(p.dispatch("flag", EventKind::Change, true.into()).unwrap());
        assert!(p.checked("flag"));
    }

    #[test]
    fn test_stepped_values() {
        let p = panel(ControlGroup::FlexContainer);
        assert_eq!(p.get("mode").unwrap().stepped_value(true).as_deref(), Some("b"));
        assert_eq!(p.get("mode").unwrap().stepped_value(false).as_deref(), Some("c"));
        assert_eq!(p.get("gap").unwrap().stepped_value(true).as_deref(), Some("11"));
        assert_eq!(p.get("order").unwrap().stepped_value(false).as_deref(), Some("-1"));
        assert_eq!(p.get("basis").unwrap().stepped_value(true), None);

        let full = Control::range("gap", "Gap", 0, 50, "50");
        assert_eq!(full.stepped_value(true).as_deref(), Some("50"));

        // out-of-range values saturate before clamping
        let huge = Control::range("gap", "Gap", 0, 50, &i32::MAX.to_string());
        assert_eq!(huge.stepped_value(true).as_deref(), Some("50"));
        assert_eq!(huge.stepped_value(false).as_deref(), Some("50"));
        let tiny = Control::range("gap", "Gap", 0, 50, &i32::MIN.to_string());
        assert_eq!(tiny.stepped_value(false).as_deref(), Some("0"));
        assert_eq!(tiny.stepped_value(true).as_deref(), Some("0"));
    }

    #[test]
    fn test_values_map() {
        let p = panel(ControlGroup::FlexContainer);
        let values = p.values();
        assert_eq!(values["gap"], "10");
        assert_eq!(values.len(), 5);
    }
}
