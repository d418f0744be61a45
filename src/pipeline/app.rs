//! App - the terminal front-end driving both playground controllers.
//!
//! [`App`] owns the controllers and turns [`Action`]s into the same control
//! events a browser would fire: stepping a select, range or number control
//! fires `input` then `change`, typing into a field fires `input`, and Enter
//! commits it with `change`. [`run`] is the blocking event loop.

use std::time::Duration;

use log::{debug, info};

use crate::config::PlaygroundConfig;
use crate::controls::{Control, ControlInput, ControlKind, EventKind};
use crate::error::Result;
use crate::layout::Scale;
use crate::playground::{ClickTarget, FlexController, Page, PositionController};
use crate::renderer::DiffRenderer;
use crate::state::{poll_action, Action, Button, FocusRing, Focusable};
use crate::theme::{Appearance, Theme, ThemeSet};

use super::terminal::{detect_terminal_size, set_terminal_size, TerminalGuard};
use super::view::{draw_flex, draw_position, Frame, HitTarget, ViewContext};
use super::viewport::{create_viewport_derived, Viewport};

const TICK: Duration = Duration::from_millis(16);

// =============================================================================
// App
// =============================================================================

pub struct App {
    page: Page,
    flex: FlexController,
    position: PositionController,
    appearance: Appearance,
    themes: ThemeSet,
    scale: Scale,
    focus: FocusRing,
    frame: Option<Frame>,
    running: bool,
}

impl App {
    pub fn new(config: &PlaygroundConfig, page: Page, appearance: Appearance) -> Self {
        let themes = ThemeSet::with_overrides(&config.theme);
        let flex = FlexController::new(config.flex.clone());
        let position = PositionController::new(config.position.clone(), themes.clone(), appearance.clone());
        let mut app = Self {
            page,
            flex,
            position,
            appearance,
            themes,
            scale: Scale::from(&config.display),
            focus: FocusRing::new(Vec::new()),
            frame: None,
            running: true,
        };
        app.rebuild_focus();
        app
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn flex(&self) -> &FlexController {
        &self.flex
    }

    pub fn position(&self) -> &PositionController {
        &self.position
    }

    pub fn focus(&self) -> &FocusRing {
        &self.focus
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn theme(&self) -> &Theme {
        self.themes.get(self.appearance.scheme())
    }

    /// The last drawn frame, used for hit testing clicks.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    fn rebuild_focus(&mut self) {
        let mut entries = Vec::new();
        match self.page {
            Page::Flex => {
                entries.extend(self.flex.container_controls().iter().map(|c| Focusable::Control(c.id.clone())));
                entries.extend(self.flex.item_controls().iter().map(|c| Focusable::Control(c.id.clone())));
                entries.extend([Button::AddItem, Button::RemoveItem, Button::Reset, Button::SwitchPage].map(Focusable::Button));
                entries.extend((0..self.flex.solutions().len()).map(|i| Focusable::Button(Button::Solution(i))));
            }
            Page::Position => {
                entries.extend(self.position.controls().iter().map(|c| Focusable::Control(c.id.clone())));
                entries.extend([Button::Reset, Button::SwitchPage].map(Focusable::Button));
            }
        }
        self.focus.set_entries(entries);
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw the current page and keep it for hit testing.
    pub fn draw(&mut self, viewport: Viewport) -> Result<&Frame> {
        let theme = self.themes.get(self.appearance.scheme());
        let ctx = ViewContext {
            viewport,
            theme,
            focus: &self.focus,
            scale: self.scale,
        };
        let frame = match self.page {
            Page::Flex => draw_flex(&self.flex, &ctx)?,
            Page::Position => draw_position(&self.position, &ctx)?,
        };
        Ok(self.frame.insert(frame))
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn handle(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::FocusNext => {
                self.focus.focus_next();
            }
            Action::FocusPrevious => {
                self.focus.focus_previous();
            }
            Action::Step { forward } => {
                if let Some(control) = self.focused_control() {
                    if let Some(value) = control.stepped_value(forward) {
                        self.commit(&control.id, ControlInput::Value(value))?;
                    }
                }
            }
            Action::Type(ch) => self.type_char(ch)?,
            Action::Backspace => {
                if let Some(control) = self.focused_control().filter(is_editable) {
                    let mut value = control.value.clone();
                    value.pop();
                    self.control_event(&control.id, EventKind::Input, ControlInput::Value(value))?;
                }
            }
            Action::Submit => match self.focus.current() {
                Some(Focusable::Button(button)) => self.press(button),
                Some(Focusable::Control(id)) => {
                    if let Some(control) = self.control(&id).cloned() {
                        if control.is_checkbox() {
                            self.commit(&id, ControlInput::Checked(!control.checked))?;
                        } else if is_editable(&control) {
                            self.control_event(&id, EventKind::Change, ControlInput::Value(control.value))?;
                        }
                    }
                }
                None => {}
            },
            Action::Click { x, y } => self.click(x, y)?,
            Action::Resize { width, height } => {
                debug!("resize to {width}x{height}");
                set_terminal_size(width, height);
            }
            Action::AddItem => self.press(Button::AddItem),
            Action::RemoveItem => self.press(Button::RemoveItem),
            Action::Reset => self.press(Button::Reset),
            Action::SwitchPage => self.press(Button::SwitchPage),
            Action::ToggleColorScheme => {
                self.appearance.set_scheme(self.appearance.scheme().toggled());
                self.position.sync_color_scheme();
            }
        }
        Ok(())
    }

    fn press(&mut self, button: Button) {
        match (self.page, button) {
            (Page::Flex, Button::AddItem) => {
                self.flex.add_item();
            }
            (Page::Flex, Button::RemoveItem) => {
                self.flex.remove_item();
            }
            (Page::Flex, Button::Reset) => self.flex.reset_playground(),
            (Page::Position, Button::Reset) => self.position.reset_all(),
            (Page::Flex, Button::Solution(index)) => {
                self.flex.toggle_solution(index);
            }
            (_, Button::SwitchPage) => {
                self.page = self.page.other();
                info!("switched to {}", self.page.title());
                self.rebuild_focus();
            }
            (page, button) => debug!("{} has no {} button", page.title(), button.label()),
        }
    }

    fn type_char(&mut self, ch: char) -> Result<()> {
        match self.focus.current() {
            Some(Focusable::Button(button)) if ch == ' ' => self.press(button),
            Some(Focusable::Control(id)) => {
                if let Some(control) = self.control(&id).cloned() {
                    if control.is_checkbox() && ch == ' ' {
                        self.commit(&id, ControlInput::Checked(!control.checked))?;
                    } else if is_editable(&control) {
                        let mut value = control.value;
                        value.push(ch);
                        self.control_event(&id, EventKind::Input, ControlInput::Value(value))?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn click(&mut self, x: u16, y: u16) -> Result<()> {
        let Some(target) = self.frame.as_ref().and_then(|f| f.hit_at(x, y)).cloned() else {
            return Ok(());
        };
        match target {
            HitTarget::Item(id) => self.flex.select_item(ClickTarget::Item(id)),
            HitTarget::Container => self.flex.select_item(ClickTarget::Background),
            HitTarget::Focus(focusable) => {
                self.focus.focus(&focusable);
                match focusable {
                    Focusable::Button(button) => self.press(button),
                    Focusable::Control(id) => {
                        if let Some(control) = self.control(&id).filter(|c| c.is_checkbox()) {
                            let checked = !control.checked;
                            self.commit(&id, ControlInput::Checked(checked))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Control routing
    // =========================================================================

    fn control(&self, id: &str) -> Option<&Control> {
        match self.page {
            Page::Flex => self.flex.container_controls().get(id).or_else(|| self.flex.item_controls().get(id)),
            Page::Position => self.position.controls().get(id),
        }
    }

    fn focused_control(&self) -> Option<Control> {
        match self.focus.current()? {
            Focusable::Control(id) => self.control(&id).cloned(),
            Focusable::Button(_) => None,
        }
    }

    /// A discrete edit: the element fires `input` and then `change`.
    fn commit(&mut self, id: &str, input: ControlInput) -> Result<()> {
        self.control_event(id, EventKind::Input, input.clone())?;
        self.control_event(id, EventKind::Change, input)
    }

    fn control_event(&mut self, id: &str, event: EventKind, input: ControlInput) -> Result<()> {
        match self.page {
            Page::Flex => self.flex.handle_control_event(id, event, input),
            Page::Position => self.position.handle_control_event(id, event, input),
        }
    }
}

fn is_editable(control: &Control) -> bool {
    matches!(control.kind, ControlKind::Text | ControlKind::Number)
}

// =============================================================================
// Event loop
// =============================================================================

/// Run the playground in the terminal until the user quits.
pub fn run(config: &PlaygroundConfig, page: Page, appearance: Appearance) -> Result<()> {
    detect_terminal_size();
    let viewport = create_viewport_derived();
    let mut app = App::new(config, page, appearance);

    let guard = TerminalGuard::enter()?;
    let mut renderer = DiffRenderer::stdout();
    let mut dirty = true;
    info!("playground started on {}", app.page().title());

    while app.is_running() {
        if app.position.sync_color_scheme() {
            dirty = true;
        }
        if dirty {
            let frame = app.draw(viewport.get())?;
            renderer.render(&frame.buffer)?;
            dirty = false;
        }

        if let Some(action) = poll_action(TICK)? {
            if matches!(action, Action::Resize { .. }) {
                renderer.invalidate();
            }
            app.handle(action)?;
            dirty = true;
        }
    }

    guard.exit()?;
    info!("playground stopped");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ColorScheme;

    fn app(page: Page) -> App {
        App::new(&PlaygroundConfig::default(), page, Appearance::new(ColorScheme::Light))
    }

    fn focus_control(app: &App, id: &str) {
        assert!(app.focus().focus(&Focusable::Control(id.to_string())));
    }

    #[test]
    fn test_step_select_fires_change() {
        let mut app = app(Page::Flex);
        focus_control(&app, "flex-direction");
        app.handle(Action::Step { forward: true }).unwrap();
        assert_eq!(app.flex().container_style().get("flex-direction"), "row-reverse");
    }

    #[test]
    fn test_step_gap_range() {
        let mut app = app(Page::Flex);
        focus_control(&app, "gap");
        app.handle(Action::Step { forward: true }).unwrap();
        assert_eq!(app.flex().container_style().get("gap"), "11px");
    }

    #[test]
    fn test_typing_into_disabled_item_control_is_ignored() {
        let mut app = app(Page::Flex);
        focus_control(&app, "flex-basis");
        app.handle(Action::Type('5')).unwrap();
        assert_eq!(app.flex().item_controls().value("flex-basis"), "auto");
    }

    #[test]
    fn test_buttons() {
        let mut app = app(Page::Flex);
        app.handle(Action::AddItem).unwrap();
        assert_eq!(app.flex().item_count(), 4);
        app.handle(Action::RemoveItem).unwrap();
        app.handle(Action::RemoveItem).unwrap();
        assert_eq!(app.flex().item_count(), 2);

        // reset restores styles, not the item count
        app.handle(Action::Reset).unwrap();
        assert_eq!(app.flex().item_count(), 2);
    }

    #[test]
    fn test_solution_button_via_focus() {
        let mut app = app(Page::Flex);
        assert!(app.focus().focus(&Focusable::Button(Button::Solution(0))));
        app.handle(Action::Submit).unwrap();
        assert!(app.flex().solutions().get(0).is_some_and(|s| s.is_visible()));
        app.handle(Action::Type(' ')).unwrap();
        assert!(!app.flex().solutions().get(0).is_some_and(|s| s.is_visible()));
    }

    #[test]
    fn test_click_item_then_background() {
        let mut app = app(Page::Flex);
        let viewport = Viewport::for_size(120, 40);
        let frame = app.draw(viewport).unwrap();
        let region = frame
            .hit_regions
            .iter()
            .find(|r| r.target == HitTarget::Item(2))
            .map(|r| r.rect)
            .unwrap();

        app.handle(Action::Click { x: region.x + 1, y: region.y + 1 }).unwrap();
        assert_eq!(app.flex().selected(), Some(2));

        // bottom-right corner of the container, below the items
        let stage = viewport.stage;
        app.draw(viewport).unwrap();
        app.handle(Action::Click { x: stage.right() - 2, y: stage.bottom() - 2 }).unwrap();
        assert_eq!(app.flex().selected(), None);
    }

    #[test]
    fn test_position_page_checkbox_and_text() {
        let mut app = app(Page::Position);
        focus_control(&app, "parent-position");
        app.handle(Action::Type(' ')).unwrap();
        assert!(app.position().parent_relative());

        focus_control(&app, "position");
        app.handle(Action::Step { forward: true }).unwrap();
        assert_eq!(app.position().position_mode().as_css(), "relative");

        focus_control(&app, "top");
        for _ in 0.."auto".len() {
            app.handle(Action::Backspace).unwrap();
        }
        assert_eq!(app.position().child_style().get("top"), "auto");
        app.handle(Action::Type('5')).unwrap();
        app.handle(Action::Type('p')).unwrap();
        app.handle(Action::Type('x')).unwrap();
        assert_eq!(app.position().child_style().get("top"), "5px");
    }

    #[test]
    fn test_switch_page_rebuilds_focus() {
        let mut app = app(Page::Flex);
        app.handle(Action::SwitchPage).unwrap();
        assert_eq!(app.page(), Page::Position);
        assert!(app.focus().entries().contains(&Focusable::Control("top".into())));
        assert!(!app.focus().entries().contains(&Focusable::Button(Button::AddItem)));

        // no-op on this page
        app.handle(Action::AddItem).unwrap();
        assert_eq!(app.flex().item_count(), 3);
    }

    #[test]
    fn test_toggle_color_scheme() {
        let mut app = app(Page::Position);
        app.handle(Action::ToggleColorScheme).unwrap();
        assert_eq!(app.appearance().scheme(), ColorScheme::Dark);
        assert_eq!(app.theme().scheme, ColorScheme::Dark);
    }

    #[test]
    fn test_quit() {
        let mut app = app(Page::Flex);
        app.handle(Action::Quit).unwrap();
        assert!(!app.is_running());
    }
}
