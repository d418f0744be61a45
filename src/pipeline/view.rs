//! Page views - controller state to a frame buffer.
//!
//! Each page draws four regions (see [`Viewport`]): the control sidebar, the
//! stage with the live layout, the code panel and the header/footer. Every
//! clickable thing drawn also leaves a [`HitRegion`] so mouse clicks can be
//! mapped back to what is on screen.

use crate::controls::{Control, ControlKind};
use crate::error::Result;
use crate::layout::{
    compute_flex_layout, compute_position_layout, string_width, truncate_text, wrap_text, CellRect, Scale,
};
use crate::playground::{FlexController, Page, PositionController};
use crate::renderer::FrameBuffer;
use crate::snippet::{Snippet, TokenKind};
use crate::state::{Button, FocusRing, Focusable};
use crate::theme::Theme;
use crate::types::{Attr, Rgba};

use super::viewport::Viewport;

const LABEL_WIDTH: usize = 16;
const KEY_HINTS: &str = "Tab move · ←/→ change · Enter/Space press · Ctrl+N/D add/remove · Ctrl+R reset · F2 page · F3 scheme · Esc quit";

// =============================================================================
// Frame
// =============================================================================

/// What a click at a cell hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// The flex container background.
    Container,
    Item(u32),
    Focus(Focusable),
}

/// A clickable rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub rect: CellRect,
    pub target: HitTarget,
}

/// A drawn page.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: FrameBuffer,
    pub hit_regions: Vec<HitRegion>,
}

impl Frame {
    fn new(width: u16, height: u16, theme: &Theme) -> Self {
        Self {
            buffer: FrameBuffer::with_background(width, height, theme.color("--background")),
            hit_regions: Vec::new(),
        }
    }

    /// Topmost target under a cell. Regions registered later win.
    pub fn hit_at(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|region| region.rect.contains(x, y))
            .map(|region| &region.target)
    }

    fn hit(&mut self, rect: CellRect, target: HitTarget) {
        if !rect.is_empty() {
            self.hit_regions.push(HitRegion { rect, target });
        }
    }
}

/// Everything a view needs besides the controller itself.
pub struct ViewContext<'a> {
    pub viewport: Viewport,
    pub theme: &'a Theme,
    pub focus: &'a FocusRing,
    pub scale: Scale,
}

// =============================================================================
// Flex page
// =============================================================================

pub fn draw_flex(flex: &FlexController, ctx: &ViewContext<'_>) -> Result<Frame> {
    let v = ctx.viewport;
    let mut frame = Frame::new(v.header.width, v.footer.bottom(), ctx.theme);
    draw_chrome(&mut frame, Page::Flex, ctx);

    // Sidebar
    let mut rows = Vec::new();
    rows.push(Row::heading("Container"));
    rows.extend(flex.container_controls().iter().map(Row::control));
    rows.push(Row::heading(flex.selected_label()));
    rows.extend(flex.item_controls().iter().map(Row::control));
    rows.push(Row::blank());
    rows.push(Row::button(Button::AddItem, "[ Add Item ]".to_string()));
    rows.push(Row::button(Button::RemoveItem, "[ Remove Item ]".to_string()));
    rows.push(Row::button(Button::Reset, "[ Reset ]".to_string()));
    rows.push(Row::text(format!("Items: {}", flex.item_count())));
    rows.push(Row::blank());
    rows.push(Row::button(Button::SwitchPage, format!("[ {} ]", Page::Position.title())));
    draw_sidebar(&mut frame, &rows, ctx);

    // Stage
    let layout = compute_flex_layout(flex, v.stage, ctx.scale)?;
    let border = ctx.theme.color("--border");
    frame.buffer.fill_rect(layout.container.intersect(&v.stage), ctx.theme.color("--surface"));
    frame.buffer.draw_border(layout.container.intersect(&v.stage), border, Attr::NONE);
    frame.buffer.draw_text(layout.container.x + 2, layout.container.y, " .container ", border, Attr::NONE, Some(&v.stage));
    frame.hit(layout.container.intersect(&v.stage), HitTarget::Container);

    for (id, rect) in &layout.items {
        let rect = rect.intersect(&v.stage);
        if rect.is_empty() {
            continue;
        }
        let selected = flex.selected() == Some(*id);
        let (bg, attrs) = if selected {
            (ctx.theme.color("--item-selected"), Attr::BOLD)
        } else {
            (ctx.theme.color("--item-bg"), Attr::NONE)
        };
        let fg = ctx.theme.color("--text");
        frame.buffer.fill_rect(rect, bg);
        frame.buffer.draw_border(rect, fg, attrs);
        frame
            .buffer
            .draw_text_centered(rect.x, rect.y + rect.height / 2, rect.width, &id.to_string(), fg, attrs, Some(&rect));
        frame.hit(rect, HitTarget::Item(*id));
    }

    // Code panel: snippets left, challenges right
    let (left, right) = split_columns(v.code);
    let y = draw_snippet(&mut frame, flex.container_snippet(), left, left.y, ctx.theme);
    if let Some(snippet) = flex.item_snippet() {
        draw_snippet(&mut frame, snippet, left, y.saturating_add(1), ctx.theme);
    }

    let text = ctx.theme.color("--text");
    let muted = ctx.theme.color("--text-muted");
    let mut y = right.y;
    for (index, toggle) in flex.solutions().iter().enumerate() {
        for line in wrap_text(&format!("{}. {}", index + 1, toggle.prompt()), right.width) {
            y = draw_line(&mut frame, right, y, &line, text, Attr::NONE);
        }
        let button = Focusable::Button(Button::Solution(index));
        let attrs = focus_attrs(ctx.focus, &button);
        let label = format!("[ {} ]", toggle.button_label());
        if y < right.bottom() {
            let width = frame.buffer.draw_text(right.x + 2, y, &label, ctx.theme.color("--accent"), attrs, Some(&right));
            frame.hit(CellRect::new(right.x + 2, y, width, 1), HitTarget::Focus(button));
        }
        y = y.saturating_add(1);
        if toggle.is_visible() {
            let indented = CellRect::new(right.x + 4, right.y, right.width.saturating_sub(4), right.height);
            for line in wrap_text(toggle.solution(), indented.width) {
                y = draw_line(&mut frame, indented, y, &line, muted, Attr::ITALIC);
            }
        }
        y = y.saturating_add(1);
    }

    Ok(frame)
}

// =============================================================================
// Position page
// =============================================================================

pub fn draw_position(position: &PositionController, ctx: &ViewContext<'_>) -> Result<Frame> {
    let v = ctx.viewport;
    let mut frame = Frame::new(v.header.width, v.footer.bottom(), ctx.theme);
    draw_chrome(&mut frame, Page::Position, ctx);

    let mut rows = vec![Row::heading("Positioning")];
    rows.extend(position.controls().iter().map(Row::control));
    rows.push(Row::blank());
    rows.push(Row::button(Button::Reset, "[ Reset ]".to_string()));
    rows.push(Row::blank());
    rows.push(Row::button(Button::SwitchPage, format!("[ {} ]", Page::Flex.title())));
    draw_sidebar(&mut frame, &rows, ctx);

    let layout = compute_position_layout(position, v.stage, ctx.scale)?;
    let parent = layout.parent.intersect(&v.stage);
    let (border, title) = if position.parent_relative() {
        (ctx.theme.color("--accent"), " .parent (relative) ")
    } else {
        (ctx.theme.color("--border"), " .parent (static) ")
    };
    frame.buffer.fill_rect(parent, ctx.theme.color("--surface"));
    frame.buffer.draw_border(parent, border, Attr::NONE);
    frame.buffer.draw_text(parent.x + 2, parent.y, title, border, Attr::NONE, Some(&v.stage));

    let child = layout.child.intersect(&v.stage);
    if !child.is_empty() {
        let fg = ctx.theme.color("--text");
        frame.buffer.fill_rect(child, ctx.theme.color("--item-bg"));
        frame.buffer.draw_border(child, fg, Attr::BOLD);
        let label = format!(".child {}", position.position_mode());
        frame
            .buffer
            .draw_text_centered(child.x, child.y + child.height / 2, child.width, &label, fg, Attr::BOLD, Some(&child));
    }

    let (left, right) = split_columns(v.code);
    draw_snippet(&mut frame, position.parent_snippet(), left, left.y, ctx.theme);
    draw_snippet(&mut frame, position.child_snippet(), right, right.y, ctx.theme);

    Ok(frame)
}

// =============================================================================
// Shared pieces
// =============================================================================

fn draw_chrome(frame: &mut Frame, page: Page, ctx: &ViewContext<'_>) {
    let v = ctx.viewport;
    let accent = ctx.theme.color("--accent");
    let muted = ctx.theme.color("--text-muted");

    frame.buffer.draw_text(v.header.x + 1, v.header.y, page.title(), accent, Attr::BOLD, Some(&v.header));
    let scheme = format!("{} scheme", ctx.theme.scheme.as_str());
    let x = v.header.right().saturating_sub(string_width(&scheme) + 1);
    frame.buffer.draw_text(x, v.header.y, &scheme, muted, Attr::NONE, Some(&v.header));

    let hints = truncate_text(KEY_HINTS, v.footer.width.saturating_sub(2));
    frame.buffer.draw_text(v.footer.x + 1, v.footer.y, &hints, muted, Attr::DIM, Some(&v.footer));
}

enum RowKind {
    Heading,
    Text,
    Blank,
    Control(Focusable, bool),
    Button(Focusable),
}

struct Row {
    kind: RowKind,
    text: String,
}

impl Row {
    fn heading(text: &str) -> Self {
        Self {
            kind: RowKind::Heading,
            text: text.to_string(),
        }
    }

    fn text(text: String) -> Self {
        Self { kind: RowKind::Text, text }
    }

    fn blank() -> Self {
        Self {
            kind: RowKind::Blank,
            text: String::new(),
        }
    }

    fn control(control: &Control) -> Self {
        Self {
            kind: RowKind::Control(Focusable::Control(control.id.clone()), control.disabled),
            text: format!("  {:<width$}{}", control.label, control_value(control), width = LABEL_WIDTH),
        }
    }

    fn button(button: Button, text: String) -> Self {
        Self {
            kind: RowKind::Button(Focusable::Button(button)),
            text: format!("  {text}"),
        }
    }
}

/// How a control's value reads in the sidebar.
fn control_value(control: &Control) -> String {
    match &control.kind {
        ControlKind::Select { .. } => format!("‹ {} ›", control.value),
        ControlKind::Range { min, max, .. } => format!("{} ({min}-{max})", control.value),
        ControlKind::Number => format!("[{}]", control.value),
        ControlKind::Text => format!("[{}]", control.value),
        ControlKind::Checkbox => String::from(if control.checked { "[x]" } else { "[ ]" }),
    }
}

fn focus_attrs(focus: &FocusRing, target: &Focusable) -> Attr {
    if focus.is_focused(target) { Attr::INVERSE } else { Attr::NONE }
}

fn draw_sidebar(frame: &mut Frame, rows: &[Row], ctx: &ViewContext<'_>) {
    let area = ctx.viewport.sidebar;
    let text = ctx.theme.color("--text");
    let muted = ctx.theme.color("--text-muted");
    let accent = ctx.theme.color("--accent");

    for (offset, row) in rows.iter().enumerate() {
        let y = area.y.saturating_add(offset as u16);
        if y >= area.bottom() {
            break;
        }
        let line = truncate_text(&row.text, area.width.saturating_sub(1));
        let row_rect = CellRect::new(area.x, y, area.width, 1);
        match &row.kind {
            RowKind::Heading => {
                frame.buffer.draw_text(area.x + 1, y, &line, accent, Attr::BOLD, Some(&area));
            }
            RowKind::Text => {
                frame.buffer.draw_text(area.x + 1, y, &line, muted, Attr::NONE, Some(&area));
            }
            RowKind::Blank => {}
            RowKind::Control(target, disabled) => {
                let mut attrs = focus_attrs(ctx.focus, target);
                let fg = if *disabled {
                    attrs |= Attr::DIM;
                    muted
                } else {
                    text
                };
                frame.buffer.draw_text(area.x + 1, y, &line, fg, attrs, Some(&area));
                frame.hit(row_rect, HitTarget::Focus(target.clone()));
            }
            RowKind::Button(target) => {
                let attrs = focus_attrs(ctx.focus, target);
                frame.buffer.draw_text(area.x + 1, y, &line, accent, attrs, Some(&area));
                frame.hit(row_rect, HitTarget::Focus(target.clone()));
            }
        }
    }
}

/// Draw a snippet starting at row `y`. Returns the row after its last line.
fn draw_snippet(frame: &mut Frame, snippet: &Snippet, area: CellRect, mut y: u16, theme: &Theme) -> u16 {
    let theme_colors = theme.code_colors();
    let plain = theme.color("--text");
    let code_bg = theme.color("--code-bg");

    for line in snippet.lines() {
        if y >= area.bottom() {
            break;
        }
        frame.buffer.fill_rect(CellRect::new(area.x, y, area.width, 1), code_bg);
        let mut x = area.x + 1;
        for (kind, token) in line {
            let color = match kind {
                TokenKind::Plain => plain,
                _ => {
                    let configured = snippet.colors().and_then(|c| c.for_kind(kind));
                    let css = configured.or_else(|| theme_colors.for_kind(kind)).unwrap_or_default();
                    Rgba::parse(css).unwrap_or(plain)
                }
            };
            let attrs = if kind == TokenKind::Comment { Attr::ITALIC } else { Attr::NONE };
            x = x.saturating_add(frame.buffer.draw_text(x, y, &token, color, attrs, Some(&area)));
        }
        y += 1;
    }
    y
}

/// Draw one line of text if it fits. Returns the next row.
fn draw_line(frame: &mut Frame, area: CellRect, y: u16, text: &str, fg: Rgba, attrs: Attr) -> u16 {
    if y < area.bottom() {
        frame.buffer.draw_text(area.x, y, text, fg, attrs, Some(&area));
    }
    y.saturating_add(1)
}

fn split_columns(area: CellRect) -> (CellRect, CellRect) {
    let left_width = area.width / 2;
    (
        CellRect::new(area.x, area.y, left_width, area.height),
        CellRect::new(area.x + left_width, area.y, area.width - left_width, area.height),
    )
}

// =============================================================================
// Tests
// =============================================================================
