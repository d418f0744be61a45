//! Taffy Bridge - inline styles to cell rectangles.
//!
//! Reads the live inline styles of either playground, converts them to Taffy
//! styles and runs layout in terminal cells. CSS pixels are scaled to cells
//! with [`Scale`]; horizontal lengths use columns, vertical lengths use rows.
//!
//! Values a browser would reject fall back to the property's initial value.

use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf,
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent, LengthPercentage,
    LengthPercentageAuto, NodeId, Position as TaffyPosition, Rect, Size, Style, TaffyTree,
};

use crate::dom::InlineStyle;
use crate::error::Result;
use crate::playground::{FlexController, FlexItem, PositionController};
use crate::types::{
    AlignContent, AlignItems, AlignSelf, CssLength, FlexDirection, FlexWrap, JustifyContent,
    PositionMode,
};

use super::text_measure::string_width;
use super::types::{CellRect, FlexLayout, PositionLayout, Scale};

/// Size of the positioned child, in cells.
const CHILD_WIDTH: f32 = 14.0;
const CHILD_HEIGHT: f32 = 3.0;
/// Item boxes never get narrower than their label plus this padding.
const ITEM_PADDING: u16 = 4;
const ITEM_MIN_HEIGHT: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

// =============================================================================
// LENGTH CONVERSION
// =============================================================================

fn px_to_cells(px: f32, axis: Axis, scale: Scale) -> f32 {
    match axis {
        Axis::Horizontal => scale.columns(px),
        Axis::Vertical => scale.rows(px),
    }
}

fn to_taffy_dimension(value: &str, axis: Axis, scale: Scale) -> TaffyDimension {
    match CssLength::parse_or_auto(value) {
        CssLength::Auto => TaffyDimension::Auto,
        CssLength::Px(px) => TaffyDimension::Length(px_to_cells(px, axis, scale)),
        CssLength::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_lpa(value: &str, axis: Axis, scale: Scale) -> LengthPercentageAuto {
    match CssLength::parse_or_auto(value) {
        CssLength::Auto => LengthPercentageAuto::Auto,
        CssLength::Px(px) => LengthPercentageAuto::Length(px_to_cells(px, axis, scale)),
        CssLength::Percent(p) => LengthPercentageAuto::Percent(p / 100.0),
    }
}

/// `gap` has no `auto`; anything unparsable is zero.
fn to_taffy_gap(value: &str, axis: Axis, scale: Scale) -> LengthPercentage {
    match CssLength::parse(value) {
        Some(CssLength::Px(px)) if px >= 0.0 => LengthPercentage::Length(px_to_cells(px, axis, scale)),
        Some(CssLength::Percent(p)) if p >= 0.0 => LengthPercentage::Percent(p / 100.0),
        _ => LengthPercentage::Length(0.0),
    }
}

fn border(width: f32) -> Rect<LengthPercentage> {
    Rect {
        left: LengthPercentage::Length(width),
        right: LengthPercentage::Length(width),
        top: LengthPercentage::Length(width),
        bottom: LengthPercentage::Length(width),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> TaffyJustifyContent {
    match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    }
}

fn to_taffy_align_items(align: AlignItems) -> TaffyAlignItems {
    match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::Baseline => TaffyAlignItems::Baseline,
    }
}

fn to_taffy_align_content(align: AlignContent) -> TaffyAlignContent {
    match align {
        AlignContent::Stretch => TaffyAlignContent::Stretch,
        AlignContent::FlexStart => TaffyAlignContent::FlexStart,
        AlignContent::FlexEnd => TaffyAlignContent::FlexEnd,
        AlignContent::Center => TaffyAlignContent::Center,
        AlignContent::SpaceBetween => TaffyAlignContent::SpaceBetween,
        AlignContent::SpaceAround => TaffyAlignContent::SpaceAround,
    }
}

fn to_taffy_align_self(align: AlignSelf) -> Option<TaffyAlignSelf> {
    match align {
        AlignSelf::Auto => None, // defer to the container's align-items
        AlignSelf::Stretch => Some(TaffyAlignSelf::Stretch),
        AlignSelf::FlexStart => Some(TaffyAlignSelf::FlexStart),
        AlignSelf::FlexEnd => Some(TaffyAlignSelf::FlexEnd),
        AlignSelf::Center => Some(TaffyAlignSelf::Center),
        AlignSelf::Baseline => Some(TaffyAlignSelf::Baseline),
    }
}

/// `order` is an integer; anything else is ignored.
fn parse_order(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

/// Non-negative number, or `fallback`.
fn parse_factor(value: &str, fallback: f32) -> f32 {
    match value.trim().parse::<f32>() {
        Ok(n) if n >= 0.0 && n.is_finite() => n,
        _ => fallback,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn container_style(style: &InlineStyle, area: CellRect, scale: Scale) -> Style {
    let direction = FlexDirection::from_css(style.get("flex-direction")).unwrap_or_default();
    let wrap = FlexWrap::from_css(style.get("flex-wrap")).unwrap_or_default();
    let justify = JustifyContent::from_css(style.get("justify-content")).unwrap_or_default();
    let align_items = AlignItems::from_css(style.get("align-items")).unwrap_or_default();
    let align_content = AlignContent::from_css(style.get("align-content")).unwrap_or_default();
    let gap = style.get("gap");

    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(direction),
        flex_wrap: to_taffy_flex_wrap(wrap),
        justify_content: Some(to_taffy_justify_content(justify)),
        align_items: Some(to_taffy_align_items(align_items)),
        align_content: Some(to_taffy_align_content(align_content)),
        gap: Size {
            width: to_taffy_gap(gap, Axis::Horizontal, scale),
            height: to_taffy_gap(gap, Axis::Vertical, scale),
        },
        size: Size {
            width: TaffyDimension::Length(area.width as f32),
            height: TaffyDimension::Length(area.height as f32),
        },
        border: border(1.0),
        ..Default::default()
    }
}

fn item_style(item: &FlexItem, direction: FlexDirection, scale: Scale) -> Style {
    let style = item.style();
    let main_axis = if direction.is_row() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    let align_self = AlignSelf::from_css(style.get("align-self")).unwrap_or_default();

    Style {
        flex_grow: parse_factor(style.get("flex-grow"), 0.0),
        flex_shrink: parse_factor(style.get("flex-shrink"), 1.0),
        flex_basis: to_taffy_dimension(style.get("flex-basis"), main_axis, scale),
        align_self: to_taffy_align_self(align_self),
        min_size: Size {
            width: TaffyDimension::Length((string_width(&item.label()) + ITEM_PADDING) as f32),
            height: TaffyDimension::Length(ITEM_MIN_HEIGHT),
        },
        ..Default::default()
    }
}

fn offsets(style: &InlineStyle, scale: Scale) -> Rect<LengthPercentageAuto> {
    Rect {
        top: to_taffy_lpa(style.get("top"), Axis::Vertical, scale),
        bottom: to_taffy_lpa(style.get("bottom"), Axis::Vertical, scale),
        left: to_taffy_lpa(style.get("left"), Axis::Horizontal, scale),
        right: to_taffy_lpa(style.get("right"), Axis::Horizontal, scale),
    }
}

fn to_cell_rect(origin: (f32, f32), location: taffy::Point<f32>, size: Size<f32>) -> CellRect {
    let x = (origin.0 + location.x).round().max(0.0);
    let y = (origin.1 + location.y).round().max(0.0);
    CellRect::new(
        x as u16,
        y as u16,
        size.width.round().max(0.0) as u16,
        size.height.round().max(0.0) as u16,
    )
}

fn available(area: CellRect) -> Size<AvailableSpace> {
    Size {
        width: AvailableSpace::Definite(area.width as f32),
        height: AvailableSpace::Definite(area.height as f32),
    }
}

// =============================================================================
// FLEX PLAYGROUND
// =============================================================================

/// Lay out the flex container and its items inside `area`.
///
/// Items are placed in `order` order; equal orders keep document order.
pub fn compute_flex_layout(flex: &FlexController, area: CellRect, scale: Scale) -> Result<FlexLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let direction = FlexDirection::from_css(flex.container_style().get("flex-direction")).unwrap_or_default();

    let mut ordered: Vec<&FlexItem> = flex.items().iter().collect();
    ordered.sort_by_key(|item| parse_order(item.style().get("order")));

    let mut nodes: Vec<(u32, NodeId)> = Vec::with_capacity(ordered.len());
    for item in ordered {
        let node = tree.new_leaf(item_style(item, direction, scale))?;
        nodes.push((item.id(), node));
    }

    let children: Vec<NodeId> = nodes.iter().map(|(_, node)| *node).collect();
    let root = tree.new_with_children(container_style(flex.container_style(), area, scale), &children)?;
    tree.compute_layout(root, available(area))?;

    let root_layout = tree.layout(root)?;
    let container = CellRect::new(
        area.x,
        area.y,
        root_layout.size.width.round() as u16,
        root_layout.size.height.round() as u16,
    );

    let origin = (area.x as f32, area.y as f32);
    let mut items = Vec::with_capacity(nodes.len());
    for (id, node) in nodes {
        let layout = tree.layout(node)?;
        items.push((id, to_cell_rect(origin, layout.location, layout.size)));
    }

    Ok(FlexLayout { container, items })
}

// =============================================================================
// POSITION PLAYGROUND
// =============================================================================

/// Lay out the parent and the positioned child inside `area`.
///
/// The stage (`area`) stands in for the viewport and the initial containing
/// block. An absolute child escapes a static parent and lands on the stage;
/// a fixed child always does. Sticky boxes never scroll here, so they stay
/// in their normal-flow position.
pub fn compute_position_layout(
    position: &PositionController,
    area: CellRect,
    scale: Scale,
) -> Result<PositionLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let child_css = position.child_style();
    let mode = position.position_mode();

    let mut child = Style {
        size: Size {
            width: TaffyDimension::Length(CHILD_WIDTH),
            height: TaffyDimension::Length(CHILD_HEIGHT),
        },
        flex_shrink: 0.0,
        ..Default::default()
    };
    match mode {
        PositionMode::Static | PositionMode::Sticky => {}
        PositionMode::Relative => child.inset = offsets(child_css, scale),
        PositionMode::Absolute | PositionMode::Fixed => {
            child.position = TaffyPosition::Absolute;
            child.inset = offsets(child_css, scale);
        }
    }
    let child_node = tree.new_leaf(child)?;

    let on_stage = match mode {
        PositionMode::Fixed => true,
        PositionMode::Absolute => !position.parent_relative(),
        _ => false,
    };

    let parent = Style {
        display: Display::Flex,
        flex_direction: TaffyFlexDirection::Column,
        align_items: Some(TaffyAlignItems::FlexStart),
        flex_grow: 1.0,
        margin: Rect {
            left: LengthPercentageAuto::Length(2.0),
            right: LengthPercentageAuto::Length(2.0),
            top: LengthPercentageAuto::Length(1.0),
            bottom: LengthPercentageAuto::Length(1.0),
        },
        border: border(1.0),
        ..Default::default()
    };
    let parent_children = if on_stage { vec![] } else { vec![child_node] };
    let parent_node = tree.new_with_children(parent, &parent_children)?;

    let stage = Style {
        display: Display::Flex,
        size: Size {
            width: TaffyDimension::Length(area.width as f32),
            height: TaffyDimension::Length(area.height as f32),
        },
        ..Default::default()
    };
    let stage_children: Vec<NodeId> = if on_stage {
        vec![parent_node, child_node]
    } else {
        vec![parent_node]
    };
    let stage_node = tree.new_with_children(stage, &stage_children)?;
    tree.compute_layout(stage_node, available(area))?;

    let stage_origin = (area.x as f32, area.y as f32);
    let parent_layout = tree.layout(parent_node)?;
    let parent_rect = to_cell_rect(stage_origin, parent_layout.location, parent_layout.size);

    let child_origin = if on_stage {
        stage_origin
    } else {
        (
            stage_origin.0 + parent_layout.location.x,
            stage_origin.1 + parent_layout.location.y,
        )
    };
    let child_layout = tree.layout(child_node)?;
    let child_rect = to_cell_rect(child_origin, child_layout.location, child_layout.size);

    Ok(PositionLayout {
        parent: parent_rect,
        child: child_rect,
        child_on_stage: on_stage,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PositionDefaults;
    use crate::controls::EventKind;
    use crate::playground::ClickTarget;
    use crate::theme::{Appearance, ColorScheme, ThemeSet};

    const AREA: CellRect = CellRect {
        x: 0,
        y: 0,
        width: 60,
        height: 12,
    };

    fn flex() -> FlexController {
        FlexController::default()
    }

    fn position() -> PositionController {
        PositionController::new(
            PositionDefaults::default(),
            ThemeSet::default(),
            Appearance::new(ColorScheme::Dark),
        )
    }

    fn rect_of(layout: &FlexLayout, id: u32) -> CellRect {
        layout.rect_of(id).unwrap()
    }

    #[test]
    fn test_dimension_conversion() {
        let scale = Scale::default();
        assert!(matches!(
            to_taffy_dimension("auto", Axis::Horizontal, scale),
            TaffyDimension::Auto
        ));
        assert!(matches!(
            to_taffy_dimension("50px", Axis::Horizontal, scale),
            TaffyDimension::Length(w) if (w - 10.0).abs() < f32::EPSILON
        ));
        assert!(matches!(
            to_taffy_dimension("50px", Axis::Vertical, scale),
            TaffyDimension::Length(h) if (h - 5.0).abs() < f32::EPSILON
        ));
        if let TaffyDimension::Percent(p) = to_taffy_dimension("50%", Axis::Vertical, scale) {
            assert!((p - 0.5).abs() < 0.001);
        } else {
            panic!("Expected Percent variant");
        }
        assert!(matches!(
            to_taffy_dimension("wide", Axis::Horizontal, scale),
            TaffyDimension::Auto
        ));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_order("-2"), -2);
        assert_eq!(parse_order("1.5"), 0);
        assert_eq!(parse_factor("2", 0.0), 2.0);
        assert_eq!(parse_factor("-1", 1.0), 1.0);
        assert_eq!(parse_factor("", 1.0), 1.0);
    }

    #[test]
    fn test_default_row() {
        let layout = compute_flex_layout(&flex(), AREA, Scale::default()).unwrap();
        assert_eq!(layout.container, AREA);

        let one = rect_of(&layout, 1);
        let two = rect_of(&layout, 2);
        let three = rect_of(&layout, 3);
        assert_eq!((one.x, one.y), (1, 1));
        // 10px gap is two columns
        assert_eq!(two.x, one.x + one.width + 2);
        assert!(three.x > two.x);
        // stretched across the cross axis
        assert_eq!(one.height, AREA.height - 2);
    }

    #[test]
    fn test_column_direction() {
        let mut flex = flex();
        flex.handle_control_event("flex-direction", EventKind::Change, "column".into())
            .unwrap();
        flex.handle_control_event("gap", EventKind::Input, "0".into()).unwrap();
        let layout = compute_flex_layout(&flex, AREA, Scale::default()).unwrap();
        let one = rect_of(&layout, 1);
        let two = rect_of(&layout, 2);
        assert_eq!(one.x, two.x);
        assert_eq!(two.y, one.y + one.height);
    }

    #[test]
    fn test_order_moves_item_last() {
        let mut flex = flex();
        flex.select_item(ClickTarget::Item(1));
        flex.handle_control_event("order", EventKind::Input, "1".into()).unwrap();

        let layout = compute_flex_layout(&flex, AREA, Scale::default()).unwrap();
        assert_eq!(layout.items.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![2, 3, 1]);
        assert!(rect_of(&layout, 1).x > rect_of(&layout, 3).x);
    }

    #[test]
    fn test_flex_grow_fills_free_space() {
        let mut flex = flex();
        flex.select_item(ClickTarget::Item(2));
        flex.handle_control_event("flex-grow", EventKind::Input, "1".into()).unwrap();

        let layout = compute_flex_layout(&flex, AREA, Scale::default()).unwrap();
        let three = rect_of(&layout, 3);
        assert_eq!(three.x + three.width, AREA.width - 1);
    }

    #[test]
    fn test_justify_center() {
        let mut flex = flex();
        flex.handle_control_event("justify-content", EventKind::Change, "center".into())
            .unwrap();
        let layout = compute_flex_layout(&flex, AREA, Scale::default()).unwrap();
        let one = rect_of(&layout, 1);
        let three = rect_of(&layout, 3);
        let left = one.x - 1;
        let right = (AREA.width - 1) - (three.x + three.width);
        assert!(left.abs_diff(right) <= 1);
    }

    #[test]
    fn test_hit_testing() {
        let layout = compute_flex_layout(&flex(), AREA, Scale::default()).unwrap();
        let two = rect_of(&layout, 2);
        assert_eq!(layout.item_at(two.x, two.y), Some(2));
        assert_eq!(layout.item_at(AREA.width - 2, 2), None);
    }

    #[test]
    fn test_static_child_ignores_offsets() {
        let mut pos = position();
        pos.handle_control_event("top", EventKind::Input, "30px".into()).unwrap();
        let layout = compute_position_layout(&pos, AREA, Scale::default()).unwrap();
        assert_eq!((layout.parent.x, layout.parent.y), (2, 1));
        assert_eq!((layout.child.x, layout.child.y), (3, 2));
        assert!(!layout.child_on_stage);
    }

    #[test]
    fn test_relative_child_is_shifted() {
        let mut pos = position();
        pos.handle_control_event("position", EventKind::Change, "relative".into())
            .unwrap();
        pos.handle_control_event("top", EventKind::Input, "10px".into()).unwrap();
        pos.handle_control_event("left", EventKind::Input, "10px".into()).unwrap();
        let layout = compute_position_layout(&pos, AREA, Scale::default()).unwrap();
        assert_eq!((layout.child.x, layout.child.y), (5, 3));
    }

    #[test]
    fn test_absolute_child_needs_relative_parent() {
        let mut pos = position();
        pos.handle_control_event("position", EventKind::Change, "absolute".into())
            .unwrap();
        pos.handle_control_event("top", EventKind::Input, "10px".into()).unwrap();
        pos.handle_control_event("left", EventKind::Input, "10px".into()).unwrap();

        let escaped = compute_position_layout(&pos, AREA, Scale::default()).unwrap();
        assert!(escaped.child_on_stage);
        assert_eq!((escaped.child.x, escaped.child.y), (2, 1));

        pos.handle_control_event("parent-position", EventKind::Change, true.into())
            .unwrap();
        let contained = compute_position_layout(&pos, AREA, Scale::default()).unwrap();
        assert!(!contained.child_on_stage);
        assert_eq!((contained.child.x, contained.child.y), (5, 3));
    }

    #[test]
    fn test_fixed_child_ignores_relative_parent() {
        let mut pos = position();
        pos.handle_control_event("parent-position", EventKind::Change, true.into())
            .unwrap();
        pos.handle_control_event("position", EventKind::Change, "fixed".into())
            .unwrap();
        let layout = compute_position_layout(&pos, AREA, Scale::default()).unwrap();
        assert!(layout.child_on_stage);
    }
}
