//! fxLayoutGap
//!
//! Spaces the children of a flex container. Plain gaps put a margin on
//! every visible child but the last; a value ending in ` grid` pads the
//! children and pulls the container back with a negative margin instead.
//! Children are re-evaluated whenever the child list changes.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, SideEffect, StyleBuilder};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::{ElementMatcher, InputValue, Subscriber, Trigger};
use fxlayout_core::utils::{LAYOUT_VALUES, multiply};
use fxlayout_core::{Direction, LayoutConfig, Multiplier, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::LAYOUT_GAP, &["fxLayoutGap"]);

pub const GRID_SPECIFIER: &str = " grid";

const MARGINS: [&str; 4] = ["margin-left", "margin-right", "margin-top", "margin-bottom"];

/// Container context for a gap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGapParent {
    pub directionality: Direction,
    /// Visible children, in display order
    pub items: Vec<NodeId>,
    pub layout: String,
}

#[derive(Debug, Clone)]
pub struct LayoutGapStyleBuilder {
    multiplier: Option<Multiplier>,
    default_unit: String,
}

impl LayoutGapStyleBuilder {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            multiplier: config.multiplier.clone(),
            default_unit: config.default_unit.clone(),
        }
    }

    /// Unitless numbers get the default unit
    fn with_default_unit(&self, value: String) -> String {
        if !value.is_empty() && value.parse::<f64>().is_ok_and(f64::is_finite) {
            format!("{}{}", value, self.default_unit)
        } else {
            value
        }
    }
}

fn grid_value(input: &str) -> Option<&str> {
    input.strip_suffix(GRID_SPECIFIER)
}

/// `(between, below)` of a grid gap; `below` defaults to `between`
fn split_grid_gap(value: &str) -> (&str, &str) {
    let mut parts = value.split(' ');
    let between = parts.next().unwrap_or_default();
    let below = parts.next().filter(|b| !b.is_empty()).unwrap_or(between);
    (between, below)
}

fn grid_margin(value: &str, direction: Direction) -> StyleDefinition {
    let (between, below) = split_grid_gap(value);
    let (right, left) = if direction.is_rtl() {
        ("0px".to_string(), format!("-{}", between))
    } else {
        (format!("-{}", between), "0px".to_string())
    };
    StyleDefinition::new().with("margin", format!("0px {} -{} {}", right, below, left))
}

fn grid_padding(value: &str, direction: Direction) -> StyleDefinition {
    let (between, below) = split_grid_gap(value);
    let (right, left) = if direction.is_rtl() { ("0px", between) } else { (between, "0px") };
    StyleDefinition::new().with("padding", format!("0px {} {} {}", right, below, left))
}

/// Margin side that separates consecutive children
pub fn margin_type(direction: Direction, layout: &str) -> &'static str {
    match (layout, direction.is_rtl()) {
        ("column", _) => "margin-bottom",
        ("column-reverse", _) => "margin-top",
        ("row-reverse", false) => "margin-left",
        ("row-reverse", true) => "margin-right",
        (_, true) => "margin-left",
        (_, false) => "margin-right",
    }
}

fn cleared_margins() -> StyleDefinition {
    let mut css = StyleDefinition::new();
    for margin in MARGINS {
        css.clear(margin);
    }
    css
}

impl StyleBuilder for LayoutGapStyleBuilder {
    type Parent = LayoutGapParent;

    fn build_styles(&self, input: &str, parent: &LayoutGapParent) -> StyleDefinition {
        match grid_value(input) {
            Some(gap) => grid_margin(&multiply(gap, self.multiplier.as_ref()), parent.directionality),
            None => StyleDefinition::new(),
        }
    }

    fn side_effects(&self) -> Option<&dyn SideEffect<LayoutGapParent>> {
        Some(self)
    }
}

impl SideEffect<LayoutGapParent> for LayoutGapStyleBuilder {
    fn side_effect(&self, ctx: &mut DirectiveContext<'_>, input: &str, _styles: &StyleDefinition, parent: &LayoutGapParent) {
        if let Some(gap) = grid_value(input) {
            let gap = multiply(gap, self.multiplier.as_ref());
            let padding = grid_padding(&gap, parent.directionality);
            ctx.styler.apply_style_to_elements(ctx.dom, &padding, &parent.items);
            return;
        }

        let Some((&last, items)) = parent.items.split_last() else {
            return;
        };
        let gap = self.with_default_unit(multiply(input, self.multiplier.as_ref()));
        let mut gap_css = cleared_margins();
        gap_css.set(margin_type(parent.directionality, &parent.layout), gap);

        ctx.styler.apply_style_to_elements(ctx.dom, &gap_css, items);
        ctx.styler.apply_style_to_elements(ctx.dom, &cleared_margins(), &[last]);
    }
}

#[derive(Debug)]
pub struct LayoutGapDirective {
    base: BaseDirective<LayoutGapStyleBuilder>,
    /// Direction of the element's own layout
    layout: String,
}

impl LayoutGapDirective {
    pub fn new(element: NodeId, config: &LayoutConfig) -> Self {
        Self {
            base: BaseDirective::new(element, keys::LAYOUT_GAP, LayoutGapStyleBuilder::new(config)),
            layout: "row".to_string(),
        }
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// Whether a child takes part in the gap
    fn will_display(ctx: &DirectiveContext<'_>, child: NodeId) -> bool {
        match ctx.marshal.get_value(child, keys::SHOW_HIDE) {
            Some(value) => value == InputValue::Bool(true),
            None => ctx.styler.lookup_style(ctx.dom, child, "display", false) != "none",
        }
    }

    /// Visible element children, stably sorted by their `order`
    fn visible_children(&self, ctx: &DirectiveContext<'_>) -> Vec<NodeId> {
        let mut items: Vec<(NodeId, f64)> = ctx.dom.element_children(self.element())
            .into_iter()
            .filter(|&child| Self::will_display(ctx, child))
            .map(|child| {
                let order = ctx.styler.lookup_style(ctx.dom, child, "order", false)
                    .parse::<f64>()
                    .ok()
                    .filter(|o| o.is_finite())
                    .unwrap_or(0.0);
                (child, order)
            })
            .collect();
        items.sort_by(|a, b| a.1.total_cmp(&b.1));
        items.into_iter().map(|(child, _)| child).collect()
    }
}

impl ResponsiveDirective for LayoutGapDirective {
    fn key(&self) -> DirectiveKey {
        keys::LAYOUT_GAP
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[Trigger::Directionality, Trigger::ChildList]);
        let element = self.element();
        ctx.marshal.track_value(element, keys::LAYOUT, Subscriber { element, key: keys::LAYOUT_GAP });
    }

    fn after_init(&mut self, ctx: &mut DirectiveContext<'_>) {
        ctx.dom.observe(self.element());
        self.base.trigger_update(ctx);
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let items = self.visible_children(ctx);
        if items.is_empty() {
            return;
        }
        tracing::trace!("{:?}: gap over {} children", self.element(), items.len());
        let directionality = ctx.direction;
        let scope = format!("layout-gap-{}-{}", self.layout, directionality.as_str());
        let input = InputValue::text_of(value);
        let parent = LayoutGapParent { directionality, items, layout: self.layout.clone() };
        self.base.add_styles(ctx, &input, &scope, &parent);
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        let grid_mode = !self.base.mru().is_empty();
        let property = if grid_mode { "padding" } else { margin_type(ctx.direction, &self.layout) };
        if grid_mode {
            self.base.clear_styles(ctx);
        }

        let mut cleared = StyleDefinition::new();
        cleared.clear(property);
        let children = ctx.dom.element_children(self.element());
        ctx.styler.apply_style_to_elements(ctx.dom, &cleared, &children);
    }

    fn on_tracked_change(&mut self, ctx: &mut DirectiveContext<'_>, change: &ElementMatcher) {
        if change.key == keys::LAYOUT && change.element == self.element() {
            let value = InputValue::text_of(change.value.as_ref());
            let layout = value.split(' ').next().unwrap_or_default();
            self.layout = if LAYOUT_VALUES.contains(&layout) { layout.to_string() } else { "row".to_string() };
            self.base.trigger_update(ctx);
        }
    }

    fn destroy(&mut self, ctx: &mut DirectiveContext<'_>) {
        ctx.dom.disconnect(self.element());
        ctx.marshal.release_element(self.element());
    }
}

pub fn create(element: NodeId, config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(LayoutGapDirective::new(element, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_type() {
        assert_eq!(margin_type(Direction::Ltr, "row"), "margin-right");
        assert_eq!(margin_type(Direction::Rtl, "row"), "margin-left");
        assert_eq!(margin_type(Direction::Ltr, "row-reverse"), "margin-left");
        assert_eq!(margin_type(Direction::Rtl, "row-reverse"), "margin-right");
        assert_eq!(margin_type(Direction::Rtl, "column"), "margin-bottom");
        assert_eq!(margin_type(Direction::Ltr, "column-reverse"), "margin-top");
        assert_eq!(margin_type(Direction::Ltr, ""), "margin-right");
    }

    #[test]
    fn test_plain_gap_has_no_host_styles() {
        let b = LayoutGapStyleBuilder::new(&LayoutConfig::default());
        let parent = LayoutGapParent { directionality: Direction::Ltr, items: Vec::new(), layout: "row".into() };
        assert!(b.build_styles("10px", &parent).is_empty());
    }

    #[test]
    fn test_grid_margin() {
        let b = LayoutGapStyleBuilder::new(&LayoutConfig::default());
        let mut parent = LayoutGapParent { directionality: Direction::Ltr, items: Vec::new(), layout: "row".into() };
        let css = b.build_styles("10px grid", &parent);
        assert_eq!(css.text("margin").as_deref(), Some("0px -10px -10px 0px"));

        let css = b.build_styles("10px 20px grid", &parent);
        assert_eq!(css.text("margin").as_deref(), Some("0px -10px -20px 0px"));

        parent.directionality = Direction::Rtl;
        let css = b.build_styles("10px 20px grid", &parent);
        assert_eq!(css.text("margin").as_deref(), Some("0px 0px -20px -10px"));
    }

    #[test]
    fn test_grid_padding() {
        assert_eq!(grid_padding("5px", Direction::Ltr).text("padding").as_deref(), Some("0px 5px 5px 0px"));
        assert_eq!(grid_padding("5px 8px", Direction::Rtl).text("padding").as_deref(), Some("0px 0px 8px 5px"));
    }

    #[test]
    fn test_default_unit() {
        let b = LayoutGapStyleBuilder::new(&LayoutConfig::default());
        assert_eq!(b.with_default_unit("12".into()), "12px");
        assert_eq!(b.with_default_unit("1em".into()), "1em");
        assert_eq!(b.with_default_unit(String::new()), "");
    }
}
