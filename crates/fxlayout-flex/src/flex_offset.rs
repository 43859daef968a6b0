//! fxFlexOffset
//!
//! Offsets a flex item with a leading margin. The margin side follows the
//! parent's flow and the document direction.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::{ElementMatcher, InputValue, Subscriber, Trigger};
use fxlayout_core::utils::{is_flow_horizontal, multiply};
use fxlayout_core::{LayoutConfig, Multiplier, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::FLEX_OFFSET, &["fxFlexOffset"]);

/// Sides an offset may be written to; the unused ones are cleared
const OFFSET_SIDES: [&str; 3] = ["margin-left", "margin-right", "margin-top"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexOffsetParent {
    pub layout: String,
    pub is_rtl: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FlexOffsetStyleBuilder {
    multiplier: Option<Multiplier>,
}

impl FlexOffsetStyleBuilder {
    pub fn new(config: &LayoutConfig) -> Self {
        Self { multiplier: config.multiplier.clone() }
    }
}

impl StyleBuilder for FlexOffsetStyleBuilder {
    type Parent = FlexOffsetParent;

    fn build_styles(&self, input: &str, parent: &FlexOffsetParent) -> StyleDefinition {
        let input = if input.is_empty() { "0" } else { input };
        let mut offset = multiply(input, self.multiplier.as_ref());

        let is_percent = offset.contains('%');
        let is_px = offset.contains("px");
        if !is_px && !is_percent && offset.trim().parse::<f64>().is_ok_and(f64::is_finite) {
            offset.push('%');
        }

        let property = if !is_flow_horizontal(&parent.layout) {
            "margin-top"
        } else if parent.is_rtl {
            "margin-right"
        } else {
            "margin-left"
        };
        let mut css = StyleDefinition::new();
        for side in OFFSET_SIDES {
            css.clear(side);
        }
        css.with(property, offset)
    }
}

#[derive(Debug)]
pub struct FlexOffsetDirective {
    base: BaseDirective<FlexOffsetStyleBuilder>,
}

impl FlexOffsetDirective {
    pub fn new(element: NodeId, config: &LayoutConfig) -> Self {
        Self { base: BaseDirective::new(element, keys::FLEX_OFFSET, FlexOffsetStyleBuilder::new(config)) }
    }
}

impl ResponsiveDirective for FlexOffsetDirective {
    fn key(&self) -> DirectiveKey {
        keys::FLEX_OFFSET
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[Trigger::Directionality]);
        let element = self.element();
        if let Some(parent) = ctx.parent_element(element) {
            ctx.marshal.track_value(parent, keys::LAYOUT_GAP, Subscriber { element, key: keys::FLEX_OFFSET });
        }
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let layout = match ctx.parent_element(self.element()) {
            Some(parent) => self.base.get_flex_flow_direction(ctx, parent, true),
            None => "row".to_string(),
        };
        let is_rtl = ctx.direction.is_rtl();
        let axis = if is_flow_horizontal(&layout) { "row" } else { "column" };
        let scope = format!("flex-offset-{}-{}", axis, ctx.direction.as_str());

        let input = InputValue::text_of(value);
        self.base.add_styles(ctx, &input, &scope, &FlexOffsetParent { layout, is_rtl });
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }

    fn on_tracked_change(&mut self, ctx: &mut DirectiveContext<'_>, change: &ElementMatcher) {
        if change.key == keys::LAYOUT_GAP {
            self.base.trigger_update(ctx);
        }
    }
}

pub fn create(element: NodeId, config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(FlexOffsetDirective::new(element, config))
}
