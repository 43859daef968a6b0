//! fxFill / fxFlexFill: stretch an element over its container
//!
//! Not responsive; the styles are applied once when the directive attaches.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::{Feature, InputBinding};
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::InputValue;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::FLEX_FILL, &["fxFill", "fxFlexFill"]).non_responsive();

#[derive(Debug, Clone, Copy, Default)]
pub struct FlexFillStyleBuilder;

impl StyleBuilder for FlexFillStyleBuilder {
    type Parent = ();

    fn build_styles(&self, _input: &str, _parent: &()) -> StyleDefinition {
        StyleDefinition::new()
            .with("margin", 0)
            .with("width", "100%")
            .with("height", "100%")
            .with("min-width", "100%")
            .with("min-height", "100%")
    }
}

#[derive(Debug)]
pub struct FlexFillDirective {
    base: BaseDirective<FlexFillStyleBuilder>,
}

impl FlexFillDirective {
    pub fn new(element: NodeId) -> Self {
        Self { base: BaseDirective::new(element, keys::FLEX_FILL, FlexFillStyleBuilder) }
    }
}

impl ResponsiveDirective for FlexFillDirective {
    fn key(&self) -> DirectiveKey {
        keys::FLEX_FILL
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.add_styles(ctx, "", keys::FLEX_FILL, &());
    }

    fn set_input(&mut self, _ctx: &mut DirectiveContext<'_>, _binding: &InputBinding, _value: InputValue) {}

    fn update_with_value(&mut self, _ctx: &mut DirectiveContext<'_>, _value: Option<&InputValue>) {}

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(FlexFillDirective::new(element))
}
