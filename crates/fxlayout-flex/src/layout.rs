//! fxLayout: make an element a flex container

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::InputValue;
use fxlayout_core::utils::build_layout_css;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::LAYOUT, &["fxLayout"]);

/// Display the element had before the layout applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutParent {
    pub display: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutStyleBuilder;

impl StyleBuilder for LayoutStyleBuilder {
    type Parent = LayoutParent;

    fn build_styles(&self, input: &str, parent: &LayoutParent) -> StyleDefinition {
        let mut css = build_layout_css(input);
        if parent.display == "none" {
            css.set("display", "none");
        }
        css
    }
}

#[derive(Debug)]
pub struct LayoutDirective {
    base: BaseDirective<LayoutStyleBuilder>,
}

impl LayoutDirective {
    pub fn new(element: NodeId) -> Self {
        Self { base: BaseDirective::new(element, keys::LAYOUT, LayoutStyleBuilder) }
    }
}

impl ResponsiveDirective for LayoutDirective {
    fn key(&self) -> DirectiveKey {
        keys::LAYOUT
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[]);
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let display = if ctx.config().detect_layout_display {
            ctx.styler.lookup_style(ctx.dom, self.element(), "display", false)
        } else {
            String::new()
        };
        let scope = format!("layout-{}", display);
        let input = InputValue::text_of(value);
        self.base.update_with_value(ctx, &input, &scope, &LayoutParent { display });
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(LayoutDirective::new(element))
}
