//! fxLayoutAlign
//!
//! `<main-axis> <cross-axis>` alignment of a flex container. The builder
//! also writes the container styles, so the element's own `fxLayout` value
//! is tracked for direction and inline-ness.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::Feature;
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::{ElementMatcher, InputValue, Subscriber};
use fxlayout_core::utils::{LAYOUT_VALUES, is_flow_horizontal};
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::LAYOUT_ALIGN, &["fxLayoutAlign"]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutAlignParent {
    pub layout: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutAlignStyleBuilder;

impl StyleBuilder for LayoutAlignStyleBuilder {
    type Parent = LayoutAlignParent;

    fn build_styles(&self, align: &str, parent: &LayoutAlignParent) -> StyleDefinition {
        let mut parts = align.split(' ');
        let main_axis = parts.next().unwrap_or_default();
        let cross_axis = parts.next().unwrap_or_default();
        let mut css = StyleDefinition::new();

        let justify = match main_axis {
            "center" | "space-around" | "space-between" | "space-evenly" => main_axis,
            "end" | "flex-end" => "flex-end",
            _ => "flex-start",
        };
        css.set("justify-content", justify);

        let (items, content) = match cross_axis {
            "start" | "flex-start" => ("flex-start", "flex-start"),
            "center" => ("center", "center"),
            "end" | "flex-end" => ("flex-end", "flex-end"),
            "space-between" => ("stretch", "space-between"),
            "space-around" => ("stretch", "space-around"),
            "baseline" => ("baseline", "stretch"),
            _ => ("stretch", "stretch"),
        };
        css.set("align-items", items);
        css.set("align-content", content);

        css.set("display", if parent.inline { "inline-flex" } else { "flex" });
        css.set("flex-direction", parent.layout.as_str());
        css.set("box-sizing", "border-box");

        let horizontal = is_flow_horizontal(&parent.layout);
        let stretched = cross_axis == "stretch";
        if stretched && !horizontal {
            css.set("max-width", "100%");
        } else {
            css.clear("max-width");
        }
        if stretched && horizontal {
            css.set("max-height", "100%");
        } else {
            css.clear("max-height");
        }
        css
    }
}

#[derive(Debug)]
pub struct LayoutAlignDirective {
    base: BaseDirective<LayoutAlignStyleBuilder>,
    /// Direction of the element's own layout
    layout: String,
    inline: bool,
}

impl LayoutAlignDirective {
    pub fn new(element: NodeId) -> Self {
        Self {
            base: BaseDirective::new(element, keys::LAYOUT_ALIGN, LayoutAlignStyleBuilder),
            layout: String::new(),
            inline: false,
        }
    }

    fn on_layout_change(&mut self, ctx: &mut DirectiveContext<'_>, value: &str) {
        let layout = value.split(' ').next().unwrap_or_default();
        self.layout = if LAYOUT_VALUES.contains(&layout) { layout.to_string() } else { "row".to_string() };
        self.inline = value.contains("inline");
        self.base.trigger_update(ctx);
    }
}

impl ResponsiveDirective for LayoutAlignDirective {
    fn key(&self) -> DirectiveKey {
        keys::LAYOUT_ALIGN
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[]);
        let element = self.element();
        ctx.marshal.track_value(element, keys::LAYOUT, Subscriber { element, key: keys::LAYOUT_ALIGN });
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let layout = if self.layout.is_empty() { "row".to_string() } else { self.layout.clone() };
        let scope = format!("layout-align-{}-{}", layout, if self.inline { "inline" } else { "block" });
        let input = InputValue::text_of(value);
        let parent = LayoutAlignParent { layout, inline: self.inline };
        self.base.add_styles(ctx, &input, &scope, &parent);
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }

    fn on_tracked_change(&mut self, ctx: &mut DirectiveContext<'_>, change: &ElementMatcher) {
        if change.key == keys::LAYOUT {
            let value = InputValue::text_of(change.value.as_ref());
            self.on_layout_change(ctx, &value);
        }
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(LayoutAlignDirective::new(element))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> LayoutAlignParent {
        LayoutAlignParent { layout: "row".into(), inline: false }
    }

    fn column() -> LayoutAlignParent {
        LayoutAlignParent { layout: "column".into(), inline: false }
    }

    #[test]
    fn test_main_axis() {
        let b = LayoutAlignStyleBuilder;
        let justify = |input: &str| b.build_styles(input, &row()).text("justify-content").unwrap_or_default();
        assert_eq!(justify("center"), "center");
        assert_eq!(justify("space-evenly"), "space-evenly");
        assert_eq!(justify("end"), "flex-end");
        assert_eq!(justify("start"), "flex-start");
        assert_eq!(justify(""), "flex-start");
    }

    #[test]
    fn test_cross_axis() {
        let b = LayoutAlignStyleBuilder;
        let css = b.build_styles("start center", &row());
        assert_eq!(css.text("align-items").as_deref(), Some("center"));
        assert_eq!(css.text("align-content").as_deref(), Some("center"));

        let css = b.build_styles("start baseline", &row());
        assert_eq!(css.text("align-items").as_deref(), Some("baseline"));
        assert_eq!(css.text("align-content").as_deref(), Some("stretch"));

        let css = b.build_styles("start space-between", &row());
        assert_eq!(css.text("align-items").as_deref(), Some("stretch"));
        assert_eq!(css.text("align-content").as_deref(), Some("space-between"));
    }

    #[test]
    fn test_stretch_bounds_cross_axis() {
        let b = LayoutAlignStyleBuilder;
        let css = b.build_styles("center stretch", &row());
        assert_eq!(css.text("max-height").as_deref(), Some("100%"));
        assert!(css.is_cleared("max-width"));

        let css = b.build_styles("center stretch", &column());
        assert_eq!(css.text("max-width").as_deref(), Some("100%"));
        assert!(css.is_cleared("max-height"));

        // Only an explicit stretch bounds the container
        let css = b.build_styles("center", &row());
        assert!(css.is_cleared("max-height"));
    }

    #[test]
    fn test_container_styles() {
        let parent = LayoutAlignParent { layout: "column".into(), inline: true };
        let css = LayoutAlignStyleBuilder.build_styles("center center", &parent);
        assert_eq!(css.text("display").as_deref(), Some("inline-flex"));
        assert_eq!(css.text("flex-direction").as_deref(), Some("column"));
        assert_eq!(css.text("box-sizing").as_deref(), Some("border-box"));
    }
}
