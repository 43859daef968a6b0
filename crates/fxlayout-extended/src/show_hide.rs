//! fxShow / fxHide
//!
//! Toggles `display` between `none` and the element's original display.
//! The original is recorded once per element in the shared display map, so
//! it survives the directive hiding the element. Containers driven by
//! `fxLayout`, or holding `fxFlex` children, show as `flex`.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::{Feature, InputBinding};
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::{ElementMatcher, InputValue, Subscriber};
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::SHOW_HIDE, &["fxShow", "fxHide"]).with_print();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowHideParent {
    /// Display to restore when shown
    pub display: String,
    pub is_server: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowHideStyleBuilder;

impl StyleBuilder for ShowHideStyleBuilder {
    type Parent = ShowHideParent;

    fn build_styles(&self, show: &str, parent: &ShowHideParent) -> StyleDefinition {
        let display = if show != "true" {
            "none"
        } else if !parent.display.is_empty() {
            parent.display.as_str()
        } else if parent.is_server {
            "initial"
        } else {
            ""
        };
        StyleDefinition::new().with("display", display)
    }
}

/// Whether an input value means "show"; `fxHide` inverts it
pub fn should_show(input: &str, value: &InputValue) -> bool {
    let show = match value {
        InputValue::Bool(b) => *b,
        other => match other.as_text().trim() {
            "" => true,
            "0" => false,
            text => text != "false",
        },
    };
    if input == "fxHide" { !show } else { show }
}

#[derive(Debug)]
pub struct ShowHideDirective {
    base: BaseDirective<ShowHideStyleBuilder>,
    display: String,
    has_layout: bool,
    has_flex_child: bool,
}

impl ShowHideDirective {
    pub fn new(element: NodeId) -> Self {
        Self {
            base: BaseDirective::new(element, keys::SHOW_HIDE, ShowHideStyleBuilder),
            display: String::new(),
            has_layout: false,
            has_flex_child: false,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    fn display_style(&self, ctx: &DirectiveContext<'_>) -> String {
        if self.has_layout || (self.has_flex_child && ctx.config().add_flex_to_parent) {
            "flex".to_string()
        } else {
            ctx.styler.lookup_style(ctx.dom, self.element(), "display", true)
        }
    }
}

impl ResponsiveDirective for ShowHideDirective {
    fn key(&self) -> DirectiveKey {
        keys::SHOW_HIDE
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[]);
        let element = self.element();
        let me = Subscriber { element, key: keys::SHOW_HIDE };
        ctx.marshal.track_value(element, keys::LAYOUT, me);
        ctx.marshal.track_value(element, keys::LAYOUT_ALIGN, me);
    }

    fn set_input(&mut self, ctx: &mut DirectiveContext<'_>, binding: &InputBinding, value: InputValue) {
        if let Some(alias) = &binding.breakpoint {
            let show = should_show(binding.input, &value);
            self.base.set_value(ctx, InputValue::Bool(show), alias);
        }
    }

    fn after_init(&mut self, ctx: &mut DirectiveContext<'_>) {
        let element = self.element();
        self.has_layout = ctx.marshal.has_value(element, keys::LAYOUT);
        self.has_flex_child = ctx.dom.element_children(element)
            .into_iter()
            .any(|child| ctx.marshal.has_value(child, keys::FLEX));

        self.display = match ctx.caches.display_of(element) {
            Some(display) => display.to_string(),
            None => {
                let display = self.display_style(ctx);
                ctx.caches.record_display(element, &display);
                display
            }
        };

        let default = ctx.marshal.get_value_for(element, keys::SHOW_HIDE, "");
        if default.is_none_or(|value| value.as_text().is_empty()) {
            self.base.set_value(ctx, InputValue::Bool(true), "");
        } else {
            self.base.trigger_update(ctx);
        }
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let show = match value {
            None => true,
            Some(InputValue::Bool(b)) => *b,
            Some(other) => {
                let text = other.as_text();
                if text.is_empty() {
                    return;
                }
                text != "false"
            }
        };

        let is_server = ctx.is_server();
        let scope = format!("show-hide-{}-{}", self.display, if is_server { "server" } else { "browser" });
        let parent = ShowHideParent { display: self.display.clone(), is_server };
        self.base.add_styles(ctx, if show { "true" } else { "false" }, &scope, &parent);

        let element = self.element();
        if is_server && ctx.config().server_loaded {
            ctx.dom.set_style_property(element, "display", "");
        }
        if let Some(parent) = ctx.parent_element(element) {
            ctx.marshal.trigger_update(parent, Some(keys::LAYOUT_GAP));
        }
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }

    fn on_tracked_change(&mut self, ctx: &mut DirectiveContext<'_>, _change: &ElementMatcher) {
        self.base.trigger_update(ctx);
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ShowHideDirective::new(element))
}
