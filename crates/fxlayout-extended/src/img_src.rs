//! Responsive `img[src]`
//!
//! Swaps the `src` attribute per breakpoint. When rendering on the server
//! with the server stylesheet, the URL becomes a `content: url(...)` rule
//! and the attribute is emptied.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::{Feature, InputBinding};
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::InputValue;
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::IMG_SRC, &["src"]).suffixed_only().for_tag("img");

#[derive(Debug, Clone, Copy, Default)]
pub struct ImgSrcStyleBuilder;

impl StyleBuilder for ImgSrcStyleBuilder {
    type Parent = ();

    fn build_styles(&self, url: &str, _parent: &()) -> StyleDefinition {
        let content = if url.is_empty() { String::new() } else { format!("url({})", url) };
        StyleDefinition::new().with("content", content)
    }
}

#[derive(Debug)]
pub struct ImgSrcDirective {
    base: BaseDirective<ImgSrcStyleBuilder>,
    /// The unsuffixed `src`
    default_src: String,
}

impl ImgSrcDirective {
    pub fn new(element: NodeId) -> Self {
        Self {
            base: BaseDirective::new(element, keys::IMG_SRC, ImgSrcStyleBuilder),
            default_src: String::new(),
        }
    }

    pub fn default_src(&self) -> &str {
        &self.default_src
    }

    fn renders_content(ctx: &DirectiveContext<'_>) -> bool {
        ctx.is_server() && ctx.config().server_loaded
    }
}

impl ResponsiveDirective for ImgSrcDirective {
    fn key(&self) -> DirectiveKey {
        keys::IMG_SRC
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[]);
        self.default_src = ctx.styler.lookup_attribute_value(ctx.dom, self.element(), "src");
        self.base.set_value(ctx, InputValue::Text(self.default_src.clone()), "");
    }

    fn set_input(&mut self, ctx: &mut DirectiveContext<'_>, binding: &InputBinding, value: InputValue) {
        match binding.breakpoint.as_deref() {
            Some("") => {
                self.default_src = value.as_text();
                self.base.set_value(ctx, value, "");
            }
            Some(alias) => self.base.set_value(ctx, value, alias),
            None => {}
        }
    }

    fn after_init(&mut self, ctx: &mut DirectiveContext<'_>) {
        if Self::renders_content(ctx) {
            if let Err(err) = ctx.dom.set_attribute(self.element(), "src", "") {
                tracing::warn!("cannot empty src of {:?}: {}", self.element(), err);
            }
        }
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let url = InputValue::text_of(value);
        let url = if url.is_empty() { self.default_src.clone() } else { url };

        if Self::renders_content(ctx) {
            self.base.add_styles(ctx, &url, keys::IMG_SRC, &());
        } else if let Err(err) = ctx.dom.set_attribute(self.element(), "src", &url) {
            tracing::warn!("cannot set src of {:?}: {}", self.element(), err);
        }
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ImgSrcDirective::new(element))
}
