//! Directive base
//!
//! A style builder turns an input string plus a parent-context snapshot
//! into a [`StyleDefinition`]. A responsive directive binds a builder to
//! one element and one [`DirectiveKey`], and is driven by the runtime with
//! the active value whenever it changes.

use fxlayout_dom::{DomTree, MutationRecord, NodeId};

use crate::cache::StyleCaches;
use crate::config::LayoutConfig;
use crate::inputs::InputBinding;
use crate::keys::DirectiveKey;
use crate::marshaller::{ElementMatcher, InputValue, MediaMarshaller, Trigger};
use crate::style::StyleDefinition;
use crate::style_utils::StyleUtils;
use crate::utils::build_layout_css;

/// Document text direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Parse a `dir` attribute value; anything but `rtl` is `ltr`
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("rtl") {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Rtl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// Everything a directive may touch while handling a callback
pub struct DirectiveContext<'a> {
    pub dom: &'a mut DomTree,
    pub marshal: &'a mut MediaMarshaller,
    pub styler: &'a mut StyleUtils,
    pub caches: &'a mut StyleCaches,
    pub direction: Direction,
}

impl DirectiveContext<'_> {
    pub fn config(&self) -> &LayoutConfig {
        self.styler.config()
    }

    pub fn is_server(&self) -> bool {
        self.styler.platform().is_server()
    }

    /// Parent element of `element`, if it has one
    pub fn parent_element(&self, element: NodeId) -> Option<NodeId> {
        self.dom.parent_element(element)
    }
}

/// Translates an input value into styles
pub trait StyleBuilder {
    /// Context snapshot the styles depend on
    type Parent;

    fn build_styles(&self, input: &str, parent: &Self::Parent) -> StyleDefinition;

    /// Whether output may be memoized per input
    fn should_cache(&self) -> bool {
        true
    }

    /// Optional capability to style elements other than the host
    fn side_effects(&self) -> Option<&dyn SideEffect<Self::Parent>> {
        None
    }
}

/// Extra styling a builder performs beyond its host element
pub trait SideEffect<P> {
    fn side_effect(&self, ctx: &mut DirectiveContext<'_>, input: &str, styles: &StyleDefinition, parent: &P);
}

/// A directive bound to one element and key
pub trait ResponsiveDirective {
    fn key(&self) -> DirectiveKey;

    fn element(&self) -> NodeId;

    /// Register with the marshaller and subscribe to tracked keys
    fn init(&mut self, ctx: &mut DirectiveContext<'_>);

    /// Receive an input value; responsive inputs are stored per breakpoint
    fn set_input(&mut self, ctx: &mut DirectiveContext<'_>, binding: &InputBinding, value: InputValue) {
        match &binding.breakpoint {
            Some(alias) => ctx.marshal.set_value(self.element(), self.key(), value, alias),
            None => tracing::debug!("'{}' ignores input {}", self.key(), binding.attribute),
        }
    }

    /// Called once every input of the element has been delivered
    fn after_init(&mut self, _ctx: &mut DirectiveContext<'_>) {}

    /// Apply the active value
    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>);

    /// Remove the styles this directive applied
    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>);

    /// A tracked key changed
    fn on_tracked_change(&mut self, _ctx: &mut DirectiveContext<'_>, _change: &ElementMatcher) {}

    /// Child-list changes on the element (observed directives only)
    fn on_mutations(&mut self, _ctx: &mut DirectiveContext<'_>, _records: &[MutationRecord]) {}

    fn destroy(&mut self, ctx: &mut DirectiveContext<'_>) {
        ctx.marshal.release_element(self.element());
    }
}

/// State shared by every directive: builder, last applied styles and value
#[derive(Debug)]
pub struct BaseDirective<B> {
    element: NodeId,
    key: DirectiveKey,
    builder: B,
    /// Most recently applied styles
    mru: StyleDefinition,
    current_value: Option<String>,
}

impl<B: StyleBuilder> BaseDirective<B> {
    pub fn new(element: NodeId, key: DirectiveKey, builder: B) -> Self {
        Self {
            element,
            key,
            builder,
            mru: StyleDefinition::new(),
            current_value: None,
        }
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn key(&self) -> DirectiveKey {
        self.key
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    pub fn mru(&self) -> &StyleDefinition {
        &self.mru
    }

    pub fn current_value(&self) -> Option<&str> {
        self.current_value.as_deref()
    }

    /// Forget the last value so the next update re-applies
    pub fn reset_current_value(&mut self) {
        self.current_value = None;
    }

    pub fn init(&self, ctx: &mut DirectiveContext<'_>, triggers: &[Trigger]) {
        tracing::debug!("{:?}: init '{}'", self.element, self.key);
        ctx.marshal.init(self.element, self.key, triggers);
    }

    /// Build (or fetch from `scope`) the styles for `input`, apply them and
    /// run the builder's side effects
    pub fn add_styles(&mut self, ctx: &mut DirectiveContext<'_>, input: &str, scope: &str, parent: &B::Parent) {
        let builder = &self.builder;
        let styles = if builder.should_cache() {
            ctx.caches.scope(scope).get_or_insert_with(input, || builder.build_styles(input, parent))
        } else {
            builder.build_styles(input, parent)
        };

        ctx.styler.apply_style_to_element(ctx.dom, &styles, self.element);
        if let Some(effect) = builder.side_effects() {
            effect.side_effect(ctx, input, &styles, parent);
        }
        self.mru = styles;
    }

    /// Clear every property of the last applied styles
    pub fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        let mut cleared = StyleDefinition::new();
        for property in self.mru.keys() {
            cleared.clear(property);
        }
        ctx.styler.apply_style_to_element(ctx.dom, &cleared, self.element);
        self.mru = StyleDefinition::new();
        self.current_value = None;
    }

    /// Apply `input` unless it is already the current value
    pub fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, input: &str, scope: &str, parent: &B::Parent) {
        if self.current_value.as_deref() != Some(input) {
            self.add_styles(ctx, input, scope, parent);
            self.current_value = Some(input.to_string());
        }
    }

    /// Store a value for a breakpoint alias
    pub fn set_value(&self, ctx: &mut DirectiveContext<'_>, value: InputValue, alias: &str) {
        ctx.marshal.set_value(self.element, self.key, value, alias);
    }

    /// Ask the marshaller to re-send this directive's active value
    pub fn trigger_update(&self, ctx: &mut DirectiveContext<'_>) {
        ctx.marshal.trigger_update(self.element, Some(self.key));
    }

    pub fn activated_value(&self, ctx: &DirectiveContext<'_>) -> Option<InputValue> {
        ctx.marshal.get_value(self.element, self.key)
    }

    /// Store a value for the currently activated breakpoint
    pub fn set_activated_value(&self, ctx: &mut DirectiveContext<'_>, value: InputValue) {
        let alias = ctx.marshal.activated_alias().to_string();
        ctx.marshal.set_value(self.element, self.key, value, &alias);
    }

    /// Flow direction of `target`, optionally making it a flex container
    /// when it has no inline direction yet
    pub fn get_flex_flow_direction(&self, ctx: &mut DirectiveContext<'_>, target: NodeId, add_if_missing: bool) -> String {
        let (value, has_inline) = ctx.styler.get_flow_direction(ctx.dom, target);
        if !has_inline && add_if_missing {
            let style = build_layout_css(&value);
            ctx.styler.apply_style_to_elements(ctx.dom, &style, &[target]);
        }
        value.trim().to_string()
    }

    pub fn has_wrap(&self, ctx: &DirectiveContext<'_>, target: NodeId) -> bool {
        ctx.styler.has_wrap(ctx.dom, target)
    }
}

/// Builder without parent context, used as-is by simple directives
#[derive(Debug)]
pub struct ValueDirective<B> {
    base: BaseDirective<B>,
}

impl<B: StyleBuilder<Parent = ()>> ValueDirective<B> {
    pub fn new(element: NodeId, key: DirectiveKey, builder: B) -> Self {
        Self { base: BaseDirective::new(element, key, builder) }
    }

    pub fn base(&self) -> &BaseDirective<B> {
        &self.base
    }
}

impl<B: StyleBuilder<Parent = ()>> ResponsiveDirective for ValueDirective<B> {
    fn key(&self) -> DirectiveKey {
        self.base.key()
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[]);
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let input = InputValue::text_of(value);
        let scope = self.base.key();
        self.base.update_with_value(ctx, &input, scope, &());
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }
}
