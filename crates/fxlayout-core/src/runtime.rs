//! Layout runtime
//!
//! Owns the element tree, the marshaller, the style utilities and caches,
//! scans elements for directive attributes, and drives the attached
//! directives as viewport, direction, inputs and children change.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use fxlayout_dom::{DomTree, NodeId};

use crate::LayoutError;
use crate::breakpoints::BreakPointRegistry;
use crate::cache::StyleCaches;
use crate::config::{LayoutConfig, Platform};
use crate::directive::{Direction, DirectiveContext, ResponsiveDirective};
use crate::inputs::{Feature, InputBinding, InputTable};
use crate::keys::DirectiveKey;
use crate::marshaller::{ElementMatcher, InputValue, MarshalEvent, MediaMarshaller, Trigger};
use crate::media::{MatchMedia, Viewport};
use crate::style_utils::StyleUtils;

/// Creates the directive of a feature for one element
pub type DirectiveFactory = fn(NodeId, &LayoutConfig) -> Box<dyn ResponsiveDirective>;

/// A feature together with its directive factory
#[derive(Debug, Clone, Copy)]
pub struct FeatureRegistration {
    pub feature: Feature,
    pub factory: DirectiveFactory,
}

impl FeatureRegistration {
    pub const fn new(feature: Feature, factory: DirectiveFactory) -> Self {
        Self { feature, factory }
    }
}

/// A family of directives (flex, grid, extended)
pub trait LayoutFamily {
    fn name(&self) -> &'static str;

    fn registrations(&self) -> Vec<FeatureRegistration>;
}

/// Upper bound on events handled by one flush
pub const DEFAULT_MAX_FLUSH_STEPS: usize = 10_000;

/// Everything directives may touch, split from the directive map so both
/// can be borrowed at once
struct RuntimeState {
    dom: DomTree,
    marshal: MediaMarshaller,
    styler: StyleUtils,
    caches: StyleCaches,
    direction: Direction,
}

impl RuntimeState {
    fn context(&mut self) -> DirectiveContext<'_> {
        DirectiveContext {
            dom: &mut self.dom,
            marshal: &mut self.marshal,
            styler: &mut self.styler,
            caches: &mut self.caches,
            direction: self.direction,
        }
    }
}

/// Drives responsive directives over a [`DomTree`]
pub struct LayoutRuntime {
    state: RuntimeState,
    media: MatchMedia,
    table: InputTable,
    /// Feature keys in registration order
    order: Vec<DirectiveKey>,
    factories: HashMap<DirectiveKey, DirectiveFactory>,
    directives: BTreeMap<(NodeId, DirectiveKey), Box<dyn ResponsiveDirective>>,
    viewport: Option<Viewport>,
    max_flush_steps: usize,
}

impl LayoutRuntime {
    /// Create a runtime for `dom` with the features of `families`
    pub fn new(
        dom: DomTree,
        config: LayoutConfig,
        platform: Platform,
        families: &[&dyn LayoutFamily],
    ) -> Result<Self, LayoutError> {
        let registry = BreakPointRegistry::from_config(&config);
        let media = MatchMedia::new(&registry, &config.print_with_breakpoints)?;

        let mut features = Vec::new();
        let mut order = Vec::new();
        let mut factories = HashMap::new();
        for family in families {
            let registrations = family.registrations();
            tracing::debug!("family '{}': {} features", family.name(), registrations.len());
            for registration in registrations {
                features.push(registration.feature);
                order.push(registration.feature.key);
                factories.insert(registration.feature.key, registration.factory);
            }
        }
        let table = InputTable::build(&features, &registry);

        let direction = dom.element_children(dom.root())
            .first()
            .and_then(|&html| dom.attribute(html, "dir"))
            .map(|dir| Direction::parse(&dir))
            .unwrap_or_default();

        Ok(Self {
            state: RuntimeState {
                dom,
                marshal: MediaMarshaller::new(registry),
                styler: StyleUtils::new(config, platform),
                caches: StyleCaches::new(),
                direction,
            },
            media,
            table,
            order,
            factories,
            directives: BTreeMap::new(),
            viewport: None,
            max_flush_steps: DEFAULT_MAX_FLUSH_STEPS,
        })
    }

    pub fn with_max_flush_steps(mut self, steps: usize) -> Self {
        self.max_flush_steps = steps;
        self
    }

    pub fn dom(&self) -> &DomTree {
        &self.state.dom
    }

    /// Mutable tree access; call [`LayoutRuntime::process_mutations`] and
    /// [`LayoutRuntime::attach_subtree`] after structural changes
    pub fn dom_mut(&mut self) -> &mut DomTree {
        &mut self.state.dom
    }

    pub fn marshal(&self) -> &MediaMarshaller {
        &self.state.marshal
    }

    pub fn styler(&self) -> &StyleUtils {
        &self.state.styler
    }

    pub fn caches(&self) -> &StyleCaches {
        &self.state.caches
    }

    pub fn config(&self) -> &LayoutConfig {
        self.state.styler.config()
    }

    pub fn input_table(&self) -> &InputTable {
        &self.table
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn has_directive(&self, element: NodeId, key: DirectiveKey) -> bool {
        self.directives.contains_key(&(element, key))
    }

    /// Keys of the directives attached to an element
    pub fn directive_keys(&self, element: NodeId) -> Vec<DirectiveKey> {
        self.directives.keys()
            .filter(|(el, _)| *el == element)
            .map(|(_, key)| *key)
            .collect()
    }

    pub fn directive_count(&self) -> usize {
        self.directives.len()
    }

    /// Attach directives to the whole document
    pub fn bootstrap(&mut self) -> Result<usize, LayoutError> {
        let root = self.state.dom.root();
        self.attach_subtree(root)
    }

    /// Attach directives to `node` and its descendants
    ///
    /// Every directive is initialised first, then receives its attribute
    /// inputs, then `after_init` runs, then queued updates are flushed.
    pub fn attach_subtree(&mut self, node: NodeId) -> Result<usize, LayoutError> {
        let dom = &self.state.dom;
        if dom.get(node).is_none() {
            return Err(LayoutError::Dom(fxlayout_dom::DomError::InvalidNode(node)));
        }
        let elements: Vec<NodeId> = std::iter::once(node)
            .chain(dom.descendants(node))
            .filter(|&id| dom.element(id).is_some())
            .collect();

        let mut attached: Vec<(NodeId, DirectiveKey)> = Vec::new();
        for element in elements {
            for key in self.selected_keys(element) {
                if self.directives.contains_key(&(element, key)) {
                    continue;
                }
                let Some(&factory) = self.factories.get(key) else {
                    continue;
                };
                let mut directive = factory(element, self.state.styler.config());
                directive.init(&mut self.state.context());
                tracing::debug!("attached '{}' to {:?}", key, element);
                self.directives.insert((element, key), directive);
                attached.push((element, key));
            }
        }

        for &(element, key) in &attached {
            self.feed_attribute_inputs(element, key);
        }
        for &(element, key) in &attached {
            if let Some(directive) = self.directives.get_mut(&(element, key)) {
                directive.after_init(&mut self.state.context());
            }
        }

        self.flush();
        Ok(attached.len())
    }

    /// Feature keys whose attributes are present on `element`, in
    /// registration order
    fn selected_keys(&self, element: NodeId) -> Vec<DirectiveKey> {
        let Some(data) = self.state.dom.element(element) else {
            return Vec::new();
        };
        let mut keys: BTreeSet<DirectiveKey> = BTreeSet::new();
        for (name, _) in data.attributes() {
            for binding in self.table.lookup_for_tag(&name, &data.tag) {
                if binding.selects {
                    keys.insert(binding.key);
                }
            }
        }
        let mut keys: Vec<DirectiveKey> = keys.into_iter().collect();
        keys.sort_by_key(|key| self.order.iter().position(|k| k == key).unwrap_or(usize::MAX));
        keys
    }

    fn feed_attribute_inputs(&mut self, element: NodeId, key: DirectiveKey) {
        let Some(data) = self.state.dom.element(element) else {
            return;
        };
        let tag = data.tag.clone();
        let inputs: Vec<(InputBinding, String)> = data.attributes()
            .into_iter()
            .flat_map(|(name, value)| {
                self.table.lookup_for_tag(&name, &tag)
                    .filter(|b| b.key == key)
                    .map(|b| (b.clone(), value.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();

        if let Some(directive) = self.directives.get_mut(&(element, key)) {
            for (binding, value) in inputs {
                directive.set_input(&mut self.state.context(), &binding, InputValue::Text(value));
            }
        }
    }

    /// Deliver an input value by attribute name, attaching the directive
    /// when the attribute selects one
    pub fn set_input(&mut self, element: NodeId, attribute: &str, value: InputValue) -> Result<(), LayoutError> {
        let tag = self.state.dom.element(element)
            .map(|e| e.tag.clone())
            .ok_or(LayoutError::Dom(fxlayout_dom::DomError::NotAnElement(element)))?;
        let bindings: Vec<InputBinding> = self.table.lookup_for_tag(attribute, &tag).cloned().collect();
        if bindings.is_empty() {
            return Err(LayoutError::UnknownInput(attribute.to_string()));
        }

        let mut delivered = false;
        for binding in &bindings {
            let key = binding.key;
            let fresh = !self.directives.contains_key(&(element, key));
            if fresh {
                if !binding.selects {
                    continue;
                }
                let Some(&factory) = self.factories.get(key) else {
                    continue;
                };
                let mut directive = factory(element, self.state.styler.config());
                directive.init(&mut self.state.context());
                self.directives.insert((element, key), directive);
            }
            if let Some(directive) = self.directives.get_mut(&(element, key)) {
                let mut ctx = self.state.context();
                directive.set_input(&mut ctx, binding, value.clone());
                if fresh {
                    directive.after_init(&mut ctx);
                }
                delivered = true;
            }
        }

        if !delivered {
            return Err(LayoutError::DirectiveNotAttached {
                element,
                key: bindings[0].key.to_string(),
            });
        }
        self.flush();
        Ok(())
    }

    /// Evaluate breakpoints against a new viewport
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let changes = self.media.evaluate(&viewport);
        tracing::debug!("viewport {}x{}: {} media changes", viewport.width, viewport.height, changes.len());
        self.viewport = Some(viewport);
        self.state.marshal.apply_media_changes(&changes);
        self.flush();
    }

    /// Change the document direction
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.direction == direction {
            return;
        }
        self.state.direction = direction;
        self.state.marshal.fire_trigger(Trigger::Directionality, None);
        self.flush();
    }

    /// Re-run directives observing elements whose children changed
    pub fn process_mutations(&mut self) -> usize {
        let records = self.state.dom.take_records();
        let targets: BTreeSet<NodeId> = records.iter()
            .filter(|r| r.changes_children())
            .map(|r| r.target)
            .collect();

        for &target in &targets {
            let keys = self.directive_keys(target);
            for key in keys {
                let target_records: Vec<_> = records.iter().filter(|r| r.target == target).cloned().collect();
                if let Some(directive) = self.directives.get_mut(&(target, key)) {
                    directive.on_mutations(&mut self.state.context(), &target_records);
                }
            }
            self.state.marshal.fire_trigger(Trigger::ChildList, Some(target));
        }

        self.flush();
        targets.len()
    }

    /// Destroy every directive attached to `element`
    pub fn destroy_element(&mut self, element: NodeId) {
        let keys = self.directive_keys(element);
        for key in keys {
            if let Some(mut directive) = self.directives.remove(&(element, key)) {
                directive.destroy(&mut self.state.context());
            }
        }
        self.state.marshal.release_element(element);
        self.state.caches.forget_element(element);
    }

    /// Destroy every directive and drop all caches
    pub fn teardown(&mut self) {
        let directives = std::mem::take(&mut self.directives);
        for (_, mut directive) in directives {
            directive.destroy(&mut self.state.context());
        }
        self.state.marshal.reset();
        self.state.caches.clear();
        self.state.styler.server_stylesheet_mut().clear();
        tracing::debug!("runtime torn down");
    }

    /// Deliver queued marshaller events; returns how many were handled
    pub fn flush(&mut self) -> usize {
        let mut steps = 0;
        while let Some(event) = self.state.marshal.next_event() {
            if steps >= self.max_flush_steps {
                tracing::warn!(
                    "flush stopped after {} events; {} dropped",
                    steps,
                    self.state.marshal.pending_events() + 1,
                );
                self.state.marshal.clear_events();
                break;
            }
            steps += 1;
            self.dispatch(event);
        }
        steps
    }

    fn dispatch(&mut self, event: MarshalEvent) {
        tracing::trace!("dispatch {:?}", event);
        let mut ctx = self.state.context();

        let matcher = match event {
            MarshalEvent::Update { element, key, value } => {
                if let Some(directive) = self.directives.get_mut(&(element, key)) {
                    directive.update_with_value(&mut ctx, value.as_ref());
                }
                ElementMatcher { element, key, value }
            }
            MarshalEvent::Clear { element, key } => {
                if let Some(directive) = self.directives.get_mut(&(element, key)) {
                    directive.clear_styles(&mut ctx);
                }
                ElementMatcher { element, key, value: Some(InputValue::Text(String::new())) }
            }
        };

        for subscriber in ctx.marshal.subscribers(matcher.element, matcher.key) {
            if let Some(directive) = self.directives.get_mut(&(subscriber.element, subscriber.key)) {
                directive.on_tracked_change(&mut ctx, &matcher);
            }
        }
    }
}

impl std::fmt::Debug for LayoutRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutRuntime")
            .field("directives", &self.directives.len())
            .field("direction", &self.state.direction)
            .field("viewport", &self.viewport)
            .field("active", &self.state.marshal.activated_alias())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{BaseDirective, StyleBuilder};
    use crate::keys::{FLEX_ORDER, LAYOUT};
    use crate::marshaller::Subscriber;
    use crate::style::StyleDefinition;

    struct OrderBuilder;

    impl StyleBuilder for OrderBuilder {
        type Parent = ();

        fn build_styles(&self, input: &str, _parent: &()) -> StyleDefinition {
            StyleDefinition::new().with("order", input)
        }
    }

    /// Writes its value as `order` and counts parent layout changes
    struct OrderDirective {
        base: BaseDirective<OrderBuilder>,
        layout_changes: usize,
    }

    impl ResponsiveDirective for OrderDirective {
        fn key(&self) -> DirectiveKey {
            FLEX_ORDER
        }

        fn element(&self) -> NodeId {
            self.base.element()
        }

        fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
            self.base.init(ctx, &[Trigger::Directionality]);
            if let Some(parent) = ctx.parent_element(self.element()) {
                ctx.marshal.track_value(parent, LAYOUT, Subscriber { element: self.element(), key: FLEX_ORDER });
            }
        }

        fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
            let input = format!("{}{}", InputValue::text_of(value), if ctx.direction.is_rtl() { "0" } else { "" });
            self.base.update_with_value(ctx, &input, FLEX_ORDER, &());
        }

        fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
            self.base.clear_styles(ctx);
        }

        fn on_tracked_change(&mut self, _ctx: &mut DirectiveContext<'_>, change: &ElementMatcher) {
            if change.key == LAYOUT {
                self.layout_changes += 1;
            }
        }
    }

    /// Registers `layout` without styling anything
    struct LayoutStub {
        element: NodeId,
    }

    impl ResponsiveDirective for LayoutStub {
        fn key(&self) -> DirectiveKey {
            LAYOUT
        }

        fn element(&self) -> NodeId {
            self.element
        }

        fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
            ctx.marshal.init(self.element, LAYOUT, &[]);
        }

        fn update_with_value(&mut self, _ctx: &mut DirectiveContext<'_>, _value: Option<&InputValue>) {}

        fn clear_styles(&mut self, _ctx: &mut DirectiveContext<'_>) {}
    }

    struct TestFamily;

    impl LayoutFamily for TestFamily {
        fn name(&self) -> &'static str {
            "test"
        }

        fn registrations(&self) -> Vec<FeatureRegistration> {
            vec![
                FeatureRegistration::new(Feature::new(LAYOUT, &["fxLayout"]), layout_stub),
                FeatureRegistration::new(Feature::new(FLEX_ORDER, &["fxFlexOrder"]), order_directive),
            ]
        }
    }

    fn layout_stub(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
        Box::new(LayoutStub { element })
    }

    fn order_directive(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
        Box::new(OrderDirective {
            base: BaseDirective::new(element, FLEX_ORDER, OrderBuilder),
            layout_changes: 0,
        })
    }

    fn document() -> (DomTree, NodeId, NodeId) {
        let mut dom = DomTree::new();
        let html = dom.create_element("html");
        let parent = dom.create_element("div");
        let child = dom.create_element("div");
        dom.append_child(dom.root(), html).unwrap();
        dom.append_child(html, parent).unwrap();
        dom.append_child(parent, child).unwrap();
        dom.set_attribute(parent, "fxLayout", "row").unwrap();
        dom.set_attribute(child, "fxFlexOrder", "1").unwrap();
        dom.set_attribute(child, "fxFlexOrder.md", "2").unwrap();
        (dom, parent, child)
    }

    fn runtime(dom: DomTree) -> LayoutRuntime {
        LayoutRuntime::new(dom, LayoutConfig::default(), Platform::Browser, &[&TestFamily]).unwrap()
    }

    #[test]
    fn test_bootstrap_attaches_and_applies() {
        let (dom, parent, child) = document();
        let mut rt = runtime(dom);
        assert_eq!(rt.bootstrap().unwrap(), 2);
        assert!(rt.has_directive(parent, LAYOUT));
        assert!(rt.has_directive(child, FLEX_ORDER));
        assert_eq!(rt.dom().style_property(child, "order"), Some("1"));
    }

    #[test]
    fn test_viewport_switching() {
        let (dom, _, child) = document();
        let mut rt = runtime(dom);
        rt.bootstrap().unwrap();

        rt.set_viewport(Viewport::screen(1000.0, 800.0));
        assert_eq!(rt.marshal().activated_alias(), "md");
        assert_eq!(rt.dom().style_property(child, "order"), Some("2"));

        rt.set_viewport(Viewport::screen(400.0, 800.0));
        assert_eq!(rt.dom().style_property(child, "order"), Some("1"));
    }

    #[test]
    fn test_direction_trigger() {
        let (dom, _, child) = document();
        let mut rt = runtime(dom);
        rt.bootstrap().unwrap();

        rt.set_direction(Direction::Rtl);
        assert_eq!(rt.dom().style_property(child, "order"), Some("10"));
    }

    #[test]
    fn test_direction_from_document() {
        let (mut dom, _, _) = document();
        let html = dom.element_children(dom.root())[0];
        dom.set_attribute(html, "dir", "rtl").unwrap();
        let rt = runtime(dom);
        assert_eq!(rt.direction(), Direction::Rtl);
    }

    #[test]
    fn test_set_input_routes_and_attaches() {
        let (dom, parent, child) = document();
        let mut rt = runtime(dom);
        rt.bootstrap().unwrap();

        rt.set_input(child, "fxFlexOrder", "5".into()).unwrap();
        assert_eq!(rt.dom().style_property(child, "order"), Some("5"));

        rt.set_input(parent, "fxFlexOrder", "7".into()).unwrap();
        assert!(rt.has_directive(parent, FLEX_ORDER));
        assert_eq!(rt.dom().style_property(parent, "order"), Some("7"));

        assert!(matches!(
            rt.set_input(child, "fxNothing", "1".into()),
            Err(LayoutError::UnknownInput(_)),
        ));
    }

    #[test]
    fn test_destroy_and_teardown() {
        let (dom, parent, child) = document();
        let mut rt = runtime(dom);
        rt.bootstrap().unwrap();

        rt.destroy_element(child);
        assert!(!rt.has_directive(child, FLEX_ORDER));
        assert!(rt.marshal().subscribers(parent, LAYOUT).is_empty());

        rt.teardown();
        assert_eq!(rt.directive_count(), 0);
        assert!(rt.caches().scope_names().is_empty());
    }

    #[test]
    fn test_flush_step_limit() {
        let (dom, _, _) = document();
        let mut rt = runtime(dom).with_max_flush_steps(0);
        rt.bootstrap().unwrap();
        assert_eq!(rt.marshal().pending_events(), 0);
    }
}
