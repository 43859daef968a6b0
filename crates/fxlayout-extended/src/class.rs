//! Responsive `ngClass`
//!
//! [`NgClass`] keeps an element's class list in sync with a class
//! expression while always preserving the static `class` attribute. The
//! directive owns one and feeds it the active breakpoint value.

use std::collections::BTreeSet;

use fxlayout_core::directive::{DirectiveContext, ResponsiveDirective};
use fxlayout_core::inputs::{Feature, InputBinding};
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::InputValue;
use fxlayout_core::LayoutConfig;
use fxlayout_dom::{DomTree, NodeId};

pub const FEATURE: Feature = Feature::new(keys::NG_CLASS, &["ngClass"]).with_extra_inputs(&["class"]);

/// Class names a class expression enables
pub fn class_names(value: &InputValue) -> BTreeSet<String> {
    let split = |s: &str| s.split_whitespace().map(str::to_string).collect::<Vec<_>>();
    match value {
        InputValue::Text(text) => split(text.as_str()).into_iter().collect(),
        InputValue::Bool(_) => BTreeSet::new(),
        InputValue::List(items) => items.iter().flat_map(|item| split(item.as_str())).collect(),
        InputValue::Flags(flags) => flags.iter()
            .filter(|(_, on)| *on)
            .flat_map(|(names, _)| split(names.as_str()))
            .collect(),
        InputValue::Map(entries) => entries.iter()
            .filter(|(_, on)| !matches!(on.trim(), "" | "0" | "false"))
            .flat_map(|(names, _)| split(names.as_str()))
            .collect(),
    }
}

/// Class list primitive: static classes plus an expression
#[derive(Debug, Clone, Default)]
pub struct NgClass {
    klass: BTreeSet<String>,
    expression: Option<InputValue>,
    /// Expression classes currently on the element
    applied: BTreeSet<String>,
}

impl NgClass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static classes from the `class` attribute
    pub fn set_klass(&mut self, klass: &str) {
        self.klass = klass.split_whitespace().map(str::to_string).collect();
    }

    pub fn set_expression(&mut self, expression: Option<InputValue>) {
        self.expression = expression;
    }

    pub fn applied(&self) -> &BTreeSet<String> {
        &self.applied
    }

    /// Reconcile the element's class list with the current state
    pub fn apply(&mut self, dom: &mut DomTree, element: NodeId) {
        let wanted = self.expression.as_ref().map(class_names).unwrap_or_default();
        let Some(data) = dom.element_mut(element) else {
            return;
        };

        for stale in self.applied.difference(&wanted) {
            if !self.klass.contains(stale) {
                data.remove_class(stale);
            }
        }
        for class in self.klass.iter().chain(wanted.iter()) {
            data.add_class(class);
        }
        self.applied = wanted;
    }
}

#[derive(Debug)]
pub struct ClassDirective {
    element: NodeId,
    ng_class: NgClass,
}

impl ClassDirective {
    pub fn new(element: NodeId) -> Self {
        Self { element, ng_class: NgClass::new() }
    }

    pub fn ng_class(&self) -> &NgClass {
        &self.ng_class
    }
}

impl ResponsiveDirective for ClassDirective {
    fn key(&self) -> DirectiveKey {
        keys::NG_CLASS
    }

    fn element(&self) -> NodeId {
        self.element
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        ctx.marshal.init(self.element, keys::NG_CLASS, &[]);
        ctx.marshal.set_value(self.element, keys::NG_CLASS, InputValue::Text(String::new()), "");
    }

    fn set_input(&mut self, ctx: &mut DirectiveContext<'_>, binding: &InputBinding, value: InputValue) {
        match &binding.breakpoint {
            Some(alias) => ctx.marshal.set_value(self.element, keys::NG_CLASS, value, alias),
            None => {
                self.ng_class.set_klass(&value.as_text());
                ctx.marshal.trigger_update(self.element, Some(keys::NG_CLASS));
            }
        }
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        self.ng_class.set_expression(value.cloned());
        self.ng_class.apply(ctx.dom, self.element);
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.ng_class.set_expression(None);
        self.ng_class.apply(ctx.dom, self.element);
    }
}

pub fn create(element: NodeId, _config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(ClassDirective::new(element))
}
