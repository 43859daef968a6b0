//! Shared grid directive
//!
//! Container features take a plain `gdInline` input that switches between
//! `display: grid` and `display: inline-grid`.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::InputBinding;
use fxlayout_core::keys::DirectiveKey;
use fxlayout_core::marshaller::InputValue;
use fxlayout_dom::NodeId;

/// Plain input toggling inline grids
pub const INLINE_INPUT: &str = "gdInline";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridParent {
    pub inline: bool,
}

impl GridParent {
    pub fn display(&self) -> &'static str {
        if self.inline { "inline-grid" } else { "grid" }
    }
}

/// Boolean coercion of an attribute value: anything but `false` is true
pub fn coerce_boolean(value: &InputValue) -> bool {
    match value {
        InputValue::Bool(b) => *b,
        other => other.as_text().trim() != "false",
    }
}

/// A grid container directive
#[derive(Debug)]
pub struct GridDirective<B> {
    base: BaseDirective<B>,
    inline: bool,
}

impl<B: StyleBuilder<Parent = GridParent>> GridDirective<B> {
    pub fn new(element: NodeId, key: DirectiveKey, builder: B) -> Self {
        Self { base: BaseDirective::new(element, key, builder), inline: false }
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }
}

impl<B: StyleBuilder<Parent = GridParent>> ResponsiveDirective for GridDirective<B> {
    fn key(&self) -> DirectiveKey {
        self.base.key()
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[]);
    }

    fn set_input(&mut self, ctx: &mut DirectiveContext<'_>, binding: &InputBinding, value: InputValue) {
        match &binding.breakpoint {
            Some(alias) => self.base.set_value(ctx, value, alias),
            None if binding.input == INLINE_INPUT => {
                let inline = coerce_boolean(&value);
                if inline != self.inline {
                    self.inline = inline;
                    self.base.reset_current_value();
                    self.base.trigger_update(ctx);
                }
            }
            None => tracing::debug!("'{}' ignores input {}", self.key(), binding.attribute),
        }
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let parent = GridParent { inline: self.inline };
        let scope = format!("{}-{}", self.base.key(), if self.inline { "inline" } else { "block" });
        let input = InputValue::text_of(value);
        self.base.update_with_value(ctx, &input, &scope, &parent);
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_boolean() {
        assert!(coerce_boolean(&InputValue::from("")));
        assert!(coerce_boolean(&InputValue::from("true")));
        assert!(!coerce_boolean(&InputValue::from("false")));
        assert!(!coerce_boolean(&InputValue::Bool(false)));
    }

    #[test]
    fn test_parent_display() {
        assert_eq!(GridParent { inline: true }.display(), "inline-grid");
        assert_eq!(GridParent::default().display(), "grid");
    }
}
