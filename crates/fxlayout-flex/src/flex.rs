//! fxFlex
//!
//! Sizes a flex item from a `grow shrink basis` shorthand. The parent's
//! flow direction picks the axis of the min/max constraints; the numbered
//! fixes below are legacy rendering workarounds and their constants are
//! load-bearing.

use fxlayout_core::directive::{BaseDirective, DirectiveContext, ResponsiveDirective, StyleBuilder};
use fxlayout_core::inputs::{Feature, InputBinding};
use fxlayout_core::keys::{self, DirectiveKey};
use fxlayout_core::marshaller::{ElementMatcher, InputValue, Subscriber};
use fxlayout_core::utils::{is_flow_horizontal, is_truthy, validate_basis};
use fxlayout_core::{LayoutConfig, StyleDefinition};
use fxlayout_dom::NodeId;

pub const FEATURE: Feature = Feature::new(keys::FLEX, &["fxFlex"]).with_extra_inputs(&["fxGrow", "fxShrink"]);

/// Basis used for `''` in a column when column basis zero is enabled
const COLUMN_BASIS_ZERO: &str = "0.000000001px";

/// Bases that never get min/max constraints
const UNCONSTRAINED_BASES: &[&str] = &["0%", "0px", COLUMN_BASIS_ZERO, "auto"];

const BASIS_UNITS: &[&str] = &["px", "rem", "em", "vw", "vh"];

/// Parent container state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlexParent {
    pub direction: String,
    pub has_wrap: bool,
}

/// Builds `flex` (or its longhands) plus min/max constraints
#[derive(Debug, Clone)]
pub struct FlexStyleBuilder {
    use_column_basis_zero: bool,
}

impl FlexStyleBuilder {
    pub fn new(config: &LayoutConfig) -> Self {
        Self { use_column_basis_zero: config.use_column_basis_zero }
    }
}

/// The min/max properties cleared, plus the flex value
fn flex_css(has_calc: bool, grow: &str, shrink: &str, basis: &str) -> StyleDefinition {
    let mut css = StyleDefinition::new();
    for property in ["max-width", "max-height", "min-width", "min-height"] {
        css.clear(property);
    }
    if has_calc {
        css.set("flex-grow", grow);
        css.set("flex-shrink", shrink);
        css.set("flex-basis", basis);
    } else {
        css.set("flex", format!("{} {} {}", grow, shrink, basis));
    }
    css
}

impl StyleBuilder for FlexStyleBuilder {
    type Parent = FlexParent;

    fn build_styles(&self, input: &str, parent: &FlexParent) -> StyleDefinition {
        let parts: Vec<&str> = input.split(' ').collect();
        let [mut grow, mut shrink, mut basis] = if parts.len() >= 3 {
            [parts[0].to_string(), parts[1].to_string(), parts[2..].join(" ")]
        } else {
            validate_basis(input, "1", "1")
        };

        let direction = if parent.direction.contains("column") { "column" } else { "row" };
        let (max, min) = if is_flow_horizontal(direction) {
            ("max-width", "min-width")
        } else {
            ("max-height", "min-height")
        };

        let has_calc = basis.contains("calc");
        let using_calc = has_calc || basis == "auto";
        let is_percent = basis.contains('%') && !has_calc;
        let has_units = BASIS_UNITS.iter().any(|unit| basis.contains(unit));
        let mut is_value = has_calc || has_units;

        // Inflexible when both grow and shrink are zero
        let is_fixed = !is_truthy(&grow) && !is_truthy(&shrink);

        let mut css = StyleDefinition::new();
        match basis.as_str() {
            "" => {
                basis = if direction == "row" {
                    "0%".to_string()
                } else if self.use_column_basis_zero {
                    COLUMN_BASIS_ZERO.to_string()
                } else {
                    "auto".to_string()
                };
            }
            "initial" | "nogrow" => {
                grow = "0".to_string();
                basis = "auto".to_string();
            }
            "grow" => basis = "100%".to_string(),
            "noshrink" => {
                shrink = "0".to_string();
                basis = "auto".to_string();
            }
            "auto" => {}
            "none" => {
                grow = "0".to_string();
                shrink = "0".to_string();
                basis = "auto".to_string();
            }
            _ => {
                // Percentage sizing unless a unit is given
                if !is_value && !is_percent && basis.parse::<f64>().is_ok_and(f64::is_finite) {
                    basis.push('%');
                }

                // Fix for issue 280
                if basis == "0%" {
                    is_value = true;
                }
                if basis == "0px" {
                    basis = "0%".to_string();
                }

                // Fix for issue 5345
                let sized = if is_value { basis.as_str() } else { "100%" };
                css = flex_css(has_calc, &grow, &shrink, sized);
            }
        }

        let has_flex = css.is_set("flex") || css.text("flex-grow").is_some_and(|g| is_truthy(&g));
        if !has_flex {
            css = flex_css(has_calc, &grow, &shrink, &basis);
        }

        // Fix for issues 277, 534, and 728
        if !UNCONSTRAINED_BASES.contains(&basis.as_str()) {
            if is_fixed || (is_value && is_truthy(&grow)) {
                css.set(min, basis.as_str());
            } else {
                css.clear(min);
            }
            if is_fixed || (!using_calc && is_truthy(&shrink)) {
                css.set(max, basis.as_str());
            } else {
                css.clear(max);
            }
        }

        let min_value = css.text(min).filter(|v| !v.is_empty());
        let max_value = css.text(max).filter(|v| !v.is_empty());

        // Fix for issue 528
        if min_value.is_none() && max_value.is_none() {
            css = flex_css(has_calc, &grow, &shrink, &basis);
        } else if parent.has_wrap {
            // Fix for issue 660
            let bound = max_value.or(min_value).unwrap_or_default();
            if has_calc {
                css.set("flex-basis", bound);
            } else {
                css.set("flex", format!("{} {} {}", grow, shrink, bound));
            }
        }

        css.with("box-sizing", "border-box")
    }
}

/// Directive behind `fxFlex`
#[derive(Debug)]
pub struct FlexDirective {
    base: BaseDirective<FlexStyleBuilder>,
    /// Parent flow direction, derived lazily
    direction: Option<String>,
    wrap: Option<bool>,
    flex_grow: String,
    flex_shrink: String,
    add_flex_to_parent: bool,
}

impl FlexDirective {
    pub fn new(element: NodeId, config: &LayoutConfig) -> Self {
        Self {
            base: BaseDirective::new(element, keys::FLEX, FlexStyleBuilder::new(config)),
            direction: None,
            wrap: None,
            flex_grow: "1".to_string(),
            flex_shrink: "1".to_string(),
            add_flex_to_parent: config.add_flex_to_parent,
        }
    }

    /// Parent layout changed: take its direction and wrap
    fn on_layout_change(&mut self, ctx: &mut DirectiveContext<'_>, layout: &str) {
        let mut parts = layout.split(' ');
        self.direction = parts.next().filter(|d| !d.is_empty()).map(str::to_string);
        self.wrap = Some(parts.next() == Some("wrap"));
        self.base.trigger_update(ctx);
    }

    /// Re-send the active value with the current grow and shrink
    fn trigger_reflow(&mut self, ctx: &mut DirectiveContext<'_>) {
        if let Some(active) = self.base.activated_value(ctx) {
            let parts = validate_basis(&active.as_text(), &self.flex_grow, &self.flex_shrink);
            let value = InputValue::Text(parts.join(" "));
            ctx.marshal.update_element(self.base.element(), keys::FLEX, Some(value));
        }
    }
}

impl ResponsiveDirective for FlexDirective {
    fn key(&self) -> DirectiveKey {
        keys::FLEX
    }

    fn element(&self) -> NodeId {
        self.base.element()
    }

    fn init(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.init(ctx, &[]);
        let element = self.element();
        if let Some(parent) = ctx.parent_element(element) {
            let me = Subscriber { element, key: keys::FLEX };
            ctx.marshal.track_value(parent, keys::LAYOUT, me);
            ctx.marshal.track_value(element, keys::LAYOUT_ALIGN, me);
        }
    }

    fn set_input(&mut self, ctx: &mut DirectiveContext<'_>, binding: &InputBinding, value: InputValue) {
        let text = value.as_text();
        match binding.input {
            "fxGrow" => {
                self.flex_grow = if text.is_empty() { "1".to_string() } else { text };
                self.trigger_reflow(ctx);
            }
            "fxShrink" => {
                self.flex_shrink = if text.is_empty() { "1".to_string() } else { text };
                self.trigger_reflow(ctx);
            }
            _ => {
                if let Some(alias) = &binding.breakpoint {
                    self.base.set_value(ctx, value, alias);
                }
            }
        }
    }

    fn update_with_value(&mut self, ctx: &mut DirectiveContext<'_>, value: Option<&InputValue>) {
        let parent = ctx.parent_element(self.element());

        let direction = match (&self.direction, parent) {
            (Some(direction), _) => direction.clone(),
            (None, Some(parent)) => self.base.get_flex_flow_direction(ctx, parent, self.add_flex_to_parent),
            (None, None) => "row".to_string(),
        };
        self.direction = Some(direction.clone());

        let has_wrap = match (self.wrap, parent) {
            (Some(wrap), _) => wrap,
            (None, Some(parent)) => self.base.has_wrap(ctx, parent),
            (None, None) => false,
        };
        self.wrap = Some(has_wrap);

        let axis = if direction.contains("column") { "column" } else { "row" };
        let scope = format!("flex-{}-{}", axis, if has_wrap { "wrap" } else { "nowrap" });

        let basis = InputValue::text_of(value).replacen(';', "", 1);
        let parts = validate_basis(&basis, &self.flex_grow, &self.flex_shrink);
        self.base.add_styles(ctx, &parts.join(" "), &scope, &FlexParent { direction, has_wrap });
    }

    fn clear_styles(&mut self, ctx: &mut DirectiveContext<'_>) {
        self.base.clear_styles(ctx);
    }

    fn on_tracked_change(&mut self, ctx: &mut DirectiveContext<'_>, change: &ElementMatcher) {
        if change.key == keys::LAYOUT && change.element != self.element() {
            let layout = InputValue::text_of(change.value.as_ref());
            self.on_layout_change(ctx, &layout);
        } else if change.key == keys::LAYOUT_ALIGN && change.element == self.element() {
            self.trigger_reflow(ctx);
        }
    }
}

pub fn create(element: NodeId, config: &LayoutConfig) -> Box<dyn ResponsiveDirective> {
    Box::new(FlexDirective::new(element, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> FlexStyleBuilder {
        FlexStyleBuilder::new(&LayoutConfig::default())
    }

    fn row() -> FlexParent {
        FlexParent { direction: "row".into(), has_wrap: false }
    }

    fn column() -> FlexParent {
        FlexParent { direction: "column".into(), has_wrap: false }
    }

    fn flex_of(css: &StyleDefinition) -> String {
        css.text("flex").unwrap_or_default()
    }

    #[test]
    fn test_keyword_semantics() {
        let b = builder();
        let cases = [
            ("initial", "0 1 auto"),
            ("nogrow", "0 1 auto"),
            ("grow", "1 1 100%"),
            ("noshrink", "1 0 auto"),
            ("auto", "1 1 auto"),
            ("none", "0 0 auto"),
        ];
        for (keyword, expected) in cases {
            let css = b.build_styles(&format!("1 1 {}", keyword), &row());
            assert_eq!(flex_of(&css), expected, "keyword {}", keyword);
            assert_eq!(css.text("box-sizing").as_deref(), Some("border-box"));
            // A bare keyword reads the same as the full shorthand
            assert_eq!(b.build_styles(keyword, &row()), css);
        }
    }

    #[test]
    fn test_grow_sets_max() {
        let css = builder().build_styles("1 1 grow", &row());
        assert_eq!(css.text("max-width").as_deref(), Some("100%"));
        assert!(css.is_cleared("min-width"));
    }

    #[test]
    fn test_zero_px_normalised() {
        let b = builder();
        let css = b.build_styles("1 1 0px", &row());
        assert_eq!(flex_of(&css), "1 1 0%");
        assert!(css.is_cleared("max-width"));
        assert!(css.is_cleared("min-width"));
        assert_eq!(b.build_styles("1 1 0px", &row()), css);
    }

    #[test]
    fn test_empty_basis_by_axis() {
        let b = builder();
        assert_eq!(flex_of(&b.build_styles("1 1 ", &row())), "1 1 0%");
        assert_eq!(flex_of(&b.build_styles("1 1 ", &column())), "1 1 0.000000001px");

        let legacy = FlexStyleBuilder::new(&LayoutConfig {
            use_column_basis_zero: false,
            ..LayoutConfig::default()
        });
        assert_eq!(flex_of(&legacy.build_styles("1 1 ", &column())), "1 1 auto");
    }

    #[test]
    fn test_percentage_and_units() {
        let b = builder();
        let css = b.build_styles("1 1 50", &row());
        assert_eq!(flex_of(&css), "1 1 100%");
        assert_eq!(css.text("max-width").as_deref(), Some("50%"));
        assert!(css.is_cleared("min-width"));

        let css = b.build_styles("1 1 200px", &column());
        assert_eq!(flex_of(&css), "1 1 200px");
        assert_eq!(css.text("min-height").as_deref(), Some("200px"));
        assert_eq!(css.text("max-height").as_deref(), Some("200px"));
    }

    #[test]
    fn test_fixed_item() {
        let css = builder().build_styles("0 0 120px", &row());
        assert_eq!(flex_of(&css), "0 0 120px");
        assert_eq!(css.text("min-width").as_deref(), Some("120px"));
        assert_eq!(css.text("max-width").as_deref(), Some("120px"));
    }

    #[test]
    fn test_calc_uses_longhands() {
        let css = builder().build_styles("1 1 calc(100% - 20px)", &row());
        assert!(!css.contains("flex"));
        assert_eq!(css.text("flex-grow").as_deref(), Some("1"));
        assert_eq!(css.text("flex-shrink").as_deref(), Some("1"));
        assert_eq!(css.text("flex-basis").as_deref(), Some("calc(100% - 20px)"));
        assert_eq!(css.text("min-width").as_deref(), Some("calc(100% - 20px)"));
        assert!(css.is_cleared("max-width"));
    }

    #[test]
    fn test_wrap_rewrites_basis() {
        let wrap = FlexParent { direction: "row".into(), has_wrap: true };
        let css = builder().build_styles("1 1 33", &wrap);
        assert_eq!(flex_of(&css), "1 1 33%");
        assert_eq!(css.text("max-width").as_deref(), Some("33%"));
    }
}
