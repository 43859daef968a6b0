//! fxlayout flex
//!
//! Flexbox directives: containers (`fxLayout`, `fxLayoutAlign`,
//! `fxLayoutGap`) and items (`fxFlex`, `fxFlexOrder`, `fxFlexOffset`,
//! `fxFlexAlign`, `fxFill`).

pub mod flex;
pub mod flex_align;
pub mod flex_fill;
pub mod flex_offset;
pub mod flex_order;
pub mod layout;
pub mod layout_align;
pub mod layout_gap;

pub use flex::{FlexDirective, FlexParent, FlexStyleBuilder};
pub use flex_align::FlexAlignStyleBuilder;
pub use flex_fill::{FlexFillDirective, FlexFillStyleBuilder};
pub use flex_offset::{FlexOffsetDirective, FlexOffsetParent, FlexOffsetStyleBuilder};
pub use flex_order::FlexOrderStyleBuilder;
pub use layout::{LayoutDirective, LayoutParent, LayoutStyleBuilder};
pub use layout_align::{LayoutAlignDirective, LayoutAlignParent, LayoutAlignStyleBuilder};
pub use layout_gap::{LayoutGapDirective, LayoutGapParent, LayoutGapStyleBuilder};

use fxlayout_core::{FeatureRegistration, LayoutFamily};

/// The flexbox directive family
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexModule;

impl LayoutFamily for FlexModule {
    fn name(&self) -> &'static str {
        "flex"
    }

    fn registrations(&self) -> Vec<FeatureRegistration> {
        vec![
            FeatureRegistration::new(layout::FEATURE, layout::create),
            FeatureRegistration::new(layout_gap::FEATURE, layout_gap::create),
            FeatureRegistration::new(layout_align::FEATURE, layout_align::create),
            FeatureRegistration::new(flex_order::FEATURE, flex_order::create),
            FeatureRegistration::new(flex_offset::FEATURE, flex_offset::create),
            FeatureRegistration::new(flex_fill::FEATURE, flex_fill::create),
            FeatureRegistration::new(flex_align::FEATURE, flex_align::create),
            FeatureRegistration::new(flex::FEATURE, flex::create),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        let keys: Vec<_> = FlexModule.registrations().iter().map(|r| r.feature.key).collect();
        assert_eq!(keys.first(), Some(&fxlayout_core::keys::LAYOUT));
        assert_eq!(keys.last(), Some(&fxlayout_core::keys::FLEX));
        assert_eq!(keys.len(), 8);
    }
}
