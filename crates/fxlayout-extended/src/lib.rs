//! fxlayout extended
//!
//! Responsive variants of non-layout concerns: visibility (`fxShow`,
//! `fxHide`), image sources (`img[src.md]`), classes (`ngClass.sm`) and
//! inline styles (`ngStyle.lg`).

pub mod class;
pub mod img_src;
pub mod show_hide;
pub mod style;

pub use class::{ClassDirective, NgClass};
pub use img_src::{ImgSrcDirective, ImgSrcStyleBuilder};
pub use show_hide::{ShowHideDirective, ShowHideParent, ShowHideStyleBuilder};
pub use style::{NgStyle, StyleDirective, StyleMap};

use fxlayout_core::{FeatureRegistration, LayoutFamily};

/// The extended directive family
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedModule;

impl LayoutFamily for ExtendedModule {
    fn name(&self) -> &'static str {
        "extended"
    }

    fn registrations(&self) -> Vec<FeatureRegistration> {
        vec![
            FeatureRegistration::new(show_hide::FEATURE, show_hide::create),
            FeatureRegistration::new(class::FEATURE, class::create),
            FeatureRegistration::new(style::FEATURE, style::create),
            FeatureRegistration::new(img_src::FEATURE, img_src::create),
        ]
    }
}
