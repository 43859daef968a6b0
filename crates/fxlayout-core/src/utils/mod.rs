//! Value helpers shared by the style builders

pub mod basis_validator;
pub mod layout_validator;
pub mod multiply;

pub use basis_validator::validate_basis;
pub use layout_validator::{
    LAYOUT_VALUES, build_layout_css, is_flow_horizontal, validate_value, validate_wrap_value,
};
pub use multiply::multiply;

/// JS-style truthiness of a CSS value: non-empty and not `0`
pub fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}
