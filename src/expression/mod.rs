pub mod animator;
pub mod blend;
pub mod catalog;

pub use animator::ExpressionAnimator;
pub use blend::apply_expression;
pub use catalog::{BlendMode, Expression, ExpressionCatalog, ExpressionParameter};
