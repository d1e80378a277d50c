//! Visibility and level-of-detail.
//!
//! Each frame the [`LodEvaluator`] frustum-tests every entity, classifies
//! its camera distance with tier-scaled [`LodThresholds`] and applies the
//! full-detail cap. [`recipe`] turns the resulting [`RenderState`] into a
//! [`DrawRecipe`].

pub mod evaluator;
pub mod level;
pub mod recipe;

pub use evaluator::{EvaluationStats, LodEvaluator, RenderState};
pub use level::{LodLevel, LodThresholds};
pub use recipe::{build_draw_recipe, placeholder, shape_recipe, DrawRecipe, MeshPart, PointLight, Primitive, ShapeRecipe, SHAPE_RECIPES};
