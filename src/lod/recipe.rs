//! Geometry recipes: one static table indexed by [`ShapeKind`], resolved per
//! entity into a [`DrawRecipe`] at the entity's detail level.

use crate::atmosphere::{fog_factor, FogParams};
use crate::core::types::{Result, Vec3};
use crate::core::Error;
use crate::scene::entity::Entity;
use crate::variation::{MaterialParams, ShapeKind};

use super::evaluator::RenderState;
use super::level::LodLevel;

/// Mesh primitives the renderer knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Box,
    Cylinder,
    Cone,
    Pyramid,
    Prism,
    Sphere,
}

/// One piece of a composite mesh, expressed in fractions of the entity's
/// width/height/depth. `center.y` is measured up from the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub primitive: Primitive,
    pub center: [f32; 3],
    pub size: [f32; 3],
}

const fn part(primitive: Primitive, center: [f32; 3], size: [f32; 3]) -> Part {
    Part { primitive, center, size }
}

/// Geometry description for one shape family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeRecipe {
    pub shape: ShapeKind,
    /// Stand-in for the whole silhouette at Low detail.
    pub base: Primitive,
    /// Composite mesh. `parts[0]` is the base mesh used at Medium.
    pub parts: &'static [Part],
    /// Small decoration meshes (flowers, ornaments, rooftop units).
    pub decorations: u8,
    /// Height fraction of the light source, for light-emitting shapes.
    pub light_anchor: Option<f32>,
}

/// Recipes in [`ShapeKind::ALL`] order.
pub static SHAPE_RECIPES: [ShapeRecipe; ShapeKind::COUNT] = [
    ShapeRecipe {
        shape: ShapeKind::Headstone,
        base: Primitive::Box,
        parts: &[
            part(Primitive::Box, [0.0, 0.425, 0.0], [1.0, 0.85, 1.0]),
            part(Primitive::Cylinder, [0.0, 0.85, 0.0], [1.0, 0.3, 1.0]),
        ],
        decorations: 1,
        light_anchor: None,
    },
    ShapeRecipe {
        shape: ShapeKind::Cross,
        base: Primitive::Box,
        parts: &[
            part(Primitive::Box, [0.0, 0.5, 0.0], [0.3, 1.0, 1.0]),
            part(Primitive::Box, [0.0, 0.7, 0.0], [1.0, 0.2, 1.0]),
        ],
        decorations: 1,
        light_anchor: None,
    },
    ShapeRecipe {
        shape: ShapeKind::Slab,
        base: Primitive::Box,
        parts: &[part(Primitive::Box, [0.0, 0.5, 0.0], [1.0, 1.0, 1.0])],
        decorations: 2,
        light_anchor: None,
    },
    ShapeRecipe {
        shape: ShapeKind::Obelisk,
        base: Primitive::Box,
        parts: &[
            part(Primitive::Box, [0.0, 0.075, 0.0], [1.0, 0.15, 1.0]),
            part(Primitive::Box, [0.0, 0.525, 0.0], [0.7, 0.75, 0.7]),
            part(Primitive::Pyramid, [0.0, 0.95, 0.0], [0.7, 0.1, 0.7]),
        ],
        decorations: 0,
        light_anchor: None,
    },
    ShapeRecipe {
        shape: ShapeKind::Lantern,
        base: Primitive::Cylinder,
        parts: &[
            part(Primitive::Cylinder, [0.0, 0.3, 0.0], [0.3, 0.6, 0.3]),
            part(Primitive::Box, [0.0, 0.75, 0.0], [1.0, 0.3, 1.0]),
            part(Primitive::Pyramid, [0.0, 0.95, 0.0], [1.1, 0.1, 1.1]),
        ],
        decorations: 0,
        light_anchor: Some(0.75),
    },
    ShapeRecipe {
        shape: ShapeKind::Gabled,
        base: Primitive::Box,
        parts: &[
            part(Primitive::Box, [0.0, 0.35, 0.0], [1.0, 0.7, 1.0]),
            part(Primitive::Prism, [0.0, 0.85, 0.0], [1.0, 0.3, 1.0]),
        ],
        decorations: 2,
        light_anchor: None,
    },
    ShapeRecipe {
        shape: ShapeKind::Block,
        base: Primitive::Box,
        parts: &[
            part(Primitive::Box, [0.0, 0.5, 0.0], [1.0, 1.0, 1.0]),
            part(Primitive::Box, [0.2, 1.025, 0.2], [0.3, 0.05, 0.3]),
        ],
        decorations: 3,
        light_anchor: None,
    },
    ShapeRecipe {
        shape: ShapeKind::Tower,
        base: Primitive::Box,
        parts: &[
            part(Primitive::Box, [0.0, 0.45, 0.0], [1.0, 0.9, 1.0]),
            part(Primitive::Box, [0.0, 0.95, 0.0], [0.8, 0.1, 0.8]),
        ],
        decorations: 2,
        light_anchor: Some(0.85),
    },
    ShapeRecipe {
        shape: ShapeKind::Dome,
        base: Primitive::Cylinder,
        parts: &[
            part(Primitive::Cylinder, [0.0, 0.275, 0.0], [1.0, 0.55, 1.0]),
            part(Primitive::Sphere, [0.0, 0.775, 0.0], [0.9, 0.45, 0.9]),
        ],
        decorations: 1,
        light_anchor: Some(0.5),
    },
    ShapeRecipe {
        shape: ShapeKind::Spire,
        base: Primitive::Box,
        parts: &[
            part(Primitive::Box, [0.0, 0.3, 0.0], [1.0, 0.6, 1.0]),
            part(Primitive::Cone, [0.0, 0.8, 0.0], [0.5, 0.4, 0.5]),
        ],
        decorations: 1,
        light_anchor: None,
    },
];

pub fn shape_recipe(shape: ShapeKind) -> &'static ShapeRecipe {
    &SHAPE_RECIPES[shape.index()]
}

/// A primitive placed in world space, before tilt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshPart {
    pub primitive: Primitive,
    pub center: Vec3,
    pub size: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

/// Everything the renderer needs to draw one entity this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRecipe {
    pub id: String,
    pub level: LodLevel,
    pub shape: ShapeKind,
    pub position: Vec3,
    /// Lean around the forward axis, radians.
    pub tilt: f32,
    pub meshes: Vec<MeshPart>,
    pub decorations: u8,
    pub point_light: Option<PointLight>,
    pub glow_quad: bool,
    pub hover_affordance: bool,
    pub material: MaterialParams,
    pub fog_factor: f32,
    /// Stand-in after a recipe failure.
    pub placeholder: bool,
}

const PLACEHOLDER_SIZE: [f32; 3] = [0.6, 1.0, 0.3];
const PLACEHOLDER_COLOR: [f32; 3] = [0.5, 0.5, 0.52];

/// Resolve the recipe for a visible entity.
///
/// `glow_strength` scales the emissive strength into point-light intensity.
pub fn build_draw_recipe(
    entity: &Entity,
    state: &RenderState,
    fog: &FogParams,
    glow_strength: f32,
) -> Result<DrawRecipe> {
    if !state.lod.is_visible() {
        return Err(Error::Geometry {
            id: entity.id.clone(),
            reason: "culled entities have no recipe".into(),
        });
    }

    let v = &state.variation;
    let d = v.dimensions;
    if ![d.width, d.height, d.depth].iter().all(|x| x.is_finite() && *x > 0.0) {
        return Err(Error::Geometry {
            id: entity.id.clone(),
            reason: format!("bad dimensions {}x{}x{}", d.width, d.height, d.depth),
        });
    }
    if !d.tilt.is_finite() {
        return Err(Error::Geometry {
            id: entity.id.clone(),
            reason: "non-finite tilt".into(),
        });
    }

    let recipe = shape_recipe(v.shape);
    let dims = Vec3::new(d.width, d.height, d.depth);
    let place = |p: &Part| MeshPart {
        primitive: p.primitive,
        center: entity.position + Vec3::from_array(p.center) * dims,
        size: Vec3::from_array(p.size) * dims,
    };

    let emissive = v.material.emissive;
    let (meshes, decorations, point_light, glow_quad, hover_affordance) = match state.lod {
        LodLevel::High => {
            let light = match (emissive, recipe.light_anchor) {
                (true, Some(anchor)) => Some(PointLight {
                    position: entity.position + Vec3::new(0.0, anchor * d.height, 0.0),
                    color: v.material.emissive_color,
                    intensity: v.material.emissive_strength * glow_strength,
                    range: d.height * 4.0,
                }),
                _ => None,
            };
            let meshes = recipe.parts.iter().map(place).collect();
            (meshes, recipe.decorations, light, false, true)
        }
        LodLevel::Medium => {
            let meshes = recipe.parts.first().map(place).into_iter().collect();
            (meshes, 0, None, emissive, false)
        }
        // Culled was rejected above
        _ => {
            let single = MeshPart {
                primitive: recipe.base,
                center: entity.position + Vec3::new(0.0, d.height * 0.5, 0.0),
                size: dims,
            };
            (vec![single], 0, None, false, false)
        }
    };

    Ok(DrawRecipe {
        id: entity.id.clone(),
        level: state.lod,
        shape: v.shape,
        position: entity.position,
        tilt: d.tilt,
        meshes,
        decorations,
        point_light,
        glow_quad,
        hover_affordance,
        material: v.material,
        fog_factor: fog_factor(state.distance, fog),
        placeholder: false,
    })
}

/// Single neutral box drawn in place of an entity whose recipe failed.
pub fn placeholder(entity: &Entity, state: &RenderState, fog: &FogParams) -> DrawRecipe {
    let size = Vec3::from_array(PLACEHOLDER_SIZE);
    DrawRecipe {
        id: entity.id.clone(),
        level: LodLevel::Low,
        shape: state.variation.shape,
        position: entity.position,
        tilt: 0.0,
        meshes: vec![MeshPart {
            primitive: Primitive::Box,
            center: entity.position + Vec3::new(0.0, size.y * 0.5, 0.0),
            size,
        }],
        decorations: 0,
        point_light: None,
        glow_quad: false,
        hover_affordance: false,
        material: MaterialParams {
            base_color: PLACEHOLDER_COLOR,
            roughness: 0.9,
            weathering: 0.0,
            emissive: false,
            emissive_color: [0.0; 3],
            emissive_strength: 0.0,
        },
        fog_factor: fog_factor(state.distance, fog),
        placeholder: true,
    }
}
