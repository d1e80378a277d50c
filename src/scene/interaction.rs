//! Pointer hover/selection and hit testing.

use crate::core::Camera;
use crate::lod::RenderState;
use crate::math::Aabb;

use super::entity::Entity;

/// Events handed to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    Selected(String),
    /// Click on empty space cleared the selection.
    Deselected,
    Hovered(Option<String>),
}

/// Index of the nearest visible entity under the pointer.
///
/// `ndc` is in `[-1, 1]` with +Y up. `states` must be parallel to `entities`.
pub fn pick(camera: &Camera, ndc: [f32; 2], entities: &[Entity], states: &[RenderState]) -> Option<usize> {
    if !ndc.iter().all(|c| c.is_finite()) {
        return None;
    }
    let ray = camera.ray_from_ndc(ndc[0], ndc[1]);
    entities
        .iter()
        .zip(states)
        .enumerate()
        .filter(|(_, (_, s))| s.lod.is_visible())
        .filter_map(|(i, (e, s))| {
            let d = s.variation.dimensions;
            let bounds = Aabb::from_base(e.position, d.width, d.height, d.depth);
            ray.hit_distance(&bounds).map(|t| (t, i))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, i)| i)
}

/// Hover and selection state plus the outgoing event queue.
#[derive(Debug, Default)]
pub struct Interaction {
    hovered: Option<String>,
    selected: Option<String>,
    events: Vec<InteractionEvent>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Ids forced to full detail.
    pub fn forced_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.selected.iter().chain(self.hovered.iter()).map(String::as_str).collect();
        ids.dedup();
        ids
    }

    /// Update hover from a pick result. Emits only on change.
    pub fn hover(&mut self, id: Option<&str>) {
        if self.hovered.as_deref() == id {
            return;
        }
        self.hovered = id.map(str::to_string);
        self.events.push(InteractionEvent::Hovered(self.hovered.clone()));
    }

    /// Update selection from a click pick result.
    pub fn click(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                self.selected = Some(id.to_string());
                self.events.push(InteractionEvent::Selected(id.to_string()));
            }
            None => {
                if self.selected.take().is_some() {
                    self.events.push(InteractionEvent::Deselected);
                }
            }
        }
    }

    /// Forget ids that no longer exist.
    pub fn retain(&mut self, exists: impl Fn(&str) -> bool) {
        if self.hovered.as_deref().is_some_and(|id| !exists(id)) {
            self.hovered = None;
            self.events.push(InteractionEvent::Hovered(None));
        }
        if self.selected.as_deref().is_some_and(|id| !exists(id)) {
            self.selected = None;
            self.events.push(InteractionEvent::Deselected);
        }
    }

    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.selected = None;
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::DayNight;
    use crate::core::types::Vec3;
    use crate::lod::LodLevel;
    use crate::scene::entity::{Category, EntityRecord};
    use crate::variation::compute_variation;

    fn setup(positions: &[[f32; 3]]) -> (Vec<Entity>, Vec<RenderState>) {
        let entities: Vec<Entity> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Entity::from_record(&EntityRecord::new(format!("h{i}"), *p, Category::Residential, "#fff")).unwrap()
            })
            .collect();
        let states = entities
            .iter()
            .map(|e| RenderState {
                lod: LodLevel::Medium,
                in_frustum: true,
                distance: e.position.length(),
                variation: compute_variation(&e.id, e.category, e.color, DayNight::Day),
                forced: false,
            })
            .collect();
        (entities, states)
    }

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 1.0, 0.0), 60.0, 16.0 / 9.0)
    }

    #[test]
    fn test_pick_nearest() {
        let (entities, states) = setup(&[[0.0, 0.0, -40.0], [0.0, 0.0, -20.0]]);
        assert_eq!(pick(&camera(), [0.0, 0.0], &entities, &states), Some(1));
    }

    #[test]
    fn test_pick_skips_culled() {
        let (entities, mut states) = setup(&[[0.0, 0.0, -40.0], [0.0, 0.0, -20.0]]);
        states[1].lod = LodLevel::Culled;
        assert_eq!(pick(&camera(), [0.0, 0.0], &entities, &states), Some(0));
    }

    #[test]
    fn test_pick_miss() {
        let (entities, states) = setup(&[[0.0, 0.0, -20.0]]);
        assert_eq!(pick(&camera(), [0.95, 0.95], &entities, &states), None);
        assert_eq!(pick(&camera(), [f32::NAN, 0.0], &entities, &states), None);
    }

    #[test]
    fn test_hover_emits_on_change_only() {
        let mut ix = Interaction::new();
        ix.hover(Some("a"));
        ix.hover(Some("a"));
        ix.hover(None);
        assert_eq!(
            ix.drain_events(),
            vec![InteractionEvent::Hovered(Some("a".into())), InteractionEvent::Hovered(None)]
        );
        assert!(ix.drain_events().is_empty());
    }

    #[test]
    fn test_click_select_and_clear() {
        let mut ix = Interaction::new();
        ix.click(Some("a"));
        ix.hover(Some("b"));
        assert_eq!(ix.forced_ids(), vec!["a", "b"]);
        ix.click(None);
        ix.click(None);
        let events = ix.drain_events();
        assert_eq!(events.last(), Some(&InteractionEvent::Deselected));
        assert_eq!(events.iter().filter(|e| **e == InteractionEvent::Deselected).count(), 1);
    }

    #[test]
    fn test_retain_drops_removed() {
        let mut ix = Interaction::new();
        ix.click(Some("gone"));
        ix.drain_events();
        ix.retain(|id| id != "gone");
        assert_eq!(ix.selected(), None);
        assert_eq!(ix.drain_events(), vec![InteractionEvent::Deselected]);
    }
}
