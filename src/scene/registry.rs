//! Entity registry: the normalized, read-only entity list.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

use super::entity::{Entity, EntityRecord};

/// What changed in a [`EntityRegistry::sync`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Records dropped because they could not be normalized.
    pub rejected: usize,
    /// Repeated ids; the first occurrence wins.
    pub duplicates: usize,
    /// Ids whose cached per-entity data is now stale (removed or updated).
    pub stale: Vec<String>,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.updated == 0
    }
}

/// Owns the current entity list in external order.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entity list with `records`.
    pub fn sync(&mut self, records: &[EntityRecord]) -> SyncReport {
        let mut report = SyncReport::default();
        let mut next = Vec::with_capacity(records.len());
        let mut seen: HashSet<String> = HashSet::with_capacity(records.len());

        for record in records {
            let entity = match Entity::from_record(record) {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Dropping entity record: {e}");
                    report.rejected += 1;
                    continue;
                }
            };
            if !seen.insert(entity.id.clone()) {
                log::warn!("Duplicate entity id '{}', keeping first", entity.id);
                report.duplicates += 1;
                continue;
            }

            match self.get(&entity.id) {
                None => report.added += 1,
                Some(old) if *old == entity => report.unchanged += 1,
                Some(_) => {
                    report.updated += 1;
                    report.stale.push(entity.id.clone());
                }
            }
            next.push(entity);
        }

        for old in &self.entities {
            if !seen.contains(&old.id) {
                report.removed += 1;
                report.stale.push(old.id.clone());
            }
        }

        self.index = next.iter().enumerate().map(|(i, e)| (e.id.clone(), i)).collect();
        self.entities = next;

        log::debug!(
            "Entity sync: +{} -{} ~{} ({} total, {} rejected)",
            report.added,
            report.removed,
            report.updated,
            self.entities.len(),
            report.rejected
        );
        report
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn degraded_count(&self) -> usize {
        self.entities.iter().filter(|e| e.degraded).count()
    }
}

/// Read a JSON array of entity records.
pub fn load_records(path: &Path) -> Result<Vec<EntityRecord>, io::Error> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}
