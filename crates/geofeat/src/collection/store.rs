// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The in-memory feature store.

use std::collections::BTreeMap;
use std::fmt;

use crate::geom::Bounds;
use crate::property::Feature;
use crate::schema::FeatureType;

use super::{CollectionEvent, CollectionEventKind, CollectionListener};

/// An identity-indexed, in-memory container of features.
///
/// Features are keyed by id; iteration follows id sort order. The
/// collection owns its features: removal and `clear` destroy them after
/// the removal event fires. The schema is assigned from the first added
/// feature when unset; features of other concrete types are accepted and
/// logged, not rejected.
///
/// Single-threaded by design: no locks, no atomics. Iteration borrows
/// the collection, so structural mutation during iteration is a compile
/// error rather than undefined behavior.
pub struct FeatureCollection {
    features: BTreeMap<String, Feature>,
    schema: Option<FeatureType>,
    bounds: Option<Bounds>,
    listeners: Vec<Option<Box<dyn CollectionListener>>>,
}

impl FeatureCollection {
    /// An empty collection with no schema.
    pub fn new() -> Self {
        Self {
            features: BTreeMap::new(),
            schema: None,
            bounds: None,
            listeners: Vec::new(),
        }
    }

    /// An empty collection pinned to a schema up front.
    pub fn with_schema(schema: FeatureType) -> Self {
        Self {
            features: BTreeMap::new(),
            schema: Some(schema),
            bounds: None,
            listeners: Vec::new(),
        }
    }

    /// The collection schema, if one has been assigned.
    pub fn schema(&self) -> Option<&FeatureType> {
        self.schema.as_ref()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Whether a feature with this id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.features.contains_key(id)
    }

    /// Borrow a feature by id.
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Mutably borrow a feature by id.
    ///
    /// Value mutation does not invalidate the cached bounds; only
    /// structural mutation does. Callers changing geometry through this
    /// handle refresh the envelope themselves or accept staleness until
    /// the next structural change.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Feature> {
        self.features.get_mut(id)
    }

    /// Iterate features in id sort order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    /// Iterate feature ids in sort order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Add a feature.
    ///
    /// Returns `false` (a soft failure: no event, size unchanged) when
    /// the feature has no id or a feature with the same id already
    /// exists. Ids are the sole uniqueness key; value equality is
    /// irrelevant. On the first successful add with no schema set, the
    /// feature's type becomes the collection schema; later features of a
    /// different concrete type are accepted with a warning.
    pub fn add(&mut self, feature: Feature) -> bool {
        let Some(id) = feature.id().map(str::to_string) else {
            log::debug!("[FeatureCollection] rejected feature without id");
            return false;
        };
        if self.features.contains_key(&id) {
            log::debug!("[FeatureCollection] rejected duplicate id {}", id);
            return false;
        }
        self.adopt_schema(&feature);
        self.features.insert(id.clone(), feature);
        self.bounds = None;
        if let Some(added) = self.features.get(&id) {
            self.notify(CollectionEventKind::Added, vec![added]);
        }
        true
    }

    /// Add a batch of features, firing one batched ADDED event for the
    /// accepted subset. Returns how many were accepted.
    pub fn add_all(&mut self, features: impl IntoIterator<Item = Feature>) -> usize {
        let mut accepted_ids = Vec::new();
        for feature in features {
            let Some(id) = feature.id().map(str::to_string) else {
                log::debug!("[FeatureCollection] rejected feature without id");
                continue;
            };
            if self.features.contains_key(&id) {
                log::debug!("[FeatureCollection] rejected duplicate id {}", id);
                continue;
            }
            self.adopt_schema(&feature);
            self.features.insert(id.clone(), feature);
            accepted_ids.push(id);
        }
        if accepted_ids.is_empty() {
            return 0;
        }
        self.bounds = None;
        accepted_ids.sort();
        let batch: Vec<&Feature> = accepted_ids
            .iter()
            .filter_map(|id| self.features.get(id))
            .collect();
        self.notify(CollectionEventKind::Added, batch);
        accepted_ids.len()
    }

    /// Remove a feature by id, destroying it after the removal event.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(removed) = self.features.remove(id) else {
            return false;
        };
        self.bounds = None;
        self.notify(CollectionEventKind::Removed, vec![&removed]);
        true
    }

    /// Remove every feature, firing a single batched removal event.
    pub fn clear(&mut self) {
        if self.features.is_empty() {
            return;
        }
        let drained = std::mem::take(&mut self.features);
        self.bounds = None;
        let batch: Vec<&Feature> = drained.values().collect();
        self.notify(CollectionEventKind::Removed, batch);
    }

    /// The envelope of the whole collection: the union of every
    /// feature's bounds, skipping empty ones.
    ///
    /// Lazily computed and cached until the next structural mutation.
    pub fn bounds(&mut self) -> Bounds {
        if let Some(cached) = &self.bounds {
            return cached.clone();
        }
        let mut acc = Bounds::empty();
        for feature in self.features.values() {
            let fb = feature.bounds();
            if !fb.is_empty() {
                acc.expand_to_include(&fb);
            }
        }
        self.bounds = Some(acc.clone());
        acc
    }

    /// Register a listener; returns a handle for removal.
    pub fn add_listener(&mut self, listener: Box<dyn CollectionListener>) -> usize {
        self.listeners.push(Some(listener));
        self.listeners.len() - 1
    }

    /// Deregister a listener by handle. Returns whether one was removed.
    pub fn remove_listener(&mut self, handle: usize) -> bool {
        match self.listeners.get_mut(handle) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    fn adopt_schema(&mut self, feature: &Feature) {
        match &self.schema {
            None => self.schema = Some(feature.feature_type().clone()),
            Some(schema) => {
                if schema.name() != feature.feature_type().name() {
                    log::warn!(
                        "[FeatureCollection] heterogeneous mix: schema {} vs feature {}",
                        schema.name(),
                        feature.feature_type().name()
                    );
                }
            }
        }
    }

    fn notify(&self, kind: CollectionEventKind, features: Vec<&Feature>) {
        let event = CollectionEvent { kind, features };
        for listener in self.listeners.iter().flatten() {
            listener.collection_changed(&event);
        }
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FeatureCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureCollection")
            .field("len", &self.features.len())
            .field("schema", &self.schema.as_ref().map(|s| s.name()))
            .field("bounds", &self.bounds)
            .field(
                "listeners",
                &self.listeners.iter().flatten().count(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{Feature, PropertyValue};
    use crate::schema::{GeometryKind, ScalarKind, TypeBuilder};
    use geo::{Geometry, Point};

    fn sample_type() -> crate::schema::FeatureType {
        TypeBuilder::new("poi")
            .add_geometry("location", GeometryKind::Point, None)
            .add_scalar("name", ScalarKind::String)
            .build_feature_type(true)
            .expect("build")
    }

    fn sample_feature(id: &str, x: f64, y: f64) -> Feature {
        let mut feature =
            Feature::with_defaults(sample_type(), Some(id.to_string())).expect("feature");
        feature
            .set_attribute(
                "location",
                PropertyValue::Geometry(Geometry::Point(Point::new(x, y))),
            )
            .expect("set");
        feature
    }

    #[test]
    fn test_iteration_follows_id_order() {
        let mut fc = FeatureCollection::new();
        assert!(fc.add(sample_feature("b", 1.0, 1.0)));
        assert!(fc.add(sample_feature("a", 2.0, 2.0)));
        assert!(fc.add(sample_feature("c", 3.0, 3.0)));
        let ids: Vec<_> = fc.ids().collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_add_without_id_is_soft_failure() {
        let mut fc = FeatureCollection::new();
        let feature = Feature::with_defaults(sample_type(), None).expect("feature");
        assert!(!fc.add(feature));
        assert!(fc.is_empty());
    }

    #[test]
    fn test_schema_adopted_from_first_feature() {
        let mut fc = FeatureCollection::new();
        assert!(fc.schema().is_none());
        fc.add(sample_feature("a", 0.0, 0.0));
        assert_eq!(fc.schema().map(|s| s.name().local_part()), Some("poi"));
    }

    #[test]
    fn test_bounds_lazy_union() {
        let mut fc = FeatureCollection::new();
        fc.add(sample_feature("a", 0.0, 0.0));
        fc.add(sample_feature("b", 10.0, 20.0));
        let bounds = fc.bounds();
        let rect = bounds.rect().expect("non-empty");
        assert_eq!((rect.max().x, rect.max().y), (10.0, 20.0));
    }

    #[test]
    fn test_random_ids_sorted() {
        let mut fc = FeatureCollection::new();
        let mut ids: Vec<String> = (0..50)
            .map(|_| format!("fid.{:08x}", fastrand::u32(..)))
            .collect();
        for id in &ids {
            fc.add(sample_feature(id, 0.0, 0.0));
        }
        ids.sort();
        ids.dedup();
        let stored: Vec<_> = fc.ids().map(str::to_string).collect();
        assert_eq!(stored, ids);
    }
}
