//! Scene store: ownership container for the four placed-object collections
//!
//! Mutations never validate placement; the caller runs the placement
//! validator first and decides whether to commit. Collections keep
//! insertion order so validation findings are deterministic.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{KerbsideError, Result};
use crate::core::types::{ObjectClass, ObjectId};
use crate::scene::object::{
    AdvertisingObject, FurnitureObject, PlacedObject, RoadKind, RoadObject, SidewalkKind,
    SidewalkObject, SurfaceKind,
};

/// Borrowed view of one stored object
#[derive(Debug)]
pub enum SceneObjectRef<'a> {
    Furniture(&'a FurnitureObject),
    Road(&'a RoadObject),
    Sidewalk(&'a SidewalkObject),
    Advertising(&'a AdvertisingObject),
}

impl SceneObjectRef<'_> {
    pub fn id(&self) -> ObjectId {
        match self {
            SceneObjectRef::Furniture(o) => o.id,
            SceneObjectRef::Road(o) => o.id,
            SceneObjectRef::Sidewalk(o) => o.id,
            SceneObjectRef::Advertising(o) => o.id,
        }
    }

    pub fn class(&self) -> ObjectClass {
        match self {
            SceneObjectRef::Furniture(_) => ObjectClass::Furniture,
            SceneObjectRef::Road(_) => ObjectClass::Road,
            SceneObjectRef::Sidewalk(_) => ObjectClass::Sidewalk,
            SceneObjectRef::Advertising(_) => ObjectClass::Advertising,
        }
    }
}

/// Field updates for an existing object. The variant must match the
/// object's class; the class itself can never be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FurniturePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<String>,
    pub is_accessible: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadPatch {
    pub name: Option<String>,
    pub kind: Option<RoadKind>,
    pub width: Option<f64>,
    pub lanes: Option<u8>,
    pub surface: Option<SurfaceKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidewalkPatch {
    pub name: Option<String>,
    pub kind: Option<SidewalkKind>,
    pub width: Option<f64>,
    pub is_accessible_for_disabled: Option<bool>,
    pub surface: Option<SurfaceKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvertisingPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectPatch {
    Furniture(FurniturePatch),
    Road(RoadPatch),
    Sidewalk(SidewalkPatch),
    Advertising(AdvertisingPatch),
}

impl ObjectPatch {
    fn class(&self) -> ObjectClass {
        match self {
            ObjectPatch::Furniture(_) => ObjectClass::Furniture,
            ObjectPatch::Road(_) => ObjectClass::Road,
            ObjectPatch::Sidewalk(_) => ObjectClass::Sidewalk,
            ObjectPatch::Advertising(_) => ObjectClass::Advertising,
        }
    }
}

/// The four ordered collections of placed objects, keyed by unique id.
/// Owned by a single editing session; lives until the session ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneStore {
    furniture: Vec<FurnitureObject>,
    roads: Vec<RoadObject>,
    sidewalks: Vec<SidewalkObject>,
    advertising: Vec<AdvertisingObject>,
    #[serde(skip)]
    index: AHashMap<ObjectId, ObjectClass>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the id index after deserialization
    pub fn reindex(&mut self) {
        self.index.clear();
        for o in &self.furniture {
            self.index.insert(o.id, ObjectClass::Furniture);
        }
        for o in &self.roads {
            self.index.insert(o.id, ObjectClass::Road);
        }
        for o in &self.sidewalks {
            self.index.insert(o.id, ObjectClass::Sidewalk);
        }
        for o in &self.advertising {
            self.index.insert(o.id, ObjectClass::Advertising);
        }
    }

    pub fn len(&self) -> usize {
        self.furniture.len() + self.roads.len() + self.sidewalks.len() + self.advertising.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn furniture(&self) -> &[FurnitureObject] {
        &self.furniture
    }

    pub fn roads(&self) -> &[RoadObject] {
        &self.roads
    }

    pub fn sidewalks(&self) -> &[SidewalkObject] {
        &self.sidewalks
    }

    pub fn advertising(&self) -> &[AdvertisingObject] {
        &self.advertising
    }

    /// Add an object to its class collection and return its id
    pub fn add(&mut self, object: PlacedObject) -> ObjectId {
        let id = object.id();
        tracing::debug!(%id, class = %object.class(), "adding object to scene");
        self.index.insert(id, object.class());
        match object {
            PlacedObject::Furniture(o) => self.furniture.push(o),
            PlacedObject::Road(o) => self.roads.push(o),
            PlacedObject::Sidewalk(o) => self.sidewalks.push(o),
            PlacedObject::Advertising(o) => self.advertising.push(o),
        }
        id
    }

    pub fn find(&self, id: ObjectId) -> Option<SceneObjectRef<'_>> {
        match self.index.get(&id)? {
            ObjectClass::Furniture => self
                .furniture
                .iter()
                .find(|o| o.id == id)
                .map(SceneObjectRef::Furniture),
            ObjectClass::Road => self
                .roads
                .iter()
                .find(|o| o.id == id)
                .map(SceneObjectRef::Road),
            ObjectClass::Sidewalk => self
                .sidewalks
                .iter()
                .find(|o| o.id == id)
                .map(SceneObjectRef::Sidewalk),
            ObjectClass::Advertising => self
                .advertising
                .iter()
                .find(|o| o.id == id)
                .map(SceneObjectRef::Advertising),
        }
    }

    pub(crate) fn road_mut(&mut self, id: ObjectId) -> Option<&mut RoadObject> {
        self.roads.iter_mut().find(|o| o.id == id)
    }

    pub(crate) fn sidewalk_mut(&mut self, id: ObjectId) -> Option<&mut SidewalkObject> {
        self.sidewalks.iter_mut().find(|o| o.id == id)
    }

    /// Apply a field patch to an existing object.
    /// Unknown id or a patch for the wrong class is an error, never a panic.
    pub fn update(&mut self, id: ObjectId, patch: ObjectPatch) -> Result<()> {
        let actual = *self
            .index
            .get(&id)
            .ok_or(KerbsideError::ObjectNotFound(id))?;
        if actual != patch.class() {
            return Err(KerbsideError::PatchClassMismatch {
                id,
                actual,
                patch: patch.class(),
            });
        }

        match patch {
            ObjectPatch::Furniture(p) => {
                let o = self
                    .furniture
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or(KerbsideError::ObjectNotFound(id))?;
                if let Some(name) = p.name {
                    o.name = name;
                }
                if let Some(description) = p.description {
                    o.description = description;
                }
                if let Some(type_id) = p.type_id {
                    o.type_id = type_id;
                }
                if let Some(flag) = p.is_accessible {
                    o.is_accessible = flag;
                }
            }
            ObjectPatch::Road(p) => {
                let o = self
                    .roads
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or(KerbsideError::ObjectNotFound(id))?;
                if let Some(name) = p.name {
                    o.name = name;
                }
                if let Some(kind) = p.kind {
                    o.kind = kind;
                }
                if let Some(width) = p.width {
                    o.width = width;
                }
                if let Some(lanes) = p.lanes {
                    o.lanes = lanes;
                }
                if let Some(surface) = p.surface {
                    o.surface = surface;
                }
            }
            ObjectPatch::Sidewalk(p) => {
                let o = self
                    .sidewalks
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or(KerbsideError::ObjectNotFound(id))?;
                if let Some(name) = p.name {
                    o.name = name;
                }
                if let Some(kind) = p.kind {
                    o.kind = kind;
                }
                if let Some(width) = p.width {
                    o.width = width;
                }
                if let Some(flag) = p.is_accessible_for_disabled {
                    o.is_accessible_for_disabled = flag;
                }
                if let Some(surface) = p.surface {
                    o.surface = surface;
                }
            }
            ObjectPatch::Advertising(p) => {
                let o = self
                    .advertising
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or(KerbsideError::ObjectNotFound(id))?;
                if let Some(name) = p.name {
                    o.name = name;
                }
                if let Some(description) = p.description {
                    o.description = description;
                }
                if let Some(type_id) = p.type_id {
                    o.type_id = type_id;
                }
            }
        }
        Ok(())
    }

    /// Remove an object by id and return it
    pub fn remove(&mut self, id: ObjectId) -> Result<PlacedObject> {
        let class = self
            .index
            .remove(&id)
            .ok_or(KerbsideError::ObjectNotFound(id))?;
        tracing::debug!(%id, %class, "removing object from scene");

        let removed = match class {
            ObjectClass::Furniture => {
                let pos = self.furniture.iter().position(|o| o.id == id);
                pos.map(|i| PlacedObject::Furniture(self.furniture.remove(i)))
            }
            ObjectClass::Road => {
                let pos = self.roads.iter().position(|o| o.id == id);
                pos.map(|i| PlacedObject::Road(self.roads.remove(i)))
            }
            ObjectClass::Sidewalk => {
                let pos = self.sidewalks.iter().position(|o| o.id == id);
                pos.map(|i| PlacedObject::Sidewalk(self.sidewalks.remove(i)))
            }
            ObjectClass::Advertising => {
                let pos = self.advertising.iter().position(|o| o.id == id);
                pos.map(|i| PlacedObject::Advertising(self.advertising.remove(i)))
            }
        };
        removed.ok_or(KerbsideError::ObjectNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GeoPoint;

    fn bench_at(lat: f64, lon: f64) -> PlacedObject {
        PlacedObject::Furniture(FurnitureObject::new(
            "bench",
            "Bench",
            GeoPoint::new(lat, lon),
            false,
        ))
    }

    #[test]
    fn test_add_find_remove() {
        let mut store = SceneStore::new();
        let id = store.add(bench_at(43.2, 76.9));

        assert_eq!(store.furniture().len(), 1);
        let found = store.find(id).unwrap();
        assert_eq!(found.class(), ObjectClass::Furniture);

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(store.is_empty());
        assert!(store.find(id).is_none());
    }

    #[test]
    fn test_remove_unknown_id_is_error() {
        let mut store = SceneStore::new();
        let err = store.remove(ObjectId::new()).unwrap_err();
        assert!(matches!(err, KerbsideError::ObjectNotFound(_)));
    }

    #[test]
    fn test_update_patches_fields() {
        let mut store = SceneStore::new();
        let id = store.add(bench_at(43.2, 76.9));

        store
            .update(
                id,
                ObjectPatch::Furniture(FurniturePatch {
                    name: Some("Bench by the fountain".to_string()),
                    is_accessible: Some(true),
                    ..FurniturePatch::default()
                }),
            )
            .unwrap();

        let bench = &store.furniture()[0];
        assert_eq!(bench.name, "Bench by the fountain");
        assert!(bench.is_accessible);
        // Untouched fields survive
        assert_eq!(bench.type_id, "bench");
    }

    #[test]
    fn test_update_wrong_class_is_error() {
        let mut store = SceneStore::new();
        let id = store.add(bench_at(43.2, 76.9));

        let err = store
            .update(id, ObjectPatch::Road(RoadPatch::default()))
            .unwrap_err();
        assert!(matches!(err, KerbsideError::PatchClassMismatch { .. }));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = SceneStore::new();
        store.add(bench_at(43.20, 76.90));
        store.add(bench_at(43.21, 76.91));
        store.add(bench_at(43.22, 76.92));

        let lats: Vec<f64> = store.furniture().iter().map(|o| o.position.lat).collect();
        assert_eq!(lats, vec![43.20, 43.21, 43.22]);
    }

    #[test]
    fn test_reindex_after_deserialization() {
        let mut store = SceneStore::new();
        let id = store.add(bench_at(43.2, 76.9));

        let json = serde_json::to_string(&store).unwrap();
        let mut restored: SceneStore = serde_json::from_str(&json).unwrap();
        assert!(restored.find(id).is_none()); // index not serialized
        restored.reindex();
        assert!(restored.find(id).is_some());
    }
}
