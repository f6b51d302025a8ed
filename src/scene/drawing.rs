//! Drawing state machine for multi-click geometry entry
//!
//! At most one road or sidewalk accumulates points at a time. Finishing a
//! drawing below the minimum point count removes the object from the
//! scene store; switching the selected object class while drawing
//! implicitly finishes first.

use crate::core::error::{KerbsideError, Result};
use crate::core::types::{DrawnClass, GeoPoint, ObjectClass, ObjectId};
use crate::geometry;
use crate::scene::object::{
    PlacedObject, RoadKind, RoadObject, SidewalkKind, SidewalkObject, MIN_ROAD_POINTS,
    MIN_SIDEWALK_RING_POINTS,
};
use crate::scene::store::SceneStore;
use crate::validation::Finding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    Idle,
    Drawing {
        object_id: ObjectId,
        class: DrawnClass,
    },
}

/// Result of finishing a drawing
#[derive(Debug)]
pub enum DrawingOutcome {
    /// The object met its minimum point count and stays in the scene
    Committed {
        object_id: ObjectId,
        class: DrawnClass,
        finding: Finding,
    },
    /// The object was below the minimum and has been removed
    Discarded {
        object_id: ObjectId,
        class: DrawnClass,
        finding: Finding,
    },
}

/// Coordinates the scene store during multi-click geometry entry
#[derive(Debug)]
pub struct DrawingSession {
    state: DrawingState,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self {
            state: DrawingState::Idle,
        }
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Begin drawing a road at `first`. The caller must finish any active
    /// drawing beforehand.
    pub fn start_road(
        &mut self,
        store: &mut SceneStore,
        kind: RoadKind,
        first: GeoPoint,
    ) -> Result<ObjectId> {
        if self.is_active() {
            return Err(KerbsideError::DrawingInProgress);
        }
        let name = format!("Road #{}", store.roads().len() + 1);
        let object_id = store.add(PlacedObject::Road(RoadObject::started_at(
            kind, &name, first,
        )));
        self.state = DrawingState::Drawing {
            object_id,
            class: DrawnClass::Road,
        };
        tracing::debug!(%object_id, "started road drawing");
        Ok(object_id)
    }

    /// Begin drawing a sidewalk ring at `first`
    pub fn start_sidewalk(
        &mut self,
        store: &mut SceneStore,
        kind: SidewalkKind,
        first: GeoPoint,
    ) -> Result<ObjectId> {
        if self.is_active() {
            return Err(KerbsideError::DrawingInProgress);
        }
        let name = format!("Sidewalk #{}", store.sidewalks().len() + 1);
        let object_id = store.add(PlacedObject::Sidewalk(SidewalkObject::started_at(
            kind, &name, first,
        )));
        self.state = DrawingState::Drawing {
            object_id,
            class: DrawnClass::Sidewalk,
        };
        tracing::debug!(%object_id, "started sidewalk drawing");
        Ok(object_id)
    }

    /// Append a coordinate to the active object's geometry
    pub fn add_point(&mut self, store: &mut SceneStore, point: GeoPoint) -> Result<()> {
        let (object_id, class) = match self.state {
            DrawingState::Idle => return Err(KerbsideError::NotDrawing),
            DrawingState::Drawing { object_id, class } => (object_id, class),
        };
        match class {
            DrawnClass::Road => store
                .road_mut(object_id)
                .ok_or(KerbsideError::ObjectNotFound(object_id))?
                .path
                .push(point),
            DrawnClass::Sidewalk => store
                .sidewalk_mut(object_id)
                .ok_or(KerbsideError::ObjectNotFound(object_id))?
                .ring
                .push(point),
        }
        Ok(())
    }

    /// Finish the active drawing. Objects below the minimum point count
    /// are removed from the store and reported as discarded.
    pub fn finish(&mut self, store: &mut SceneStore) -> Result<DrawingOutcome> {
        let (object_id, class) = match self.state {
            DrawingState::Idle => return Err(KerbsideError::NotDrawing),
            DrawingState::Drawing { object_id, class } => (object_id, class),
        };
        self.state = DrawingState::Idle;

        let (complete, committed) = match class {
            DrawnClass::Road => {
                let road = store
                    .roads()
                    .iter()
                    .find(|r| r.id == object_id)
                    .ok_or(KerbsideError::ObjectNotFound(object_id))?;
                (
                    road.is_complete(),
                    Finding::info(format!(
                        "Road '{}' committed: {:.1} m over {} points.",
                        road.name,
                        geometry::polyline_length(&road.path),
                        road.path.len()
                    )),
                )
            }
            DrawnClass::Sidewalk => {
                let sidewalk = store
                    .sidewalks()
                    .iter()
                    .find(|s| s.id == object_id)
                    .ok_or(KerbsideError::ObjectNotFound(object_id))?;
                (
                    sidewalk.is_complete(),
                    Finding::info(format!(
                        "Sidewalk '{}' committed: ring of {} points.",
                        sidewalk.name,
                        sidewalk.ring.len()
                    )),
                )
            }
        };

        if complete {
            tracing::debug!(%object_id, %class, "drawing committed");
            return Ok(DrawingOutcome::Committed {
                object_id,
                class,
                finding: committed,
            });
        }

        store.remove(object_id)?;
        let finding = match class {
            DrawnClass::Road => Finding::warning(format!(
                "Road removed (fewer than {} points).",
                MIN_ROAD_POINTS
            )),
            DrawnClass::Sidewalk => Finding::warning(format!(
                "Sidewalk removed (fewer than {} points).",
                MIN_SIDEWALK_RING_POINTS
            )),
        };
        tracing::debug!(%object_id, %class, "incomplete drawing discarded");
        Ok(DrawingOutcome::Discarded {
            object_id,
            class,
            finding,
        })
    }

    /// Implicit finish on object-class switch: if a drawing of a
    /// different class is active, finish it first. Returns the outcome
    /// of that finish, if any.
    pub fn ensure_idle_for(
        &mut self,
        store: &mut SceneStore,
        selected: ObjectClass,
    ) -> Result<Option<DrawingOutcome>> {
        match self.state {
            DrawingState::Drawing { class, .. } if ObjectClass::from(class) != selected => {
                Ok(Some(self.finish(store)?))
            }
            _ => Ok(None),
        }
    }
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new()
    }
}
