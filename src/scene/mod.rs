//! Scene ownership: placed objects, the store, and the drawing session

mod drawing;
mod object;
mod store;

pub use drawing::{DrawingOutcome, DrawingSession, DrawingState};
pub use object::{
    AdvertisingObject, FurnitureObject, PlacedObject, RoadKind, RoadObject, SidewalkKind,
    SidewalkObject, SurfaceKind, MIN_ROAD_POINTS, MIN_SIDEWALK_RING_POINTS,
};
pub use store::{
    AdvertisingPatch, FurniturePatch, ObjectPatch, RoadPatch, SceneObjectRef, SceneStore,
    SidewalkPatch,
};
