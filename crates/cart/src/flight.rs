//! Flying-item animation queue.
//!
//! Adding a product from a listing launches a thumbnail that flies from the
//! click point to the cart badge. The queue only tracks which thumbnails are
//! airborne and where each one started; the embedder animates them and
//! reports back when each animation finishes.

use common::FlightId;
use serde::{Deserialize, Serialize};

/// Where on screen an add-to-cart interaction happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerOrigin {
    pub x: f32,
    pub y: f32,
}

impl PointerOrigin {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One airborne thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyingItem {
    pub id: FlightId,
    pub image: String,
    pub start_x: f32,
    pub start_y: f32,
}

/// The set of thumbnails currently in flight.
///
/// Each [`launch`](Self::launch) appends an entry with a fresh id; the entry
/// stays queued until [`land`](Self::land) is called with that id, so the
/// embedder decides when an animation is over.
#[derive(Debug, Clone, Default)]
pub struct FlightQueue {
    items: Vec<FlyingItem>,
}

impl FlightQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a flight from the given origin and returns its id.
    pub fn launch(&mut self, image: impl Into<String>, origin: PointerOrigin) -> FlightId {
        let id = FlightId::new();
        self.items.push(FlyingItem {
            id,
            image: image.into(),
            start_x: origin.x,
            start_y: origin.y,
        });
        id
    }

    /// Removes a finished flight. Unknown ids are ignored.
    pub fn land(&mut self, id: FlightId) {
        self.items.retain(|item| item.id != id);
    }

    pub fn items(&self) -> &[FlyingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
