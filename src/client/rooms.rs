//! Rooms within a location (`locations/{id}/rooms/...`).

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use super::SmartThings;

#[derive(Serialize)]
struct RoomBody<'a> {
    name: &'a str,
}

impl SmartThings {
    /// List the rooms in a location.
    pub async fn list_rooms(&self, location_id: &str) -> Result<Value> {
        self.get(&format!("locations/{location_id}/rooms")).await
    }

    /// Create a room.
    pub async fn create_room(&self, location_id: &str, name: &str) -> Result<Value> {
        self.post(&format!("locations/{location_id}/rooms"), &RoomBody { name })
            .await
    }

    /// Get one room.
    pub async fn get_room(&self, location_id: &str, room_id: &str) -> Result<Value> {
        self.get(&format!("locations/{location_id}/rooms/{room_id}"))
            .await
    }

    /// Rename a room.
    pub async fn update_room(
        &self,
        location_id: &str,
        room_id: &str,
        name: &str,
    ) -> Result<Value> {
        self.put(
            &format!("locations/{location_id}/rooms/{room_id}"),
            &RoomBody { name },
        )
        .await
    }

    /// Delete a room.
    pub async fn delete_room(&self, location_id: &str, room_id: &str) -> Result<Value> {
        self.delete(&format!("locations/{location_id}/rooms/{room_id}"))
            .await
    }
}
