//! Side effects emitted by the simulation
//!
//! The simulation never touches a renderer, audio device or physics engine.
//! It queues [`Command`]s and the host applies them (see `crate::adapter`).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::block::BlockId;
use super::color::BlockColor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Create a box in the scene
    SpawnBlock {
        id: BlockId,
        position: Vec3,
        scale: Vec3,
        color: BlockColor,
    },
    /// Active block moved
    MoveBlock { id: BlockId, position: Vec3 },
    /// Block was resized and re-centered by a cut or growth
    SetBlockTransform {
        id: BlockId,
        position: Vec3,
        scale: Vec3,
    },
    /// Visual-only scale (pulse animation)
    SetBlockScale { id: BlockId, scale: Vec3 },
    /// Hand the block over to free-fall physics
    AttachPhysics { id: BlockId },
    /// Destroy the block after a delay
    DestroyAfter { id: BlockId, seconds: f32 },
    PlaySound { clip: String, pitch: f32 },
    UpdateScore { text: String },
    /// Move the observing camera by `delta`
    ShiftCamera { delta: Vec3 },
    ShowGameOver,
    HideGameOver,
    /// Tear the whole scene down before a restarted session spawns
    ResetScene,
}

impl Command {
    /// Block this command targets, if any
    pub fn block_id(&self) -> Option<BlockId> {
        match self {
            Command::SpawnBlock { id, .. }
            | Command::MoveBlock { id, .. }
            | Command::SetBlockTransform { id, .. }
            | Command::SetBlockScale { id, .. }
            | Command::AttachPhysics { id }
            | Command::DestroyAfter { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Command::SpawnBlock { .. } => "spawn_block",
            Command::MoveBlock { .. } => "move_block",
            Command::SetBlockTransform { .. } => "set_block_transform",
            Command::SetBlockScale { .. } => "set_block_scale",
            Command::AttachPhysics { .. } => "attach_physics",
            Command::DestroyAfter { .. } => "destroy_after",
            Command::PlaySound { .. } => "play_sound",
            Command::UpdateScore { .. } => "update_score",
            Command::ShiftCamera { .. } => "shift_camera",
            Command::ShowGameOver => "show_game_over",
            Command::HideGameOver => "hide_game_over",
            Command::ResetScene => "reset_scene",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let cmd = Command::AttachPhysics { id: BlockId(3) };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert_eq!(json, r#"{"type":"attach_physics","id":3}"#);

        let back: Command = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_block_id_lookup() {
        assert_eq!(
            Command::DestroyAfter { id: BlockId(9), seconds: 3.0 }.block_id(),
            Some(BlockId(9))
        );
        assert_eq!(Command::ShowGameOver.block_id(), None);
    }
}
