//! Named gameplay events for achievement tracking and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Events emitted by the simulation. Serialized with the event name in the
/// `type` field and the payload as the remaining fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted { level: u32 },
    UnitSpawned { archetype: Archetype, side: Side },
    UnitKilled { archetype: Archetype, killer: Side },
    UpgradeApplied { archetype: Archetype, upgrade: StatKind },
    BattleEnded { outcome: Outcome },
}

impl GameEvent {
    /// Event name, identical to the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::UnitSpawned { .. } => "unit_spawned",
            GameEvent::UnitKilled { .. } => "unit_killed",
            GameEvent::UpgradeApplied { .. } => "upgrade_applied",
            GameEvent::BattleEnded { .. } => "battle_ended",
        }
    }

    /// Payload map: every serialized field except the tag.
    pub fn payload(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("type");
                map
            }
            _ => serde_json::Map::new(),
        }
    }
}

/// Receives the events produced by one tick, in emission order.
pub trait EventSink {
    fn on_event(&mut self, name: &str, payload: &serde_json::Map<String, serde_json::Value>);
}

impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, name: &str, payload: &serde_json::Map<String, serde_json::Value>) {
        let mut map = payload.clone();
        map.insert("type".into(), serde_json::Value::String(name.to_string()));
        if let Ok(event) = serde_json::from_value(serde_json::Value::Object(map)) {
            self.push(event);
        }
    }
}
