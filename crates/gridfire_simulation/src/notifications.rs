//! Fire-and-forget уведомления для audio/HUD host-а
//!
//! Ядро только пишет события; что играть и как рисовать - решает host.

use bevy::prelude::*;

/// Звуковые cue-точки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shot,
    PlayerPain,
    NpcPain,
    NpcDeath,
    Pickup,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum GameNotification {
    PlaySound(SoundCue),
    ShowText(String),
}

impl GameNotification {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameNotification::PlaySound(cue) => Some(*cue),
            GameNotification::ShowText(_) => None,
        }
    }
}
