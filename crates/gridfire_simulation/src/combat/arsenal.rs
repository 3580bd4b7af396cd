//! Arsenal - три оружия игрока и активный слот

use bevy::prelude::*;

use crate::combat::weapon::{Weapon, WeaponKind};
use crate::settings::WeaponSwitchPolicy;

/// Оружие игрока. Тикает только активное; убранное заморожено.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Arsenal {
    pub weapons: [Weapon; 3],
    pub active: usize,
}

impl Default for Arsenal {
    /// Старт с shotgun-ом
    fn default() -> Self {
        Self {
            weapons: WeaponKind::ALL.map(Weapon::new),
            active: 1,
        }
    }
}

impl Arsenal {
    pub fn active(&self) -> &Weapon {
        &self.weapons[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.active]
    }

    pub fn weapon(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|weapon| weapon.kind == kind)
    }

    /// Переключиться на слот 1..=3.
    ///
    /// Неизвестный слот или уже активный → `None`. Иначе мгновенная смена;
    /// reload уходящего оружия сохраняется или сбрасывается по `policy`.
    pub fn switch_to(&mut self, slot: u8, policy: WeaponSwitchPolicy) -> Option<WeaponKind> {
        let kind = WeaponKind::from_slot(slot)?;
        let index = self.weapons.iter().position(|weapon| weapon.kind == kind)?;
        if index == self.active {
            return None;
        }

        if policy == WeaponSwitchPolicy::CancelReload {
            self.weapons[self.active].cancel_reload();
        }
        self.active = index;
        Some(kind)
    }
}
