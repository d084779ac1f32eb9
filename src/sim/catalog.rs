//! Enemy and power-up archetypes
//!
//! Immutable lookup tables keyed by archetype tag. Entities copy the numbers
//! they need when they are created, so nothing here is read retroactively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Enemy archetype tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

/// Stat template for an enemy archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyArchetype {
    /// RGB, 0xRRGGBB
    pub color: u32,
    pub points: u32,
    pub health: u32,
    /// Pixels per slow tick
    pub speed: f32,
}

const BASIC: EnemyArchetype = EnemyArchetype {
    color: 0x00FF00,
    points: 10,
    health: 1,
    speed: 2.0,
};

const FAST: EnemyArchetype = EnemyArchetype {
    color: 0xFFFF00,
    points: 20,
    health: 1,
    speed: 4.0,
};

const TANK: EnemyArchetype = EnemyArchetype {
    color: 0xFF0000,
    points: 30,
    health: 3,
    speed: 1.0,
};

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank];

    pub fn archetype(self) -> &'static EnemyArchetype {
        match self {
            EnemyKind::Basic => &BASIC,
            EnemyKind::Fast => &FAST,
            EnemyKind::Tank => &TANK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SimError::UnknownEnemyKind(s.to_string()))
    }
}

/// Power-up archetype tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    Shield,
    RapidFire,
    ExtraLife,
}

/// Template for a power-up archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpArchetype {
    /// RGB, 0xRRGGBB
    pub color: u32,
    pub symbol: &'static str,
    /// `None` for one-shot effects
    pub duration_ms: Option<u32>,
}

const SHIELD: PowerUpArchetype = PowerUpArchetype {
    color: 0x00FFFF,
    symbol: "🛡️",
    duration_ms: Some(10_000),
};

const RAPID_FIRE: PowerUpArchetype = PowerUpArchetype {
    color: 0xFF00FF,
    symbol: "⚡",
    duration_ms: Some(5_000),
};

const EXTRA_LIFE: PowerUpArchetype = PowerUpArchetype {
    color: 0xFF69B4,
    symbol: "❤️",
    duration_ms: None,
};

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::ExtraLife,
    ];

    pub fn archetype(self) -> &'static PowerUpArchetype {
        match self {
            PowerUpKind::Shield => &SHIELD,
            PowerUpKind::RapidFire => &RAPID_FIRE,
            PowerUpKind::ExtraLife => &EXTRA_LIFE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::RapidFire => "rapidFire",
            PowerUpKind::ExtraLife => "extraLife",
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerUpKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PowerUpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SimError::UnknownPowerUpKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_catalog() {
        let tank = EnemyKind::Tank.archetype();
        assert_eq!((tank.points, tank.health, tank.speed), (30, 3, 1.0));
        let fast = EnemyKind::Fast.archetype();
        assert_eq!((fast.points, fast.health, fast.speed), (20, 1, 4.0));
        let basic = EnemyKind::Basic.archetype();
        assert_eq!((basic.points, basic.health, basic.speed), (10, 1, 2.0));
    }

    #[test]
    fn test_power_up_durations() {
        assert_eq!(PowerUpKind::Shield.archetype().duration_ms, Some(10_000));
        assert_eq!(PowerUpKind::RapidFire.archetype().duration_ms, Some(5_000));
        assert_eq!(PowerUpKind::ExtraLife.archetype().duration_ms, None);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("tank".parse::<EnemyKind>().unwrap(), EnemyKind::Tank);
        assert_eq!("rapidFire".parse::<PowerUpKind>().unwrap(), PowerUpKind::RapidFire);
        for kind in PowerUpKind::ALL {
            assert_eq!(kind.as_str().parse::<PowerUpKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tags_rejected() {
        assert!(matches!(
            "boss".parse::<EnemyKind>(),
            Err(SimError::UnknownEnemyKind(tag)) if tag == "boss"
        ));
        assert!(matches!(
            "RapidFire".parse::<PowerUpKind>(),
            Err(SimError::UnknownPowerUpKind(_))
        ));
    }

    #[test]
    fn test_serde_tags_match_names() {
        let json = serde_json::to_string(&PowerUpKind::ExtraLife).unwrap();
        assert_eq!(json, "\"extraLife\"");
        let kind: EnemyKind = serde_json::from_str("\"fast\"").unwrap();
        assert_eq!(kind, EnemyKind::Fast);
    }
}
