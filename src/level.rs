//! Level data
//!
//! Levels are consumed as static records: platform rectangles, enemy spawn
//! points, collectibles, and the goal flag. The simulation never mutates
//! them. Well-formedness is checked once at load time; a level that fails
//! validation is a fatal configuration error, because physics correctness
//! depends on sane geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in level coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDef {
    pub x: f32,
    pub y: f32,
}

/// Platform rectangle as authored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Enemy species tag in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKindDef {
    Slime,
    Bird,
}

/// Enemy spawn record. Speed/amplitude override the tuning defaults when set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    #[serde(rename = "type")]
    pub kind: EnemyKindDef,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub amplitude: Option<f32>,
}

/// One complete level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    pub spawn: Option<PointDef>,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    #[serde(default)]
    pub coins: Vec<PointDef>,
    #[serde(default)]
    pub springs: Vec<PointDef>,
    pub flag: Option<PointDef>,
}

/// Fatal level-load failures
#[derive(Debug)]
pub enum LevelError {
    /// JSON did not parse as a level record
    Parse(serde_json::Error),
    /// Level has no goal flag
    MissingGoal,
    /// Level has no player spawn point
    MissingSpawn,
    /// Platform list is empty
    NoPlatforms,
    /// Platform at this index has a non-positive or non-finite extent
    BadPlatform(usize),
    /// A coordinate somewhere in the level is NaN or infinite
    NonFinite(&'static str),
    /// A session needs at least one level
    NoLevels,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelError::Parse(e) => write!(f, "invalid level JSON: {}", e),
            LevelError::MissingGoal => write!(f, "level has no goal flag"),
            LevelError::MissingSpawn => write!(f, "level has no spawn point"),
            LevelError::NoPlatforms => write!(f, "level has no platforms"),
            LevelError::BadPlatform(i) => {
                write!(f, "platform {} has a degenerate extent", i)
            }
            LevelError::NonFinite(what) => {
                write!(f, "non-finite coordinate in {}", what)
            }
            LevelError::NoLevels => write!(f, "level set is empty"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl LevelData {
    /// Parse and validate one level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json).map_err(LevelError::Parse)?;
        level.validate()?;
        Ok(level)
    }

    /// Check the invariants physics depends on. Called by `from_json`;
    /// levels built in code should call it too.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.flag.is_none() {
            return Err(LevelError::MissingGoal);
        }
        if self.spawn.is_none() {
            return Err(LevelError::MissingSpawn);
        }
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        for (i, p) in self.platforms.iter().enumerate() {
            if !(p.x.is_finite() && p.y.is_finite() && p.width.is_finite() && p.height.is_finite())
            {
                return Err(LevelError::NonFinite("platforms"));
            }
            if p.width <= 0.0 || p.height <= 0.0 {
                return Err(LevelError::BadPlatform(i));
            }
        }
        if let Some(spawn) = &self.spawn {
            if !(spawn.x.is_finite() && spawn.y.is_finite()) {
                return Err(LevelError::NonFinite("spawn"));
            }
        }
        if let Some(flag) = &self.flag {
            if !(flag.x.is_finite() && flag.y.is_finite()) {
                return Err(LevelError::NonFinite("flag"));
            }
        }
        for e in &self.enemies {
            if !(e.x.is_finite() && e.y.is_finite()) {
                return Err(LevelError::NonFinite("enemies"));
            }
        }
        for c in &self.coins {
            if !(c.x.is_finite() && c.y.is_finite()) {
                return Err(LevelError::NonFinite("coins"));
            }
        }
        for s in &self.springs {
            if !(s.x.is_finite() && s.y.is_finite()) {
                return Err(LevelError::NonFinite("springs"));
            }
        }
        Ok(())
    }

    /// Rightmost platform edge; the camera clamps to this
    pub fn width(&self) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.x + p.width)
            .fold(0.0_f32, f32::max)
    }

    /// Lowest platform edge; the death plane hangs below it
    pub fn height(&self) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.y + p.height)
            .fold(0.0_f32, f32::max)
    }
}

/// The two built-in levels used by the demo binary and scenario tests
pub fn demo_levels() -> Vec<LevelData> {
    vec![meadow(), ridge()]
}

fn meadow() -> LevelData {
    LevelData {
        name: "Meadow".into(),
        spawn: Some(PointDef { x: 100.0, y: 380.0 }),
        platforms: vec![
            // Ground spans the whole level
            PlatformDef { x: 0.0, y: 500.0, width: 1920.0, height: 40.0 },
            PlatformDef { x: 320.0, y: 400.0, width: 160.0, height: 20.0 },
            PlatformDef { x: 560.0, y: 320.0, width: 140.0, height: 20.0 },
            PlatformDef { x: 820.0, y: 380.0, width: 180.0, height: 20.0 },
            PlatformDef { x: 1150.0, y: 300.0, width: 140.0, height: 20.0 },
            PlatformDef { x: 1430.0, y: 420.0, width: 200.0, height: 20.0 },
        ],
        enemies: vec![
            EnemyDef { kind: EnemyKindDef::Slime, x: 600.0, y: 472.0, speed: None, amplitude: None },
            EnemyDef { kind: EnemyKindDef::Slime, x: 1460.0, y: 392.0, speed: None, amplitude: None },
            EnemyDef { kind: EnemyKindDef::Bird, x: 900.0, y: 200.0, speed: None, amplitude: None },
        ],
        coins: vec![
            PointDef { x: 380.0, y: 360.0 },
            PointDef { x: 620.0, y: 280.0 },
            PointDef { x: 900.0, y: 340.0 },
            PointDef { x: 1210.0, y: 260.0 },
        ],
        springs: vec![PointDef { x: 1080.0, y: 484.0 }],
        flag: Some(PointDef { x: 1800.0, y: 420.0 }),
    }
}

fn ridge() -> LevelData {
    LevelData {
        name: "Ridge".into(),
        spawn: Some(PointDef { x: 60.0, y: 380.0 }),
        platforms: vec![
            PlatformDef { x: 0.0, y: 480.0, width: 420.0, height: 60.0 },
            PlatformDef { x: 540.0, y: 440.0, width: 220.0, height: 100.0 },
            PlatformDef { x: 880.0, y: 360.0, width: 180.0, height: 180.0 },
            PlatformDef { x: 1180.0, y: 300.0, width: 160.0, height: 240.0 },
            PlatformDef { x: 1460.0, y: 380.0, width: 360.0, height: 160.0 },
        ],
        enemies: vec![
            EnemyDef { kind: EnemyKindDef::Slime, x: 620.0, y: 412.0, speed: Some(1.0), amplitude: None },
            EnemyDef { kind: EnemyKindDef::Bird, x: 760.0, y: 220.0, speed: None, amplitude: Some(60.0) },
            EnemyDef { kind: EnemyKindDef::Bird, x: 1300.0, y: 180.0, speed: None, amplitude: None },
        ],
        coins: vec![
            PointDef { x: 580.0, y: 400.0 },
            PointDef { x: 940.0, y: 320.0 },
            PointDef { x: 1240.0, y: 260.0 },
            PointDef { x: 1540.0, y: 340.0 },
            PointDef { x: 1700.0, y: 340.0 },
        ],
        springs: vec![PointDef { x: 380.0, y: 464.0 }],
        flag: Some(PointDef { x: 1760.0, y: 300.0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_level() {
        let json = r#"{
            "spawn": {"x": 50, "y": 100},
            "platforms": [{"x": 0, "y": 200, "width": 400, "height": 20}],
            "enemies": [{"type": "slime", "x": 120, "y": 172}],
            "coins": [{"x": 80, "y": 160}],
            "springs": [],
            "flag": {"x": 350, "y": 120}
        }"#;
        let level = LevelData::from_json(json).unwrap();
        assert_eq!(level.platforms.len(), 1);
        assert_eq!(level.enemies[0].kind, EnemyKindDef::Slime);
        assert_eq!(level.width(), 400.0);
        assert_eq!(level.height(), 220.0);
    }

    #[test]
    fn test_missing_goal_is_fatal() {
        let json = r#"{
            "spawn": {"x": 0, "y": 0},
            "platforms": [{"x": 0, "y": 200, "width": 400, "height": 20}],
            "flag": null
        }"#;
        match LevelData::from_json(json) {
            Err(LevelError::MissingGoal) => {}
            other => panic!("expected MissingGoal, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_platforms_is_fatal() {
        let json = r#"{
            "spawn": {"x": 0, "y": 0},
            "platforms": [],
            "flag": {"x": 10, "y": 10}
        }"#;
        match LevelData::from_json(json) {
            Err(LevelError::NoPlatforms) => {}
            other => panic!("expected NoPlatforms, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_platform_is_fatal() {
        let json = r#"{
            "spawn": {"x": 0, "y": 0},
            "platforms": [
                {"x": 0, "y": 200, "width": 400, "height": 20},
                {"x": 500, "y": 200, "width": 0, "height": 20}
            ],
            "flag": {"x": 10, "y": 10}
        }"#;
        match LevelData::from_json(json) {
            Err(LevelError::BadPlatform(1)) => {}
            other => panic!("expected BadPlatform(1), got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_enemy_kind_fails_parse() {
        let json = r#"{
            "spawn": {"x": 0, "y": 0},
            "platforms": [{"x": 0, "y": 200, "width": 400, "height": 20}],
            "enemies": [{"type": "dragon", "x": 1, "y": 2}],
            "flag": {"x": 10, "y": 10}
        }"#;
        assert!(matches!(LevelData::from_json(json), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_demo_levels_validate() {
        for level in demo_levels() {
            level.validate().unwrap();
        }
    }
}
