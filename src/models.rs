//! Request and response models for the herodex API

use serde::{Deserialize, Serialize};

/// Minimum length for a power description, in characters.
pub const MIN_DESCRIPTION_LEN: usize = 20;

// ============================================================================
// Strength
// ============================================================================

/// Rating of a hero-power link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Strong => write!(f, "Strong"),
            Strength::Weak => write!(f, "Weak"),
            Strength::Average => write!(f, "Average"),
        }
    }
}

impl std::str::FromStr for Strength {
    type Err = String;

    // Case-sensitive: only the exact wire values are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Strong" => Ok(Strength::Strong),
            "Weak" => Ok(Strength::Weak),
            "Average" => Ok(Strength::Average),
            _ => Err(format!("Unknown strength: {}", s)),
        }
    }
}

// ============================================================================
// Heroes
// ============================================================================

/// A named character entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

/// A hero with its power links, for GET /heroes/{id}
#[derive(Debug, Clone, Serialize)]
pub struct HeroDetail {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub hero_powers: Vec<HeroPowerWithPower>,
}

// ============================================================================
// Powers
// ============================================================================

/// A named ability entity with a descriptive text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePowerRequest {
    /// None when the body omits the key (or sends null).
    pub description: Option<String>,
}

// ============================================================================
// Hero powers
// ============================================================================

/// A hero-power link with its power embedded, as nested under a hero detail
#[derive(Debug, Clone, Serialize)]
pub struct HeroPowerWithPower {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
    pub power: Power,
}

/// The full created record returned by POST /hero_powers
#[derive(Debug, Clone, Serialize)]
pub struct HeroPowerDetail {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
    pub hero: Hero,
    pub power: Power,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHeroPowerRequest {
    pub strength: Option<String>,
    pub power_id: Option<i64>,
    pub hero_id: Option<i64>,
}

impl CreateHeroPowerRequest {
    /// Returns the three required fields, or None if any is absent or falsy.
    ///
    /// Absent keys, nulls, empty strength strings, and zero ids all count as
    /// missing. Autoincrement ids start at 1, so a zero id never refers to a
    /// live row.
    pub fn fields(&self) -> Option<(&str, i64, i64)> {
        let strength = self.strength.as_deref().filter(|s| !s.is_empty())?;
        let power_id = self.power_id.filter(|&id| id != 0)?;
        let hero_id = self.hero_id.filter(|&id| id != 0)?;
        Some((strength, power_id, hero_id))
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub path: String,
    pub size_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_round_trips_through_str() {
        for s in [Strength::Strong, Strength::Weak, Strength::Average] {
            assert_eq!(s.to_string().parse::<Strength>(), Ok(s));
        }
    }

    #[test]
    fn strength_rejects_other_values() {
        assert!("strong".parse::<Strength>().is_err());
        assert!("Mighty".parse::<Strength>().is_err());
        assert!("".parse::<Strength>().is_err());
    }

    #[test]
    fn strength_serializes_as_wire_value() {
        assert_eq!(
            serde_json::to_value(Strength::Average).unwrap(),
            serde_json::json!("Average")
        );
    }

    #[test]
    fn fields_present() {
        let req = CreateHeroPowerRequest {
            strength: Some("Strong".into()),
            power_id: Some(2),
            hero_id: Some(1),
        };
        assert_eq!(req.fields(), Some(("Strong", 2, 1)));
    }

    #[test]
    fn fields_missing_key() {
        let req = CreateHeroPowerRequest {
            strength: Some("Strong".into()),
            power_id: None,
            hero_id: Some(1),
        };
        assert_eq!(req.fields(), None);
    }

    #[test]
    fn fields_treats_falsy_values_as_missing() {
        // Inherited truthiness rule: empty strings and zero ids fail presence.
        let req = CreateHeroPowerRequest {
            strength: Some(String::new()),
            power_id: Some(2),
            hero_id: Some(1),
        };
        assert_eq!(req.fields(), None);

        let req = CreateHeroPowerRequest {
            strength: Some("Weak".into()),
            power_id: Some(0),
            hero_id: Some(1),
        };
        assert_eq!(req.fields(), None);
    }
}
