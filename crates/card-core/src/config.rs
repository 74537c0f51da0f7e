//! Scene configuration: which connector holds the card, and the physical
//! parameters of every body. Defaults come from [`crate::constants`].

use crate::constants::*;
use glam::Vec3;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown connector `{0}` (expected `rope` or `spring`)")]
    UnknownConnector(String),
    #[error("segment count must be between 1 and {max}, got {got}")]
    SegmentCount { got: usize, max: usize },
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

/// Which connector is selected, without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorKind {
    Rope,
    Spring,
}

impl FromStr for ConnectorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rope" | "chain" => Ok(Self::Rope),
            "spring" => Ok(Self::Spring),
            other => Err(ConfigError::UnknownConnector(other.to_string())),
        }
    }
}

/// How the card hangs from the anchor.
#[derive(Clone, Debug, PartialEq)]
pub enum Connector {
    /// A chain of `segments` small bodies, neighbors held `segment_distance` apart.
    Chain {
        segments: usize,
        segment_distance: f32,
        segment_mass: f32,
        segment_radius: f32,
    },
    /// A single damped spring between the anchor and the card's top edge.
    Spring {
        rest_length: f32,
        stiffness: f32,
        damping: f32,
    },
}

impl Connector {
    pub fn default_chain() -> Self {
        Connector::Chain {
            segments: ROPE_SEGMENTS,
            segment_distance: ROPE_SEGMENT_DISTANCE,
            segment_mass: ROPE_SEGMENT_MASS,
            segment_radius: ROPE_SEGMENT_RADIUS,
        }
    }

    pub fn default_spring() -> Self {
        Connector::Spring {
            rest_length: SPRING_REST_LENGTH,
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
        }
    }

    pub fn kind(&self) -> ConnectorKind {
        match self {
            Connector::Chain { .. } => ConnectorKind::Rope,
            Connector::Spring { .. } => ConnectorKind::Spring,
        }
    }

    /// Number of points the rope line tracks: anchor, segments, card attach point.
    pub fn tracked_point_count(&self) -> usize {
        match self {
            Connector::Chain { segments, .. } => segments + 2,
            Connector::Spring { .. } => 2,
        }
    }

    /// Distance from the anchor to the card's attach point when hanging undisturbed.
    pub fn nominal_length(&self) -> f32 {
        match self {
            Connector::Chain {
                segments,
                segment_distance,
                ..
            } => *segments as f32 * segment_distance,
            Connector::Spring { rest_length, .. } => *rest_length,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub connector: Connector,
    pub anchor: Vec3,
    pub card_half_extents: Vec3,
    pub card_mass: f32,
    pub card_linear_damping: f32,
    pub card_angular_damping: f32,
    pub rope_linear_damping: f32,
    pub gravity: Vec3,
    pub timestep: f32,
    pub ground_y: f32,
    pub debug: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            connector: Connector::default_chain(),
            anchor: anchor_vec3(),
            card_half_extents: card_half_extents_vec3(),
            card_mass: CARD_MASS,
            card_linear_damping: CARD_LINEAR_DAMPING,
            card_angular_damping: CARD_ANGULAR_DAMPING,
            rope_linear_damping: ROPE_LINEAR_DAMPING,
            gravity: Vec3::from(GRAVITY),
            timestep: FIXED_TIMESTEP,
            ground_y: GROUND_Y,
            debug: false,
        }
    }
}

impl SceneConfig {
    pub fn with_connector_kind(mut self, kind: ConnectorKind) -> Self {
        if self.connector.kind() != kind {
            self.connector = match kind {
                ConnectorKind::Rope => Connector::default_chain(),
                ConnectorKind::Spring => Connector::default_spring(),
            };
        }
        self
    }

    pub fn with_segments(mut self, count: usize) -> Result<Self, ConfigError> {
        if count == 0 || count > MAX_ROPE_SEGMENTS {
            return Err(ConfigError::SegmentCount {
                got: count,
                max: MAX_ROPE_SEGMENTS,
            });
        }
        if let Connector::Chain { segments, .. } = &mut self.connector {
            *segments = count;
        }
        Ok(self)
    }

    /// Where the card's center sits when the connector hangs straight down at its
    /// nominal length.
    pub fn card_start_position(&self) -> Vec3 {
        let drop = self.connector.nominal_length() + self.card_half_extents.y;
        self.anchor - Vec3::new(0.0, drop, 0.0)
    }

    /// Card-local point the connector attaches to (middle of the top edge).
    pub fn card_attach_local(&self) -> Vec3 {
        Vec3::new(0.0, self.card_half_extents.y, 0.0)
    }

    /// Apply one `key=value` option, as found in a URL query string.
    pub fn apply_option(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "connector" => {
                let kind: ConnectorKind = value.parse()?;
                *self = self.clone().with_connector_kind(kind);
            }
            "segments" => {
                let n: usize = value.trim().parse().map_err(|_| invalid())?;
                *self = self.clone().with_segments(n)?;
            }
            "debug" => {
                self.debug = match value.trim() {
                    "" | "1" | "true" | "on" => true,
                    "0" | "false" | "off" => false,
                    _ => return Err(invalid()),
                };
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    /// Build a config from a query string like `?connector=spring&debug=1`.
    ///
    /// Bad options are skipped (defaults kept) and returned alongside the
    /// config so the caller can report them.
    pub fn from_query(query: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();
        // connector first so `segments` lands on the right variant regardless of order
        let mut pairs: Vec<(&str, &str)> = query
            .trim_start_matches('?')
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .collect();
        pairs.sort_by_key(|(k, _)| *k != "connector");
        for (k, v) in pairs {
            if let Err(e) = config.apply_option(k, v) {
                errors.push(e);
            }
        }
        (config, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selects_spring_and_debug() {
        let (cfg, errors) = SceneConfig::from_query("?connector=spring&debug=1");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(cfg.connector.kind(), ConnectorKind::Spring);
        assert!(cfg.debug);
        assert_eq!(cfg.connector.tracked_point_count(), 2);
    }

    #[test]
    fn segments_apply_even_when_listed_before_connector() {
        let (cfg, errors) = SceneConfig::from_query("segments=4&connector=rope");
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(cfg.connector.tracked_point_count(), 6);
    }

    #[test]
    fn bad_options_are_reported_and_skipped() {
        let (cfg, errors) = SceneConfig::from_query("connector=bungee&segments=0&color=red");
        assert_eq!(errors.len(), 3);
        assert_eq!(cfg, SceneConfig::default());
        assert!(matches!(errors[0], ConfigError::UnknownConnector(_)));
    }

    #[test]
    fn card_starts_below_anchor_by_connector_length() {
        let cfg = SceneConfig::default();
        let start = cfg.card_start_position();
        let top = start + cfg.card_attach_local();
        let len = (cfg.anchor - top).length();
        assert!((len - cfg.connector.nominal_length()).abs() < 1e-5);
    }
}
