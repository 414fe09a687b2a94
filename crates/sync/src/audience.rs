//! Who a message is delivered to.

use serde::{Deserialize, Serialize};

use gridstore_core::PlayerId;

/// Host world/dimension identifier.
pub type DimensionId = i32;

/// A point in a dimension with a delivery radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub dimension: DimensionId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub range: f64,
}

impl TargetPoint {
    pub fn new(dimension: DimensionId, x: f64, y: f64, z: f64, range: f64) -> Self {
        Self {
            dimension,
            x,
            y,
            z,
            range,
        }
    }

    /// Whether a position lies within range of this point.
    pub fn contains(&self, dimension: DimensionId, x: f64, y: f64, z: f64) -> bool {
        if dimension != self.dimension {
            return false;
        }
        let (dx, dy, dz) = (x - self.x, y - self.y, z - self.z);
        dx * dx + dy * dy + dz * dz < self.range * self.range
    }
}

/// Delivery target of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Audience {
    /// Every connected player.
    All,
    /// One player.
    Player(PlayerId),
    /// Players near a point.
    Around(TargetPoint),
    /// Every player in one dimension.
    Dimension(DimensionId),
    /// The server (client-to-server traffic).
    Server,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_point_range_is_exclusive_and_dimension_bound() {
        let point = TargetPoint::new(0, 0.0, 64.0, 0.0, 10.0);
        assert!(point.contains(0, 3.0, 64.0, 4.0));
        assert!(!point.contains(0, 10.0, 64.0, 0.0));
        assert!(!point.contains(-1, 0.0, 64.0, 0.0));
    }

    #[test]
    fn audience_serializes_tagged() {
        let json = serde_json::to_value(Audience::Dimension(-1)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "dimension", "target": -1 }));
    }
}
