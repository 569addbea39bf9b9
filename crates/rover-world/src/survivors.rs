//! Survivor registry with radius-based detection.
//!
//! The registry is a fixed, hand-seeded set of survivors. Membership never
//! changes at runtime; the only mutable piece per survivor is its
//! `detected` flag, which is monotonic. Once a survivor has been within the
//! detection radius of the rover it stays detected until
//! [`SurvivorRegistry::clear_detections`] is called by a world reset.

use rover_types::{Point, Survivor, SurvivorStatus};
use tracing::{debug, info};

/// Distance within which the rover detects a survivor.
pub const DEFAULT_DETECTION_RADIUS: f64 = 5.0;

/// The hand-seeded survivor set: `(id, x, y, status)`.
const SEED_SURVIVORS: [(&str, f64, f64, SurvivorStatus); 10] = [
    ("SRV-001", 5.0, 5.0, SurvivorStatus::Stable),
    ("SRV-002", 7.0, 3.0, SurvivorStatus::Critical),
    ("SRV-003", 8.0, 8.0, SurvivorStatus::Stable),
    ("SRV-004", 3.0, 7.0, SurvivorStatus::Injured),
    ("SRV-005", 12.0, 4.0, SurvivorStatus::Critical),
    ("SRV-006", 15.0, 7.0, SurvivorStatus::Stable),
    ("SRV-007", 2.0, 12.0, SurvivorStatus::Injured),
    ("SRV-008", 18.0, 15.0, SurvivorStatus::Critical),
    ("SRV-009", 10.0, 18.0, SurvivorStatus::Stable),
    ("SRV-010", 14.0, 12.0, SurvivorStatus::Injured),
];

/// A survivor template plus its detection memory.
#[derive(Debug, Clone)]
struct SurvivorRecord {
    survivor: Survivor,
    detected: bool,
}

/// The set of survivors in the disaster zone.
#[derive(Debug, Clone)]
pub struct SurvivorRegistry {
    /// Records in seed order; iteration order is the reporting order.
    records: Vec<SurvivorRecord>,
    /// Detection radius in world units.
    detection_radius: f64,
}

impl SurvivorRegistry {
    /// Build the registry from the fixed seed set.
    pub fn seeded(detection_radius: f64) -> Self {
        let survivors = SEED_SURVIVORS.iter().map(|&(id, x, y, status)| Survivor {
            id: id.to_owned(),
            location: Point::new(x, y),
            status,
        });
        Self::from_survivors(survivors, detection_radius)
    }

    /// Build a registry from an arbitrary survivor list, all undetected.
    pub fn from_survivors(
        survivors: impl IntoIterator<Item = Survivor>,
        detection_radius: f64,
    ) -> Self {
        let records = survivors
            .into_iter()
            .map(|survivor| SurvivorRecord {
                survivor,
                detected: false,
            })
            .collect();
        Self {
            records,
            detection_radius,
        }
    }

    /// The configured detection radius.
    pub const fn detection_radius(&self) -> f64 {
        self.detection_radius
    }

    /// Number of survivors in the registry.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mark and return every survivor within the detection radius of
    /// `rover_position`.
    ///
    /// The boundary is inclusive: a survivor exactly `detection_radius`
    /// away is detected.
    pub fn survivors_in_range(&mut self, rover_position: Point) -> Vec<Survivor> {
        debug!(
            x = rover_position.x,
            y = rover_position.y,
            radius = self.detection_radius,
            "Checking for survivors near rover"
        );

        let radius = self.detection_radius;
        let mut in_range = Vec::new();
        for record in &mut self.records {
            let distance = rover_position.distance_to(record.survivor.location);
            debug!(survivor = %record.survivor.id, distance, "Survivor distance");

            if distance <= radius {
                if !record.detected {
                    info!(survivor = %record.survivor.id, distance, "Survivor detected");
                }
                record.detected = true;
                in_range.push(record.survivor.clone());
            }
        }

        debug!(count = in_range.len(), "Survivors in range");
        in_range
    }

    /// Every survivor detected so far, in registry order.
    pub fn all_detected(&self) -> Vec<Survivor> {
        self.records
            .iter()
            .filter(|r| r.detected)
            .map(|r| r.survivor.clone())
            .collect()
    }

    /// Forget every detection. Survivor identities, locations and statuses
    /// are untouched.
    pub fn clear_detections(&mut self) {
        for record in &mut self.records {
            record.detected = false;
        }
    }
}

impl Default for SurvivorRegistry {
    fn default() -> Self {
        Self::seeded(DEFAULT_DETECTION_RADIUS)
    }
}
