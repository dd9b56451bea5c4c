//! Quiet-spot aggregation.
//!
//! This module groups readings onto a fixed-resolution grid, averages the
//! noise level per cell, and ranks cells quietest-first. It is a pure
//! function of its input: no shared state, no mutation, deterministic for a
//! given reading order.

use serde::Serialize;

use crate::reading::Reading;

/// Number of spots returned when the caller does not specify a limit.
pub const DEFAULT_SPOT_LIMIT: usize = 20;

/// Grid key for a reading: both coordinates scaled by 100 and truncated
/// toward zero (two decimal degrees of precision, ~1.1 km at the equator).
///
/// Truncation toward zero is intentional and load-bearing: `-74.00` and
/// `-74.0099` must land in the same cell. This is a lossy, non-geodesic
/// approximation; points near a cell boundary may be split despite proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey(pub i64, pub i64);

impl CellKey {
    /// Compute the cell key for a reading's coordinates.
    #[must_use]
    pub fn for_reading(reading: &Reading) -> Self {
        Self::from_coords(reading.lat, reading.lng)
    }

    /// Compute the cell key for raw coordinates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_coords(lat: f64, lng: f64) -> Self {
        Self((lat * 100.0).trunc() as i64, (lng * 100.0).trunc() as i64)
    }
}

/// A ranked grid cell: one entry in a quiet-spot listing.
///
/// Ephemeral by design. Spots are rebuilt from the full reading set on every
/// query and carry no identity across calls; the representative coordinates
/// are those of the **first** reading seen in the cell, not a centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuietSpot {
    /// Representative latitude (first reading in the cell).
    pub lat: f64,
    /// Representative longitude (first reading in the cell).
    pub lng: f64,
    /// Arithmetic mean of the cell's dBA values.
    pub avg: f64,
    /// Number of readings in the cell.
    pub n: usize,
}

/// Accumulator for one grid cell while grouping.
struct CellAcc {
    lat: f64,
    lng: f64,
    sum: f64,
    n: usize,
}

/// Rank grid cells by measured quietness, ascending by average dBA.
///
/// Cells with equal averages keep their relative order of first appearance
/// in `readings` (stable sort, no secondary key). At most `limit` spots are
/// returned; an empty input or a `limit` of zero yields an empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rank_quiet_spots(readings: &[Reading], limit: usize) -> Vec<QuietSpot> {
    use std::collections::HashMap;

    // Group in first-appearance order so the later stable sort can use that
    // order as the tie-break.
    let mut index: HashMap<CellKey, usize> = HashMap::new();
    let mut cells: Vec<CellAcc> = Vec::new();

    for reading in readings {
        let key = CellKey::for_reading(reading);
        if let Some(&i) = index.get(&key) {
            cells[i].sum += reading.dba;
            cells[i].n += 1;
        } else {
            index.insert(key, cells.len());
            cells.push(CellAcc {
                lat: reading.lat,
                lng: reading.lng,
                sum: reading.dba,
                n: 1,
            });
        }
    }

    let mut spots: Vec<QuietSpot> = cells
        .into_iter()
        .map(|cell| QuietSpot {
            lat: cell.lat,
            lng: cell.lng,
            avg: cell.sum / cell.n as f64,
            n: cell.n,
        })
        .collect();

    spots.sort_by(|a, b| a.avg.total_cmp(&b.avg));
    spots.truncate(limit);
    spots
}
