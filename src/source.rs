//! Solar-system source record sets.
//!
//! [`SourceRecordSet`] holds the full observation history of one
//! solar-system object as returned by the `ssotap` catalog service:
//! one row per detection, columns for positions, distances, angles, and
//! observation times. Construct it with [`SourceRecordSet::fetch`] to run
//! a query, or [`SourceRecordSet::from_table`] to wrap data you already
//! hold.
//!
//! Columns are read through [`SourceRecordSet::column`] and
//! [`SourceRecordSet::values`], which also accept the short alias names
//! in [`ALIASES`]. A literal column always wins over an alias of the same
//! name, so aliasing can never hide real catalog data.

use std::ops::Range;

use arrow::array::ArrayRef;

use crate::error::{SourceError, SourceResult};
use crate::table::DetectionTable;
use crate::tap::{TapService, SSOTAP};
use crate::time::Tai;

/// Short physical-quantity names accepted by column lookup, mapped to the
/// catalog columns they stand for. Shared by every record set; never
/// mutated.
pub const ALIASES: &[(&str, &str)] = &[
    ("rh", "heliocentricDist"),
    ("delta", "topocentricDist"),
    ("alpha", "phaseAngle"),
];

/// Catalog table with one row per solar-system source observation.
const SOURCE_TABLE: &str = "dp03_catalogs_10Yr.SSSource";
/// Catalog table with the per-detection records, keyed by `diaSourceId`.
const DETECTION_TABLE: &str = "dp03_catalogs_10Yr.DiaSource";
/// Column holding the observation mid-point as MJD on the TAI scale.
const MID_TIME_COLUMN: &str = "midPointMjdTai";

/// Resolves an alias to its target column name.
pub fn alias_target(name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, target)| *target)
}

/// A cartesian 3-vector in equatorial coordinates, in au.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// The detection records of one solar-system object.
///
/// Owns its table exclusively; nothing mutates it after construction.
/// Row and range slicing return new record sets over zero-copy
/// sub-tables.
#[derive(Debug, Clone)]
pub struct SourceRecordSet {
    data: DetectionTable,
}

impl SourceRecordSet {
    /// Fetches all records for an object, joining the detection table.
    ///
    /// Equivalent to [`SourceRecordSet::fetch_with`] with
    /// `join_detections = true`.
    pub fn fetch(object_id: i64) -> SourceResult<Self> {
        Self::fetch_with(object_id, true)
    }

    /// Fetches all records for an object.
    ///
    /// With `join_detections` set, each source row is inner-joined to its
    /// detection record; otherwise only the source table is queried.
    ///
    /// # Errors
    /// [`SourceError::Connection`] when the `ssotap` service cannot be
    /// located or initialized; remote and decode failures propagate as
    /// [`SourceError::Remote`] and [`SourceError::Decode`].
    pub fn fetch_with(object_id: i64, join_detections: bool) -> SourceResult<Self> {
        Ok(Self {
            data: Self::fetch_data(object_id, join_detections)?,
        })
    }

    /// Wraps an already-available table, bypassing the remote call.
    pub fn from_table(data: DetectionTable) -> Self {
        Self { data }
    }

    /// Builds the query for an object and runs it against `ssotap`.
    pub fn fetch_data(object_id: i64, join_detections: bool) -> SourceResult<DetectionTable> {
        let service = TapService::locate(SSOTAP)?;
        service.search(&build_query(object_id, join_detections))
    }

    /// Runs the query for an object against an explicit service handle.
    pub fn fetch_from(
        service: &TapService,
        object_id: i64,
        join_detections: bool,
    ) -> SourceResult<Self> {
        let data = service.search(&build_query(object_id, join_detections))?;
        Ok(Self::from_table(data))
    }

    /// Borrows the underlying table.
    pub fn data(&self) -> &DetectionTable {
        &self.data
    }

    /// Number of detection rows.
    pub fn len(&self) -> usize {
        self.data.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.num_rows() == 0
    }

    /// Returns a column by name or alias, dtype preserved.
    ///
    /// A literal column wins over an alias of the same name; an alias
    /// resolves only if its target column is present.
    pub fn column(&self, name: &str) -> SourceResult<ArrayRef> {
        let resolved = self.resolve(name)?;
        self.data
            .column(resolved)
            .cloned()
            .ok_or_else(|| SourceError::NoSuchColumn {
                name: name.to_string(),
            })
    }

    /// Returns a column by name or alias as f64 values, one per row.
    pub fn values(&self, name: &str) -> SourceResult<Vec<f64>> {
        let resolved = self.resolve(name)?;
        self.data.f64_column(resolved)
    }

    fn resolve<'a>(&self, name: &'a str) -> SourceResult<&'a str> {
        if self.data.contains(name) {
            return Ok(name);
        }
        if let Some(target) = alias_target(name) {
            if self.data.contains(target) {
                return Ok(target);
            }
        }
        Err(SourceError::NoSuchColumn {
            name: name.to_string(),
        })
    }

    /// Returns a new record set wrapping the single row at `index`.
    pub fn row(&self, index: usize) -> SourceResult<Self> {
        Ok(Self::from_table(self.data.row(index)?))
    }

    /// Returns a new record set wrapping the contiguous rows in `range`.
    pub fn rows(&self, range: Range<usize>) -> SourceResult<Self> {
        Ok(Self::from_table(self.data.rows(range)?))
    }

    /// Heliocentric distance per row, in au (alias `rh`).
    pub fn heliocentric_dist(&self) -> SourceResult<Vec<f64>> {
        self.values("heliocentricDist")
    }

    /// Topocentric distance per row, in au (alias `delta`).
    pub fn topocentric_dist(&self) -> SourceResult<Vec<f64>> {
        self.values("topocentricDist")
    }

    /// Sun-object-observer phase angle per row, in degrees (alias `alpha`).
    pub fn phase_angle(&self) -> SourceResult<Vec<f64>> {
        self.values("phaseAngle")
    }

    /// Heliocentric position vector per row, from `heliocentricX/Y/Z`.
    pub fn heliocentric_vectors(&self) -> SourceResult<Vec<Vec3>> {
        self.vectors("heliocentricX", "heliocentricY", "heliocentricZ")
    }

    /// Topocentric position vector per row, from `topocentricX/Y/Z`.
    pub fn topocentric_vectors(&self) -> SourceResult<Vec<Vec3>> {
        self.vectors("topocentricX", "topocentricY", "topocentricZ")
    }

    fn vectors(&self, x: &str, y: &str, z: &str) -> SourceResult<Vec<Vec3>> {
        let xs = self.data.f64_column(x)?;
        let ys = self.data.f64_column(y)?;
        let zs = self.data.f64_column(z)?;

        Ok(xs
            .into_iter()
            .zip(ys)
            .zip(zs)
            .map(|((x, y), z)| Vec3 { x, y, z })
            .collect())
    }

    /// Observation mid-point per row as a TAI instant, from
    /// `midPointMjdTai`.
    pub fn mid_times(&self) -> SourceResult<Vec<Tai>> {
        Ok(self
            .data
            .f64_column(MID_TIME_COLUMN)?
            .into_iter()
            .map(Tai::from_mjd)
            .collect())
    }
}

fn build_query(object_id: i64, join_detections: bool) -> String {
    if join_detections {
        format!(
            "SELECT * FROM {src} AS sssrc \
             INNER JOIN {det} AS diasrc \
             ON sssrc.diaSourceId = diasrc.diaSourceId \
             WHERE sssrc.ssObjectId = {id}",
            src = SOURCE_TABLE,
            det = DETECTION_TABLE,
            id = object_id,
        )
    } else {
        format!(
            "SELECT * FROM {src} AS sssrc WHERE sssrc.ssObjectId = {id}",
            src = SOURCE_TABLE,
            id = object_id,
        )
    }
}
