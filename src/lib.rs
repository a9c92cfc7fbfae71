//! Client for the Rubin/LSST solar-system object catalog.
//!
//! Fetches the observation history of a solar-system object from the
//! `ssotap` TAP service and exposes the result as a column-addressable
//! record set. One blocking HTTP round trip per fetch; the returned table
//! is immutable and slicing it is zero-copy.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`source`] | [`SourceRecordSet`] — fetch by object id, column/alias lookup, row slicing, derived vectors and times |
//! | [`table`] | [`DetectionTable`] — Arrow-backed tabular result adapter |
//! | [`tap`] | [`TapService`] — named service locator and blocking ADQL query client |
//! | [`time`] | [`Tai`], [`JulianDate`], [`CalendarDateTime`] — MJD/TAI timestamps |
//! | [`error`] | [`SourceError`], [`SourceResult`] |
//!
//! # Quick Start
//!
//! ```ignore
//! use solsys_catalog::SourceRecordSet;
//!
//! let records = SourceRecordSet::fetch(8404051942)?;
//!
//! let rh = records.heliocentric_dist()?;
//! let alpha = records.values("alpha")?;
//! let first = records.row(0)?;
//!
//! for t in records.mid_times()? {
//!     println!("{}", t.to_calendar());
//! }
//! ```
//!
//! # Features
//!
//! - **`cli`** — Enables the `sso-query` binary for fetching and printing
//!   records from the command line.
//! - **`integration-tests`** — Tests that query the real `ssotap` service.

pub mod error;
pub mod source;
pub mod table;
pub mod tap;
pub mod time;

pub use error::{SourceError, SourceResult};
pub use source::{SourceRecordSet, Vec3, ALIASES};
pub use table::DetectionTable;
pub use tap::{TapService, SSOTAP};
pub use time::{CalendarDateTime, JulianDate, Tai};
