//! TAI timestamps for catalog observation times.
//!
//! The catalog stores observation times as Modified Julian Dates on the
//! International Atomic Time (TAI) scale. TAI runs continuously without leap
//! seconds, so an MJD value converts to a calendar date with pure integer
//! arithmetic and a day fraction.
//!
//! Julian Dates are held as a split (jd1, jd2) pair. The split keeps full
//! f64 precision when a small day count is added to the large MJD epoch
//! offset.
//!
//! # Usage
//!
//! ```
//! use solsys_catalog::time::Tai;
//!
//! let t = Tai::from_mjd(60000.0);
//! let cal = t.to_calendar();
//! assert_eq!((cal.year, cal.month, cal.day), (2023, 2, 25));
//! ```

use std::fmt;

/// Julian Date at MJD zero (1858-11-17 00:00).
pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Split-representation Julian Date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    /// Creates a Julian Date from a Modified Julian Date.
    ///
    /// The MJD epoch offset lands in jd1 and the MJD value in jd2, so the
    /// full precision of the input survives.
    pub fn from_mjd(mjd: f64) -> Self {
        Self::new(MJD_ZERO_POINT, mjd)
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn to_mjd(&self) -> f64 {
        (self.jd1 - MJD_ZERO_POINT) + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY)
    }

    /// Decomposes into a calendar date and time of day.
    ///
    /// Date arithmetic follows the Fliegel–Van Flandern inverse, the same
    /// convention as ERFA's eraJd2cal: the Julian day number flips at noon,
    /// so the civil date comes from `floor(jd + 0.5)` and the remainder is
    /// the day fraction.
    pub fn to_calendar(&self) -> CalendarDateTime {
        let jd = self.to_f64();
        let jdn = (jd + 0.5).floor();
        let frac = jd + 0.5 - jdn;

        let mut l = jdn as i64 + 68_569;
        let n = (4 * l) / 146_097;
        l -= (146_097 * n + 3) / 4;
        let i = (4_000 * (l + 1)) / 1_461_001;
        l = l - (1_461 * i) / 4 + 31;
        let k = (80 * l) / 2_447;
        let day = (l - (2_447 * k) / 80) as u8;
        let l = k / 11;
        let month = (k + 2 - 12 * l) as u8;
        let year = (100 * (n - 49) + i + l) as i32;

        let seconds_of_day = frac * SECONDS_PER_DAY;
        let hour = (seconds_of_day / 3_600.0) as u8;
        let minute = ((seconds_of_day - hour as f64 * 3_600.0) / 60.0) as u8;
        let second = seconds_of_day - hour as f64 * 3_600.0 - minute as f64 * 60.0;

        CalendarDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}

/// A calendar date and time of day, scale-agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDateTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:06.3}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// International Atomic Time instant.
///
/// Wraps a [`JulianDate`] to pin the scale. Catalog `midPointMjdTai` values
/// convert through [`Tai::from_mjd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tai(JulianDate);

impl Tai {
    /// Creates TAI from a Modified Julian Date on the TAI scale.
    pub fn from_mjd(mjd: f64) -> Self {
        Self(JulianDate::from_mjd(mjd))
    }

    pub fn from_julian_date(jd: JulianDate) -> Self {
        Self(jd)
    }

    pub fn to_julian_date(&self) -> JulianDate {
        self.0
    }

    pub fn to_mjd(&self) -> f64 {
        self.0.to_mjd()
    }

    /// Calendar decomposition on the TAI scale.
    pub fn to_calendar(&self) -> CalendarDateTime {
        self.0.to_calendar()
    }
}

impl fmt::Display for Tai {
    /// Formats as "TAI {julian_date}".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TAI {}", self.0)
    }
}

impl From<JulianDate> for Tai {
    fn from(jd: JulianDate) -> Self {
        Self::from_julian_date(jd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mjd_round_trip() {
        let jd = JulianDate::from_mjd(60000.0);
        assert_eq!(jd.to_mjd(), 60000.0);
        assert_eq!(jd.to_f64(), 2_460_000.5);
    }

    #[test]
    fn test_mjd_60000_calendar() {
        let cal = Tai::from_mjd(60000.0).to_calendar();
        assert_eq!(cal.year, 2023);
        assert_eq!(cal.month, 2);
        assert_eq!(cal.day, 25);
        assert_eq!(cal.hour, 0);
        assert_eq!(cal.minute, 0);
        assert!(cal.second.abs() < 1e-6);
    }

    #[test]
    fn test_mjd_day_fraction() {
        let cal = Tai::from_mjd(60000.5).to_calendar();
        assert_eq!((cal.year, cal.month, cal.day), (2023, 2, 25));
        assert_eq!(cal.hour, 12);
        assert_eq!(cal.minute, 0);
        assert!(cal.second.abs() < 1e-5);
    }

    #[test]
    fn test_j2000_calendar() {
        let cal = JulianDate::j2000().to_calendar();
        assert_eq!((cal.year, cal.month, cal.day), (2000, 1, 1));
        assert_eq!(cal.hour, 12);
        assert_eq!(cal.minute, 0);
    }

    #[test]
    fn test_mjd_zero_calendar() {
        let cal = JulianDate::from_mjd(0.0).to_calendar();
        assert_eq!((cal.year, cal.month, cal.day), (1858, 11, 17));
        assert_eq!(cal.hour, 0);
    }

    #[test]
    fn test_arithmetic() {
        let jd = JulianDate::from_mjd(60000.0);
        assert_eq!(jd.add_days(1.0).to_mjd(), 60001.0);
        assert!((jd.add_seconds(43_200.0).to_mjd() - 60000.5).abs() < 1e-12);
    }

    #[test]
    fn test_tai_display() {
        let t = Tai::from_mjd(60000.0);
        assert_eq!(format!("{}", t), "TAI JD 2460000.500000000");
    }

    #[test]
    fn test_calendar_display() {
        let cal = Tai::from_mjd(60000.0).to_calendar();
        assert_eq!(format!("{}", cal), "2023-02-25 00:00:00.000");
    }

    #[test]
    fn test_tai_from_julian_date() {
        let jd = JulianDate::from_mjd(59000.25);
        let t = Tai::from(jd);
        assert_eq!(t.to_julian_date(), jd);
        assert!((t.to_mjd() - 59000.25).abs() < 1e-12);
    }
}
