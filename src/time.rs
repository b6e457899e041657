use hifitime::{Epoch, TimeScale};
use std::str::FromStr;

use crate::constants::MJD;

/// Day-of-year offsets indexed by month, with January and February counted as the
/// 11th and 12th months of the previous year.
const MONTH_OFFSET: [i32; 13] = [0, 306, 337, 0, 31, 61, 92, 122, 153, 184, 214, 245, 275];

/// Transformation from a date in the 80-column format `YYYY MM DD.ddddd` to modified julian date (MJD)
///
/// The argument must hold at least 10 characters (`"yyyy mm dd"`); longer strings allow
/// a decimal day. The full width of the date field in an observation record is 17.
/// A month written with a single digit and a leading blank is tolerated.
///
/// Argument
/// --------
/// * `date`: the date field of an 80-column record
///
/// Return
/// ------
/// * the date as a modified julian date, or `None` if any component is malformed
///   or the month lies outside `1..=12`
pub fn parse_obs80_date(date: &str) -> Option<MJD> {
    if date.len() < 10 {
        return None;
    }

    let year = i32::from_str(date.get(0..4)?).ok()?;
    let month = usize::from_str(date.get(5..7)?.trim_start()).ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let day = f64::from_str(date.get(8..)?.trim()).ok()?;
    if !day.is_finite() {
        return None;
    }

    // integer division truncates toward zero: -1 for January and February, 0 otherwise
    let z = year + (month as i32 - 14) / 12;
    let m = MONTH_OFFSET[month] + 365 * z + z / 4 - z / 100 + z / 400 - 678882;
    Some(m as f64 + day)
}

/// Transformation from modified julian date (MJD, UTC) to a hifitime [`Epoch`]
///
/// Argument
/// --------
/// * `mjd`: a modified julian date in the UTC time scale
///
/// Return
/// ------
/// * the corresponding epoch
pub fn mjd_to_epoch(mjd: MJD) -> Epoch {
    Epoch::from_mjd_in_time_scale(mjd, TimeScale::UTC)
}
