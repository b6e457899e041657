use std::str::FromStr;

use crate::constants::{Radian, RADSEC, RADSEC_TIME};

/// Parse a trimmed fixed-width field, `None` when the slice is out of bounds or malformed.
fn field<T: FromStr>(line: &str, start: usize, end: usize) -> Option<T> {
    line.get(start..end)?.trim().parse().ok()
}

/// Parse a finite floating point field.
fn float_field(line: &str, start: usize, end: usize) -> Option<f64> {
    field::<f64>(line, start, end).filter(|v| v.is_finite())
}

/// Parse the right ascension of an 80-column record to radians
///
/// Reads hours (`line[32..34]`), minutes (`line[35..37]`) and seconds (`line[38..44]`).
///
/// Arguments
/// ---------
/// * `line`: a full 80-column record
///
/// Returns
/// -------
/// * `Option<Radian>`: the right ascension, `None` if any subfield does not parse.
pub(crate) fn parse_ra_to_rad(line: &str) -> Option<Radian> {
    let h: u32 = field(line, 32, 34)?;
    let m: u32 = field(line, 35, 37)?;
    let s = float_field(line, 38, 44)?;
    Some((f64::from(h * 60 + m) * 60. + s) * RADSEC_TIME)
}

/// Parse the declination of an 80-column record to radians
///
/// Reads the sign column (`line[44]`), degrees (`line[45..47]`), minutes (`line[48..50]`)
/// and seconds (`line[51..56]`). Any sign other than `-` is taken as positive.
///
/// Arguments
/// ---------
/// * `line`: a full 80-column record
///
/// Returns
/// -------
/// * `Option<Radian>`: the declination, `None` if any subfield does not parse.
pub(crate) fn parse_dec_to_rad(line: &str) -> Option<Radian> {
    let negative = line.get(44..45)? == "-";
    let d: u32 = field(line, 45, 47)?;
    let m: u32 = field(line, 48, 50)?;
    let s = float_field(line, 51, 56)?;
    let dec = (f64::from(d * 60 + m) * 60. + s) * RADSEC;
    Some(if negative { -dec } else { dec })
}

/// Parse the magnitude (`line[65..70]`) and apply the band correction of `line[70]`.
///
/// V band is kept as is, B band is brightened by 0.8 and every other band is dimmed by 0.4.
///
/// Returns
/// -------
/// * `Ok(None)` for a blank magnitude field, `Ok(Some(mag))` for a valid one,
///   `Err(raw)` with the offending text otherwise.
pub(crate) fn parse_magnitude(line: &str) -> Result<Option<f64>, String> {
    let raw = line.get(65..70).ok_or_else(String::new)?.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let mag = f64::from_str(raw)
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| raw.to_string())?;

    let correction = match line.get(70..71) {
        Some("V") => 0.,
        Some("B") => -0.8,
        _ => 0.4,
    };
    Ok(Some(mag + correction))
}

/// Parse one signed offset field of a satellite continuation line.
///
/// The first column holds the sign (`+`, `-` or blank for positive), the rest the magnitude.
pub(crate) fn parse_offset(off: &str) -> Option<f64> {
    let sign = match off.get(0..1)? {
        "-" => -1.,
        "+" | " " => 1.,
        _ => return None,
    };
    let v = f64::from_str(off.get(1..)?.trim()).ok()?;
    v.is_finite().then_some(sign * v)
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SITE_LINE: &str =
        "     K11Q14F  C2014 09 03.40285 02 53 00.70 +10 38 30.3          19.2 VqER031703";
    const SAT_LINE: &str =
        "03620         S1996 08 30.51477 21 07 31.918-05 22 00.82                27764250";

    #[test]
    fn test_ra_to_rad() {
        assert_abs_diff_eq!(
            parse_ra_to_rad(SITE_LINE).unwrap(),
            0.7549058069240641,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            parse_ra_to_rad(SAT_LINE).unwrap(),
            5.530651548153087,
            epsilon = 1e-12
        );
        assert_eq!(parse_ra_to_rad("too short"), None);

        let mut bad = SITE_LINE.to_string();
        bad.replace_range(35..37, "xx");
        assert_eq!(parse_ra_to_rad(&bad), None);
    }

    #[test]
    fn test_dec_to_rad() {
        assert_abs_diff_eq!(
            parse_dec_to_rad(SITE_LINE).unwrap(),
            0.1857335756741066,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            parse_dec_to_rad(SAT_LINE).unwrap(),
            -0.09366997866254745,
            epsilon = 1e-12
        );

        let mut bad = SITE_LINE.to_string();
        bad.replace_range(51..56, "3x.3 ");
        assert_eq!(parse_dec_to_rad(&bad), None);
    }

    #[test]
    fn test_magnitude_band_correction() {
        assert_eq!(parse_magnitude(SITE_LINE), Ok(Some(19.2)));
        assert_eq!(parse_magnitude(SAT_LINE), Ok(None));

        let mut b_band = SITE_LINE.to_string();
        b_band.replace_range(70..71, "B");
        assert_abs_diff_eq!(parse_magnitude(&b_band).unwrap().unwrap(), 18.4, epsilon = 1e-12);

        let mut r_band = SITE_LINE.to_string();
        r_band.replace_range(70..71, "R");
        assert_abs_diff_eq!(parse_magnitude(&r_band).unwrap().unwrap(), 19.6, epsilon = 1e-12);

        let mut bad = SITE_LINE.to_string();
        bad.replace_range(65..70, "19.x ");
        assert_eq!(parse_magnitude(&bad), Err("19.x".to_string()));
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("-  344.3553 "), Some(-344.3553));
        assert_eq!(parse_offset("+  872.2948 "), Some(872.2948));
        assert_eq!(parse_offset("   872.2948 "), Some(872.2948));
        assert_eq!(parse_offset("*  872.2948 "), None);
        assert_eq!(parse_offset("+  87x.2948 "), None);
        assert_eq!(parse_offset(""), None);
    }
}
