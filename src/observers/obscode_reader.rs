//! # MPC obscode table reader
//!
//! Parses the parallax data of the MPC `obscode.dat` file (also served as the
//! `ObsCodes.html` page) into a [`ParallaxMap`].
//!
//! ## Layout
//! -----------------
//! ```text
//! Code  Long.   cos      sin    Name
//! 703 249.267360.845315+0.533213Catalina Sky Survey
//! ^^^ ^^^^^^^^^ ^^^^^^^^ ^^^^^^^^^
//! 0..3  4..13    13..21    21..30
//! ```
//!
//! Files prepared for a web browser carry column headings and markup: lines that do
//! not parse as data are quietly ignored. Blank numeric fields default to `0`, and a
//! code whose two parallax components are both `0` is stored as "known, no parallax"
//! (space telescopes, satellites).
use std::io::Read;

use camino::Utf8Path;
use log::debug;

use super::{ParallaxConstant, ParallaxMap};
use crate::mpc80_errors::Mpc80Error;

/// Parse one numeric column, `Some(0.)` when blank, `None` when malformed or outside `range`.
fn column(line: &str, start: usize, end: usize, valid: impl Fn(f64) -> bool) -> Option<f64> {
    let raw = line.get(start..end)?.trim();
    if raw.is_empty() {
        return Some(0.);
    }
    raw.parse::<f64>().ok().filter(|v| valid(*v))
}

/// Parse one data line of the obscode table.
///
/// Return
/// ----------
/// * `Some((code, parallax))` for a data line, `None` for anything else.
fn parse_obscode_line(line: &str) -> Option<(String, Option<ParallaxConstant>)> {
    if line.len() < 30 {
        return None;
    }
    let code = line.get(0..3)?;
    let longitude = column(line, 4, 13, |v| (0. ..360.).contains(&v))?;
    let rho_cos_phi = column(line, 13, 21, |v| (0. ..=1.).contains(&v))?;
    let rho_sin_phi = column(line, 21, 30, |v| (-1. ..=1.).contains(&v))?;

    let parallax = if rho_cos_phi == 0. && rho_sin_phi == 0. {
        None
    } else {
        Some(ParallaxConstant::from_earth_radii(longitude, rho_cos_phi, rho_sin_phi).ok()?)
    };
    Some((code.to_string(), parallax))
}

/// Read parallax data in the format of the MPC obscode.dat file.
///
/// Arguments
/// -----------------
/// * `reader` – Any source of the obscode table.
///
/// Return
/// ----------
/// * A [`ParallaxMap`] from 3-character MPC codes to parallax constants.
///
/// Errors
/// ----------
/// * [`Mpc80Error::IoError`] if the reader fails.
/// * [`Mpc80Error::ObscodeUnreadable`] if no line parses as data.
pub fn read_obscode_dat<R: Read>(mut reader: R) -> Result<ParallaxMap, Mpc80Error> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let mut skipped = 0usize;
    let mut map = ParallaxMap::default();
    for line in content.lines() {
        match parse_obscode_line(line) {
            Some((code, parallax)) => {
                map.insert(code, parallax);
            }
            None => skipped += 1,
        }
    }

    if map.is_empty() {
        return Err(Mpc80Error::ObscodeUnreadable);
    }
    debug!("obscode table: {} sites read, {} lines skipped", map.len(), skipped);
    Ok(map)
}

/// Read an MPC obscode.dat file from disk.
///
/// See [`read_obscode_dat`]; errors carry the file path.
pub fn read_obscode_dat_file(path: &Utf8Path) -> Result<ParallaxMap, Mpc80Error> {
    let with_path = |err: Mpc80Error| Mpc80Error::ObscodeFile {
        path: path.to_string(),
        message: err.to_string(),
    };
    let file = std::fs::File::open(path).map_err(|e| with_path(e.into()))?;
    read_obscode_dat(file).map_err(with_path)
}

#[cfg(test)]
mod obscode_reader_test {
    use super::*;
    use crate::{observers::ParallaxLookup, unit_test_global::OCD_SAMPLE};
    use approx::assert_relative_eq;

    const SITE_CASES: [(&str, f64, f64, f64); 8] = [
        ("000", 0., 0.62411, 0.77873),
        ("248", 0., 0., 0.),
        ("250", 0., 0., 0.),
        ("291", 248.4009, 0.84947, 0.52647),
        ("644", 243.14022, 0.836325, 0.546877),
        ("703", 249.26736, 0.845315, 0.533213),
        ("704", 253.34093, 0.831869, 0.553542),
        ("E12", 149.0642, 0.85563, -0.51621),
    ];

    #[test]
    fn test_read_obscode_dat() {
        let map = read_obscode_dat(OCD_SAMPLE.as_bytes()).unwrap();
        assert_eq!(map.len(), SITE_CASES.len());

        for (code, lon, cos, sin) in SITE_CASES {
            let entry = map.lookup(code).unwrap_or_else(|| panic!("missing {code}"));
            match entry {
                None => assert!(cos == 0. && sin == 0., "None stored for code {code}"),
                Some(par) => {
                    assert_relative_eq!(par.longitude_deg(), lon, epsilon = 1e-10);
                    assert_relative_eq!(
                        par.rho_cos_phi.into_inner() * 149.59787e9 / 6.37814e6,
                        cos,
                        epsilon = 1e-10
                    );
                    assert_relative_eq!(
                        par.rho_sin_phi.into_inner() * 149.59787e9 / 6.37814e6,
                        sin,
                        epsilon = 1e-10
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_lines_are_skipped() {
        let sample = "\
703 249.267360.845315+0.533213Catalina Sky Survey
XXX 400.000000.845315+0.533213Bad longitude
YYY 249.267361.845315+0.533213Bad rho cos
ZZZ 249.26736 abcdef+0.533213Not a number
";
        let map = read_obscode_dat(sample.as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("703"));
    }

    #[test]
    fn test_unreadable() {
        assert_eq!(
            read_obscode_dat("<pre>\nnothing here\n</pre>".as_bytes()),
            Err(Mpc80Error::ObscodeUnreadable)
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_obscode_dat_file(Utf8Path::new("does/not/exist.dat")).unwrap_err();
        assert!(matches!(
            err,
            Mpc80Error::ObscodeFile { ref path, .. } if path == "does/not/exist.dat"
        ));
    }
}
