mod common;

use std::{fs::File, io::BufReader, sync::Arc};

use approx::assert_relative_eq;
use camino::Utf8Path;
use mpc80::{
    observations::mpc_80col_reader::decode, observers::obscode_reader::read_obscode_dat_file,
    ArcResult, ArcSplitter, Mpc80Error,
};

#[test]
fn test_80col_reader() {
    common::init_logger();
    let sites = Arc::new(read_obscode_dat_file(Utf8Path::new("tests/data/ObsCodes.txt")).unwrap());
    assert_eq!(sites.len(), 8);

    let file = File::open("tests/data/mixed.obs").unwrap();
    let arcs: Vec<ArcResult> = ArcSplitter::from_reader(BufReader::new(file), sites).collect();
    assert_eq!(arcs.len(), 4);

    let designations: Vec<&str> = arcs
        .iter()
        .map(|a| a.arc().unwrap().designation.as_str())
        .collect();
    assert_eq!(designations, vec!["NE00269", "03620", "NE00030", "NE00199"]);

    let ne00269 = arcs[0].arc().unwrap();
    assert_eq!(ne00269.len(), 3);
    let first = &ne00269.observations[0];
    assert_relative_eq!(first.time, 52645.51893, epsilon = 1e-9);
    assert_relative_eq!(first.ra, 3.319768226382242, epsilon = 1e-12);
    assert_relative_eq!(first.dec, 0.3222406246093942, epsilon = 1e-12);
    assert_eq!(first.magnitude, Some(21.4));
    assert_eq!(first.site_code, "291");
    assert!(!first.is_satellite());
    assert_relative_eq!(first.parallax().unwrap().longitude_deg(), 248.4009, epsilon = 1e-10);
    assert_relative_eq!(ne00269.time_span().unwrap(), 0.02466, epsilon = 1e-9);

    let ne00199 = arcs[3].arc().unwrap();
    assert_relative_eq!(ne00199.observations[0].ra, 1.6061436074709117, epsilon = 1e-12);
    assert_relative_eq!(ne00199.observations[0].dec, 0.7544001462546668, epsilon = 1e-12);
    // band 'c' is neither V nor B
    assert_relative_eq!(ne00199.observations[0].magnitude.unwrap(), 20.5, epsilon = 1e-12);
}

#[test]
fn test_decode_epoch() {
    let sites = common::parallax_sample();
    let obs = decode(common::O1.trim_end(), &sites).unwrap();
    let epoch = obs.epoch();
    assert_relative_eq!(epoch.to_mjd_utc_days(), 53264.15206, epsilon = 1e-9);
}

#[test]
fn test_missing_obscode_file() {
    let err = read_obscode_dat_file(Utf8Path::new("tests/data/missing.txt")).unwrap_err();
    assert!(matches!(err, Mpc80Error::ObscodeFile { .. }));
}
