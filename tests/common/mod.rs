#![allow(dead_code)]
use std::sync::{Arc, Once};

use log::LevelFilter;
use mpc80::observers::{obscode_reader::read_obscode_dat, ParallaxMap};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

pub const OCD_SAMPLE: &str = "Code  Long.   cos      sin    Name
000   0.0000 0.62411 +0.77873 Greenwich
248   0.000000.000000 0.000000Hipparcos
250                           Hubble Space Telescope
291 248.4009 0.84947 +0.52647 LPL/Spacewatch II
644 243.140220.836325+0.546877Palomar Mountain/NEAT
703 249.267360.845315+0.533213Catalina Sky Survey
704 253.340930.831869+0.553542Lincoln Laboratory ETS, New Mexico
E12 149.0642 0.85563 -0.51621 Siding Spring Survey
";

pub fn parallax_sample() -> Arc<ParallaxMap> {
    Arc::new(read_obscode_dat(OCD_SAMPLE.as_bytes()).unwrap())
}

// a single obs
pub const O1_DESIG: &str = "NE00030";
pub const O1: &str =
    "     NE00030  C2004 09 16.15206 16 13 11.57 +20 52 23.7          21.1 Vd     291
";

// two obs
pub const O2_DESIG: &str = "NE00199";
pub const O2: &str =
    "     NE00199  C2007 02 09.24234 06 08 06.06 +43 13 26.2          20.1  c     704
     NE00199  C2007 02 09.25415 06 08 05.51 +43 13 01.7          20.1  c     704
";

// three obs
pub const O3_DESIG: &str = "NE00269";
pub const O3: &str =
    "     NE00269  C2003 01 06.51893 12 40 50.09 +18 27 46.9          21.4 Vd     291
     NE00269  C2003 01 06.52850 12 40 50.71 +18 27 46.1          21.8 Vd     291
     NE00269  C2003 01 06.54359 12 40 51.68 +18 27 42.5          21.9 Vd     291
";

// two-line satellite obs
pub const SAT_DESIG: &str = "03620";
pub const SAT: &str =
    "03620         S1996 08 30.51477 21 07 31.918-05 22 00.82                27764250
03620         s1996 08 30.51477 1 -  344.3553 - 6919.1239 +  872.2948   27764250
";

pub const SHORT: &str = "NE00030 C2004 09 16.15206 16 13 11.57 +20 52 23.7 21.1 V 291
";

pub const BAD: &str = "REALLY BRIGHT IN THE EAST JUST AFTER SUNSET
";
