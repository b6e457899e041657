use std::io::Cursor;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use mpc80::{observers::obscode_reader::read_obscode_dat, ArcResult, ArcSplitter};

const OBSCODES: &str = "291 248.4009 0.84947 +0.52647 LPL/Spacewatch II
704 253.340930.831869+0.553542Lincoln Laboratory ETS, New Mexico
250                           Hubble Space Telescope
";

const BLOCK: &str = "     NE00269  C2003 01 06.51893 12 40 50.09 +18 27 46.9          21.4 Vd     291
     NE00269  C2003 01 06.52850 12 40 50.71 +18 27 46.1          21.8 Vd     291
     NE00269  C2003 01 06.54359 12 40 51.68 +18 27 42.5          21.9 Vd     291
03620         S1996 08 30.51477 21 07 31.918-05 22 00.82                27764250
03620         s1996 08 30.51477 1 -  344.3553 - 6919.1239 +  872.2948   27764250
     NE00199  C2007 02 09.24234 06 08 06.06 +43 13 26.2          20.1  c     704
     NE00199  C2007 02 09.25415 06 08 05.51 +43 13 01.7          20.1  c     704
";

fn bench_split_arcs(c: &mut Criterion) {
    let sites = Arc::new(read_obscode_dat(OBSCODES.as_bytes()).unwrap());
    let input = BLOCK.repeat(1_000);

    let mut group = c.benchmark_group("arc_splitter");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("mixed_7000_records", |b| {
        b.iter(|| {
            let splitter = ArcSplitter::from_reader(Cursor::new(black_box(input.as_bytes())), &*sites);
            splitter
                .filter(|r| matches!(r, ArcResult::Arc(_)))
                .count()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_split_arcs);
criterion_main!(benches);
