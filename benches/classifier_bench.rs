use criterion::{criterion_group, criterion_main, Criterion};
use solver_bench::classifier::{AdapterSpec, OutputAdapter};
use std::hint::black_box;
use std::time::Duration;

fn minisat_output() -> String {
    let mut output = String::new();
    for i in 0..200 {
        output.push_str(&format!("| {i:>9} | {:>9} {:>9} | {:>9} |\n", i * 3, i * 7, i * 11));
    }
    output.push_str("restarts              : 31\n");
    output.push_str("conflicts             : 10293          (51465 /sec)\n");
    output.push_str("decisions             : 12871          (0.00 % random) (64355 /sec)\n");
    output.push_str("propagations          : 3311029        (16555145 /sec)\n");
    output.push_str("CPU time              : 0.2 s\n\nUNSATISFIABLE\n");
    output
}

fn bench_classify(c: &mut Criterion) {
    let minisat = OutputAdapter::new(AdapterSpec::minisat()).unwrap();
    let ivasat = OutputAdapter::new(AdapterSpec::ivasat()).unwrap();
    let long_output = minisat_output();
    let short_output = "Decisions: 42\nConflicts: 7\nSat\n";

    c.bench_function("classify_minisat_statistics", |b| {
        b.iter(|| minisat.classify(black_box(&long_output), Duration::from_millis(200)));
    });
    c.bench_function("classify_ivasat_short", |b| {
        b.iter(|| ivasat.classify(black_box(short_output), Duration::from_millis(10)));
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
