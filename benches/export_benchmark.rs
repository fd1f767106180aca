use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use excelexport::package::crc32;
use excelexport::types::{record, CellValue};
use excelexport::{generate_xlsx, Dataset};

fn sample_dataset(size: usize) -> Dataset {
    (0..size)
        .map(|i| {
            record([
                ("ID", CellValue::from(i as i64)),
                ("Name", CellValue::from(format!("Name_{}", i))),
                ("Value", CellValue::from(i as f64 * 1.5)),
                ("Note", CellValue::from("R&D <draft>")),
            ])
        })
        .collect()
}

fn benchmark_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(10);

    for size in [100, 1000, 10000].iter() {
        let dataset = sample_dataset(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| generate_xlsx(black_box(&dataset), "bench").unwrap());
        });
    }

    group.finish();
}

fn benchmark_crc32(c: &mut Criterion) {
    let data = vec![0x5Au8; 1024 * 1024];
    c.bench_function("crc32_1mb", |b| b.iter(|| crc32(black_box(&data))));
}

criterion_group!(benches, benchmark_export, benchmark_crc32);
criterion_main!(benches);
