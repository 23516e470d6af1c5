//! CRC-16 benchmarks for both 16-bit families.
//!
//! Run: `cargo bench -p crcfold -- crc16`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p crcfold -- crc16`

use crcfold::{Checksum, Crc16Arc, Crc16Kermit};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Standard benchmark sizes, straddling the acceleration threshold.
const SIZES: [usize; 6] = [16, 256, 1024, 16384, 65536, 1048576];

fn bench_arc(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc16/arc");
  eprintln!("crc16 backend: {}", Crc16Arc::backend_name());

  for size in SIZES {
    let data = vec![0xABu8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(Crc16Arc::checksum(data)));
    });
  }

  group.finish();
}

fn bench_kermit(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc16/kermit");

  for size in SIZES {
    let data = vec![0xABu8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(Crc16Kermit::checksum(data)));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_arc, bench_kermit);
criterion_main!(benches);
