use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lanekit::kernels::base64::{decode_block, decode_chunk};
use lanekit::{Lanes, decode, parse};
use std::hint::black_box;
use std::net::Ipv4Addr;

fn encoded_input(size: usize) -> String {
    let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
    base64_simd::STANDARD_NO_PAD.encode_to_string(&data)
}

fn bench_decode_base64(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_base64");

    for size in [48, 240, 1023, 4095, 16383].iter() {
        let encoded = encoded_input(*size);

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("lanekit", size), &encoded, |b, encoded| {
            b.iter(|| decode(black_box(encoded.as_bytes())));
        });
        group.bench_with_input(
            BenchmarkId::new("base64_simd", size),
            &encoded,
            |b, encoded| {
                b.iter(|| {
                    base64_simd::STANDARD_NO_PAD
                        .decode_to_vec(black_box(encoded.as_bytes()))
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_decode_units(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_units");

    let chunk = Lanes::from_array(*b"TWFu");
    group.throughput(Throughput::Bytes(4));
    group.bench_function("chunk", |b| b.iter(|| decode_chunk(black_box(chunk))));

    let block = Lanes::from_array(*b"TWFueSBoYW5kcyBt");
    group.throughput(Throughput::Bytes(16));
    group.bench_function("block", |b| b.iter(|| decode_block(black_box(block))));

    group.finish();
}

fn bench_parse_ipv4(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_ipv4");

    for addr in ["0.0.0.0", "10.1.20.3", "192.168.100.200", "255.255.255.255"] {
        group.throughput(Throughput::Bytes(addr.len() as u64));
        group.bench_with_input(BenchmarkId::new("lanekit", addr), addr, |b, addr| {
            b.iter(|| parse(black_box(addr)));
        });
        group.bench_with_input(BenchmarkId::new("std", addr), addr, |b, addr| {
            b.iter(|| black_box(addr).parse::<Ipv4Addr>());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_decode_base64,
    bench_decode_units,
    bench_parse_ipv4
);
criterion_main!(benches);
