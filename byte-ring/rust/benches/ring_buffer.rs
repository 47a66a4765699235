use std::collections::VecDeque;

use bytering::ring_buffer::RingBuffer;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn do_rb(rb: &mut RingBuffer) -> usize {
    for i in 1..rb.capacity() {
        rb.push(i as u8).unwrap();
    }

    let mut v: usize = 0;
    for _ in 1..rb.capacity() {
        v += rb.pop().unwrap() as usize;
    }

    v
}

fn do_rb_slice(rb: &mut RingBuffer, data: &[u8]) -> usize {
    rb.push_slice(data);
    rb.drain().map(|b| b as usize).sum()
}

fn do_vd<const N: usize>(vd: &mut VecDeque<u8>) -> usize {
    for i in 1..N {
        vd.push_back(i as u8);
    }

    let mut v: usize = 0;
    for _ in 1..N {
        v += vd.pop_front().unwrap() as usize;
    }

    v
}

fn criterion_benchmark(c: &mut Criterion) {
    const N: usize = 64;

    let mut group = c.benchmark_group("RingBuffers");

    group.bench_function("bytering::ring_buffer::RingBuffer push/pop 64", |b| {
        let mut rb = RingBuffer::new(N).unwrap();

        b.iter(|| do_rb(black_box(&mut rb)))
    });

    group.bench_function("bytering::ring_buffer::RingBuffer push_slice/drain 64", |b| {
        let mut rb = RingBuffer::new(N).unwrap();
        let data = [0xA5u8; N - 1];

        b.iter(|| do_rb_slice(black_box(&mut rb), &data))
    });

    group.bench_function("std::collections::VecDeque 64", |b| {
        let mut vd = VecDeque::<u8>::with_capacity(N);

        b.iter(|| do_vd::<N>(black_box(&mut vd)))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
