use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kernel32_bindings::windows::utils::{split_multi_sz, string_to_wide, wide_to_string};
use kernel32_bindings::FileTime;

fn bench_wide_strings(c: &mut Criterion) {
    let text = "C:\\Windows\\System32\\kernel32.dll";
    let wide = string_to_wide(text);

    c.bench_function("string_to_wide", |b| b.iter(|| string_to_wide(black_box(text))));
    c.bench_function("wide_to_string", |b| b.iter(|| wide_to_string(black_box(&wide))));
}

fn bench_multi_sz(c: &mut Criterion) {
    let mut buffer = Vec::new();
    for letter in b'A'..=b'Z' {
        buffer.extend(format!("{}:\\", letter as char).encode_utf16());
        buffer.push(0);
    }
    buffer.push(0);

    c.bench_function("split_multi_sz_26_drives", |b| {
        b.iter(|| split_multi_sz(black_box(&buffer)))
    });
}

fn bench_file_time_packing(c: &mut Criterion) {
    c.bench_function("file_time_pack", |b| {
        b.iter(|| FileTime::from_u64(black_box(116_444_736_000_000_000)).as_u64())
    });
}

#[cfg(target_os = "windows")]
fn bench_pass_through(c: &mut Criterion) {
    let k32 = kernel32_bindings::kernel32().expect("kernel32 table");
    c.bench_function("mul_div_pass_through", |b| {
        b.iter(|| k32.mul_div(black_box(1000), black_box(3), black_box(7)))
    });
}

#[cfg(not(target_os = "windows"))]
fn bench_pass_through(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_wide_strings,
    bench_multi_sz,
    bench_file_time_packing,
    bench_pass_through
);
criterion_main!(benches);
