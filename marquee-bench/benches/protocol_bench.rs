//! Markup, framing and checksum benchmarks.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marquee_protocol::{
    checksum, Command, CommandMessage, DisplayAttributes, MarkupCodec, PlaylistEncoder, Session,
    TextFrame,
};

fn markup_text(size: usize) -> String {
    "{r}NEWS{y}: {f}markets{/f} up {g}+12 {12}{mi} "
        .chars()
        .cycle()
        .take(size)
        .collect()
}

fn bench_markup_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("markup_encode");

    for size in [64, 512, 4096] {
        let text = markup_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(MarkupCodec::encode(text)));
        });
    }

    group.finish();
}

fn bench_text_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_frame");
    let session = Session::default();

    for size in [64, 512, 4096] {
        let text = MarkupCodec::encode(&markup_text(size)).freeze();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let frame = TextFrame::new(&session, 42, DisplayAttributes::default(), text.clone());
                black_box(frame.encode())
            });
        });
    }

    group.finish();
}

fn bench_command_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_frame");

    for size in [0, 256, 4096] {
        let message = CommandMessage::new(Command::WRITE_SYSTEM_FILE)
            .with_payload(Bytes::from(vec![0xa5; size]));

        group.throughput(Throughput::Bytes(size as u64 + 16));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, message| {
            let mut session = Session::default();
            b.iter(|| black_box(message.encode(&mut session)));
        });
    }

    group.finish();
}

fn bench_playlist(c: &mut Criterion) {
    let mut group = c.benchmark_group("playlist_build");
    let session = Session::default();

    for count in [1u32, 26, 676] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(PlaylistEncoder::build(&session, count).unwrap()));
        });
    }

    group.finish();
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");

    for size in [16, 1024, 24360] {
        let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(checksum(data)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_markup_encode,
    bench_text_frame,
    bench_command_frame,
    bench_playlist,
    bench_checksum,
);

criterion_main!(benches);
