// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tacpack::audio::{wav, AudioBuffer, WavFormat};
use tacpack::tac::TacContainer;

fn generate_test_audio(duration_seconds: f32, sample_rate: u32, channels: usize) -> AudioBuffer {
    let num_samples = (duration_seconds * sample_rate as f32) as usize;
    let channels = (0..channels)
        .map(|channel| {
            let base = 440.0 * (channel + 1) as f32;
            (0..num_samples)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    0.5 * (2.0 * std::f32::consts::PI * base * t).sin()
                        + 0.2 * (2.0 * std::f32::consts::PI * base * 2.0 * t).sin()
                })
                .collect()
        })
        .collect();
    AudioBuffer::new(sample_rate, channels)
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("wav_encode");

    // One second of stereo audio.
    let buffer = generate_test_audio(1.0, 44100, 2);
    for format in WavFormat::ALL {
        group.bench_function(format.as_str(), |b| {
            b.iter(|| {
                let bytes = wav::encode(
                    black_box(buffer.channels()),
                    buffer.sample_rate(),
                    format,
                );
                black_box(bytes)
            })
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("wav_decode");

    let buffer = generate_test_audio(1.0, 44100, 2);
    for format in WavFormat::ALL {
        let Ok(bytes) = wav::encode(buffer.channels(), buffer.sample_rate(), format) else {
            continue;
        };
        group.bench_function(format.as_str(), |b| {
            b.iter(|| black_box(wav::decode(black_box(&bytes))))
        });
    }

    group.finish();
}

fn benchmark_archive(c: &mut Criterion) {
    let mut group = c.benchmark_group("tac_archive");

    let clips: Vec<(String, AudioBuffer)> = (0..32)
        .map(|i| (format!("clip{}", i), generate_test_audio(0.25, 48000, 1 + i % 2)))
        .collect();

    group.bench_function("write_32_clips", |b| {
        b.iter(|| {
            let mut container = TacContainer::new();
            for (name, buffer) in clips.iter() {
                let _ = container.write_entry(name, buffer);
            }
            black_box(container)
        })
    });

    let mut container = TacContainer::new();
    for (name, buffer) in clips.iter() {
        let _ = container.write_entry(name, buffer);
    }

    // Removing the first clip shifts every other clip's samples.
    group.bench_function("remove_first_clip", |b| {
        b.iter(|| {
            let mut container = container.clone();
            black_box(container.remove_entry("clip0"))
        })
    });

    let encoded = container.clone().encode().unwrap_or_default();
    group.bench_function("decode_archive", |b| {
        b.iter(|| black_box(TacContainer::decode(black_box(&encoded))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_decode, benchmark_archive);
criterion_main!(benches);
