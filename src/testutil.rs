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

//! Shared helpers for tests: signal generators and hound-backed WAV fixtures.

pub mod audio;

use std::f32::consts::PI;

use crate::audio::AudioBuffer;

/// Generates a sine wave.
pub fn sine(frequency: f32, sample_rate: u32, frames: usize, amplitude: f32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Generates a linear ramp from -1.0 to 1.0 inclusive.
pub fn ramp(frames: usize) -> Vec<f32> {
    match frames {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..frames)
            .map(|i| -1.0 + 2.0 * i as f32 / (frames - 1) as f32)
            .collect(),
    }
}

/// A buffer with `channel_count` channels of distinct sine waves.
pub fn tone_buffer(sample_rate: u32, channel_count: usize, frames: usize) -> AudioBuffer {
    AudioBuffer::new(
        sample_rate,
        (0..channel_count)
            .map(|channel| sine(220.0 * (channel + 1) as f32, sample_rate, frames, 0.8))
            .collect(),
    )
}

/// A buffer whose samples identify their position: channel `c`, frame `f` holds
/// a value derived from `seed`, `c` and `f`. Useful to spot misplaced samples.
pub fn tagged_buffer(sample_rate: u32, channel_count: usize, frames: usize, seed: f32) -> AudioBuffer {
    AudioBuffer::new(
        sample_rate,
        (0..channel_count)
            .map(|channel| {
                (0..frames)
                    .map(|frame| (seed + channel as f32 * 0.1 + frame as f32 * 0.001).sin())
                    .collect()
            })
            .collect(),
    )
}
