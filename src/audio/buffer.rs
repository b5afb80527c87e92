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
use std::time::Duration;

use super::DEFAULT_SAMPLE_RATE;

/// Decoded audio: a sample rate and planar channels of normalized floats.
///
/// Channels are expected to have equal length, but this isn't enforced on
/// construction. Consumers that need a frame count use [`AudioBuffer::frame_count`]
/// and report the mismatch instead of truncating.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Creates a buffer from planar channel data.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        AudioBuffer {
            sample_rate,
            channels,
        }
    }

    /// Creates a buffer with no channels.
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(sample_rate, Vec::new())
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(|channel| channel.is_empty())
    }

    /// Returns the number of samples per channel, or None if the channels
    /// disagree on their length.
    pub fn frame_count(&self) -> Option<usize> {
        uniform_frame_count(&self.channels)
    }

    /// Returns the playback length, or None if the channels disagree on their length.
    pub fn duration(&self) -> Option<Duration> {
        let frames = self.frame_count()?;
        if self.sample_rate == 0 {
            return Some(Duration::ZERO);
        }
        Some(Duration::from_secs_f64(
            frames as f64 / f64::from(self.sample_rate),
        ))
    }
}

impl Default for AudioBuffer {
    fn default() -> Self {
        Self::empty(DEFAULT_SAMPLE_RATE)
    }
}

/// Returns the shared length of all channels, or None if any two differ. No
/// channels at all counts as zero frames.
pub fn uniform_frame_count<C: AsRef<[f32]>>(channels: &[C]) -> Option<usize> {
    let mut lengths = channels.iter().map(|channel| channel.as_ref().len());
    let first = lengths.next().unwrap_or(0);
    lengths.all(|len| len == first).then_some(first)
}
