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
pub mod buffer;
pub mod codec;
pub mod error;
pub mod format;
pub mod wav;

pub use buffer::{uniform_frame_count, AudioBuffer};
pub use error::WavError;
pub use format::{SampleFormat, WavFormat, WavFormatDescriptor};

/// Sample rate reported when there is no audio to describe.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
