// Copyright (C) 2025 Michael Wilson <mike@mdwn.dev>
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

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// WAV format code for integer PCM.
pub const FORMAT_CODE_PCM: u16 = 1;

/// WAV format code for IEEE float.
pub const FORMAT_CODE_FLOAT: u16 = 3;

/// Sample format enumeration for audio processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Integer samples (e.g., 8-bit, 16-bit, 24-bit, 32-bit)
    Int,
    /// Floating point samples (32-bit float)
    Float,
}

impl SampleFormat {
    /// Convert to string representation
    pub fn as_str(self) -> &'static str {
        match self {
            SampleFormat::Float => "float",
            SampleFormat::Int => "int",
        }
    }

    /// Maps a WAV fmt chunk format code to a sample format.
    pub fn from_format_code(code: u16) -> Option<Self> {
        match code {
            FORMAT_CODE_PCM => Some(SampleFormat::Int),
            FORMAT_CODE_FLOAT => Some(SampleFormat::Float),
            _ => None,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every sample encoding the WAV codec can read and write.
///
/// Sample conversion dispatches on this enum directly so the hot loop never
/// looks anything up by name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WavFormat {
    /// Unsigned 8-bit PCM, offset by 128.
    Int8,
    /// Signed 16-bit little-endian PCM.
    #[default]
    Int16,
    /// Signed 24-bit little-endian PCM, packed in three bytes.
    Int24,
    /// Signed 32-bit little-endian PCM.
    Int32,
    /// IEEE-754 32-bit float.
    Float32,
}

impl WavFormat {
    pub const ALL: [WavFormat; 5] = [
        WavFormat::Int8,
        WavFormat::Int16,
        WavFormat::Int24,
        WavFormat::Int32,
        WavFormat::Float32,
    ];

    /// Resolves a bit depth and sample format to a codec. Combinations the codec
    /// doesn't support fall back to 8-bit integer; use [`WavFormat::try_from_bits`]
    /// to detect that case.
    pub fn from_bits(bits_per_sample: u16, sample_format: SampleFormat) -> Self {
        Self::try_from_bits(bits_per_sample, sample_format).unwrap_or(WavFormat::Int8)
    }

    /// Resolves a bit depth and sample format to a codec, if supported.
    pub fn try_from_bits(bits_per_sample: u16, sample_format: SampleFormat) -> Option<Self> {
        match (bits_per_sample, sample_format) {
            (8, SampleFormat::Int) => Some(WavFormat::Int8),
            (16, SampleFormat::Int) => Some(WavFormat::Int16),
            (24, SampleFormat::Int) => Some(WavFormat::Int24),
            (32, SampleFormat::Int) => Some(WavFormat::Int32),
            (32, SampleFormat::Float) => Some(WavFormat::Float32),
            _ => None,
        }
    }

    pub fn bits_per_sample(self) -> u16 {
        match self {
            WavFormat::Int8 => 8,
            WavFormat::Int16 => 16,
            WavFormat::Int24 => 24,
            WavFormat::Int32 | WavFormat::Float32 => 32,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        usize::from(self.bits_per_sample() / 8)
    }

    pub fn sample_format(self) -> SampleFormat {
        match self {
            WavFormat::Float32 => SampleFormat::Float,
            _ => SampleFormat::Int,
        }
    }

    /// The fmt chunk format code (1 for PCM, 3 for float).
    pub fn format_code(self) -> u16 {
        match self.sample_format() {
            SampleFormat::Int => FORMAT_CODE_PCM,
            SampleFormat::Float => FORMAT_CODE_FLOAT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WavFormat::Int8 => "int8",
            WavFormat::Int16 => "int16",
            WavFormat::Int24 => "int24",
            WavFormat::Int32 => "int32",
            WavFormat::Float32 => "float32",
        }
    }
}

impl FromStr for WavFormat {
    fn from_str(s: &str) -> Result<Self, Box<dyn Error>> {
        match s.to_ascii_lowercase().as_str() {
            "int8" | "8" => Ok(WavFormat::Int8),
            "int16" | "16" => Ok(WavFormat::Int16),
            "int24" | "24" => Ok(WavFormat::Int24),
            "int32" | "32" => Ok(WavFormat::Int32),
            "float32" | "float" | "f32" => Ok(WavFormat::Float32),
            _ => Err(format!("Unsupported WAV format: {}", s).into()),
        }
    }

    type Err = Box<dyn Error>;
}

impl fmt::Display for WavFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The shape of a WAV file as described by its fmt chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormatDescriptor {
    pub channel_count: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub is_float: bool,
    /// Bytes per frame (one sample for every channel).
    pub block_align: u16,
}

impl WavFormatDescriptor {
    /// Creates a descriptor for writing `channel_count` channels in the given format.
    pub fn new(channel_count: u16, sample_rate: u32, format: WavFormat) -> Self {
        WavFormatDescriptor {
            channel_count,
            sample_rate,
            bits_per_sample: format.bits_per_sample(),
            is_float: format.sample_format() == SampleFormat::Float,
            block_align: channel_count.saturating_mul(format.bits_per_sample() / 8),
        }
    }

    /// The codec used for this descriptor's samples.
    pub fn wav_format(&self) -> WavFormat {
        WavFormat::from_bits(self.bits_per_sample, self.sample_format())
    }

    pub fn sample_format(&self) -> SampleFormat {
        if self.is_float {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        }
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .saturating_mul(u32::from(self.channel_count))
            .saturating_mul(u32::from(self.bits_per_sample / 8))
    }
}
