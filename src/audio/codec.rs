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

//! Per-sample conversion between raw WAV bytes and normalized floats.
//!
//! Integer scaling is asymmetric to match the two's-complement range: negative
//! values divide by the magnitude of the minimum (e.g. 32768) and positive
//! values by the maximum (e.g. 32767), so both extremes decode to exactly
//! -1.0 and 1.0. Encoding always multiplies by the positive maximum.

use super::format::WavFormat;

const I8_NEGATIVE_SCALE: f32 = 128.0;
const I8_POSITIVE_SCALE: f32 = 127.0;
const I16_NEGATIVE_SCALE: f32 = 32768.0;
const I16_POSITIVE_SCALE: f32 = 32767.0;
const I24_NEGATIVE_SCALE: f32 = 8388608.0;
const I24_POSITIVE_SCALE: f32 = 8388607.0;
const I32_NEGATIVE_SCALE: f64 = 2147483648.0;
const I32_POSITIVE_SCALE: f64 = 2147483647.0;

impl WavFormat {
    /// Reads one sample at `offset` and returns it normalized to [-1, 1].
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer than `offset + bytes_per_sample()` bytes.
    pub fn read_sample(self, buffer: &[u8], offset: usize) -> f32 {
        match self {
            WavFormat::Int8 => {
                let value = i16::from(buffer[offset]) - 128;
                scale_asymmetric(f32::from(value), I8_NEGATIVE_SCALE, I8_POSITIVE_SCALE)
            }
            WavFormat::Int16 => {
                let value = i16::from_le_bytes([buffer[offset], buffer[offset + 1]]);
                scale_asymmetric(f32::from(value), I16_NEGATIVE_SCALE, I16_POSITIVE_SCALE)
            }
            WavFormat::Int24 => {
                let value = read_i24(&buffer[offset..offset + 3]);
                scale_asymmetric(value as f32, I24_NEGATIVE_SCALE, I24_POSITIVE_SCALE)
            }
            WavFormat::Int32 => {
                let value = i32::from_le_bytes(read_array(buffer, offset));
                let value = f64::from(value);
                if value < 0.0 {
                    (value / I32_NEGATIVE_SCALE) as f32
                } else {
                    (value / I32_POSITIVE_SCALE) as f32
                }
            }
            WavFormat::Float32 => f32::from_le_bytes(read_array(buffer, offset)),
        }
    }

    /// Writes one sample at `offset`. Values outside [-1, 1] are clamped and NaN
    /// is written as silence.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer than `offset + bytes_per_sample()` bytes.
    pub fn write_sample(self, buffer: &mut [u8], offset: usize, value: f32) {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(-1.0, 1.0)
        };
        match self {
            WavFormat::Int8 => {
                buffer[offset] = ((value + 1.0) * 127.5).round() as u8;
            }
            WavFormat::Int16 => {
                let value = (value * I16_POSITIVE_SCALE).round() as i16;
                buffer[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
            }
            WavFormat::Int24 => {
                let value = (value * I24_POSITIVE_SCALE).round() as i32;
                buffer[offset..offset + 3].copy_from_slice(&value.to_le_bytes()[..3]);
            }
            WavFormat::Int32 => {
                let value = (f64::from(value) * I32_POSITIVE_SCALE).round() as i32;
                buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
            }
            WavFormat::Float32 => {
                buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
            }
        }
    }
}

fn scale_asymmetric(value: f32, negative_scale: f32, positive_scale: f32) -> f32 {
    if value < 0.0 {
        value / negative_scale
    } else {
        value / positive_scale
    }
}

/// Sign-extends three little-endian bytes; bit 23 is the sign bit.
fn read_i24(bytes: &[u8]) -> i32 {
    let value = i32::from(bytes[0]) | (i32::from(bytes[1]) << 8) | (i32::from(bytes[2]) << 16);
    if value & 0x80_0000 != 0 {
        value | !0xFF_FFFF
    } else {
        value
    }
}

fn read_array(buffer: &[u8], offset: usize) -> [u8; 4] {
    [
        buffer[offset],
        buffer[offset + 1],
        buffer[offset + 2],
        buffer[offset + 3],
    ]
}
