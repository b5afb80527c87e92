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

//! RIFF/WAVE reading and writing.
//!
//! The encoder always emits the canonical 44-byte header (RIFF, a 16-byte fmt
//! chunk, then data). The decoder walks chunks, skipping anything it doesn't
//! know, and stops once the data chunk has been read.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::buffer::{uniform_frame_count, AudioBuffer};
use super::error::WavError;
use super::format::{SampleFormat, WavFormat, WavFormatDescriptor};
use crate::util::with_wav_extension;


const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const WAVE_MAGIC: &[u8; 4] = b"WAVE";
const FMT_MAGIC: &[u8; 4] = b"fmt ";
const DATA_MAGIC: &[u8; 4] = b"data";

const RIFF_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
const FMT_CHUNK_LEN: usize = 16;

/// Size of the header written by [`encode`]; samples start at this offset.
pub const HEADER_LEN: usize = 44;

/// A WAV file's format and length, read without decoding any samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub descriptor: WavFormatDescriptor,
    /// The raw fmt chunk format code.
    pub format_code: u16,
    /// Whether the codec can read this bit depth natively. When false, samples
    /// are read as 8-bit integers.
    pub supported: bool,
    pub frame_count: usize,
}

struct ParsedWav<'a> {
    descriptor: WavFormatDescriptor,
    format_code: u16,
    data: &'a [u8],
}

impl ParsedWav<'_> {
    /// Bytes between the start of consecutive frames. Never smaller than the
    /// bytes the codec reads per frame, so a bogus block align can't push reads
    /// past the end of the data.
    fn frame_stride(&self) -> usize {
        let needed = usize::from(self.descriptor.channel_count)
            * self.descriptor.wav_format().bytes_per_sample();
        let declared = usize::from(self.descriptor.block_align);
        if declared != needed {
            debug!(declared, needed, "WAV block align disagrees with format");
        }
        declared.max(needed)
    }

    fn frame_count(&self) -> usize {
        match self.frame_stride() {
            0 => 0,
            stride => self.data.len() / stride,
        }
    }
}

/// Reads a WAV file's format and frame count without decoding samples.
pub fn probe(bytes: &[u8]) -> Result<WavInfo, WavError> {
    let parsed = parse(bytes)?;
    Ok(WavInfo {
        descriptor: parsed.descriptor,
        format_code: parsed.format_code,
        supported: WavFormat::try_from_bits(
            parsed.descriptor.bits_per_sample,
            parsed.descriptor.sample_format(),
        )
        .is_some(),
        frame_count: parsed.frame_count(),
    })
}

/// Decodes a complete WAV file into planar channels.
pub fn decode(bytes: &[u8]) -> Result<AudioBuffer, WavError> {
    let parsed = parse(bytes)?;
    let format = parsed.descriptor.wav_format();
    let sample_width = format.bytes_per_sample();
    let stride = parsed.frame_stride();
    let frames = parsed.frame_count();

    let mut channels: Vec<Vec<f32>> = (0..parsed.descriptor.channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for frame in 0..frames {
        let frame_offset = frame * stride;
        for (index, channel) in channels.iter_mut().enumerate() {
            channel.push(format.read_sample(parsed.data, frame_offset + index * sample_width));
        }
    }

    debug!(
        channels = parsed.descriptor.channel_count,
        sample_rate = parsed.descriptor.sample_rate,
        format = %format,
        frames,
        "Decoded WAV"
    );

    Ok(AudioBuffer::new(parsed.descriptor.sample_rate, channels))
}

/// Encodes planar channels as a WAV file. Every channel must have the same length.
pub fn encode<C: AsRef<[f32]>>(
    channels: &[C],
    sample_rate: u32,
    format: WavFormat,
) -> Result<Vec<u8>, WavError> {
    let frames = uniform_frame_count(channels).ok_or_else(|| {
        WavError::ChannelLengthMismatch(channels.iter().map(|c| c.as_ref().len()).collect())
    })?;
    let channel_count = u16::try_from(channels.len())
        .map_err(|_| WavError::TooLarge(format!("{} channels", channels.len())))?;

    let sample_width = format.bytes_per_sample();
    let block_align = usize::from(channel_count) * sample_width;
    if block_align > usize::from(u16::MAX) {
        return Err(WavError::TooLarge(format!(
            "{} bytes per frame",
            block_align
        )));
    }
    let data_len = frames
        .checked_mul(block_align)
        .filter(|len| *len <= u32::MAX as usize - (HEADER_LEN - CHUNK_HEADER_LEN))
        .ok_or_else(|| {
            WavError::TooLarge(format!("{} frames of {} bytes", frames, block_align))
        })?;

    let descriptor = WavFormatDescriptor::new(channel_count, sample_rate, format);
    let mut bytes = vec![0u8; HEADER_LEN + data_len];

    bytes[0..4].copy_from_slice(RIFF_MAGIC);
    put_u32(&mut bytes, 4, (HEADER_LEN - CHUNK_HEADER_LEN + data_len) as u32);
    bytes[8..12].copy_from_slice(WAVE_MAGIC);

    bytes[12..16].copy_from_slice(FMT_MAGIC);
    put_u32(&mut bytes, 16, FMT_CHUNK_LEN as u32);
    put_u16(&mut bytes, 20, format.format_code());
    put_u16(&mut bytes, 22, channel_count);
    put_u32(&mut bytes, 24, sample_rate);
    put_u32(&mut bytes, 28, descriptor.byte_rate());
    put_u16(&mut bytes, 32, descriptor.block_align);
    put_u16(&mut bytes, 34, descriptor.bits_per_sample);

    bytes[36..40].copy_from_slice(DATA_MAGIC);
    put_u32(&mut bytes, 40, data_len as u32);

    if block_align > 0 {
        for (frame, block) in bytes[HEADER_LEN..]
            .chunks_exact_mut(block_align)
            .enumerate()
        {
            for (index, channel) in channels.iter().enumerate() {
                format.write_sample(block, index * sample_width, channel.as_ref()[frame]);
            }
        }
    }

    Ok(bytes)
}

/// Reads and decodes a WAV file. A ".wav" extension is added to the path if missing.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, WavError> {
    let path = with_wav_extension(path.as_ref());
    let bytes = fs::read(&path)?;
    let buffer = decode(&bytes)?;
    debug!(path = ?path, channels = buffer.channel_count(), "Read WAV file");
    Ok(buffer)
}

/// Encodes a buffer and writes it to disk, returning the path written. A ".wav"
/// extension is added to the path if missing.
pub fn write_file<P: AsRef<Path>>(
    path: P,
    buffer: &AudioBuffer,
    format: WavFormat,
) -> Result<PathBuf, WavError> {
    let path = with_wav_extension(path.as_ref());
    let bytes = encode(buffer.channels(), buffer.sample_rate(), format)?;
    fs::write(&path, &bytes)?;
    info!(
        path = ?path,
        format = %format,
        bytes = bytes.len(),
        "Wrote WAV file"
    );
    Ok(path)
}

fn parse(bytes: &[u8]) -> Result<ParsedWav<'_>, WavError> {
    if bytes.get(0..4) != Some(RIFF_MAGIC.as_slice()) {
        return Err(WavError::InvalidRiffHeader);
    }
    if bytes.get(8..12) != Some(WAVE_MAGIC.as_slice()) {
        return Err(WavError::InvalidWaveHeader);
    }

    let mut format: Option<(WavFormatDescriptor, u16)> = None;
    let mut pos = RIFF_HEADER_LEN;
    while pos + CHUNK_HEADER_LEN <= bytes.len() {
        let tag = &bytes[pos..pos + 4];
        let size = read_u32(bytes, pos + 4) as usize;
        let start = pos + CHUNK_HEADER_LEN;
        let end = start.saturating_add(size);

        match tag {
            b"fmt " => {
                if size < FMT_CHUNK_LEN || end > bytes.len() {
                    return Err(WavError::TruncatedChunk("fmt ".to_string()));
                }
                format = Some(parse_fmt(&bytes[start..end])?);
            }
            b"data" => {
                let (descriptor, format_code) = format.ok_or(WavError::MissingFormatChunk)?;
                let available = end.min(bytes.len());
                if end > bytes.len() {
                    warn!(
                        declared = size,
                        available = available - start,
                        "WAV data chunk is shorter than declared"
                    );
                }
                return Ok(ParsedWav {
                    descriptor,
                    format_code,
                    data: &bytes[start..available],
                });
            }
            _ => {
                debug!(
                    tag = %String::from_utf8_lossy(tag),
                    size,
                    "Skipping WAV chunk"
                );
            }
        }

        // Chunks are padded to an even length.
        pos = end.saturating_add(size % 2);
    }

    Err(WavError::MissingDataChunk)
}

fn parse_fmt(chunk: &[u8]) -> Result<(WavFormatDescriptor, u16), WavError> {
    let format_code = read_u16(chunk, 0);
    let sample_format = SampleFormat::from_format_code(format_code)
        .ok_or(WavError::UnsupportedFormatCode(format_code))?;
    let channel_count = read_u16(chunk, 2);
    let sample_rate = read_u32(chunk, 4);
    // Bytes 8..12 hold the byte rate, which is derivable and unused.
    let block_align = read_u16(chunk, 12);
    let bits_per_sample = read_u16(chunk, 14);

    if WavFormat::try_from_bits(bits_per_sample, sample_format).is_none() {
        warn!(
            bits_per_sample,
            sample_format = %sample_format,
            "Unsupported WAV bit depth, reading samples as 8-bit integers"
        );
    }

    Ok((
        WavFormatDescriptor {
            channel_count,
            sample_rate,
            bits_per_sample,
            is_float: sample_format == SampleFormat::Float,
            block_align,
        },
        format_code,
    ))
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn put_u16(bytes: &mut [u8], offset: usize, value: u16) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
