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
/// Error types for WAV encoding and decoding
#[derive(Debug, thiserror::Error)]
pub enum WavError {
    #[error("Missing RIFF header")]
    InvalidRiffHeader,

    #[error("Missing WAVE identifier")]
    InvalidWaveHeader,

    #[error("Unsupported WAV format code {0} (expected 1 for PCM or 3 for float)")]
    UnsupportedFormatCode(u16),

    #[error("Data chunk found before fmt chunk")]
    MissingFormatChunk,

    #[error("No data chunk found")]
    MissingDataChunk,

    #[error("Chunk '{0}' is truncated")]
    TruncatedChunk(String),

    #[error("Channel lengths differ: {0:?}")]
    ChannelLengthMismatch(Vec<usize>),

    #[error("Audio too large for a WAV file: {0}")]
    TooLarge(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
