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
use std::ops::Range;
use std::time::Duration;

use super::error::TacError;

/// Fixed bytes per dictionary entry before the name: 4+4+4+2+1.
pub const ENTRY_HEADER_LEN: usize = 15;

/// Longest name the one-byte length field can describe.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Metadata for one clip stored in a TAC arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TacEntry {
    pub(super) name: String,
    /// Start of the clip in the arena, in samples.
    pub(super) offset: u32,
    /// Samples per channel.
    pub(super) sample_count: u32,
    pub(super) sample_rate: u32,
    pub(super) channel_count: u16,
}

impl TacEntry {
    pub fn new(
        name: &str,
        offset: u32,
        sample_count: u32,
        sample_rate: u32,
        channel_count: u16,
    ) -> Self {
        TacEntry {
            name: name.to_string(),
            offset,
            sample_count,
            sample_rate,
            channel_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Samples this entry occupies in the arena across all channels.
    pub fn data_len(&self) -> usize {
        self.sample_count as usize * usize::from(self.channel_count)
    }

    /// The arena range holding this entry's samples.
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.data_len()
    }

    /// Bytes this entry takes up in the serialized dictionary.
    pub fn encoded_len(&self) -> usize {
        ENTRY_HEADER_LEN + self.name.len()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(f64::from(self.sample_count) / f64::from(self.sample_rate))
    }

    /// Appends the serialized entry to `out`.
    pub(super) fn write_to(&self, out: &mut Vec<u8>) -> Result<(), TacError> {
        let name_len =
            u8::try_from(self.name.len()).map_err(|_| TacError::NameTooLong(self.name.len()))?;
        out.extend_from_slice(&self.offset.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&self.sample_count.to_le_bytes());
        out.extend_from_slice(&self.channel_count.to_le_bytes());
        out.push(name_len);
        out.extend_from_slice(self.name.as_bytes());
        Ok(())
    }

    /// Parses one entry starting at `pos` in the dictionary bytes. Returns the
    /// entry and the number of bytes it occupied.
    pub(super) fn read_from(dictionary: &[u8], pos: usize) -> Result<(TacEntry, usize), TacError> {
        let header = dictionary
            .get(pos..pos + ENTRY_HEADER_LEN)
            .ok_or(TacError::TruncatedDictionary {
                offset: pos,
                needed: ENTRY_HEADER_LEN,
                available: dictionary.len().saturating_sub(pos),
            })?;

        let offset = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let sample_rate = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let sample_count = u32::from_le_bytes([header[8], header[9], header[10], header[11]]);
        let channel_count = u16::from_le_bytes([header[12], header[13]]);
        let name_len = usize::from(header[14]);

        let name_start = pos + ENTRY_HEADER_LEN;
        let name = dictionary
            .get(name_start..name_start + name_len)
            .ok_or(TacError::TruncatedDictionary {
                offset: name_start,
                needed: name_len,
                available: dictionary.len().saturating_sub(name_start),
            })?;

        Ok((
            TacEntry {
                name: String::from_utf8_lossy(name).into_owned(),
                offset,
                sample_count,
                sample_rate,
                channel_count,
            },
            ENTRY_HEADER_LEN + name_len,
        ))
    }
}

/// Shortens a name to at most [`MAX_NAME_LEN`] bytes without splitting a character.
pub fn truncate_name(name: &str) -> &str {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }
    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
