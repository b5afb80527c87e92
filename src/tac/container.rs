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

//! The in-memory TAC archive.
//!
//! All clips share a single arena. Writing appends to the end of it, removing
//! splices the clip out and shifts every later clip down, so the arena never
//! has holes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::entry::{truncate_name, TacEntry, MAX_NAME_LEN};
use super::error::TacError;
use super::report::{DecodeReport, RemovalReason, RemovedEntry, RenamedEntry, ValidationReport};
use crate::audio::{AudioBuffer, DEFAULT_SAMPLE_RATE};

/// Size of the leading dictionary length field.
const DICT_LENGTH_LEN: usize = 4;

/// Bytes per arena sample.
const SAMPLE_LEN: usize = 4;

/// Removing an entry can shift others out of range, so validation runs a
/// second pass when the first removed anything. It never runs more than this.
const MAX_VALIDATION_PASSES: usize = 2;

/// A clip read from a container. The channels borrow the container's arena,
/// so the view can't outlive the next mutation of the container.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView<'a> {
    sample_rate: u32,
    channels: Vec<&'a [f32]>,
}

impl<'a> EntryView<'a> {
    fn empty() -> Self {
        EntryView {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> &[&'a [f32]] {
        &self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels.first().map(|c| c.len()).unwrap_or(0)
    }

    /// True if the view holds no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Copies the view into an owned buffer.
    pub fn to_buffer(&self) -> AudioBuffer {
        AudioBuffer::new(
            self.sample_rate,
            self.channels.iter().map(|c| c.to_vec()).collect(),
        )
    }
}

/// A dictionary of named clips over one contiguous sample arena.
#[derive(Clone, Default, PartialEq)]
pub struct TacContainer {
    entries: HashMap<String, TacEntry>,
    arena: Vec<f32>,
    /// Serialized size of the dictionary, kept in step with `entries`.
    dict_byte_length: usize,
}

impl TacContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an archive. Corruption is logged and tolerated; see
    /// [`TacContainer::decode_with_report`].
    pub fn decode(bytes: &[u8]) -> Self {
        Self::decode_with_report(bytes).0
    }

    /// Decodes an archive and reports anything that went wrong.
    ///
    /// Dictionary parsing stops at the first malformed entry. Entries parsed
    /// before it are kept and the rest are lost, so the container is always
    /// usable but may be missing clips the file once held.
    pub fn decode_with_report(bytes: &[u8]) -> (Self, DecodeReport) {
        let mut container = Self::new();
        let mut report = DecodeReport::default();

        let Some(header) = bytes.get(..DICT_LENGTH_LEN) else {
            let err = TacError::TruncatedDictionary {
                offset: 0,
                needed: DICT_LENGTH_LEN,
                available: bytes.len(),
            };
            warn!(error = %err, "TAC archive is too short to hold a dictionary");
            report.corruption = Some(err);
            return (container, report);
        };
        let dict_len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let dict_end = DICT_LENGTH_LEN.saturating_add(dict_len);
        let dictionary = &bytes[DICT_LENGTH_LEN..dict_end.min(bytes.len())];

        let samples = bytes.get(dict_end..).unwrap_or_default().chunks_exact(SAMPLE_LEN);
        report.trailing_bytes = samples.remainder().len();
        container.arena = samples
            .map(|s| f32::from_le_bytes([s[0], s[1], s[2], s[3]]))
            .collect();

        let mut pos = 0;
        while pos < dict_len {
            match TacEntry::read_from(dictionary, pos) {
                Ok((entry, consumed)) => {
                    pos += consumed;
                    report.entries_parsed += 1;
                    if let Some(previous) = container.entries.insert(entry.name.clone(), entry) {
                        warn!(name = %previous.name, "Duplicate TAC entry name, keeping the later one");
                    }
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        entries = report.entries_parsed,
                        "TAC dictionary is corrupt, keeping the entries parsed before it"
                    );
                    report.corruption = Some(err);
                    break;
                }
            }
        }

        if report.trailing_bytes > 0 {
            warn!(
                bytes = report.trailing_bytes,
                "TAC arena ends with a partial sample, ignoring it"
            );
        }

        container.dict_byte_length = container.entries.values().map(TacEntry::encoded_len).sum();
        debug!(
            entries = container.entries.len(),
            arena_len = container.arena.len(),
            "Decoded TAC archive"
        );

        (container, report)
    }

    /// Loads an archive from disk. An unreadable file is logged and yields an
    /// empty container.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => {
                let container = Self::decode(&bytes);
                info!(
                    path = ?path,
                    entries = container.len(),
                    memory_kb = container.memory_size() / 1024,
                    "Loaded TAC archive"
                );
                container
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "Unable to read TAC archive, starting empty");
                Self::new()
            }
        }
    }

    /// Loads an archive from disk along with what went wrong decoding it.
    /// Unlike [`TacContainer::open`], an unreadable file is an error.
    pub fn open_with_report<P: AsRef<Path>>(path: P) -> Result<(Self, DecodeReport), TacError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let (container, report) = Self::decode_with_report(&bytes);
        info!(
            path = ?path,
            entries = container.len(),
            clean = report.is_clean(),
            "Loaded TAC archive"
        );
        Ok((container, report))
    }

    /// Validates, encodes and writes the archive to disk. Failures are logged
    /// and reported by returning false; the in-memory state stays authoritative.
    pub fn persist<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        let written = self
            .encode()
            .and_then(|bytes| fs::write(path, &bytes).map(|_| bytes.len()).map_err(TacError::from));

        match written {
            Ok(len) => {
                info!(path = ?path, entries = self.len(), bytes = len, "Wrote TAC archive");
                true
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "Unable to write TAC archive");
                false
            }
        }
    }

    /// Stores a clip under `name`, replacing any clip already stored there.
    ///
    /// The buffer must have at least one channel, at least one sample, and
    /// channels of equal length. A rejected buffer leaves the container untouched.
    pub fn write_entry(&mut self, name: &str, buffer: &AudioBuffer) -> Result<(), TacError> {
        let (sample_count, channel_count) = match self.check_writable(name, buffer) {
            Ok(shape) => shape,
            Err(e) => {
                warn!(name, error = %e, "Rejected TAC entry");
                return Err(e);
            }
        };

        if self.entries.contains_key(name) {
            self.remove_entry(name);
        }

        let offset = u32::try_from(self.arena.len())
            .map_err(|_| TacError::ArenaOverflow(self.arena.len()))?;
        let entry = TacEntry::new(
            name,
            offset,
            sample_count,
            buffer.sample_rate(),
            channel_count,
        );

        self.arena.reserve(entry.data_len());
        for channel in buffer.channels() {
            self.arena.extend_from_slice(channel);
        }
        self.dict_byte_length += entry.encoded_len();

        debug!(
            name,
            offset,
            sample_count,
            channel_count,
            sample_rate = buffer.sample_rate(),
            "Wrote TAC entry"
        );
        self.entries.insert(name.to_string(), entry);

        Ok(())
    }

    /// Returns (samples per channel, channel count) if the buffer can be stored.
    fn check_writable(&self, name: &str, buffer: &AudioBuffer) -> Result<(u32, u16), TacError> {
        let channels = buffer.channels();
        if channels.is_empty() {
            return Err(TacError::NoChannels);
        }
        let frames = buffer.frame_count().ok_or_else(|| {
            TacError::ChannelLengthMismatch(channels.iter().map(Vec::len).collect())
        })?;
        if frames == 0 {
            return Err(TacError::EmptyBuffer);
        }
        let channel_count =
            u16::try_from(channels.len()).map_err(|_| TacError::TooManyChannels(channels.len()))?;
        let sample_count = u32::try_from(frames).map_err(|_| TacError::ArenaOverflow(frames))?;

        // Size of the arena once any entry being replaced is gone.
        let replaced = self.entries.get(name).map(TacEntry::data_len).unwrap_or(0);
        let arena_len = self
            .arena
            .len()
            .saturating_sub(replaced)
            .checked_add(frames.saturating_mul(channels.len()))
            .unwrap_or(usize::MAX);
        if arena_len > u32::MAX as usize {
            return Err(TacError::ArenaOverflow(arena_len));
        }

        Ok((sample_count, channel_count))
    }

    /// Removes a clip, splicing its samples out of the arena and shifting every
    /// later clip down. Returns the removed entry, or None if there was no clip
    /// by that name.
    pub fn remove_entry(&mut self, name: &str) -> Option<TacEntry> {
        let Some(entry) = self.entries.remove(name) else {
            warn!(name, "No TAC entry to remove");
            return None;
        };

        // Entries that fail validation may point past the arena; only splice
        // out what is actually there.
        let range = entry.range();
        let start = range.start.min(self.arena.len());
        let end = range.end.min(self.arena.len());
        self.arena.drain(start..end);

        let removed = u32::try_from(end - start).unwrap_or(u32::MAX);
        if removed > 0 {
            for other in self.entries.values_mut() {
                if other.offset > entry.offset {
                    other.offset = other.offset.saturating_sub(removed);
                }
            }
        }
        self.dict_byte_length = self.dict_byte_length.saturating_sub(entry.encoded_len());

        debug!(name, offset = entry.offset, removed, "Removed TAC entry");
        Some(entry)
    }

    /// Repairs the dictionary so it can be encoded.
    ///
    /// Names longer than [`MAX_NAME_LEN`] bytes are truncated (or the entry is
    /// dropped if the truncated name is taken), and entries whose samples don't
    /// lie within the arena are removed. Removal shifts other entries, so a
    /// second pass runs if the first removed anything.
    pub fn validate(&mut self) -> ValidationReport {
        let mut report = ValidationReport::default();
        while report.passes < MAX_VALIDATION_PASSES {
            report.passes += 1;
            let removed_before = report.removed.len();
            self.validation_pass(&mut report);
            if report.removed.len() == removed_before {
                break;
            }
        }

        if !report.is_clean() {
            warn!(
                passes = report.passes,
                removed = report.removed.len(),
                truncated = report.truncated.len(),
                "TAC validation repaired the dictionary"
            );
        }
        report
    }

    fn validation_pass(&mut self, report: &mut ValidationReport) {
        let pass = report.passes;

        let long_names: Vec<String> = self
            .entries
            .keys()
            .filter(|name| name.len() > MAX_NAME_LEN)
            .cloned()
            .collect();
        for name in long_names {
            let truncated = truncate_name(&name).to_string();
            if self.entries.contains_key(&truncated) {
                warn!(name = %name, "Truncated TAC entry name is already taken, removing entry");
                self.remove_entry(&name);
                report.removed.push(RemovedEntry {
                    name,
                    reason: RemovalReason::NameCollision,
                    pass,
                });
            } else if let Some(mut entry) = self.entries.remove(&name) {
                warn!(name = %name, to = %truncated, "TAC entry name is too long, truncating");
                entry.name = truncated.clone();
                self.entries.insert(truncated.clone(), entry);
                report.truncated.push(RenamedEntry {
                    from: name,
                    to: truncated,
                });
            }
        }

        self.dict_byte_length = self.entries.values().map(TacEntry::encoded_len).sum();

        let arena_len = self.arena.len();
        let mut out_of_range: Vec<(u32, String)> = self
            .entries
            .values()
            .filter(|entry| {
                entry.offset as usize >= arena_len || entry.range().end > arena_len
            })
            .map(|entry| (entry.offset, entry.name.clone()))
            .collect();
        // Highest offsets first, so each removal only shifts entries already handled.
        out_of_range.sort_unstable_by(|a, b| b.cmp(a));

        for (offset, name) in out_of_range {
            warn!(name = %name, offset, arena_len, "TAC entry lies outside the arena, removing it");
            self.remove_entry(&name);
            report.removed.push(RemovedEntry {
                name,
                reason: RemovalReason::OutOfRange,
                pass,
            });
        }
    }

    /// Validates, then drops arena samples no entry refers to, such as those left
    /// behind by entries lost to a corrupt dictionary. Entries keep their order.
    /// Returns the number of samples reclaimed.
    pub fn compact(&mut self) -> usize {
        self.validate();

        let mut arena = Vec::with_capacity(self.arena.len());
        let mut offsets = Vec::with_capacity(self.entries.len());
        let mut dropped = Vec::new();
        for entry in self.entries() {
            let Ok(offset) = u32::try_from(arena.len()) else {
                warn!(arena_len = arena.len(), "TAC arena too large to compact");
                return 0;
            };
            match self.arena.get(entry.range()) {
                Some(samples) => {
                    offsets.push((entry.name.clone(), offset));
                    arena.extend_from_slice(samples);
                }
                None => dropped.push(entry.name.clone()),
            }
        }

        let reclaimed = self.arena.len().saturating_sub(arena.len());
        for name in dropped {
            warn!(name = %name, "TAC entry lies outside the arena, dropping it");
            self.entries.remove(&name);
        }
        for (name, offset) in offsets {
            if let Some(entry) = self.entries.get_mut(&name) {
                entry.offset = offset;
            }
        }
        self.arena = arena;
        self.dict_byte_length = self.entries.values().map(TacEntry::encoded_len).sum();

        if reclaimed > 0 {
            info!(reclaimed, "Compacted TAC arena");
        }
        reclaimed
    }

    /// Returns a view of a clip's channels. A missing clip yields an empty view
    /// at the default sample rate.
    pub fn read_entry(&self, name: &str) -> EntryView<'_> {
        let Some(entry) = self.entries.get(name) else {
            debug!(name, "No TAC entry, returning empty audio");
            return EntryView::empty();
        };
        let Some(data) = self.arena.get(entry.range()) else {
            warn!(name, "TAC entry lies outside the arena, returning empty audio");
            return EntryView::empty();
        };

        let frames = entry.sample_count as usize;
        let channels = if frames == 0 {
            vec![data; usize::from(entry.channel_count)]
        } else {
            data.chunks_exact(frames).collect()
        };

        EntryView {
            sample_rate: entry.sample_rate,
            channels,
        }
    }

    /// Returns an owned copy of a clip. A missing clip yields an empty buffer
    /// at the default sample rate.
    pub fn read_entry_owned(&self, name: &str) -> AudioBuffer {
        self.read_entry(name).to_buffer()
    }

    /// Serializes the archive. Runs [`TacContainer::validate`] first, which may
    /// drop or rename entries.
    pub fn encode(&mut self) -> Result<Vec<u8>, TacError> {
        self.validate();

        let dict_len = u32::try_from(self.dict_byte_length)
            .map_err(|_| TacError::DictionaryOverflow(self.dict_byte_length))?;
        let mut bytes = Vec::with_capacity(
            DICT_LENGTH_LEN + self.dict_byte_length + self.arena.len() * SAMPLE_LEN,
        );

        bytes.extend_from_slice(&dict_len.to_le_bytes());
        for entry in self.entries() {
            entry.write_to(&mut bytes)?;
        }
        for sample in &self.arena {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }

        Ok(bytes)
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> Option<&TacEntry> {
        self.entries.get(name)
    }

    /// All entries, ordered by arena offset.
    pub fn entries(&self) -> Vec<&TacEntry> {
        let mut entries: Vec<&TacEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.offset.cmp(&b.offset).then_with(|| a.name.cmp(&b.name)));
        entries
    }

    /// Samples in the arena.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    /// Serialized size of the dictionary.
    pub fn dict_byte_length(&self) -> usize {
        self.dict_byte_length
    }

    /// Returns the memory size of the arena in bytes.
    pub fn memory_size(&self) -> usize {
        self.arena.len() * std::mem::size_of::<f32>()
    }
}

impl std::fmt::Debug for TacContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TacContainer")
            .field("entries", &self.entries.len())
            .field("arena_len", &self.arena.len())
            .field("dict_byte_length", &self.dict_byte_length)
            .finish()
    }
}
