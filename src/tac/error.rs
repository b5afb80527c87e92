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
/// Error types for TAC archive operations
#[derive(Debug, thiserror::Error)]
pub enum TacError {
    #[error("Channel lengths differ: {0:?}")]
    ChannelLengthMismatch(Vec<usize>),

    #[error("Buffer has no channels")]
    NoChannels,

    #[error("Buffer has no samples")]
    EmptyBuffer,

    #[error("Too many channels for a TAC entry: {0}")]
    TooManyChannels(usize),

    #[error("Archive arena would hold {0} samples, more than a TAC offset can address")]
    ArenaOverflow(usize),

    #[error("Dictionary is {0} bytes, more than a TAC header can describe")]
    DictionaryOverflow(usize),

    #[error("Entry name is {0} bytes, longer than a TAC entry can store")]
    NameTooLong(usize),

    #[error("Dictionary truncated at byte {offset}: needed {needed} bytes, {available} available")]
    TruncatedDictionary {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
