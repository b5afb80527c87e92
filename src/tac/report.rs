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
use std::fmt;

use super::error::TacError;

/// Why validation dropped an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// The entry's samples don't lie within the arena.
    OutOfRange,
    /// The entry's name had to be truncated and the shortened name was taken.
    NameCollision,
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalReason::OutOfRange => write!(f, "out of range"),
            RemovalReason::NameCollision => write!(f, "name collision"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    pub name: String,
    pub reason: RemovalReason,
    /// The validation pass (starting at 1) that removed the entry.
    pub pass: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedEntry {
    pub from: String,
    pub to: String,
}

/// What a call to `TacContainer::validate` changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Passes run; at most two.
    pub passes: usize,
    pub removed: Vec<RemovedEntry>,
    pub truncated: Vec<RenamedEntry>,
}

impl ValidationReport {
    /// True if validation found nothing to fix.
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty() && self.truncated.is_empty()
    }
}

/// What happened while decoding a TAC archive.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub entries_parsed: usize,
    /// The error that stopped dictionary parsing early, if any. Entries parsed
    /// before it are kept.
    pub corruption: Option<TacError>,
    /// Bytes at the end of the arena too short to form a sample.
    pub trailing_bytes: usize,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.corruption.is_none() && self.trailing_bytes == 0
    }
}
