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

//! TAC archives: many named clips in one file.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! dict_length: u32
//! entry[]:     offset: u32, sample_rate: u32, sample_count: u32,
//!              channel_count: u16, name_length: u8, name: [u8; name_length]
//! arena:       f32 samples until end of file
//! ```
//!
//! Entry offsets count samples, not bytes, from the start of the arena. Each
//! clip's channels are stored one after another (all of channel 0, then all of
//! channel 1, ...).

mod container;
mod entry;
mod error;
mod report;


pub use container::{EntryView, TacContainer};
pub use entry::{truncate_name, TacEntry, ENTRY_HEADER_LEN, MAX_NAME_LEN};
pub use error::TacError;
pub use report::{DecodeReport, RemovalReason, RemovedEntry, RenamedEntry, ValidationReport};
