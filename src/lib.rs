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

//! Uncompressed audio interchange.
//!
//! Two encodings are supported:
//! - WAV/RIFF files with 8/16/24/32-bit integer or 32-bit float samples.
//! - TAC archives, which keep many named clips in a single file backed by one
//!   contiguous sample arena so clips can be reloaded without re-parsing WAV
//!   headers.

pub mod audio;
pub mod config;
pub mod tac;
pub mod util;

#[cfg(test)]
mod testutil;
