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

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Returns the path with a ".wav" extension, appending one if the path doesn't
/// already end in ".wav" (case-insensitive). Existing extensions are kept, so
/// "kick.v2" becomes "kick.v2.wav".
pub fn with_wav_extension(path: &Path) -> PathBuf {
    let is_wav = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    if is_wav {
        return path.to_path_buf();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(".wav");
    PathBuf::from(name)
}

/// Extracts a displayable clip name from a path: the file name without its extension.
pub fn clip_name(path: &Path) -> &str {
    path.file_stem()
        .and_then(|f| f.to_str())
        .unwrap_or("unreadable file name")
}

/// Outputs the given duration in a minutes:seconds.millis format.
pub fn duration_minutes_seconds(duration: Duration) -> String {
    let minutes = duration.as_secs() / 60;
    let secs = duration.as_secs() - minutes * 60;
    format!("{}:{:02}.{:03}", minutes, secs, duration.subsec_millis())
}

#[cfg(test)]
mod test {
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use crate::util::{clip_name, duration_minutes_seconds, with_wav_extension};

    #[test]
    fn test_with_wav_extension() {
        assert_eq!(
            with_wav_extension(Path::new("kick")),
            PathBuf::from("kick.wav")
        );
        assert_eq!(
            with_wav_extension(Path::new("samples/kick.wav")),
            PathBuf::from("samples/kick.wav")
        );
        assert_eq!(
            with_wav_extension(Path::new("KICK.WAV")),
            PathBuf::from("KICK.WAV")
        );
        assert_eq!(
            with_wav_extension(Path::new("kick.v2")),
            PathBuf::from("kick.v2.wav")
        );
    }

    #[test]
    fn test_clip_name() {
        assert_eq!("kick", clip_name(Path::new("/samples/kick.wav")));
        assert_eq!("snare.v2", clip_name(Path::new("snare.v2.wav")));
        assert_eq!("hat", clip_name(Path::new("hat")));
    }

    #[test]
    fn test_duration_minutes_strings() {
        assert_eq!("0:00.000", duration_minutes_seconds(Duration::new(0, 0)));
        assert_eq!(
            "0:05.250",
            duration_minutes_seconds(Duration::from_millis(5250))
        );
        assert_eq!("1:00.000", duration_minutes_seconds(Duration::new(60, 0)));
        assert_eq!("60:06.000", duration_minutes_seconds(Duration::new(3606, 0)));
    }
}
