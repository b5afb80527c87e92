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

use std::{error::Error, fs::File, path::Path};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Writes planar channels as an integer PCM WAV file using hound, quantizing the
/// same way our encoder does. Only bit depths hound writes with a plain PCM
/// header (8 and 16 bits, up to two channels) are accepted.
pub fn write_hound_wav(
    path: &Path,
    channels: &[Vec<f32>],
    sample_rate: u32,
    bits_per_sample: u16,
) -> Result<(), Box<dyn Error>> {
    if !(bits_per_sample == 8 || bits_per_sample == 16) || channels.len() > 2 {
        return Err("Unsupported hound fixture format".into());
    }

    let mut writer = WavWriter::new(
        File::create(path)?,
        WavSpec {
            channels: channels.len() as u16,
            sample_rate,
            bits_per_sample,
            sample_format: SampleFormat::Int,
        },
    )?;

    let frames = channels.first().map(|c| c.len()).unwrap_or(0);
    for frame in 0..frames {
        for channel in channels {
            let value = channel[frame].clamp(-1.0, 1.0);
            if bits_per_sample == 8 {
                // hound exposes 8-bit samples as signed and stores them offset by 128.
                let raw = ((value + 1.0) * 127.5).round() as i32 - 128;
                writer.write_sample(raw as i8)?;
            } else {
                writer.write_sample((value * 32767.0).round() as i16)?;
            }
        }
    }
    writer.finalize()?;

    Ok(())
}

/// Reads a WAV file with hound and returns its spec and raw interleaved samples
/// widened to i32 (floats are returned through `float_samples`).
pub fn read_hound_wav(path: &Path) -> Result<(WavSpec, Vec<i32>, Vec<f32>), Box<dyn Error>> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    match spec.sample_format {
        SampleFormat::Int => {
            let samples = reader.samples::<i32>().collect::<Result<Vec<_>, _>>()?;
            Ok((spec, samples, Vec::new()))
        }
        SampleFormat::Float => {
            let samples = reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?;
            Ok((spec, Vec::new(), samples))
        }
    }
}

/// Audio test utilities for validating results
pub mod audio_test_utils {
    /// Calculate RMS (Root Mean Square) of a signal
    pub fn calculate_rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }

        let sum_squares: f32 = samples.iter().map(|&x| x * x).sum();
        (sum_squares / samples.len() as f32).sqrt()
    }

    /// Calculate Signal-to-Noise Ratio (SNR) in dB
    pub fn calculate_snr(original: &[f32], processed: &[f32]) -> f32 {
        if original.len() != processed.len() {
            return 0.0;
        }

        let signal_power = calculate_rms(original).powi(2);
        let noise_power = original
            .iter()
            .zip(processed.iter())
            .map(|(o, p)| (o - p).powi(2))
            .sum::<f32>()
            / original.len() as f32;

        if noise_power == 0.0 {
            return f32::INFINITY;
        }

        10.0 * (signal_power / noise_power).log10()
    }

    /// Largest absolute difference between two signals of equal length.
    pub fn max_abs_error(original: &[f32], processed: &[f32]) -> f32 {
        assert_eq!(original.len(), processed.len(), "Signals differ in length");
        original
            .iter()
            .zip(processed.iter())
            .map(|(o, p)| (o - p).abs())
            .fold(0.0, f32::max)
    }
}
