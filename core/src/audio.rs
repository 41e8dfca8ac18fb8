use std::f64::consts::PI;
use std::io::Cursor;

use crate::error::{DesignError, Result};

/// Sounds a single frequency. Fire-and-forget, one tone at a time.
pub trait TonePlayer {
    fn play(&mut self, frequency_hz: f64) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSettings {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub amplitude: f64,
    /// Linear ramp at each end to avoid clicks.
    pub fade_secs: f64,
}

impl Default for ToneSettings {
    fn default() -> Self {
        ToneSettings {
            duration_secs: 0.5,
            sample_rate: 44_100,
            amplitude: 0.3,
            fade_secs: 0.005,
        }
    }
}

impl ToneSettings {
    pub fn sample_count(&self) -> usize {
        (self.duration_secs * self.sample_rate as f64).round() as usize
    }
}

/// Renders a faded sine wave in [-amplitude, amplitude].
pub fn render_sine(frequency_hz: f64, settings: &ToneSettings) -> Result<Vec<f32>> {
    let nyquist = settings.sample_rate as f64 / 2.0;
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 || frequency_hz >= nyquist {
        return Err(DesignError::InvalidFrequency(frequency_hz));
    }

    let total = settings.sample_count();
    let rate = settings.sample_rate as f64;
    let fade = ((settings.fade_secs * rate) as usize).min(total / 2);

    let samples = (0..total)
        .map(|n| {
            let t = n as f64 / rate;
            let envelope = if fade == 0 {
                1.0
            } else if n < fade {
                n as f64 / fade as f64
            } else if n >= total - fade {
                (total - 1 - n) as f64 / fade as f64
            } else {
                1.0
            };
            (settings.amplitude * envelope * (2.0 * PI * frequency_hz * t).sin()) as f32
        })
        .collect();
    Ok(samples)
}

/// Encodes mono samples as a 16-bit PCM WAV file.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buffer), spec)?;
        for &sample in samples {
            let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(pcm)?;
        }
        writer.finalize()?;
    }
    Ok(buffer)
}

/// Renders each played tone to WAV bytes, keeping only the latest clip.
#[derive(Debug, Default)]
pub struct WavTonePlayer {
    pub settings: ToneSettings,
    last_clip: Option<Vec<u8>>,
}

impl WavTonePlayer {
    pub fn new(settings: ToneSettings) -> Self {
        WavTonePlayer {
            settings,
            last_clip: None,
        }
    }

    pub fn last_clip(&self) -> Option<&[u8]> {
        self.last_clip.as_deref()
    }

    pub fn take_clip(&mut self) -> Option<Vec<u8>> {
        self.last_clip.take()
    }
}

impl TonePlayer for WavTonePlayer {
    fn play(&mut self, frequency_hz: f64) -> Result<()> {
        let samples = render_sine(frequency_hz, &self.settings)?;
        let clip = encode_wav(&samples, self.settings.sample_rate)?;
        log::debug!("rendered {:.1} Hz tone, {} bytes", frequency_hz, clip.len());
        self.last_clip = Some(clip);
        Ok(())
    }
}
