//! Turning phrases into samples, with an on-disk cache so each phrase is only
//! synthesized once.

use crate::audio::{SAMPLE_RATE, read_wav, write_wav};
use color_eyre::eyre::{Result, bail};
use std::f32::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

pub trait Synthesizer {
    /// Mono samples in -1.0..=1.0 at [`SAMPLE_RATE`].
    fn synthesize(&self, text: &str) -> Result<Vec<f32>>;
}

/// Speaks a phrase as a little tune, one note per word.
#[derive(Copy, Clone, Debug)]
pub struct ToneSynthesizer {
    pub note_seconds: f32,
    pub gap_seconds: f32,
    pub volume: f32,
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self {
            note_seconds: 0.16,
            gap_seconds: 0.05,
            volume: 0.3,
        }
    }
}

impl ToneSynthesizer {
    const BASE_HZ: f32 = 330.0;

    fn pitch(word: &str) -> f32 {
        let semitone = word.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b))) % 12;
        // questions go up at the end
        let lift = if word.ends_with('?') { 5 } else { 0 };
        Self::BASE_HZ * 2f32.powf((semitone + lift) as f32 / 12.0)
    }
}

impl Synthesizer for ToneSynthesizer {
    fn synthesize(&self, text: &str) -> Result<Vec<f32>> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            bail!("nothing to say");
        }

        let rate = SAMPLE_RATE as f32;
        let note_len = (self.note_seconds * rate) as usize;
        let gap_len = (self.gap_seconds * rate) as usize;
        let mut samples = Vec::with_capacity(words.len() * (note_len + gap_len));

        for word in words {
            let hz = Self::pitch(word);
            for i in 0..note_len {
                let t = i as f32 / rate;
                // short attack and release to avoid clicks
                let envelope = (i.min(note_len - i) as f32 / (0.01 * rate)).min(1.0);
                samples.push((TAU * hz * t).sin() * self.volume * envelope);
            }
            samples.extend(std::iter::repeat_n(0.0, gap_len));
        }
        Ok(samples)
    }
}

#[derive(Debug)]
pub struct SpeechCache<S = ToneSynthesizer> {
    dir: PathBuf,
    synth: S,
}

impl<S: Synthesizer> SpeechCache<S> {
    pub fn new(dir: impl Into<PathBuf>, synth: S) -> Self {
        Self {
            dir: dir.into(),
            synth,
        }
    }

    pub fn path_for(&self, text: &str) -> PathBuf {
        let mut slug = String::with_capacity(text.len());
        for c in text.trim().chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('_') {
                slug.push('_');
            }
        }
        let slug = slug.trim_matches('_');
        let slug = if slug.is_empty() { "silence" } else { slug };
        self.dir.join(format!("{slug}.wav"))
    }

    /// Samples for `text`, or `None` if they could neither be loaded nor made.
    pub fn speech(&self, text: &str) -> Option<Vec<f32>> {
        match self.load_or_synthesize(text) {
            Ok(samples) => Some(samples),
            Err(e) => {
                log::error!("no speech for {text:?}: {e}");
                None
            }
        }
    }

    fn load_or_synthesize(&self, text: &str) -> Result<Vec<f32>> {
        let path = self.path_for(text);
        if path.exists() {
            log::info!("loading speech from {}", path.display());
            return read_wav(&path);
        }

        log::info!("{} doesn't exist, synthesizing", path.display());
        let samples = self.synth.synthesize(text)?;
        if let Err(e) = self.store(&path, &samples) {
            log::warn!("could not cache speech in {}: {e}", path.display());
        }
        Ok(samples)
    }

    fn store(&self, path: &Path, samples: &[f32]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        write_wav(path, samples)
    }
}
