//! Sound effects and spoken feedback.
//!
//! Samples are mono `f32` at [`SAMPLE_RATE`]. A [`Speaker`] plays them; without
//! the `audio` feature, or without an output device, everything goes to a
//! [`SilentSpeaker`] and the game runs mute.

use crate::color::ColorName;
use crate::config::GameConfig;
use crate::game::GameEvent;
use crate::phrases;
use crate::speech::{SpeechCache, ToneSynthesizer};
use color_eyre::eyre::Result;
use rand::rngs::ThreadRng;
use std::collections::HashMap;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

pub const SAMPLE_RATE: u32 = 48_000;

pub trait Speaker {
    fn play(&mut self, samples: &[f32]);
    fn is_busy(&self) -> bool;
}

#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn play(&mut self, _samples: &[f32]) {}

    fn is_busy(&self) -> bool {
        false
    }
}

/// Blocks until `speaker` is done or `max` has passed.
pub fn wait_until_idle(speaker: &dyn Speaker, max: Duration) {
    let start = Instant::now();
    while speaker.is_busy() && start.elapsed() < max {
        thread::sleep(Duration::from_millis(100));
    }
}

pub fn read_wav(path: &Path) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let raw: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = usize::from(spec.channels.max(1));
    let mono: Vec<f32> = raw
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();
    Ok(resample(&mono, spec.sample_rate, SAMPLE_RATE))
}

/// Writes mono 16-bit PCM at [`SAMPLE_RATE`].
pub fn write_wav(path: &Path, samples: &[f32]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let scaled = (clamped * f32::from(i16::MAX)) as i16;
        writer.write_sample(scaled)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Linear interpolation, good enough for short effects.
fn resample(samples: &[f32], from: u32, to: u32) -> Vec<f32> {
    if from == to || from == 0 || samples.is_empty() {
        return samples.to_vec();
    }
    let ratio = f64::from(from) / f64::from(to);
    let len = (samples.len() as f64 / ratio) as usize;
    (0..len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let j = pos as usize;
            let frac = (pos - j as f64) as f32;
            let a = samples[j.min(samples.len() - 1)];
            let b = samples[(j + 1).min(samples.len() - 1)];
            a + (b - a) * frac
        })
        .collect()
}

/// Loads a sound file, logging and returning `None` if it can't be read.
pub fn load_sound(path: &Path) -> Option<Vec<f32>> {
    match read_wav(path) {
        Ok(samples) => Some(samples),
        Err(e) => {
            log::warn!("error loading sound {}: {e}", path.display());
            None
        }
    }
}

/// Recorded effects from the assets directory.
#[derive(Debug, Default)]
pub struct SoundBank {
    pub click: Option<Vec<f32>>,
    pub error: Option<Vec<f32>>,
    pub colors: HashMap<ColorName, Vec<f32>>,
}

impl SoundBank {
    pub fn load(dir: &Path) -> Self {
        let colors = ColorName::ALL
            .iter()
            .filter_map(|&name| {
                load_sound(&dir.join(format!("{name}.wav"))).map(|samples| (name, samples))
            })
            .collect();
        Self {
            click: load_sound(&dir.join("mouse_click.wav")),
            error: load_sound(&dir.join("nogood.wav")),
            colors,
        }
    }
}

/// Maps game events to sounds.
pub struct AudioCues {
    speaker: Box<dyn Speaker>,
    bank: SoundBank,
    speech: SpeechCache<ToneSynthesizer>,
    rng: ThreadRng,
}

impl AudioCues {
    /// How long pacing waits may block the game.
    const MAX_WAIT: Duration = Duration::from_secs(4);

    pub fn new(config: &GameConfig, mute: bool) -> Self {
        let speaker: Box<dyn Speaker> = if mute {
            Box::new(SilentSpeaker)
        } else {
            default_speaker()
        };
        Self::with_speaker(config, speaker)
    }

    pub fn with_speaker(config: &GameConfig, speaker: Box<dyn Speaker>) -> Self {
        Self {
            speaker,
            bank: SoundBank::load(&config.assets_dir),
            speech: SpeechCache::new(&config.speech_cache_dir, ToneSynthesizer::default()),
            rng: rand::rng(),
        }
    }

    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::Welcome => {
                self.say(phrases::WELCOME);
                wait_until_idle(&*self.speaker, Self::MAX_WAIT);
            }
            GameEvent::Click => {
                if let Some(click) = &self.bank.click {
                    self.speaker.play(click);
                }
            }
            GameEvent::Refused => {
                if let Some(error) = &self.bank.error {
                    self.speaker.play(error);
                }
            }
            GameEvent::Prompt(color) => {
                let prompt = phrases::prompt(color, &mut self.rng);
                self.say(&prompt);
            }
            GameEvent::Right => {
                let praise = phrases::pick(&phrases::RIGHT, &mut self.rng);
                self.say(praise);
            }
            GameEvent::Wrong => {
                let phrase = phrases::pick(&phrases::WRONG, &mut self.rng);
                self.say(phrase);
            }
            GameEvent::RoundOver => {
                wait_until_idle(&*self.speaker, Self::MAX_WAIT);
                self.say(phrases::WELL_DONE);
                wait_until_idle(&*self.speaker, Self::MAX_WAIT);
            }
        }
    }

    /// Plays the recorded name of `color`, if there is one.
    pub fn name_color(&mut self, color: ColorName) {
        if let Some(samples) = self.bank.colors.get(&color) {
            self.speaker.play(samples);
        }
    }

    fn say(&mut self, text: &str) {
        log::info!("saying {text:?}");
        if let Some(samples) = self.speech.speech(text) {
            self.speaker.play(&samples);
        }
    }
}

#[cfg(feature = "audio")]
fn default_speaker() -> Box<dyn Speaker> {
    match device::DeviceSpeaker::new() {
        Some(speaker) => Box::new(speaker),
        None => {
            log::warn!("no audio output device, running mute");
            Box::new(SilentSpeaker)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn default_speaker() -> Box<dyn Speaker> {
    log::info!("built without the audio feature, running mute");
    Box::new(SilentSpeaker)
}

#[cfg(feature = "audio")]
mod device {
    use super::{SAMPLE_RATE, Speaker};
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{SampleRate, Stream, StreamConfig};
    use ringbuf::HeapRb;
    use ringbuf::traits::{Consumer, Observer, Producer, Split};

    /// Plays through the default output device. Samples go through a ring buffer
    /// that the cpal callback drains.
    pub struct DeviceSpeaker {
        _stream: Stream,
        producer: ringbuf::HeapProd<f32>,
    }

    impl DeviceSpeaker {
        pub fn new() -> Option<Self> {
            let host = cpal::default_host();
            let device = host.default_output_device()?;

            let config = StreamConfig {
                channels: 1,
                sample_rate: SampleRate(SAMPLE_RATE),
                buffer_size: cpal::BufferSize::Default,
            };

            // 10 seconds, longer than any phrase
            let ring = HeapRb::<f32>::new(SAMPLE_RATE as usize * 10);
            let (producer, mut consumer) = ring.split();

            let stream = device
                .build_output_stream(
                    &config,
                    move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                        for sample in data.iter_mut() {
                            *sample = consumer.try_pop().unwrap_or(0.0);
                        }
                    },
                    |err| log::error!("audio stream error: {err}"),
                    None,
                )
                .ok()?;

            stream.play().ok()?;

            Some(Self {
                _stream: stream,
                producer,
            })
        }
    }

    impl Speaker for DeviceSpeaker {
        fn play(&mut self, samples: &[f32]) {
            let pushed = self.producer.push_slice(samples);
            if pushed < samples.len() {
                log::debug!("audio buffer full, dropped {} samples", samples.len() - pushed);
            }
        }

        fn is_busy(&self) -> bool {
            !self.producer.is_empty()
        }
    }
}
