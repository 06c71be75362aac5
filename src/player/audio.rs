//! Audio output using cpal, driven from a dedicated decode thread.
//!
//! This module implements the production [`AudioHandle`]:
//! - commands travel over a crossbeam channel to the audio thread
//! - the thread decodes with symphonia and fills a small chunk buffer
//! - a cpal output callback drains the buffer, applying volume
//! - lifecycle notifications travel back as [`AudioEvent`]s
//!
//! The cpal stream is created and owned inside the audio thread (it is
//! not `Send`), so the handle itself stays sendable. Every decoded chunk
//! is tagged with the generation of the load that produced it; the
//! output callback drops chunks from superseded loads so a track swap
//! never plays leftovers of the old track.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use parking_lot::RwLock;

use super::decoder::TrackDecoder;
use super::state::{AudioCommand, AudioEvent};
use super::{AudioHandle, PlayerError};

/// Playback snapshot shared between the handle, the decode thread and
/// the output callback.
struct Shared {
    playing: bool,
    volume: f32,
    position: Duration,
    duration: Duration,
}

/// The production audio handle.
pub struct CpalAudio {
    command_tx: Sender<AudioCommand>,
    event_rx: Receiver<AudioEvent>,
    shared: Arc<RwLock<Shared>>,
    thread: Option<JoinHandle<()>>,
}

impl CpalAudio {
    /// Initialize the default output device and start the audio thread.
    pub fn new(initial_volume: f32) -> Result<Self, PlayerError> {
        let shared = Arc::new(RwLock::new(Shared {
            playing: false,
            volume: initial_volume.clamp(0.0, 1.0),
            position: Duration::ZERO,
            duration: Duration::ZERO,
        }));

        let (command_tx, command_rx) = bounded(32);
        let (event_tx, event_rx) = unbounded();
        // Device/stream init happens on the thread; report the outcome back
        let (init_tx, init_rx) = bounded(1);

        let shared_for_thread = Arc::clone(&shared);
        let thread = thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || {
                audio_thread_main(shared_for_thread, command_rx, event_tx, init_tx);
            })
            .map_err(|e| PlayerError::AudioInit(e.to_string()))?;

        match init_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                command_tx,
                event_rx,
                shared,
                thread: Some(thread),
            }),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(PlayerError::AudioInit("audio thread died during init".to_string()))
            }
        }
    }

    fn send(&self, command: AudioCommand) -> Result<(), PlayerError> {
        self.command_tx
            .send(command)
            .map_err(|_| PlayerError::ChannelClosed)
    }
}

impl AudioHandle for CpalAudio {
    fn load(&mut self, source: &Path, generation: u64) {
        if self
            .send(AudioCommand::Load {
                source: source.to_path_buf(),
                generation,
            })
            .is_err()
        {
            tracing::error!("audio thread gone, cannot load {:?}", source);
        }
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.send(AudioCommand::Play)
            .map_err(|e| PlayerError::StartRejected(e.to_string()))
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCommand::Pause);
    }

    fn seek(&mut self, position: Duration) {
        let _ = self.send(AudioCommand::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.shared.write().volume = volume;
    }

    fn poll(&mut self) -> Vec<AudioEvent> {
        let mut events: Vec<AudioEvent> = self.event_rx.try_iter().collect();
        let shared = self.shared.read();
        events.push(AudioEvent::Time {
            elapsed: shared.position,
            duration: shared.duration,
        });
        events
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = self.command_tx.send(AudioCommand::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for CpalAudio {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A run of decoded samples headed for the output callback.
struct AudioChunk {
    samples: Vec<f32>,
    timestamp: Duration,
    generation: u64,
}

/// Decode-side context on the audio thread.
struct AudioThreadContext {
    decoder: Option<TrackDecoder>,
    generation: u64,
    out_channels: usize,
}

impl AudioThreadContext {
    /// Handle a command, returning whether to continue running.
    fn handle_command(
        &mut self,
        cmd: AudioCommand,
        shared: &RwLock<Shared>,
        event_tx: &Sender<AudioEvent>,
        current_gen: &AtomicU64,
    ) -> bool {
        match cmd {
            AudioCommand::Load { source, generation } => {
                // Silence the old track for the duration of the swap;
                // playback resumes on the controller's Play request.
                self.generation = generation;
                current_gen.store(generation, Ordering::Release);
                {
                    let mut s = shared.write();
                    s.playing = false;
                    s.position = Duration::ZERO;
                }
                match TrackDecoder::open(&source) {
                    Ok(decoder) => {
                        let duration = decoder.duration();
                        shared.write().duration = duration;
                        self.decoder = Some(decoder);
                        let _ = event_tx.send(AudioEvent::Loaded { generation, duration });
                    }
                    Err(e) => {
                        tracing::error!("Failed to open {:?}: {}", source, e);
                        self.decoder = None;
                        shared.write().duration = Duration::ZERO;
                        let _ = event_tx.send(AudioEvent::LoadFailed {
                            generation,
                            message: e.to_string(),
                        });
                    }
                }
            }
            AudioCommand::Play => {
                if self.decoder.is_some() {
                    shared.write().playing = true;
                }
            }
            AudioCommand::Pause => {
                shared.write().playing = false;
            }
            AudioCommand::Seek(position) => {
                if let Some(ref mut decoder) = self.decoder {
                    match decoder.seek(position) {
                        Ok(()) => shared.write().position = position,
                        Err(e) => tracing::warn!("Seek failed: {}", e),
                    }
                }
            }
            AudioCommand::Shutdown => return false,
        }
        true
    }

    /// Decode the next chunk and hand it to the output. Returns false if
    /// the output side is gone.
    fn decode_and_send(
        &mut self,
        chunk_tx: &Sender<AudioChunk>,
        shared: &RwLock<Shared>,
        event_tx: &Sender<AudioEvent>,
    ) -> bool {
        let Some(ref mut decoder) = self.decoder else {
            return true;
        };
        let in_channels = decoder.channels() as usize;

        match decoder.decode_next() {
            Ok(Some(chunk)) => {
                let samples = adapt_channels(chunk.samples, in_channels, self.out_channels);
                chunk_tx
                    .send(AudioChunk {
                        samples,
                        timestamp: chunk.timestamp,
                        generation: self.generation,
                    })
                    .is_ok()
            }
            Ok(None) => {
                tracing::debug!("Track finished");
                let mut s = shared.write();
                s.playing = false;
                s.position = s.duration;
                drop(s);
                self.decoder = None;
                let _ = event_tx.send(AudioEvent::Ended {
                    generation: self.generation,
                });
                true
            }
            Err(e) => {
                tracing::error!("Decode error: {}", e);
                shared.write().playing = false;
                self.decoder = None;
                let _ = event_tx.send(AudioEvent::LoadFailed {
                    generation: self.generation,
                    message: e.to_string(),
                });
                true
            }
        }
    }
}

/// Main loop for the audio thread: owns the cpal stream, decodes when
/// playing, blocks on commands when idle.
fn audio_thread_main(
    shared: Arc<RwLock<Shared>>,
    command_rx: Receiver<AudioCommand>,
    event_tx: Sender<AudioEvent>,
    init_tx: Sender<Result<(), PlayerError>>,
) {
    let host = cpal::default_host();
    let Some(device) = host.default_output_device() else {
        let _ = init_tx.send(Err(PlayerError::AudioInit("No output device found".to_string())));
        return;
    };
    if let Ok(name) = device.name() {
        tracing::info!("Using audio device: {}", name);
    }

    let supported_config = match device.default_output_config() {
        Ok(c) => c,
        Err(e) => {
            let _ = init_tx.send(Err(PlayerError::AudioInit(e.to_string())));
            return;
        }
    };

    let channels = supported_config.channels();
    tracing::info!(
        "Audio format: {}Hz, {} channels",
        supported_config.sample_rate().0,
        channels
    );

    let config = StreamConfig {
        channels,
        sample_rate: supported_config.sample_rate(),
        buffer_size: cpal::BufferSize::Default,
    };

    // Carries decoded audio to the output callback; small so a track
    // swap has little stale audio in flight
    let (chunk_tx, chunk_rx) = bounded::<AudioChunk>(8);
    let current_gen = Arc::new(AtomicU64::new(0));

    let stream = match supported_config.sample_format() {
        SampleFormat::F32 => build_stream::<f32>(
            &device,
            &config,
            chunk_rx,
            Arc::clone(&shared),
            Arc::clone(&current_gen),
        ),
        SampleFormat::I16 => build_stream::<i16>(
            &device,
            &config,
            chunk_rx,
            Arc::clone(&shared),
            Arc::clone(&current_gen),
        ),
        SampleFormat::U16 => build_stream::<u16>(
            &device,
            &config,
            chunk_rx,
            Arc::clone(&shared),
            Arc::clone(&current_gen),
        ),
        format => {
            let _ = init_tx.send(Err(PlayerError::AudioInit(format!(
                "Unsupported sample format: {:?}",
                format
            ))));
            return;
        }
    };

    let stream = match stream {
        Ok(s) => s,
        Err(e) => {
            let _ = init_tx.send(Err(PlayerError::AudioInit(e.to_string())));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = init_tx.send(Err(PlayerError::AudioInit(e.to_string())));
        return;
    }

    let _ = init_tx.send(Ok(()));

    let mut ctx = AudioThreadContext {
        decoder: None,
        generation: 0,
        out_channels: channels as usize,
    };

    loop {
        let is_active = shared.read().playing && ctx.decoder.is_some();

        // Block on commands when idle, poll when decoding. A
        // disconnected channel means the handle is gone; stop.
        let command = if is_active {
            match command_rx.try_recv() {
                Ok(cmd) => Some(cmd),
                Err(crossbeam_channel::TryRecvError::Empty) => None,
                Err(crossbeam_channel::TryRecvError::Disconnected) => break,
            }
        } else {
            match command_rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            }
        };

        if let Some(cmd) = command
            && !ctx.handle_command(cmd, &shared, &event_tx, &current_gen)
        {
            break;
        }

        if shared.read().playing && !ctx.decode_and_send(&chunk_tx, &shared, &event_tx) {
            break;
        }
    }
    // The stream (and its callback) die with this thread
    drop(stream);
}

/// Build the output stream for a given sample type.
fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    chunk_rx: Receiver<AudioChunk>,
    shared: Arc<RwLock<Shared>>,
    current_gen: Arc<AtomicU64>,
) -> Result<Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    // Partially-consumed chunk carried across callbacks
    let mut chunk_buffer: Option<(AudioChunk, usize)> = None;

    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let (volume, playing) = {
                let s = shared.read();
                (s.volume, s.playing)
            };

            if !playing {
                for sample in data.iter_mut() {
                    *sample = T::from_sample(0.0f32);
                }
                return;
            }

            let generation = current_gen.load(Ordering::Acquire);
            let mut output_pos = 0;

            while output_pos < data.len() {
                if chunk_buffer.is_none() {
                    match chunk_rx.try_recv() {
                        Ok(chunk) if chunk.generation != generation => {
                            // Leftover from a superseded load
                            continue;
                        }
                        Ok(chunk) => {
                            shared.write().position = chunk.timestamp;
                            chunk_buffer = Some((chunk, 0));
                        }
                        Err(_) => {
                            // Underrun - fill with silence
                            for sample in &mut data[output_pos..] {
                                *sample = T::from_sample(0.0f32);
                            }
                            return;
                        }
                    }
                }

                if let Some((ref chunk, ref mut chunk_pos)) = chunk_buffer {
                    if chunk.generation != generation {
                        chunk_buffer = None;
                        continue;
                    }
                    let remaining_in_chunk = chunk.samples.len() - *chunk_pos;
                    let remaining_in_output = data.len() - output_pos;
                    let to_copy = remaining_in_chunk.min(remaining_in_output);

                    for i in 0..to_copy {
                        let sample = chunk.samples[*chunk_pos + i] * volume;
                        data[output_pos + i] = T::from_sample(sample);
                    }

                    *chunk_pos += to_copy;
                    output_pos += to_copy;

                    if *chunk_pos >= chunk.samples.len() {
                        chunk_buffer = None;
                    }
                }
            }
        },
        |err| {
            tracing::error!("Audio stream error: {}", err);
        },
        None,
    )
}

/// Adapt interleaved samples between channel counts.
///
/// Mono fans out to every output channel; anything else folds down or
/// truncates to the output count frame by frame.
fn adapt_channels(samples: Vec<f32>, in_channels: usize, out_channels: usize) -> Vec<f32> {
    if in_channels == out_channels || in_channels == 0 {
        return samples;
    }

    let frames = samples.len() / in_channels;
    let mut output = Vec::with_capacity(frames * out_channels);

    for frame in 0..frames {
        let start = frame * in_channels;
        for ch in 0..out_channels {
            let sample = if in_channels == 1 {
                samples[start]
            } else if ch < in_channels {
                samples[start + ch]
            } else {
                // More outputs than inputs: repeat the last input channel
                samples[start + in_channels - 1]
            };
            output.push(sample);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapt_channels_passthrough() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        assert_eq!(adapt_channels(samples.clone(), 2, 2), samples);
    }

    #[test]
    fn test_adapt_channels_mono_to_stereo() {
        let samples = vec![0.1, 0.2];
        assert_eq!(adapt_channels(samples, 1, 2), vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn test_adapt_channels_stereo_to_mono() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        assert_eq!(adapt_channels(samples, 2, 1), vec![0.1, 0.3]);
    }
}
