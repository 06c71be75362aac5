//! Audio decoding using symphonia for multi-format support.
//!
//! Supported formats:
//! - MP3
//! - FLAC
//! - OGG Vorbis
//! - WAV/PCM

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::Time;

use super::PlayerError;

/// Decoder for one mounted track.
pub struct TrackDecoder {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: u32,
    channels: u16,
    duration: Duration,
    time_base: Option<symphonia::core::units::TimeBase>,
}

/// A decoded run of interleaved f32 samples.
pub struct DecodedChunk {
    pub samples: Vec<f32>,
    /// Position of this chunk within the track
    pub timestamp: Duration,
}

impl TrackDecoder {
    /// Open a file for decoding.
    pub fn open(path: &Path) -> Result<Self, PlayerError> {
        let file = File::open(path)
            .map_err(|e| PlayerError::SourceNotFound(format!("{}: {}", path.display(), e)))?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Probe the format, hinting with the file extension
        let mut hint = Hint::new();
        if let Some(ext) = path.extension() {
            hint.with_extension(&ext.to_string_lossy());
        }

        let format_opts = FormatOptions {
            enable_gapless: true,
            ..Default::default()
        };
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| PlayerError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        // Find the first audio track
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| PlayerError::UnsupportedFormat("No audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| PlayerError::Decode("Unknown sample rate".to_string()))?;
        let channels = codec_params.channels.map(|c| c.count() as u16).unwrap_or(2);

        // Duration from the frame count when the container reports one
        let time_base = codec_params.time_base;
        let duration = if let Some(n_frames) = codec_params.n_frames {
            if let Some(tb) = time_base {
                let time = tb.calc_time(n_frames);
                Duration::from_secs_f64(time.seconds as f64 + time.frac)
            } else {
                Duration::from_secs_f64(n_frames as f64 / sample_rate as f64)
            }
        } else {
            Duration::ZERO
        };

        let decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| PlayerError::Decode(e.to_string()))?;

        Ok(Self {
            reader,
            decoder,
            track_id,
            sample_rate,
            channels,
            duration,
            time_base,
        })
    }

    /// Get the sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Get the total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Seek to an absolute position within the track.
    pub fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        let seek_to = SeekTo::Time {
            time: Time::from(position.as_secs_f64()),
            track_id: Some(self.track_id),
        };

        self.reader
            .seek(SeekMode::Accurate, seek_to)
            .map_err(|e| PlayerError::Decode(format!("Seek failed: {}", e)))?;

        // Reset decoder state after seeking
        self.decoder.reset();

        Ok(())
    }

    /// Decode the next chunk of interleaved f32 samples.
    ///
    /// Returns `Ok(None)` at end of stream.
    pub fn decode_next(&mut self) -> Result<Option<DecodedChunk>, PlayerError> {
        loop {
            let packet = match self.reader.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return Ok(None); // End of stream
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(PlayerError::Decode(e.to_string())),
            };

            // Skip packets from other tracks
            if packet.track_id() != self.track_id {
                continue;
            }

            let timestamp = if let Some(tb) = self.time_base {
                let time = tb.calc_time(packet.ts());
                Duration::from_secs_f64(time.seconds as f64 + time.frac)
            } else {
                Duration::ZERO
            };

            let decoded = match self.decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(_)) => continue, // Skip bad frame
                Err(e) => return Err(PlayerError::Decode(e.to_string())),
            };

            let samples = convert_to_f32(&decoded);
            return Ok(Some(DecodedChunk { samples, timestamp }));
        }
    }
}

/// Interleave a planar buffer of any supported sample type into f32.
macro_rules! interleave {
    ($buf:expr, $convert:expr) => {{
        let planes = $buf.planes();
        let plane_slice = planes.planes();
        let frames = $buf.frames();
        let mut output = Vec::with_capacity(frames * plane_slice.len());
        for frame in 0..frames {
            for plane in plane_slice {
                output.push($convert(plane[frame]));
            }
        }
        output
    }};
}

fn convert_to_f32(buffer: &AudioBufferRef) -> Vec<f32> {
    match buffer {
        AudioBufferRef::F32(buf) => interleave!(buf, |s: f32| s),
        AudioBufferRef::S16(buf) => interleave!(buf, |s: i16| s as f32 / 32768.0),
        AudioBufferRef::S24(buf) => {
            interleave!(buf, |s: symphonia::core::sample::i24| s.0 as f32 / 8388608.0)
        }
        AudioBufferRef::S32(buf) => interleave!(buf, |s: i32| s as f32 / 2147483648.0),
        AudioBufferRef::U8(buf) => interleave!(buf, |s: u8| (s as f32 - 128.0) / 128.0),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_nonexistent_file() {
        let result = TrackDecoder::open(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(PlayerError::SourceNotFound(_))));
    }

    #[test]
    fn test_decoder_rejects_non_audio_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-audio.mp3");
        std::fs::write(&path, b"definitely not an mp3").unwrap();

        let result = TrackDecoder::open(&path);
        assert!(result.is_err());
    }
}
