//! Key input recording and replay.
//!
//! A recording is the raw key port value read on every frame plus the
//! [`CoreConfig`] it was captured under. Replaying it through
//! [`ReplayInput`] reproduces the same key masks frame for frame.
//!
//! ## File format
//!
//! ```text
//! +------------------+
//! | Magic "FCIR"     |  4 bytes
//! +------------------+
//! | Format version   |  u32 little-endian (currently 1)
//! +------------------+
//! | Reserved         |  u8 (0)
//! +------------------+
//! | Compressed data  |  deflate-compressed bincode payload
//! +------------------+
//! ```

use std::path::Path;

use log::{debug, warn};
use miniz_oxide::inflate::TINFLStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CoreConfig;
use crate::peripherals::InputPort;
use crate::KEYS_MASK;

/// Magic bytes identifying an input recording file.
const MAGIC: &[u8; 4] = b"FCIR";
/// Current recording format version.
const FORMAT_VERSION: u32 = 1;
const HEADER_LEN: usize = 9;
/// Upper bound on the decompressed payload (about a week of frames).
const MAX_PAYLOAD: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Encode(bincode::Error),
    #[error("deserialize error: {0}")]
    Decode(bincode::Error),
    #[error("file too small ({0} bytes)")]
    TooSmall(usize),
    #[error("not an input recording (bad magic)")]
    BadMagic,
    #[error("unsupported recording version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("decompress error: {0}")]
    Decompress(String),
    #[error("payload exceeds {0} bytes")]
    TooLarge(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputRecording {
    pub config: CoreConfig,
    /// Raw (active-low) port value per frame
    pub frames: Vec<u16>,
}

impl InputRecording {
    pub fn new(config: CoreConfig) -> Self {
        InputRecording { config, frames: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordingError> {
        let payload = bincode::serialize(self).map_err(RecordingError::Encode)?;
        let compressed = miniz_oxide::deflate::compress_to_vec(&payload, 6);

        let mut out = Vec::with_capacity(HEADER_LEN + compressed.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        out.push(0);
        out.extend_from_slice(&compressed);
        Ok(out)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, RecordingError> {
        Self::decode(data, MAX_PAYLOAD)
    }

    fn decode(data: &[u8], max_payload: usize) -> Result<Self, RecordingError> {
        if data.len() < HEADER_LEN {
            return Err(RecordingError::TooSmall(data.len()));
        }
        if &data[0..4] != MAGIC {
            return Err(RecordingError::BadMagic);
        }
        let version = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        if version != FORMAT_VERSION {
            return Err(RecordingError::UnsupportedVersion { found: version, expected: FORMAT_VERSION });
        }

        let decompressed =
            miniz_oxide::inflate::decompress_to_vec_with_limit(&data[HEADER_LEN..], max_payload)
                .map_err(|e| match e.status {
                    TINFLStatus::HasMoreOutput => RecordingError::TooLarge(max_payload),
                    status => RecordingError::Decompress(format!("{:?}", status)),
                })?;
        bincode::deserialize(&decompressed).map_err(RecordingError::Decode)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), RecordingError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        debug!("saved {} frames to {}", self.frames.len(), path.display());
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, RecordingError> {
        let data = std::fs::read(path)?;
        let rec = Self::from_bytes(&data)?;
        debug!("loaded {} frames from {}", rec.frames.len(), path.display());
        Ok(rec)
    }
}

/// Input port wrapper that records every value it reads.
pub struct InputRecorder<P: InputPort> {
    inner: P,
    recording: InputRecording,
}

impl<P: InputPort> InputRecorder<P> {
    pub fn new(inner: P, config: CoreConfig) -> Self {
        InputRecorder { inner, recording: InputRecording::new(config) }
    }

    pub fn recording(&self) -> &InputRecording {
        &self.recording
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    pub fn into_recording(self) -> InputRecording {
        self.recording
    }
}

impl<P: InputPort> InputPort for InputRecorder<P> {
    fn read_key_input(&mut self) -> u16 {
        let value = self.inner.read_key_input();
        self.recording.frames.push(value);
        value
    }
}

/// Input port that plays a recording back. Reads past the end see every
/// button released.
pub struct ReplayInput {
    frames: Vec<u16>,
    pos: usize,
    underrun: bool,
}

impl ReplayInput {
    pub fn new(recording: InputRecording) -> Self {
        ReplayInput { frames: recording.frames, pos: 0, underrun: false }
    }

    pub fn finished(&self) -> bool {
        self.pos >= self.frames.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl InputPort for ReplayInput {
    fn read_key_input(&mut self) -> u16 {
        match self.frames.get(self.pos) {
            Some(&value) => {
                self.pos += 1;
                value
            }
            None => {
                if !self.underrun {
                    warn!("replay ran out after {} frames; keys released", self.frames.len());
                    self.underrun = true;
                }
                KEYS_MASK
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ButtonMode;
    use crate::{key_port_value, Button};

    struct Script(Vec<u16>);

    impl InputPort for Script {
        fn read_key_input(&mut self) -> u16 {
            if self.0.is_empty() { KEYS_MASK } else { self.0.remove(0) }
        }
    }

    fn sample() -> InputRecording {
        InputRecording {
            config: CoreConfig { button_mode: ButtonMode::LR, ..CoreConfig::default() },
            frames: vec![
                KEYS_MASK,
                key_port_value(&[Button::A]),
                key_port_value(&[Button::A, Button::Up]),
                KEYS_MASK,
            ],
        }
    }

    #[test]
    fn test_recorder_captures_reads() {
        let values = sample().frames;
        let mut rec = InputRecorder::new(Script(values.clone()), CoreConfig::default());
        for &v in &values {
            assert_eq!(rec.read_key_input(), v);
        }
        assert_eq!(rec.into_recording().frames, values);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let rec = sample();
        let bytes = rec.to_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"FCIR");
        assert_eq!(InputRecording::from_bytes(&bytes).unwrap(), rec);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("framecore-rec-{}.fcir", std::process::id()));
        let rec = sample();
        rec.save_to_file(&path).unwrap();
        let back = InputRecording::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(back, rec);
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(InputRecording::from_bytes(b"FCIR"), Err(RecordingError::TooSmall(4))));

        let mut bytes = sample().to_bytes().unwrap();
        bytes[0] = b'X';
        assert!(matches!(InputRecording::from_bytes(&bytes), Err(RecordingError::BadMagic)));

        let mut bytes = sample().to_bytes().unwrap();
        bytes[4] = 9;
        assert!(matches!(
            InputRecording::from_bytes(&bytes),
            Err(RecordingError::UnsupportedVersion { found: 9, expected: 1 })
        ));

        let mut bytes = sample().to_bytes().unwrap();
        bytes.truncate(HEADER_LEN);
        bytes.extend_from_slice(&[0xFF; 8]);
        assert!(InputRecording::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let mut rec = sample();
        rec.frames = vec![KEYS_MASK; 4096];
        let bytes = rec.to_bytes().unwrap();
        // Compresses to far less than the inflated size
        assert!(bytes.len() < 1024);
        assert!(matches!(InputRecording::decode(&bytes, 1024), Err(RecordingError::TooLarge(1024))));
        assert_eq!(InputRecording::decode(&bytes, MAX_PAYLOAD).unwrap(), rec);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = InputRecording::load_from_file(Path::new("/nonexistent/framecore.fcir")).unwrap_err();
        assert!(matches!(err, RecordingError::Io(_)));
    }

    #[test]
    fn test_replay_then_released() {
        let rec = sample();
        let frames = rec.frames.clone();
        let mut replay = ReplayInput::new(rec);
        for &v in &frames {
            assert!(!replay.finished());
            assert_eq!(replay.read_key_input(), v);
        }
        assert!(replay.finished());
        assert_eq!(replay.read_key_input(), KEYS_MASK);
        assert_eq!(replay.read_key_input(), KEYS_MASK);
        assert_eq!(replay.position(), frames.len());
    }
}
