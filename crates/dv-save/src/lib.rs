//! dv-save: Save/restore system for Delve
//!
//! A save is a JSON document holding a versioned header and the full
//! `GameState`, gzip-compressed by default. Loading accepts both the
//! compressed and the plain form.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dv_core::GameState;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// First two bytes of every gzip stream
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Extension of save files in the save directory
pub const SAVE_EXTENSION: &str = "dlv";

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// Save file header for versioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Campaign seed of the run
    pub seed: u64,
    /// Turn count at save time
    pub turns: u64,
    /// Dungeon depth at save time
    pub depth: u8,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "DLVE";

    pub fn new(state: &GameState) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            seed: state.campaign_seed,
            turns: state.turns,
            depth: state.level.depth,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
#[derive(Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub state: GameState,
}

/// Only the header, for browsing saves without building a `GameState`
#[derive(Deserialize)]
struct HeaderOnly {
    header: SaveHeader,
}

/// Serialize a state to save-file bytes
pub fn encode(state: &GameState, compress: bool) -> Result<Vec<u8>, SaveError> {
    let save_file = SaveFileRef {
        header: SaveHeader::new(state),
        state,
    };
    let json = serde_json::to_vec(&save_file)?;
    if !compress {
        return Ok(json);
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

/// Parse save-file bytes, compressed or not
pub fn decode(bytes: &[u8]) -> Result<GameState, SaveError> {
    let json = inflate(bytes)?;
    let save_file: SaveFile = serde_json::from_slice(&json)?;
    save_file.header.validate()?;
    Ok(save_file.state)
}

#[derive(Serialize)]
struct SaveFileRef<'a> {
    header: SaveHeader,
    state: &'a GameState,
}

fn inflate(bytes: &[u8]) -> Result<Vec<u8>, SaveError> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes.to_vec());
    }
    let mut decoder = GzDecoder::new(bytes);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json)?;
    Ok(json)
}

/// Save game state to a gzip-compressed file
pub fn save_game(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    write_save(state, path.as_ref(), true)
}

/// Save game state as plain JSON
pub fn save_game_uncompressed(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    write_save(state, path.as_ref(), false)
}

fn write_save(state: &GameState, path: &Path, compress: bool) -> Result<(), SaveError> {
    let bytes = encode(state, compress)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    info!(
        "saved turn {} on depth {} to {}",
        state.turns,
        state.level.depth,
        path.display()
    );
    Ok(())
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, SaveError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => SaveError::NotFound,
        _ => SaveError::Io(err),
    })?;
    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Load game state from a file
pub fn load_game(path: impl AsRef<Path>) -> Result<GameState, SaveError> {
    let path = path.as_ref();
    let state = decode(&read_bytes(path)?)?;
    info!("loaded turn {} from {}", state.turns, path.display());
    Ok(state)
}

/// Load only the header from a save file (for save game browser)
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let json = inflate(&read_bytes(path.as_ref())?)?;
    let HeaderOnly { header } = serde_json::from_slice(&json)?;
    header.validate()?;
    Ok(header)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Directory saves go to by default, created on demand
pub fn default_save_dir() -> Result<PathBuf, SaveError> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("delve");
    path.push("saves");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// Get the default save path for a save slot name
pub fn default_save_path(name: &str) -> Result<PathBuf, SaveError> {
    Ok(default_save_dir()?.join(format!("{name}.{SAVE_EXTENSION}")))
}

/// List the saves in a directory, newest first
///
/// Files that are not valid saves are skipped.
pub fn list_saves(dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, SaveHeader)>, SaveError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut saves = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|e| e != SAVE_EXTENSION) {
            continue;
        }
        match load_header(&path) {
            Ok(header) => saves.push((path, header)),
            Err(err) => debug!("skipping {}: {err}", path.display()),
        }
    }

    saves.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));
    Ok(saves)
}
