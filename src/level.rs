//! Level file loading
//!
//! The canonical format is plain text, whitespace separated:
//!
//! ```text
//! num_targets width height
//! throws
//! x y radius vx vy hit_points     (one line per target)
//! ```
//!
//! Files ending in `.json` hold the same data as a serialized [`Level`]
//! instead. Loading fails fast with a typed error; the sim itself performs
//! no validation.

use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("level file ended early, expected {0}")]
    Truncated(&'static str),
    #[error("bad value for {field} (token #{index}): {token:?}")]
    BadValue {
        field: &'static str,
        index: usize,
        token: String,
    },
    #[error("malformed JSON level: {0}")]
    Json(#[from] serde_json::Error),
}

/// Initial state of one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
    pub hit_points: u32,
}

/// A parsed level: the field, the throw budget, and the targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub width: f32,
    pub height: f32,
    pub throws: u32,
    pub targets: Vec<TargetSpec>,
}

impl Level {
    /// Load a level from disk, dispatching on the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&data)?)
        } else {
            Self::parse_text(&data)
        }
    }

    /// Parse the whitespace-separated text format.
    pub fn parse_text(input: &str) -> Result<Self, LevelError> {
        let mut tokens = Tokens::new(input);

        let num_targets: usize = tokens.next("target count")?;
        let width: f32 = tokens.next("field width")?;
        let height: f32 = tokens.next("field height")?;
        let throws: u32 = tokens.next("throw budget")?;

        let mut targets = Vec::with_capacity(num_targets);
        for _ in 0..num_targets {
            let x: f32 = tokens.next("target x")?;
            let y: f32 = tokens.next("target y")?;
            let radius: f32 = tokens.next("target radius")?;
            let vx: f32 = tokens.next("target x-velocity")?;
            let vy: f32 = tokens.next("target y-velocity")?;
            let hit_points: u32 = tokens.next("target hit points")?;
            targets.push(TargetSpec {
                pos: Vec2::new(x, y),
                radius,
                vel: Vec2::new(vx, vy),
                hit_points,
            });
        }

        Ok(Level {
            width,
            height,
            throws,
            targets,
        })
    }
}

/// Whitespace token stream that remembers its position for error reporting
struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    index: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_whitespace(),
            index: 0,
        }
    }

    fn next<T: FromStr>(&mut self, field: &'static str) -> Result<T, LevelError> {
        let token = self.iter.next().ok_or(LevelError::Truncated(field))?;
        self.index += 1;
        token.parse().map_err(|_| LevelError::BadValue {
            field,
            index: self.index,
            token: token.to_string(),
        })
    }
}
