//! Core data structures for sprite frames and characters.

use std::ops::Index;
use std::path::{Path, PathBuf};

/// Metadata about a frame file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameFile {
    /// Full path to the frame file
    pub path: PathBuf,
    /// Filename (e.g., "12.png")
    pub name: String,
    /// Frame position for ordering (the file stem as an integer)
    pub index: i64,
}

impl FrameFile {
    /// Create a new FrameFile
    pub fn new(path: PathBuf, name: String, index: i64) -> Self {
        Self { path, name, index }
    }

    /// Build a FrameFile from a path whose stem is an integer.
    ///
    /// Returns `None` when the stem is missing or does not parse, e.g.
    /// `"frame_01.png"` or `"cover.png"`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let index = Self::parse_index(path.file_stem()?.to_str()?)?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self::new(path.to_path_buf(), name, index))
    }

    /// Parse a frame position from a filename stem.
    ///
    /// Only whole integers are accepted ("0", "7", "0042", "-1"); surrounding
    /// whitespace is ignored.
    pub fn parse_index(stem: &str) -> Option<i64> {
        stem.trim().parse::<i64>().ok()
    }
}

/// The three animation folders every character provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationKind {
    /// Resting loop
    Idle,
    /// One-shot lead-in played when gogo starts
    GogoStart,
    /// High-energy loop
    GogoLoop,
}

impl AnimationKind {
    /// Folder name under `Flames/<character id>/`.
    pub fn folder_name(self) -> &'static str {
        match self {
            AnimationKind::Idle => "idle",
            AnimationKind::GogoStart => "gogoStart",
            AnimationKind::GogoLoop => "gogo",
        }
    }
}

/// An ordered, immutable sequence of frame handles.
///
/// An empty set is valid and means there is nothing to show for that mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSet<H> {
    frames: Vec<H>,
}

impl<H> FrameSet<H> {
    pub fn new(frames: Vec<H>) -> Self {
        Self { frames }
    }

    pub fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&H> {
        self.frames.get(index)
    }

    /// Index following `cursor`, wrapping to 0 at the end of the set.
    ///
    /// Returns 0 for an empty set.
    #[inline]
    pub fn next_cursor(&self, cursor: usize) -> usize {
        if self.frames.is_empty() {
            0
        } else {
            (cursor + 1) % self.frames.len()
        }
    }

    /// Iterate the frames in playback order.
    pub fn iter(&self) -> std::slice::Iter<'_, H> {
        self.frames.iter()
    }
}

impl<H> Default for FrameSet<H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<H> From<Vec<H>> for FrameSet<H> {
    fn from(frames: Vec<H>) -> Self {
        Self::new(frames)
    }
}

impl<H> Index<usize> for FrameSet<H> {
    type Output = H;

    fn index(&self, index: usize) -> &H {
        &self.frames[index]
    }
}

/// A character id together with its three loaded frame sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterSelection<H> {
    pub id: i32,
    pub idle: FrameSet<H>,
    pub gogo_start: FrameSet<H>,
    pub gogo_loop: FrameSet<H>,
}

impl<H> CharacterSelection<H> {
    pub fn new(id: i32, idle: Vec<H>, gogo_start: Vec<H>, gogo_loop: Vec<H>) -> Self {
        Self {
            id,
            idle: FrameSet::new(idle),
            gogo_start: FrameSet::new(gogo_start),
            gogo_loop: FrameSet::new(gogo_loop),
        }
    }

    /// Get the frame set for an animation kind.
    pub fn frames(&self, kind: AnimationKind) -> &FrameSet<H> {
        match kind {
            AnimationKind::Idle => &self.idle,
            AnimationKind::GogoStart => &self.gogo_start,
            AnimationKind::GogoLoop => &self.gogo_loop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(FrameFile::parse_index("0"), Some(0));
        assert_eq!(FrameFile::parse_index("42"), Some(42));
        assert_eq!(FrameFile::parse_index("0042"), Some(42));
        assert_eq!(FrameFile::parse_index("-1"), Some(-1));
        assert_eq!(FrameFile::parse_index("frame_3"), None);
        assert_eq!(FrameFile::parse_index(""), None);
    }

    #[test]
    fn test_from_path() {
        let file = FrameFile::from_path(Path::new("Flames/0/idle/12.png")).unwrap();
        assert_eq!(file.index, 12);
        assert_eq!(file.name, "12.png");

        assert!(FrameFile::from_path(Path::new("Flames/0/idle/cover.png")).is_none());
    }

    #[test]
    fn test_next_cursor_wraps() {
        let set = FrameSet::new(vec!['a', 'b', 'c']);
        assert_eq!(set.next_cursor(0), 1);
        assert_eq!(set.next_cursor(2), 0);

        let empty: FrameSet<char> = FrameSet::empty();
        assert_eq!(empty.next_cursor(0), 0);
    }

    #[test]
    fn test_character_frames_by_kind() {
        let character = CharacterSelection::new(3, vec!["i"], vec!["s1", "s2"], vec!["g"]);
        assert_eq!(character.frames(AnimationKind::Idle).len(), 1);
        assert_eq!(character.frames(AnimationKind::GogoStart)[1], "s2");
        assert_eq!(AnimationKind::GogoLoop.folder_name(), "gogo");
    }
}
