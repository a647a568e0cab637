//! Frame enumeration and loading.
//!
//! Frames live on disk as `<root>/<character id>/<folder>/<n>.png`, where
//! `<n>` is the frame's position. A [`FrameSource`] turns one of those
//! folders into an ordered list of handles:
//! - [`DirectorySource`] yields the sorted file paths
//! - [`PngSource`] (feature `png`) decodes each file into a [`Sprite`]

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{AnimationKind, CharacterSelection, FrameFile, LoadError};

/// Directory under the application base dir that holds config and frames.
pub const ASSET_DIR: &str = "Flames";

/// Provider of ordered frame handles for a character's animation folders.
///
/// A missing folder yields an empty list rather than an error.
pub trait FrameSource {
    type Handle;

    /// Load one animation folder, ordered by frame number.
    fn load_frames(&self, character_id: i32, kind: AnimationKind) -> Result<Vec<Self::Handle>, LoadError>;

    /// Load all three animation folders for a character.
    fn load_character(&self, character_id: i32) -> Result<CharacterSelection<Self::Handle>, LoadError> {
        Ok(CharacterSelection::new(
            character_id,
            self.load_frames(character_id, AnimationKind::Idle)?,
            self.load_frames(character_id, AnimationKind::GogoStart)?,
            self.load_frames(character_id, AnimationKind::GogoLoop)?,
        ))
    }
}

/// List the `.png` frame files in a directory, sorted by frame number.
///
/// Returns an empty list if the directory does not exist. Files with other
/// extensions are ignored; a `.png` whose stem is not an integer is an
/// error.
pub fn list_frame_files(dir: &Path) -> Result<Vec<FrameFile>, LoadError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "frame folder missing");
        return Ok(Vec::new());
    }

    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() || !is_png(&path) {
            continue;
        }
        match FrameFile::from_path(&path) {
            Some(file) => files.push(file),
            None => return Err(LoadError::NonNumericStem { path }),
        }
    }

    files.sort_by_key(|f| f.index);
    Ok(files)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Frame source yielding the sorted paths of each folder's frames.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Use `<base_dir>/Flames` as the asset root.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self::with_root(base_dir.as_ref().join(ASSET_DIR))
    }

    /// Use `root` directly as the directory holding character folders.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the character folders.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one animation folder.
    pub fn folder(&self, character_id: i32, kind: AnimationKind) -> PathBuf {
        self.root
            .join(character_id.to_string())
            .join(kind.folder_name())
    }
}

impl FrameSource for DirectorySource {
    type Handle = PathBuf;

    fn load_frames(&self, character_id: i32, kind: AnimationKind) -> Result<Vec<PathBuf>, LoadError> {
        let files = list_frame_files(&self.folder(character_id, kind))?;
        Ok(files.into_iter().map(|f| f.path).collect())
    }
}

#[cfg(feature = "png")]
pub use self::png::{PngSource, Sprite};

#[cfg(feature = "png")]
mod png {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use image::RgbaImage;

    use super::{list_frame_files, DirectorySource, FrameSource};
    use crate::{AnimationKind, LoadError};

    /// A decoded frame. Cloning shares the pixel buffer.
    #[derive(Clone, Debug)]
    pub struct Sprite {
        path: PathBuf,
        image: Arc<RgbaImage>,
    }

    impl Sprite {
        /// Decode a frame file into RGBA pixels.
        pub fn open(path: &Path) -> Result<Self, LoadError> {
            let image = image::open(path).map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Self {
                path: path.to_path_buf(),
                image: Arc::new(image.to_rgba8()),
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn image(&self) -> &RgbaImage {
            &self.image
        }

        /// (width, height) in pixels.
        pub fn dimensions(&self) -> (u32, u32) {
            self.image.dimensions()
        }
    }

    /// Frame source that decodes every frame up front.
    #[derive(Clone, Debug)]
    pub struct PngSource {
        dirs: DirectorySource,
    }

    impl PngSource {
        pub fn new(base_dir: impl AsRef<Path>) -> Self {
            Self {
                dirs: DirectorySource::new(base_dir),
            }
        }

        pub fn with_root(root: impl Into<PathBuf>) -> Self {
            Self {
                dirs: DirectorySource::with_root(root),
            }
        }
    }

    impl FrameSource for PngSource {
        type Handle = Sprite;

        fn load_frames(&self, character_id: i32, kind: AnimationKind) -> Result<Vec<Sprite>, LoadError> {
            list_frame_files(&self.dirs.folder(character_id, kind))?
                .iter()
                .map(|f| Sprite::open(&f.path))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_frames_sorted_numerically() {
        let tmp = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(tmp.path());
        let idle = source.folder(0, AnimationKind::Idle);
        for name in ["10.png", "2.png", "1.png", "readme.txt"] {
            touch(&idle, name);
        }

        let frames = source.load_frames(0, AnimationKind::Idle).unwrap();
        assert_eq!(names(&frames), vec!["1.png", "2.png", "10.png"]);
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(tmp.path());
        assert!(source.load_frames(3, AnimationKind::GogoStart).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_stem_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(tmp.path());
        let gogo = source.folder(0, AnimationKind::GogoLoop);
        touch(&gogo, "1.png");
        touch(&gogo, "cover.png");

        let err = source.load_frames(0, AnimationKind::GogoLoop).unwrap_err();
        assert!(matches!(err, LoadError::NonNumericStem { .. }));
    }

    #[test]
    fn test_load_character_uses_all_folders() {
        let tmp = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(tmp.path());
        touch(&source.folder(5, AnimationKind::Idle), "0.png");
        touch(&source.folder(5, AnimationKind::Idle), "1.png");
        touch(&source.folder(5, AnimationKind::GogoLoop), "0.png");

        let character = source.load_character(5).unwrap();
        assert_eq!(character.id, 5);
        assert_eq!(character.idle.len(), 2);
        assert!(character.gogo_start.is_empty());
        assert_eq!(character.gogo_loop.len(), 1);
        assert!(tmp.path().join("Flames/5/gogo/0.png").exists());
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_png_source_decodes_frames() {
        let tmp = tempfile::tempdir().unwrap();
        let source = PngSource::new(tmp.path());
        let dir = tmp.path().join("Flames/0/idle");
        fs::create_dir_all(&dir).unwrap();
        image::RgbaImage::new(4, 2).save(dir.join("1.png")).unwrap();
        image::RgbaImage::new(3, 3).save(dir.join("0.png")).unwrap();

        let frames = source.load_frames(0, AnimationKind::Idle).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].dimensions(), (3, 3));
        assert_eq!(frames[1].dimensions(), (4, 2));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_png_source_rejects_corrupt_file() {
        let tmp = tempfile::tempdir().unwrap();
        let source = PngSource::new(tmp.path());
        touch(&tmp.path().join("Flames/0/idle"), "0.png");

        let err = source.load_frames(0, AnimationKind::Idle).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }
}
