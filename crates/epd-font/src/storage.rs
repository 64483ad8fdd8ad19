//! Byte-supplying storage for serialized fonts

use std::collections::HashMap;
use std::io;

use crate::{FontError, Result};

/// Readable byte stream of known length
pub trait ByteSource {
    /// Total size in bytes
    fn size(&self) -> usize;

    /// Read the whole stream
    fn read_all(&mut self) -> io::Result<Vec<u8>>;
}

/// Opens byte sources by path
pub trait FontStorage {
    type Source: ByteSource;

    fn open(&self, path: &str) -> Result<Self::Source>;
}

/// In-memory storage keyed by path
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FontStorage for MemoryStorage {
    type Source = io::Cursor<Vec<u8>>;

    fn open(&self, path: &str) -> Result<Self::Source> {
        self.files
            .get(path)
            .map(|bytes| io::Cursor::new(bytes.clone()))
            .ok_or_else(|| FontError::FontNotFound(path.to_string()))
    }
}

impl ByteSource for io::Cursor<Vec<u8>> {
    fn size(&self) -> usize {
        self.get_ref().len()
    }

    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.size());
        io::Read::read_to_end(self, &mut out)?;
        Ok(out)
    }
}

#[cfg(feature = "std-fs")]
pub use fs::{FileSource, FsStorage};

#[cfg(feature = "std-fs")]
mod fs {
    use std::fs::File;
    use std::io::{self, Read};
    use std::path::{Path, PathBuf};

    use super::{ByteSource, FontStorage};
    use crate::{FontError, Result};

    /// Filesystem storage rooted at a font directory
    #[derive(Debug, Clone)]
    pub struct FsStorage {
        root: PathBuf,
    }

    impl FsStorage {
        pub fn new(root: impl AsRef<Path>) -> Self {
            Self { root: root.as_ref().to_path_buf() }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }
    }

    impl FontStorage for FsStorage {
        type Source = FileSource;

        fn open(&self, path: &str) -> Result<FileSource> {
            let full = self.root.join(path);
            let file = File::open(&full).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => FontError::FontNotFound(full.display().to_string()),
                _ => FontError::Io(e),
            })?;
            let size = file.metadata()?.len() as usize;
            Ok(FileSource { file, size })
        }
    }

    /// Open font file with its length taken at open time
    #[derive(Debug)]
    pub struct FileSource {
        file: File,
        size: usize,
    }

    impl ByteSource for FileSource {
        fn size(&self) -> usize {
            self.size
        }

        fn read_all(&mut self) -> io::Result<Vec<u8>> {
            let mut out = Vec::with_capacity(self.size);
            self.file.read_to_end(&mut out)?;
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        storage.insert("a.epd_fb", vec![1, 2, 3]);
        assert_eq!(storage.len(), 1);

        let mut source = storage.open("a.epd_fb").unwrap();
        assert_eq!(source.size(), 3);
        assert_eq!(source.read_all().unwrap(), vec![1, 2, 3]);
        assert!(matches!(storage.open("b.epd_fb"), Err(FontError::FontNotFound(_))));
    }

    #[cfg(feature = "std-fs")]
    #[test]
    fn test_fs_storage() {
        let dir = std::env::temp_dir().join(format!("epd-font-storage-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("tiny.epd_fb"), [9u8, 8, 7, 6]).unwrap();

        let storage = FsStorage::new(&dir);
        let mut source = storage.open("tiny.epd_fb").unwrap();
        assert_eq!(source.size(), 4);
        assert_eq!(source.read_all().unwrap(), vec![9, 8, 7, 6]);
        assert!(matches!(storage.open("missing.epd_fb"), Err(FontError::FontNotFound(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
