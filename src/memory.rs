use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{Result, VmError};

/// Fixed pool of frames stored in one contiguous buffer
pub struct PhysicalMemory {
    data: Box<[u8]>,
    page_size: usize,
}

impl PhysicalMemory {
    /// Create `num_frames` zeroed frames of `page_size` bytes each
    pub fn new(num_frames: usize, page_size: usize) -> Self {
        let data = vec![0u8; num_frames * page_size].into_boxed_slice();
        PhysicalMemory { data, page_size }
    }

    /// Read one byte of a frame
    #[inline]
    pub fn read(&self, frame: usize, offset: usize) -> u8 {
        self.data[self.frame_to_address(frame) + offset]
    }

    /// Calculate the starting address of a frame
    #[inline]
    pub fn frame_to_address(&self, frame: usize) -> usize {
        frame * self.page_size
    }

    pub fn frame(&self, frame: usize) -> &[u8] {
        let start = self.frame_to_address(frame);
        &self.data[start..start + self.page_size]
    }

    /// Mutable view of one frame, the target of a page load
    pub fn frame_mut(&mut self, frame: usize) -> &mut [u8] {
        let start = self.frame_to_address(frame);
        &mut self.data[start..start + self.page_size]
    }

    pub fn num_frames(&self) -> usize {
        self.data.len() / self.page_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Random-access source of page contents.
///
/// `read_page` fills `buf` with the page stored at byte offset
/// `page * buf.len()`. Anything short of a full page is an error.
pub trait BackingStore {
    fn read_page(&mut self, page: usize, buf: &mut [u8]) -> Result<()>;
}

/// Backing store read from a file of fixed-size page records
pub struct FileBackingStore {
    file: File,
    path: PathBuf,
}

impl FileBackingStore {
    /// Open the store. `expected_len` is the size of the full address
    /// space; a smaller file is still accepted because only the pages that
    /// are actually referenced must be present.
    pub fn open<P: AsRef<Path>>(path: P, expected_len: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let opened = File::open(&path).and_then(|file| file.metadata().map(|meta| (file, meta.len())));
        let (file, len) = match opened {
            Ok(opened) => opened,
            Err(source) => return Err(VmError::BackingStoreOpen { path, source }),
        };

        if len < expected_len as u64 {
            log::warn!(
                "backing store {} holds {} bytes, address space needs {}",
                path.display(),
                len,
                expected_len
            );
        }

        Ok(FileBackingStore { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackingStore for FileBackingStore {
    fn read_page(&mut self, page: usize, buf: &mut [u8]) -> Result<()> {
        let start = (page * buf.len()) as u64;
        self.file
            .seek(SeekFrom::Start(start))
            .and_then(|_| self.file.read_exact(buf))
            .map_err(|e| VmError::backing_store(page, e))
    }
}

/// In-memory backing store, filled by the caller
pub struct MemoryStore {
    data: Vec<u8>,
    page_size: usize,
    loads: usize,
}

impl MemoryStore {
    /// Create a zeroed store of `num_pages` pages
    pub fn new(num_pages: usize, page_size: usize) -> Self {
        MemoryStore {
            data: vec![0u8; num_pages * page_size],
            page_size,
            loads: 0,
        }
    }

    /// Wrap existing bytes; a trailing partial page is kept and reads of it fail
    pub fn from_bytes(data: Vec<u8>, page_size: usize) -> Self {
        MemoryStore { data, page_size, loads: 0 }
    }

    pub fn write(&mut self, page: usize, offset: usize, value: u8) {
        self.data[page * self.page_size + offset] = value;
    }

    pub fn page_mut(&mut self, page: usize) -> &mut [u8] {
        let start = page * self.page_size;
        &mut self.data[start..start + self.page_size]
    }

    /// Number of successful page loads served so far
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl BackingStore for MemoryStore {
    fn read_page(&mut self, page: usize, buf: &mut [u8]) -> Result<()> {
        let start = page * buf.len();
        let end = start + buf.len();
        if end > self.data.len() {
            let err = io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("store holds {} bytes, page ends at {}", self.data.len(), end),
            );
            return Err(VmError::backing_store(page, err));
        }

        buf.copy_from_slice(&self.data[start..end]);
        self.loads += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn patterned_store_file(pages: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let bytes: Vec<u8> = (0..pages * PAGE_SIZE).map(|i| (i / PAGE_SIZE) as u8 ^ (i % PAGE_SIZE) as u8).collect();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_pm_initialization() {
        let pm = PhysicalMemory::new(4, PAGE_SIZE);
        assert_eq!(pm.num_frames(), 4);
        assert_eq!(pm.page_size(), PAGE_SIZE);
        assert_eq!(pm.read(0, 0), 0);
        assert_eq!(pm.read(3, PAGE_SIZE - 1), 0);
    }

    #[test]
    fn test_pm_frame_views() {
        let mut pm = PhysicalMemory::new(3, PAGE_SIZE);
        pm.frame_mut(1)[10] = 42;

        assert_eq!(pm.read(1, 10), 42);
        assert_eq!(pm.frame(1)[10], 42);
        // Neighbouring frames untouched
        assert!(pm.frame(0).iter().all(|&b| b == 0));
        assert!(pm.frame(2).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_frame_to_address() {
        let pm = PhysicalMemory::new(8, PAGE_SIZE);
        assert_eq!(pm.frame_to_address(0), 0);
        assert_eq!(pm.frame_to_address(1), 256);
        assert_eq!(pm.frame_to_address(4), 1024);
    }

    // =========================================================================
    // Backing stores
    // =========================================================================

    #[test]
    fn test_memory_store_read_page() {
        let mut store = MemoryStore::new(NUM_PAGES, PAGE_SIZE);
        store.write(5, 10, 7);

        let mut buf = [0u8; PAGE_SIZE];
        store.read_page(5, &mut buf).unwrap();

        assert_eq!(buf[10], 7);
        assert_eq!(store.loads(), 1);
    }

    #[test]
    fn test_memory_store_short_read_is_error() {
        let mut store = MemoryStore::from_bytes(vec![1u8; PAGE_SIZE + 10], PAGE_SIZE);
        let mut buf = [0u8; PAGE_SIZE];

        assert!(store.read_page(0, &mut buf).is_ok());
        let err = store.read_page(1, &mut buf).unwrap_err();
        assert!(matches!(err, VmError::BackingStore { page: 1, .. }));
        assert_eq!(store.loads(), 1);
    }

    #[test]
    fn test_file_store_reads_at_page_offset() {
        let file = patterned_store_file(NUM_PAGES);
        let mut store = FileBackingStore::open(file.path(), ADDRESS_SPACE).unwrap();

        let mut buf = [0u8; PAGE_SIZE];
        store.read_page(7, &mut buf).unwrap();
        assert_eq!(buf[0], 7);
        assert_eq!(buf[3], 7 ^ 3);

        store.read_page(0, &mut buf).unwrap();
        assert_eq!(buf[200], 200);
    }

    #[test]
    fn test_file_store_truncated() {
        let file = patterned_store_file(2);
        let mut store = FileBackingStore::open(file.path(), ADDRESS_SPACE).unwrap();

        let mut buf = [0u8; PAGE_SIZE];
        assert!(store.read_page(1, &mut buf).is_ok());

        match store.read_page(2, &mut buf) {
            Err(VmError::BackingStore { page, source }) => {
                assert_eq!(page, 2);
                assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
            }
            other => panic!("expected backing store error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        match FileBackingStore::open(&path, ADDRESS_SPACE) {
            Err(VmError::BackingStoreOpen { path: reported, source }) => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected open error, got {:?}", other.err()),
        }
    }
}
