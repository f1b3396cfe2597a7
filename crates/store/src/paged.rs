use record::{decode, LogRecord, RecordLayout};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::window::Window;
use crate::StoreError;

/// Default page size in records.
pub const DEFAULT_PAGE_RECORDS: usize = 512;

/// Counters describing how much I/O a store has done.
///
/// `repositions` counts absolute seeks issued against the source, `reloads`
/// counts bounded page reads. Both only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub reloads: u64,
    pub repositions: u64,
}

/// Read-only, paged access to a lastlog-style file.
///
/// The store keeps exactly one page of `capacity` consecutive slots in
/// memory. [`seek`](PagedStore::seek) moves the logical cursor, loading the
/// page that contains the target if it is not already resident, and
/// [`read_next`](PagedStore::read_next) decodes the slot under the cursor
/// and advances it. Walking identifiers in ascending order therefore costs
/// one disk read per page, while a random jump costs one reposition plus one
/// read.
///
/// The store is generic over any `Read + Seek` source so that tests can drive
/// it from an in-memory buffer; [`PagedStore::open`] is the `File` entry
/// point.
///
/// All operations take `&mut self`: one handle serves one caller at a time.
pub struct PagedStore<R> {
    /// `None` once closed.
    source: Option<R>,
    layout: RecordLayout,
    record_size: usize,
    buf: Vec<u8>,
    window: Window,
    /// Set when a read found no more data (or a seek failed); cleared by the
    /// next successful repositioning seek.
    at_end: bool,
    stats: StoreStats,
}

impl PagedStore<File> {
    /// Opens `path` read-only.
    ///
    /// Nothing is read until the first [`seek`](PagedStore::seek) or
    /// [`read_next`](PagedStore::read_next).
    ///
    /// # Errors
    ///
    /// [`StoreError::Open`] carrying the path and the OS error if the file
    /// cannot be opened, or [`StoreError::Capacity`] for an unusable page
    /// size.
    pub fn open<P: AsRef<Path>>(
        path: P,
        layout: RecordLayout,
        capacity: usize,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), capacity, record_size = layout.record_size(), "opened log");
        Self::from_reader(file, layout, capacity)
    }
}

impl<R: Read + Seek> PagedStore<R> {
    /// Wraps an already-open source positioned at its start.
    ///
    /// # Errors
    ///
    /// [`StoreError::Capacity`] if `capacity` is zero or one page would not
    /// fit in memory.
    pub fn from_reader(reader: R, layout: RecordLayout, capacity: usize) -> Result<Self, StoreError> {
        let record_size = layout.record_size();
        let page_bytes = match capacity.checked_mul(record_size) {
            Some(n) if capacity > 0 && n <= isize::MAX as usize => n,
            _ => return Err(StoreError::Capacity(capacity)),
        };

        Ok(Self {
            source: Some(reader),
            layout,
            record_size,
            buf: vec![0u8; page_bytes],
            window: Window::new(capacity),
            at_end: false,
            stats: StoreStats::default(),
        })
    }

    /// Positions the store so the next [`read_next`](Self::read_next) yields
    /// record `index`.
    ///
    /// - If `index` is the record the store would yield anyway, this does
    ///   nothing (no I/O). After end of data the page is always consulted, so
    ///   a missing index fails the same way whatever came before.
    /// - If `index` lies in the resident page, only the cursor moves.
    /// - Otherwise the page containing `index` is loaded: the source is
    ///   repositioned to `page_start * record_size` with `page_start` rounded
    ///   down to a multiple of the capacity.
    ///
    /// `index` may name the slot just past the data of a short final page;
    /// the following read then reports end of data.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotOpen`] after [`close`](Self::close).
    /// - [`StoreError::NotFound`] if the page holds no records (at or past end
    ///   of file, or the reposition failed), or if `index` lies beyond the
    ///   end of a short final page. The caller should treat this as "no
    ///   entry" for `index` and carry on.
    pub fn seek(&mut self, index: u64) -> Result<(), StoreError> {
        if self.source.is_none() {
            return Err(StoreError::NotOpen);
        }

        if !self.at_end && self.window.next_index() == index {
            trace!(index, "seek: already positioned");
            return Ok(());
        }

        if !self.window.contains(index) {
            let page_start = self.window.page_start(index);
            let loaded = match page_start.checked_mul(self.record_size as u64) {
                Some(offset) => self.reposition(offset) && self.reload(page_start) > 0,
                None => false,
            };

            if !loaded {
                debug!(index, page_start, "seek: no records in page");
                self.window.loaded(page_start, 0);
                self.at_end = true;
                return Err(StoreError::NotFound { index });
            }
            self.at_end = false;
        }

        let rel = index - self.window.start;
        if rel > self.window.valid as u64 {
            self.window.cursor = self.window.valid;
            return Err(StoreError::NotFound { index });
        }
        self.window.cursor = rel as usize;
        Ok(())
    }

    /// Returns the record under the cursor and advances past it.
    ///
    /// The first call after open loads page 0; a call that finds the page
    /// used up loads the next contiguous page. `None` means end of data (or a
    /// closed store). Once end of data has been seen, further calls return
    /// `None` without touching the source until a seek repositions it.
    pub fn read_next(&mut self) -> Option<LogRecord> {
        if self.source.is_none() || self.at_end {
            return None;
        }

        if self.window.is_fresh() && self.reload(0) == 0 {
            self.at_end = true;
            return None;
        }

        if self.window.is_exhausted() {
            let next = self.window.end();
            if self.reload(next) == 0 {
                self.at_end = true;
                return None;
            }
        }

        let at = self.window.cursor * self.record_size;
        let slot = &self.buf[at..at + self.record_size];
        let index = self.window.next_index();
        self.window.cursor += 1;

        match decode(&self.layout, slot) {
            Ok(rec) => Some(rec),
            Err(e) => {
                warn!(index, error = %e, "undecodable slot");
                None
            }
        }
    }

    /// Releases the source. Closing a closed store is a no-op.
    ///
    /// After this call [`seek`](Self::seek) fails with
    /// [`StoreError::NotOpen`] and [`read_next`](Self::read_next) returns
    /// `None`.
    ///
    /// # Errors
    ///
    /// None today: `std` sources release their descriptor on drop without
    /// reporting failure. The `Result` keeps room for sources that can fail
    /// to close.
    pub fn close(&mut self) -> Result<(), StoreError> {
        if self.source.take().is_some() {
            debug!(reloads = self.stats.reloads, repositions = self.stats.repositions, "closed log");
        }
        self.window.reset();
        self.at_end = false;
        Ok(())
    }

    /// `true` until [`close`](Self::close) is called.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Logical index of the first resident record.
    #[must_use]
    pub fn window_start(&self) -> u64 {
        self.window.start
    }

    /// Number of whole records currently resident.
    #[must_use]
    pub fn valid_records(&self) -> usize {
        self.window.valid
    }

    /// Position within the page of the next record to yield.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.window.cursor
    }

    /// Page size in records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.window.capacity
    }

    #[must_use]
    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    #[must_use]
    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Absolute seek of the source. A failure is logged and reported as
    /// `false`.
    fn reposition(&mut self, offset: u64) -> bool {
        let Some(src) = self.source.as_mut() else {
            return false;
        };
        self.stats.repositions += 1;
        match src.seek(SeekFrom::Start(offset)) {
            Ok(_) => true,
            Err(e) => {
                warn!(offset, error = %e, "reposition failed");
                false
            }
        }
    }

    /// Reads up to one page from the current source position into the
    /// buffer and installs it as the window starting at `start`.
    ///
    /// Returns the number of whole records read. A trailing partial record
    /// is dropped; a read error counts as zero records.
    fn reload(&mut self, start: u64) -> usize {
        let Some(src) = self.source.as_mut() else {
            return 0;
        };
        self.stats.reloads += 1;

        let bytes = match fill(src, &mut self.buf) {
            Ok(n) => n,
            Err(e) => {
                warn!(start, error = %e, "read failed, treating as end of data");
                0
            }
        };

        let valid = bytes / self.record_size;
        if bytes % self.record_size != 0 {
            debug!(start, trailing = bytes % self.record_size, "dropping partial record");
        }
        self.window.loaded(start, valid);
        debug!(start, valid, "reloaded page");
        valid
    }
}

impl<R> std::fmt::Debug for PagedStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedStore")
            .field("open", &self.source.is_some())
            .field("record_size", &self.record_size)
            .field("window", &self.window)
            .field("at_end", &self.at_end)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Reads until `buf` is full or the source reports end of file.
fn fill<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
