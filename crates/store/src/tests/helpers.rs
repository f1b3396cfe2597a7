use record::{encode, RecordLayout, TimeWidth};
use std::cell::RefCell;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

use crate::PagedStore;

/// 4 + 8 + 12 = 24 bytes per slot.
pub fn small_layout() -> RecordLayout {
    RecordLayout::new(TimeWidth::Four, 8, 12).unwrap()
}

pub fn ts(index: u64) -> i64 {
    1_000_000 + index as i64
}

/// `live` records (`ttyN` / `hostN`, timestamp `ts(N)`) followed by
/// `holes` all-zero slots.
pub fn build_log(layout: &RecordLayout, live: u64, holes: u64) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..live {
        let slot = encode(layout, ts(i), &format!("tty{}", i), &format!("host{}", i)).unwrap();
        out.extend_from_slice(&slot);
    }
    out.resize(out.len() + holes as usize * layout.record_size(), 0);
    out
}

/// Every absolute seek and every read call a store makes.
#[derive(Debug, Default)]
pub struct IoLog {
    pub seeks: Vec<u64>,
    pub reads: usize,
}

/// `Read + Seek` wrapper that records the I/O going through it.
pub struct Recorder<R> {
    inner: R,
    log: Rc<RefCell<IoLog>>,
}

impl<R: Read + Seek> Read for Recorder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.log.borrow_mut().reads += 1;
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> Seek for Recorder<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let at = self.inner.seek(pos)?;
        self.log.borrow_mut().seeks.push(at);
        Ok(at)
    }
}

/// Store over an in-memory log plus a handle on its I/O record.
pub fn recorded_store(
    bytes: Vec<u8>,
    capacity: usize,
) -> (PagedStore<Recorder<Cursor<Vec<u8>>>>, Rc<RefCell<IoLog>>) {
    let log = Rc::new(RefCell::new(IoLog::default()));
    let rec = Recorder {
        inner: Cursor::new(bytes),
        log: Rc::clone(&log),
    };
    let store = PagedStore::from_reader(rec, small_layout(), capacity).unwrap();
    (store, log)
}

/// Source whose reads always fail.
pub struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }
}

impl Seek for BrokenReader {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}
