/// Bookkeeping for the in-memory page.
///
/// `start` is the logical index of slot 0, `valid` the number of whole
/// records the last reload produced and `cursor` the slot the next read
/// yields. `0 <= cursor <= valid <= capacity` holds between operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) start: u64,
    pub(crate) valid: usize,
    pub(crate) cursor: usize,
    pub(crate) capacity: usize,
}

impl Window {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            start: 0,
            valid: 0,
            cursor: 0,
            capacity,
        }
    }

    /// Logical index the next read would yield.
    pub(crate) fn next_index(&self) -> u64 {
        self.start + self.cursor as u64
    }

    /// Logical index just past the last loaded record.
    pub(crate) fn end(&self) -> u64 {
        self.start + self.valid as u64
    }

    pub(crate) fn contains(&self, index: u64) -> bool {
        index >= self.start && index < self.end()
    }

    /// `true` when nothing has been loaded since open.
    pub(crate) fn is_fresh(&self) -> bool {
        self.start == 0 && self.valid == 0
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.cursor == self.valid
    }

    /// Rounds `index` down to the first index of its page.
    pub(crate) fn page_start(&self, index: u64) -> u64 {
        let cap = self.capacity as u64;
        (index / cap) * cap
    }

    /// Installs the result of a reload that began at `start`.
    pub(crate) fn loaded(&mut self, start: u64, valid: usize) {
        debug_assert!(valid <= self.capacity);
        self.start = start;
        self.valid = valid;
        self.cursor = 0;
    }

    pub(crate) fn reset(&mut self) {
        self.loaded(0, 0);
    }
}
