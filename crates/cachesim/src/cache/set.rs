//! A single cache set with FIFO replacement.

/// One storage slot. The tag is meaningful only while `valid` is set.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheLine {
    pub tag: u32,
    pub valid: bool,
}

/// Where a missing tag was installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill {
    /// Slot the tag now occupies.
    pub way: usize,
    /// Tag that was overwritten, if the set was full.
    pub evicted: Option<u32>,
}

/// Fixed-capacity group of lines sharing one index.
///
/// Empty slots are filled lowest way first. Once every slot is occupied the
/// `oldest` cursor names the least recently inserted line; it moves forward
/// by one, wrapping, on each eviction and never while the set is filling.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
    oldest: usize,
}

impl CacheSet {
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
            oldest: 0,
        }
    }

    /// Returns the way holding `tag`, if any.
    pub fn lookup(&self, tag: u32) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Picks the slot a new tag would be written to, without modifying the set.
    pub fn victim(&self) -> usize {
        self.first_empty().unwrap_or(self.oldest)
    }

    /// Installs `tag`, evicting the oldest line when no slot is free.
    pub fn fill(&mut self, tag: u32) -> Fill {
        match self.first_empty() {
            Some(way) => {
                self.lines[way] = CacheLine { tag, valid: true };
                Fill { way, evicted: None }
            }
            None => {
                let way = self.oldest;
                let evicted = self.lines[way].tag;
                self.lines[way] = CacheLine { tag, valid: true };
                self.oldest = (self.oldest + 1) % self.lines.len();
                Fill {
                    way,
                    evicted: Some(evicted),
                }
            }
        }
    }

    /// Invalidates every line and rewinds the cursor.
    pub fn clear(&mut self) {
        self.lines.fill(CacheLine::default());
        self.oldest = 0;
    }

    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Position of the FIFO cursor.
    pub fn oldest(&self) -> usize {
        self.oldest
    }

    /// Number of valid lines.
    pub fn occupied(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Valid tags ordered from oldest to newest insertion.
    pub fn tags(&self) -> Vec<u32> {
        let ways = self.lines.len();
        (0..ways)
            .map(|i| self.lines[(self.oldest + i) % ways])
            .filter(|line| line.valid)
            .map(|line| line.tag)
            .collect()
    }

    fn first_empty(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.valid)
    }
}
