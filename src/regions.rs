//! The set of free regions of a bin.
//!
//! Regions live in an arena of slots linked into a doubly-linked list by
//! index. Removed slots go on a stack and are reused by later inserts, so a
//! packer that is cleared and refilled many times during growth stops
//! allocating once it has seen its largest free set.

use crate::config::Heuristic;
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegionId(usize);

#[derive(Debug, Clone)]
struct Slot {
    rect: Rect,
    prev: Option<usize>,
    next: Option<usize>,
    live: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FreeRegions {
    slots: Vec<Slot>,
    vacant: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

pub(crate) struct Iter<'a> {
    regions: &'a FreeRegions,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (RegionId, Rect);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.regions.slots[index];
        self.cursor = slot.next;
        self.remaining -= 1;
        Some((RegionId(index), slot.rect))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl FreeRegions {
    pub fn new(bounds: Rect) -> FreeRegions {
        let mut regions = FreeRegions::default();
        regions.insert(bounds);
        return regions;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn get(&self, id: RegionId) -> Rect {
        debug_assert!(self.slots[id.0].live);
        self.slots[id.0].rect
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            regions: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Appends a region at the end of the list.
    pub fn insert(&mut self, rect: Rect) -> RegionId {
        let slot = Slot { rect, prev: self.tail, next: None, live: true };
        let index = match self.vacant.pop() {
            Some(index) => {
                self.slots[index] = slot;
                index
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.slots[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        RegionId(index)
    }

    /// Unlinks a region and hands its slot back for reuse.
    pub fn remove(&mut self, id: RegionId) -> Rect {
        let (prev, next, rect) = {
            let slot = &mut self.slots[id.0];
            debug_assert!(slot.live, "region removed twice");
            slot.live = false;
            (slot.prev.take(), slot.next.take(), slot.rect)
        };

        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }

        self.vacant.push(id.0);
        self.len -= 1;

        rect
    }

    /// Drops every region and starts over with `bounds` as the only one.
    pub fn reset(&mut self, bounds: Rect) {
        self.vacant.clear();
        self.vacant.extend((0..self.slots.len()).rev());
        for slot in self.slots.iter_mut() {
            slot.live = false;
            slot.prev = None;
            slot.next = None;
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.insert(bounds);
    }

    /// Picks the region that best holds a `width` x `height` rectangle.
    ///
    /// Only a strictly better score replaces the current pick, so ties go to
    /// the region met first in list order.
    pub fn find_best(&self, width: u32, height: u32, heuristic: Heuristic) -> Option<RegionId> {
        let mut best: Option<(RegionId, (u64, u64))> = None;

        for (id, region) in self.iter().filter(|(_, r)| r.fits(width, height)) {
            let score = score(&region, width, height, heuristic);
            match best {
                Some((_, best_score)) if best_score <= score => {}
                _ => best = Some((id, score)),
            }
        }

        best.map(|(id, _)| id)
    }
}

fn score(region: &Rect, width: u32, height: u32, heuristic: Heuristic) -> (u64, u64) {
    let leftover_width = (region.width - width) as u64;
    let leftover_height = (region.height - height) as u64;
    match heuristic {
        Heuristic::BottomLeft => (region.y as u64, region.x as u64),
        Heuristic::ShortSideFit => (leftover_width.min(leftover_height), 0),
        Heuristic::LongSideFit => (leftover_width.max(leftover_height), 0),
        Heuristic::AreaFit => (region.area(), region.width as u64),
    }
}
