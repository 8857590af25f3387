use crate::config::{PackerConfig, SortOrder, Heuristic};
use crate::error::PackError;
use crate::geometry::Rect;
use crate::rect::{Placement, Rectangle};
use crate::regions::FreeRegions;

/// Maximal-rectangles packer for a single bin.
///
/// The free space of the bin is kept as a set of possibly overlapping
/// regions whose union is exactly the unoccupied area. Each placement picks a
/// region with the configured [`Heuristic`], then cuts every region the new
/// rectangle overlaps into the strips it leaves uncovered.
#[derive(Debug, Clone)]
pub struct Packer<P = ()> {
    config: PackerConfig,
    width: u32,
    height: u32,
    regions: FreeRegions,
    pending: Vec<Rect>,
    rectangles: Vec<Rectangle<P>>,
    unplaced: Vec<Rectangle<P>>,
}

impl<P> Packer<P> {
    pub fn new(config: PackerConfig) -> Result<Packer<P>, PackError> {
        let [width, height] = config.size;
        let [max_width, max_height] = config.max_size;
        if width == 0 || height == 0 {
            return Err(PackError::InvalidSize { what: "packer", width, height });
        }
        if max_width < width || max_height < height {
            return Err(PackError::InvalidSize { what: "maximum", width: max_width, height: max_height });
        }

        let bounds = Rect::new(0, 0, width, height);
        Ok(Packer {
            config,
            width,
            height,
            regions: FreeRegions::new(bounds),
            pending: Vec::new(),
            rectangles: Vec::new(),
            unplaced: Vec::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn max_size(&self) -> [u32; 2] {
        self.config.max_size
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.config.heuristic
    }

    #[inline]
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Rectangles placed so far, in placement order.
    #[inline]
    pub fn rectangles(&self) -> &[Rectangle<P>] {
        &self.rectangles
    }

    /// Rectangles that could not be placed since the last [`clear`](Self::clear).
    #[inline]
    pub fn unplaced(&self) -> &[Rectangle<P>] {
        &self.unplaced
    }

    pub fn take_unplaced(&mut self) -> Vec<Rectangle<P>> {
        std::mem::take(&mut self.unplaced)
    }

    pub fn into_rectangles(self) -> Vec<Rectangle<P>> {
        self.rectangles
    }

    pub fn find(&self, id: &str) -> Option<&Rectangle<P>> {
        self.rectangles.iter().find(|r| r.id() == id)
    }

    /// Share of the bin covered by placed rectangles, padding excluded.
    pub fn occupancy(&self) -> f64 {
        let used: u64 = self.rectangles.iter().map(Rectangle::area).sum();
        used as f64 / self.bounds().area() as f64
    }

    /// Forgets every rectangle and frees the whole bin at its current size.
    pub fn clear(&mut self) {
        self.unplaced.clear();
        self.reset_bin();
    }

    /// Places a rectangle at the position it already carries.
    ///
    /// Used to re-insert rectangles from an earlier packing without searching
    /// for space again.
    pub fn place_fixed(&mut self, rect: Rectangle<P>) -> Result<(), PackError> {
        match rect.placement() {
            Some(placement) => {
                log::trace!("Fixed '{}' at {:?}", rect.id(), placement.bounds());
                self.split(&placement.bounds());
                self.rectangles.push(rect);
                Ok(())
            }
            None => {
                let id = rect.id().to_owned();
                self.unplaced.push(rect);
                Err(PackError::Unpositioned { id })
            }
        }
    }

    /// Finds space for one rectangle, inflated by `padding` on every side.
    ///
    /// On failure the rectangle is moved to [`unplaced`](Self::unplaced) and
    /// the free space is left exactly as it was.
    pub fn place(&mut self, mut rect: Rectangle<P>, padding: u32) -> Result<(), PackError> {
        let [width, height] = match rect.padded_size(padding) {
            Ok(size) => size,
            Err(err) => {
                self.unplaced.push(rect);
                return Err(err);
            }
        };

        if self.allocate(&mut rect, [width, height], padding) {
            self.rectangles.push(rect);
            return Ok(());
        }

        let id = rect.id().to_owned();
        self.unplaced.push(rect);
        Err(PackError::NoSpace { id, width, height })
    }

    /// Places every rectangle in `rects` after sorting them by `sort`.
    ///
    /// Every rectangle is attempted even after one fails. With auto-growth
    /// enabled a failure enlarges the bin and re-packs the placed rectangles
    /// together with this batch's failures until they all fit or the maximum
    /// size is reached. Rectangles left over from earlier calls stay in
    /// [`unplaced`](Self::unplaced) and are not retried.
    ///
    /// If `padding` overflows the size of any rectangle that would be packed,
    /// nothing is placed and the whole batch is moved to `unplaced`.
    pub fn place_batch(&mut self, rects: Vec<Rectangle<P>>, padding: u32, sort: SortOrder) -> Result<(), PackError> {
        let mut rects = rects;
        // growth re-pads the rectangles already in the bin as well
        let repadded: &[Rectangle<P>] = if self.config.auto_grow { &self.rectangles } else { &[] };
        let invalid = rects.iter().chain(repadded).find_map(|r| r.padded_size(padding).err());
        if let Some(err) = invalid {
            self.unplaced.extend(rects);
            return Err(err);
        }
        sort_rectangles(&mut rects, sort);

        log::debug!(
            "Packing {} rectangles into ({}, {})",
            rects.len(),
            self.width,
            self.height
        );

        let mut failed = Vec::new();
        for mut rect in rects {
            if self.allocate_padded(&mut rect, padding) {
                self.rectangles.push(rect);
            } else {
                failed.push(rect);
            }
        }

        if failed.is_empty() {
            return Ok(());
        }

        let unplaced = if self.config.auto_grow {
            self.grow_and_repack(failed, padding)
        } else {
            let count = failed.len();
            self.unplaced.extend(failed);
            count
        };

        if unplaced == 0 {
            Ok(())
        } else {
            Err(PackError::CapacityExceeded {
                unplaced,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn reset_bin(&mut self) {
        self.rectangles.clear();
        self.pending.clear();
        self.regions.reset(self.bounds());
    }

    /// An overflowing padded size never fits.
    fn allocate_padded(&mut self, rect: &mut Rectangle<P>, padding: u32) -> bool {
        match rect.padded_size(padding) {
            Ok(size) => self.allocate(rect, size, padding),
            Err(_) => {
                rect.set_placement(None);
                false
            }
        }
    }

    fn allocate(&mut self, rect: &mut Rectangle<P>, [width, height]: [u32; 2], padding: u32) -> bool {
        let region = match self.regions.find_best(width, height, self.config.heuristic) {
            Some(id) => self.regions.get(id),
            None => {
                log::trace!("No space for '{}' ({}, {})", rect.id(), width, height);
                rect.set_placement(None);
                return false;
            }
        };

        let bounds = Rect::new(region.x, region.y, width, height);
        let placement = match Placement::new(bounds, padding) {
            Some(placement) => placement,
            None => {
                rect.set_placement(None);
                return false;
            }
        };
        self.split(&bounds);
        rect.set_placement(Some(placement));

        log::trace!("Placed '{}' at {:?}", rect.id(), bounds);
        true
    }

    /// Removes every free region `occupied` overlaps and replaces it with the
    /// strips around `occupied`. New strips are collected first and merged in
    /// one go once every overlapping region is gone.
    fn split(&mut self, occupied: &Rect) {
        let overlapping: Vec<_> = self
            .regions
            .iter()
            .filter(|(_, region)| region.intersects(occupied))
            .collect();

        for (id, region) in overlapping.iter() {
            for fragment in region.divide(occupied) {
                push_fragment(&mut self.pending, fragment);
            }
            self.regions.remove(*id);
        }

        let before = self.regions.len();
        for fragment in self.pending.drain(..) {
            if self.regions.iter().any(|(_, region)| region.contains(&fragment)) {
                continue;
            }
            self.regions.insert(fragment);
        }

        log::trace!(
            "Split {} regions, merged {} fragments, {} free regions",
            overlapping.len(),
            self.regions.len() - before,
            self.regions.len()
        );
    }

    fn can_grow(&self) -> bool {
        let [max_width, max_height] = self.config.max_size;
        self.width < max_width || self.height < max_height
    }

    /// Grows the smaller dimension, or height once width is at its maximum.
    fn grow(&mut self, retrying: bool) {
        let [max_width, max_height] = self.config.max_size;
        if (self.width <= self.height || self.height == max_height) && self.width < max_width {
            self.width = self.config.growth.grow(self.width, retrying).min(max_width);
        } else {
            self.height = self.config.growth.grow(self.height, retrying).min(max_height);
        }
    }

    /// Returns how many rectangles of the working set are still unplaced.
    fn grow_and_repack(&mut self, failed: Vec<Rectangle<P>>, padding: u32) -> usize {
        let mut working = std::mem::take(&mut self.rectangles);
        working.extend(failed);
        sort_rectangles(&mut working, self.config.grow_sort);

        let required = working
            .iter()
            .map(|r| r.padded_area(padding))
            .fold(0u64, u64::saturating_add);
        loop {
            self.grow(false);
            if self.bounds().area() >= required || !self.can_grow() {
                break;
            }
        }

        log::debug!(
            "Growing to ({}, {}) for {} rectangles covering {}",
            self.width,
            self.height,
            working.len(),
            required
        );

        let mut success = self.repack(&mut working, padding);
        while !success && self.can_grow() {
            self.grow(true);
            log::debug!("Retrying at ({}, {})", self.width, self.height);
            success = self.repack(&mut working, padding);
        }

        let mut left_over = 0;
        for rect in working {
            if rect.placement().is_some() {
                self.rectangles.push(rect);
            } else {
                left_over += 1;
                self.unplaced.push(rect);
            }
        }

        if success {
            log::debug!("Packed everything into ({}, {})", self.width, self.height);
        } else {
            log::debug!(
                "Gave up at ({}, {}) with {} rectangles left over",
                self.width,
                self.height,
                left_over
            );
        }
        left_over
    }

    fn repack(&mut self, working: &mut [Rectangle<P>], padding: u32) -> bool {
        self.reset_bin();
        let mut success = true;
        for rect in working.iter_mut() {
            success &= self.allocate_padded(rect, padding);
        }
        success
    }
}

/// Adds a fragment to the pending buffer unless a pending fragment already
/// covers it. Pending fragments the new one covers are dropped.
fn push_fragment(pending: &mut Vec<Rect>, fragment: Rect) {
    let mut i = 0;
    while i < pending.len() {
        if pending[i].contains(&fragment) {
            return;
        } else if fragment.contains(&pending[i]) {
            pending.remove(i);
        } else {
            i += 1;
        }
    }
    pending.push(fragment);
}

fn sort_rectangles<P>(rects: &mut [Rectangle<P>], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::HeightAscending => rects.sort_by(|a, b| a.height().cmp(&b.height())),
        SortOrder::HeightDescending => rects.sort_by(|a, b| b.height().cmp(&a.height())),
        SortOrder::AreaAscending => rects.sort_by(|a, b| a.area().cmp(&b.area())),
        SortOrder::AreaDescending => rects.sort_by(|a, b| b.area().cmp(&a.area())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Growth;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn rect(id: &str, width: u32, height: u32) -> Rectangle {
        Rectangle::new(id, width, height, ()).unwrap()
    }

    fn free_rects<P>(packer: &Packer<P>) -> Vec<Rect> {
        packer.regions.iter().map(|(_, r)| r).collect()
    }

    fn assert_no_overlap<P>(packer: &Packer<P>) {
        let placed: Vec<Rect> = packer
            .rectangles()
            .iter()
            .map(|r| r.placement().unwrap().bounds())
            .collect();
        for (i, a) in placed.iter().enumerate() {
            assert!(packer.bounds().contains(a), "{:?} outside bin", a);
            for b in placed[i + 1..].iter() {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    fn assert_no_subset<P>(packer: &Packer<P>) {
        let free = free_rects(packer);
        for (i, a) in free.iter().enumerate() {
            for (j, b) in free.iter().enumerate() {
                if i != j {
                    assert!(!a.contains(b), "{:?} contains {:?}", a, b);
                }
            }
        }
    }

    // Every cell of the bin is either covered by exactly one placed rectangle
    // or by at least one free region, never both.
    fn assert_coverage<P>(packer: &Packer<P>) {
        let free = free_rects(packer);
        let placed: Vec<Rect> = packer
            .rectangles()
            .iter()
            .map(|r| r.placement().unwrap().bounds())
            .collect();
        for y in 0..packer.height() {
            for x in 0..packer.width() {
                let cell = Rect::new(x, y, 1, 1);
                let in_placed = placed.iter().filter(|r| r.contains(&cell)).count();
                let in_free = free.iter().any(|r| r.contains(&cell));
                assert!(in_placed <= 1, "cell ({}, {}) placed twice", x, y);
                assert!((in_placed == 1) != in_free, "cell ({}, {}) placed: {} free: {}", x, y, in_placed, in_free);
            }
        }
    }

    #[test]
    fn rejects_invalid_sizes() {
        let err = Packer::<()>::new(PackerConfig::new([0, 10], [100, 100])).unwrap_err();
        assert_eq!(err, PackError::InvalidSize { what: "packer", width: 0, height: 10 });
        assert!(Packer::<()>::new(PackerConfig::new([200, 10], [100, 100])).is_err());
        assert!(Packer::<()>::new(PackerConfig::new([100, 100], [100, 100])).is_ok());
    }

    #[test]
    fn grows_from_one_pixel_until_everything_fits() {
        let config = PackerConfig::new([1, 1], [2048, 2048]).with_auto_grow(true);
        let mut packer = Packer::new(config).unwrap();
        let rects = vec![rect("a", 100, 50), rect("b", 50, 100), rect("c", 100, 100)];

        packer.place_batch(rects, 0, SortOrder::HeightDescending).unwrap();

        assert_eq!(packer.rectangles().len(), 3);
        assert!(packer.unplaced().is_empty());
        assert!(packer.width() as u64 * packer.height() as u64 >= 150 * 150);
        assert!(packer.width() <= 2048 && packer.height() <= 2048);
        assert_no_overlap(&packer);
    }

    #[test]
    fn oversized_rectangle_leaves_free_set_untouched() {
        let mut packer = Packer::new(PackerConfig::new([100, 100], [100, 100])).unwrap();

        let err = packer.place(rect("wide", 101, 50), 0).unwrap_err();

        assert_eq!(err, PackError::NoSpace { id: "wide".to_owned(), width: 101, height: 50 });
        assert_eq!(free_rects(&packer), vec![Rect::new(0, 0, 100, 100)]);
        assert!(packer.rectangles().is_empty());
        assert_eq!(packer.unplaced().len(), 1);
        assert_eq!(packer.unplaced()[0].id(), "wide");
    }

    #[test]
    fn batch_without_growth_keeps_partial_result() {
        let mut packer = Packer::new(PackerConfig::new([100, 100], [100, 100])).unwrap();
        let rects = vec![rect("a", 60, 60), rect("b", 60, 60), rect("c", 40, 40)];

        let err = packer.place_batch(rects, 0, SortOrder::None).unwrap_err();

        assert_eq!(err, PackError::CapacityExceeded { unplaced: 1, width: 100, height: 100 });
        let placed: Vec<&str> = packer.rectangles().iter().map(|r| r.id()).collect();
        assert_eq!(placed, vec!["a", "c"]);
        assert_eq!(packer.unplaced()[0].id(), "b");
        assert_eq!(packer.unplaced()[0].placement(), None);
    }

    #[test]
    fn two_halves_fill_the_bin() {
        let config = PackerConfig::new([100, 50], [100, 50]).with_heuristic(Heuristic::ShortSideFit);
        let mut packer = Packer::new(config).unwrap();

        packer.place(rect("left", 50, 50), 0).unwrap();
        packer.place(rect("right", 50, 50), 0).unwrap();

        assert_eq!(packer.find("left").unwrap().rect(), Some(Rect::new(0, 0, 50, 50)));
        assert_eq!(packer.find("right").unwrap().rect(), Some(Rect::new(50, 0, 50, 50)));
        assert!(free_rects(&packer).is_empty());
        assert_eq!(packer.occupancy(), 1.0);
        assert_no_overlap(&packer);
    }

    #[test]
    fn descending_sort_packs_tallest_first() {
        let mut packer = Packer::new(PackerConfig::new([100, 100], [100, 100])).unwrap();
        let rects = vec![rect("short", 10, 10), rect("tall", 10, 30), rect("mid", 10, 20)];

        packer.place_batch(rects, 0, SortOrder::HeightDescending).unwrap();

        let heights: Vec<u32> = packer.rectangles().iter().map(|r| r.height()).collect();
        assert_eq!(heights, vec![30, 20, 10]);
        assert_eq!(packer.find("tall").unwrap().size(), [10, 30]);
        assert_eq!(packer.find("mid").unwrap().size(), [10, 20]);
        assert_eq!(packer.find("short").unwrap().size(), [10, 10]);
    }

    #[test]
    fn sorting_is_stable() {
        let mut rects = vec![rect("a", 5, 10), rect("b", 1, 20), rect("c", 7, 10), rect("d", 2, 20)];
        sort_rectangles(&mut rects, SortOrder::HeightDescending);
        let ids: Vec<&str> = rects.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);

        sort_rectangles(&mut rects, SortOrder::HeightAscending);
        let ids: Vec<&str> = rects.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "c", "b", "d"]);

        sort_rectangles(&mut rects, SortOrder::AreaDescending);
        let ids: Vec<&str> = rects.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn padding_reserves_space_and_is_stripped() {
        let mut packer = Packer::new(PackerConfig::new([64, 64], [64, 64])).unwrap();

        packer.place(rect("a", 10, 10), 2).unwrap();
        packer.place(rect("b", 10, 10), 2).unwrap();

        let a = packer.find("a").unwrap();
        assert_eq!(a.placement().unwrap().bounds(), Rect::new(0, 0, 14, 14));
        assert_eq!(a.rect(), Some(Rect::new(2, 2, 10, 10)));
        assert_eq!(a.size(), [10, 10]);

        let b = packer.find("b").unwrap();
        assert_eq!(b.placement().unwrap().bounds(), Rect::new(14, 0, 14, 14));
        assert_eq!(b.rect(), Some(Rect::new(16, 2, 10, 10)));
        assert_no_overlap(&packer);
    }

    #[test]
    fn repadding_a_placed_rectangle_uses_logical_size() {
        let mut first = Packer::new(PackerConfig::new([64, 64], [64, 64])).unwrap();
        first.place(rect("a", 10, 10), 4).unwrap();
        let placed = first.into_rectangles().pop().unwrap();

        let mut second = Packer::new(PackerConfig::new([64, 64], [64, 64])).unwrap();
        second.place(placed, 1).unwrap();
        let a = second.find("a").unwrap();
        assert_eq!(a.placement().unwrap().bounds(), Rect::new(0, 0, 12, 12));
        assert_eq!(a.rect(), Some(Rect::new(1, 1, 10, 10)));
    }

    #[test]
    fn fixed_placement_splits_around_position() {
        let mut packer = Packer::new(PackerConfig::new([100, 100], [100, 100])).unwrap();

        packer.place_fixed(rect("fixed", 20, 20).with_position(40, 40)).unwrap();

        assert_eq!(free_rects(&packer), vec![
            Rect::new(0, 0, 40, 100),
            Rect::new(60, 0, 40, 100),
            Rect::new(0, 0, 100, 40),
            Rect::new(0, 60, 100, 40),
        ]);
        assert_eq!(packer.find("fixed").unwrap().position(), Some([40, 40]));
        assert_coverage(&packer);

        let err = packer.place_fixed(rect("loose", 5, 5)).unwrap_err();
        assert_eq!(err, PackError::Unpositioned { id: "loose".to_owned() });
        assert_eq!(packer.rectangles().len(), 1);
    }

    #[test]
    fn clear_resets_to_single_region() {
        let mut packer = Packer::new(PackerConfig::new([32, 16], [32, 16])).unwrap();
        packer.place(rect("a", 8, 8), 0).unwrap();
        packer.place(rect("b", 64, 8), 0).unwrap_err();

        packer.clear();

        assert!(packer.rectangles().is_empty());
        assert!(packer.unplaced().is_empty());
        assert_eq!(packer.width(), 32);
        assert_eq!(packer.height(), 16);
        assert_eq!(free_rects(&packer), vec![Rect::new(0, 0, 32, 16)]);
    }

    #[test]
    fn growth_stops_at_maximum() {
        let config = PackerConfig::new([4, 4], [64, 32]).with_auto_grow(true);
        let mut packer = Packer::new(config).unwrap();
        let rects = (0..4).map(|i| rect(&format!("r{}", i), 30, 30)).collect();

        let err = packer.place_batch(rects, 0, SortOrder::None).unwrap_err();

        assert_eq!(err, PackError::CapacityExceeded { unplaced: 2, width: 64, height: 32 });
        assert_eq!(packer.rectangles().len(), 2);
        assert_no_overlap(&packer);
    }

    #[test]
    fn step_growth_lands_between_powers_of_two() {
        let config = PackerConfig::new([10, 10], [1000, 1000])
            .with_auto_grow(true)
            .with_growth(Growth::step());
        let mut packer = Packer::new(config).unwrap();

        packer.place_batch(vec![rect("a", 30, 20)], 0, SortOrder::None).unwrap();

        assert!(packer.width() >= 30 && packer.height() >= 20);
        assert!(packer.width() < 64 && packer.height() < 64);
        assert_eq!(packer.find("a").unwrap().position(), Some([0, 0]));
    }

    #[test]
    fn growth_repacks_rectangles_already_placed() {
        let config = PackerConfig::new([16, 16], [256, 256]).with_auto_grow(true);
        let mut packer = Packer::new(config).unwrap();

        packer.place_batch(vec![rect("small", 8, 8)], 0, SortOrder::None).unwrap();
        assert_eq!((packer.width(), packer.height()), (16, 16));

        packer.place_batch(vec![rect("big", 40, 40)], 0, SortOrder::None).unwrap();

        assert!(packer.find("small").is_some());
        assert!(packer.find("big").is_some());
        assert!(packer.width() >= 40 && packer.height() >= 40);
        assert_no_overlap(&packer);
        assert_coverage(&packer);
    }

    #[test]
    fn earlier_rejects_are_not_pulled_into_growth() {
        let config = PackerConfig::new([16, 16], [256, 256]).with_auto_grow(true);
        let mut packer = Packer::new(config).unwrap();

        packer.place(rect("rejected", 200, 200), 0).unwrap_err();
        packer.place_batch(vec![rect("b", 40, 40)], 0, SortOrder::None).unwrap();

        assert_eq!((packer.width(), packer.height()), (64, 64));
        assert!(packer.find("rejected").is_none());
        assert_eq!(packer.find("b").unwrap().position(), Some([0, 0]));
        assert_eq!(packer.unplaced().len(), 1);
        assert_eq!(packer.unplaced()[0].id(), "rejected");

        let leftovers = packer.take_unplaced();
        assert_eq!(leftovers[0].id(), "rejected");
        assert!(packer.unplaced().is_empty());
    }

    #[test]
    fn batch_failure_count_ignores_earlier_rejects() {
        let mut packer = Packer::new(PackerConfig::new([10, 10], [10, 10])).unwrap();

        packer.place(rect("first", 20, 20), 0).unwrap_err();
        let err = packer.place_batch(vec![rect("second", 30, 30)], 0, SortOrder::None).unwrap_err();

        assert_eq!(err, PackError::CapacityExceeded { unplaced: 1, width: 10, height: 10 });
        let ids: Vec<&str> = packer.unplaced().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn overflowing_padding_is_rejected() {
        let mut packer = Packer::new(PackerConfig::new([u32::MAX, u32::MAX], [u32::MAX, u32::MAX])).unwrap();

        let err = packer.place(rect("a", 1, 1), 1 << 31).unwrap_err();

        assert_eq!(err, PackError::InvalidPadding { id: "a".to_owned(), padding: 1 << 31 });
        assert!(packer.find("a").is_none());
        assert_eq!(packer.unplaced()[0].placement(), None);
        assert_eq!(free_rects(&packer), vec![Rect::new(0, 0, u32::MAX, u32::MAX)]);

        // the largest padding that still fits is placed normally
        packer.place(rect("b", 1, 1), (1 << 31) - 1).unwrap();
        let b = packer.find("b").unwrap();
        assert_eq!(b.placement().unwrap().bounds(), Rect::new(0, 0, u32::MAX, u32::MAX));
        assert_eq!(b.rect(), Some(Rect::new((1 << 31) - 1, (1 << 31) - 1, 1, 1)));
    }

    #[test]
    fn overflowing_padding_rejects_whole_batch() {
        let config = PackerConfig::new([16, 16], [u32::MAX, u32::MAX]).with_auto_grow(true);
        let mut packer = Packer::new(config).unwrap();
        packer.place_batch(vec![rect("wide", u32::MAX - 1, 1)], 0, SortOrder::None).unwrap();
        let placed = packer.find("wide").unwrap().placement();
        let free = free_rects(&packer);

        // "small" alone would fit, but growth would re-pad "wide" past u32::MAX
        let err = packer.place_batch(vec![rect("small", 1, 1)], 1, SortOrder::None).unwrap_err();

        assert_eq!(err, PackError::InvalidPadding { id: "wide".to_owned(), padding: 1 });
        assert_eq!(packer.find("wide").unwrap().placement(), placed);
        assert!(packer.find("small").is_none());
        assert_eq!(packer.unplaced()[0].id(), "small");
        assert_eq!(free_rects(&packer), free);

        let err = packer.place_batch(vec![rect("huge", 1, 1)], 1 << 31, SortOrder::None).unwrap_err();
        assert_eq!(err, PackError::InvalidPadding { id: "huge".to_owned(), padding: 1 << 31 });
        assert_eq!(packer.rectangles().len(), 1);
        assert_eq!(packer.unplaced().len(), 2);
    }

    #[test]
    fn free_space_stays_consistent_under_random_packing() {
        let heuristics = [
            Heuristic::BottomLeft,
            Heuristic::ShortSideFit,
            Heuristic::LongSideFit,
            Heuristic::AreaFit,
        ];
        for (seed, heuristic) in heuristics.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(seed as u64);
            let config = PackerConfig::new([48, 48], [48, 48]).with_heuristic(*heuristic);
            let mut packer = Packer::new(config).unwrap();
            for i in 0..40 {
                let width = rng.gen_range(1..12);
                let height = rng.gen_range(1..12);
                let padding = rng.gen_range(0..2);
                match packer.place(rect(&format!("r{}", i), width, height), padding) {
                    Ok(()) | Err(PackError::NoSpace { .. }) => {}
                    Err(err) => panic!("unexpected error {:?}", err),
                }
                assert_no_overlap(&packer);
                assert_no_subset(&packer);
            }
            assert_coverage(&packer);
        }
    }

    #[test]
    fn same_input_gives_same_layout() {
        let run = || {
            let config = PackerConfig::new([1, 1], [512, 512])
                .with_auto_grow(true)
                .with_heuristic(Heuristic::AreaFit);
            let mut packer = Packer::new(config).unwrap();
            let mut rng = StdRng::seed_from_u64(7);
            let rects = (0..50)
                .map(|i| rect(&format!("r{}", i), rng.gen_range(1..40), rng.gen_range(1..40)))
                .collect();
            packer.place_batch(rects, 1, SortOrder::HeightDescending).unwrap();
            packer
                .rectangles()
                .iter()
                .map(|r| (r.id().to_owned(), r.rect().unwrap()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
