//! Maximal-rectangles bin packing.
//!
//! A [`Packer`] places rectangles into a bin of bounded size, keeping the
//! unoccupied space as a set of maximal free regions. With auto-growth the
//! bin starts small and is enlarged until the whole input fits.
//!
//! ```
//! use maxrect_packer::{Packer, PackerConfig, Rectangle, SortOrder};
//!
//! let config = PackerConfig::new([1, 1], [1024, 1024]).with_auto_grow(true);
//! let mut packer = Packer::new(config).unwrap();
//!
//! let rects = vec![
//!     Rectangle::new("a", 128, 64, ()).unwrap(),
//!     Rectangle::new("b", 64, 64, ()).unwrap(),
//! ];
//! packer.place_batch(rects, 0, SortOrder::HeightDescending).unwrap();
//!
//! for rect in packer.rectangles() {
//!     println!("{} at {:?}", rect.id(), rect.position());
//! }
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod packer;
pub mod rect;
mod regions;

pub use crate::config::*;
pub use crate::error::PackError;
pub use crate::geometry::Rect;
pub use crate::packer::*;
pub use crate::rect::*;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub name: String,
    pub position: [u32; 2],
    pub size: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputData {
    pub size: [u32; 2],
    pub layouts: Vec<LayoutInfo>,
    pub unplaced: Vec<String>,
}

impl OutputData {
    pub fn from_packer<P>(packer: &Packer<P>) -> Self {
        let layouts = packer
            .rectangles()
            .iter()
            .filter_map(|r| {
                r.rect().map(|rect| LayoutInfo {
                    name: r.id().to_owned(),
                    position: [rect.x, rect.y],
                    size: [rect.width, rect.height],
                })
            })
            .collect();
        OutputData {
            size: [packer.width(), packer.height()],
            layouts,
            unplaced: packer.unplaced().iter().map(|r| r.id().to_owned()).collect(),
        }
    }
}

/// A rectangle size read from a JSON input list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRect {
    pub name: String,
    pub width: u32,
    pub height: u32,
}
