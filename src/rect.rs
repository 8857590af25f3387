use crate::error::PackError;
use crate::geometry::Rect;

/// Where a rectangle ended up in the bin.
///
/// `bounds` is the area the packer reserved, padding included. The logical
/// rectangle sits inside it, inset by `padding` on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    bounds: Rect,
    rect: Rect,
    padding: u32,
}

impl Placement {
    pub(crate) fn new(bounds: Rect, padding: u32) -> Option<Placement> {
        let rect = bounds.unpad(padding)?;
        Some(Placement { bounds, rect, padding })
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn padding(&self) -> u32 {
        self.padding
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// A rectangle handed to the packer.
///
/// The logical size never changes once constructed; padding only affects the
/// reserved bounds of a placement. `id` and `payload` are carried through
/// untouched so callers can match results back to their own objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle<P = ()> {
    id: String,
    size: [u32; 2],
    payload: P,
    placement: Option<Placement>,
}

impl<P> Rectangle<P> {
    pub fn new(id: impl Into<String>, width: u32, height: u32, payload: P) -> Result<Self, PackError> {
        if width == 0 || height == 0 {
            return Err(PackError::InvalidSize { what: "rectangle", width, height });
        }
        Ok(Rectangle {
            id: id.into(),
            size: [width, height],
            payload,
            placement: None,
        })
    }

    /// Pins the rectangle at `(x, y)` with no padding, for use with
    /// [`Packer::place_fixed`](crate::Packer::place_fixed).
    pub fn with_position(self, x: u32, y: u32) -> Self {
        let [width, height] = self.size;
        let rect = Rect::new(x, y, width, height);
        Rectangle { placement: Some(Placement { bounds: rect, rect, padding: 0 }), ..self }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size[0]
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size[1]
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.size[0] as u64 * self.size[1] as u64
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub fn into_payload(self) -> P {
        self.payload
    }

    #[inline]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Position and logical size, once placed.
    #[inline]
    pub fn rect(&self) -> Option<Rect> {
        self.placement.map(|p| p.rect())
    }

    #[inline]
    pub fn position(&self) -> Option<[u32; 2]> {
        self.rect().map(|r| [r.x, r.y])
    }

    /// Size reserved in the bin for this rectangle with `padding` on every
    /// side.
    pub(crate) fn padded_size(&self, padding: u32) -> Result<[u32; 2], PackError> {
        let [width, height] = self.size;
        match Rect::new(0, 0, width, height).inflate(padding) {
            Some(padded) => Ok([padded.width, padded.height]),
            None => Err(PackError::InvalidPadding { id: self.id.clone(), padding }),
        }
    }

    pub(crate) fn padded_area(&self, padding: u32) -> u64 {
        let inset = padding as u64 * 2;
        let [width, height] = self.size;
        (width as u64 + inset).saturating_mul(height as u64 + inset)
    }

    pub(crate) fn set_placement(&mut self, placement: Option<Placement>) {
        self.placement = placement;
    }
}
