//! In-memory interop with the `image` crate.
//!
//! Decoded [`image::RgbaImage`] frames act as packed pixel sources and
//! [`image::GrayImage`] buffers as packed opacity sinks, so both engines
//! run over them — packed walks included — without copying. Decoding and
//! encoding files stays with the caller.

use image::{GrayImage, Luma, RgbaImage};

use crate::shared::bounds::Bounds;
use crate::shared::opacity_sink::{AlphaViewMut, OpacitySink};
use crate::shared::pixel_source::{widen_channel, PixelSource, RgbaView};

impl PixelSource for RgbaImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
        let px = self.get_pixel(x as u32, y as u32).0;
        [
            widen_channel(px[0]),
            widen_channel(px[1]),
            widen_channel(px[2]),
            widen_channel(px[3]),
        ]
    }

    fn packed_rgba(&self) -> Option<RgbaView<'_>> {
        let bounds = Bounds::from_size(self.width(), self.height());
        Some(RgbaView::new(
            self.as_raw(),
            self.width() as usize * 4,
            bounds,
        ))
    }
}

impl OpacitySink for GrayImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }

    fn opacity(&self, x: i32, y: i32) -> u8 {
        self.get_pixel(x as u32, y as u32).0[0]
    }

    fn set_opacity(&mut self, x: i32, y: i32, value: u8) {
        self.put_pixel(x as u32, y as u32, Luma([value]));
    }

    fn packed_alpha_mut(&mut self) -> Option<AlphaViewMut<'_>> {
        let bounds = Bounds::from_size(self.width(), self.height());
        // `from_raw` admits containers longer than the pixel area; the
        // view must cover exactly one byte per cell.
        let area = bounds.area();
        let pix = &mut **self;
        Some(AlphaViewMut::new(&mut pix[..area], bounds))
    }
}
