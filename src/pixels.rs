//! Typed pixel views of converted images.
//!
//! [`array_to_image`](crate::array_to_image) produces `[T; N]` pixels. These
//! helpers move them into the `rgb` crate's pixel types, and back, so a
//! host image can be handed to code that expects `Rgb<u8>` and friends.

use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::{Gray, Rgb, Rgba};

use crate::class::Element;

fn map_pixels<P: Copy, Q>(img: ImgRef<'_, P>, f: impl Fn(P) -> Q) -> ImgVec<Q> {
    let (width, height) = (img.width(), img.height());
    let buf: Vec<Q> = img.pixels().map(f).collect();
    ImgVec::new(buf, width, height)
}

/// Single-channel pixels as [`Gray`].
pub fn into_gray<T: Element>(img: ImgRef<'_, [T; 1]>) -> ImgVec<Gray<T>> {
    map_pixels(img, |[v]| Gray::new(v))
}

/// Three-channel pixels as [`Rgb`], channel 0 being red.
pub fn into_rgb<T: Element>(img: ImgRef<'_, [T; 3]>) -> ImgVec<Rgb<T>> {
    map_pixels(img, |[r, g, b]| Rgb { r, g, b })
}

/// Four-channel pixels as [`Rgba`], channel 3 being alpha.
pub fn into_rgba<T: Element>(img: ImgRef<'_, [T; 4]>) -> ImgVec<Rgba<T>> {
    map_pixels(img, |[r, g, b, a]| Rgba { r, g, b, a })
}

/// [`Rgb`] pixels as channel arrays, ready for
/// [`image_to_array`](crate::image_to_array).
pub fn from_rgb<T: Element>(img: ImgRef<'_, Rgb<T>>) -> ImgVec<[T; 3]> {
    map_pixels(img, |p| [p.r, p.g, p.b])
}

/// [`Rgba`] pixels as channel arrays.
pub fn from_rgba<T: Element>(img: ImgRef<'_, Rgba<T>>) -> ImgVec<[T; 4]> {
    map_pixels(img, |p| [p.r, p.g, p.b, p.a])
}

/// Swap channels 0 and 2.
///
/// Host images are RGB; most vision code expects BGR. The swap is its own
/// inverse.
pub fn swap_rb<T: Element>(img: ImgRef<'_, [T; 3]>) -> ImgVec<[T; 3]> {
    map_pixels(img, |[r, g, b]| [b, g, r])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MxArray, array_to_image, image_to_array};
    use alloc::vec;

    fn rgb_array() -> MxArray {
        // 1x2 image: red pixel then blue pixel, planes R, G, B.
        MxArray::from_vec(&[1, 2, 3], vec![255u8, 0, 0, 0, 0, 255]).unwrap()
    }

    #[test]
    fn host_rgb_to_typed_pixels() {
        let img = array_to_image::<u8, 3>(&rgb_array()).unwrap();
        let rgb = into_rgb(img.as_ref());
        assert_eq!(rgb.buf()[0], Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(rgb.buf()[1], Rgb { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn typed_pixels_back_to_host() {
        let a = rgb_array();
        let img = array_to_image::<u8, 3>(&a).unwrap();
        let rgb = into_rgb(img.as_ref());
        let back = image_to_array(from_rgb(rgb.as_ref()).as_ref()).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn swap_rb_is_involution() {
        let img = ImgVec::new(vec![[1u16, 2, 3], [4, 5, 6]], 2, 1);
        let bgr = swap_rb(img.as_ref());
        assert_eq!(bgr.buf(), &[[3, 2, 1], [6, 5, 4]]);
        assert_eq!(swap_rb(bgr.as_ref()).buf(), img.buf());
    }

    #[test]
    fn gray_and_rgba() {
        let img = ImgVec::new(vec![[0.25f32], [0.75]], 1, 2);
        let gray = into_gray(img.as_ref());
        assert_eq!((gray.width(), gray.height()), (1, 2));
        assert_eq!(gray.buf()[1].value(), 0.75);

        let img = ImgVec::new(vec![[1i16, 2, 3, 4]], 1, 1);
        let rgba = into_rgba(img.as_ref());
        assert_eq!(rgba.buf()[0].a, 4);
        assert_eq!(from_rgba(rgba.as_ref()).buf()[0], [1, 2, 3, 4]);
    }

    #[test]
    fn strided_source_is_compacted() {
        let img = ImgVec::new_stride(vec![[1u8, 1, 1], [9, 9, 9], [2, 2, 2]], 1, 2, 2);
        let rgb = into_rgb(img.as_ref());
        assert_eq!(rgb.stride(), 1);
        assert_eq!(rgb.buf().len(), 2);
        assert_eq!(rgb.buf()[1].g, 2);
    }
}
