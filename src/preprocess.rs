//! Binarization applied before OCR.
//!
//! The redactor always paints on the untouched original; the output of
//! [`preprocess`] is only ever handed to a [`crate::ocr::TextLocator`].

use image::{GrayImage, Luma, RgbImage};
use imageproc::filter::separable_filter_equal;

/// Side of the square smoothing kernel applied after grayscale conversion.
pub const BLUR_KERNEL_SIZE: usize = 5;
/// Side of the neighbourhood used to compute each pixel's threshold.
pub const THRESHOLD_BLOCK_SIZE: usize = 11;
/// Subtracted from the local mean before comparing.
pub const THRESHOLD_C: i16 = 2;

/// Grayscale, blur, then adaptive Gaussian threshold to pure black/white.
pub fn preprocess(image: &RgbImage) -> GrayImage {
    let gray = to_luma_bt601(image);
    let blurred = separable_filter_equal(&gray, &gaussian_kernel(BLUR_KERNEL_SIZE));
    adaptive_gaussian_threshold(&blurred, THRESHOLD_BLOCK_SIZE, THRESHOLD_C)
}

/// Sets a pixel to 255 when it is brighter than the Gaussian-weighted mean of
/// its `block_size` x `block_size` neighbourhood minus `c`, and to 0 otherwise.
pub fn adaptive_gaussian_threshold(image: &GrayImage, block_size: usize, c: i16) -> GrayImage {
    let local_mean = separable_filter_equal(image, &gaussian_kernel(block_size));
    let mut out = image.clone();
    for (px, mean) in out.pixels_mut().zip(local_mean.pixels()) {
        let threshold = i16::from(mean[0]) - c;
        *px = if i16::from(px[0]) > threshold {
            Luma([255])
        } else {
            Luma([0])
        };
    }
    out
}

/// Luma with BT.601 weights (0.299 R + 0.587 G + 0.114 B), rounded.
pub fn to_luma_bt601(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
        Luma([((weighted + 500) / 1000) as u8])
    })
}

/// Normalized 1-D Gaussian of odd length `ksize`.
///
/// Up to 7 taps the fixed binomial kernels are used; longer kernels take
/// their sigma from the size, `0.3 * ((ksize - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    match ksize {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
        _ => {
            let sigma = 0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let center = (ksize / 2) as f64;
            let weights: Vec<f64> = (0..ksize)
                .map(|i| {
                    let d = i as f64 - center;
                    (-(d * d) / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let sum: f64 = weights.iter().sum();
            weights.iter().map(|w| (w / sum) as f32).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn is_binary(img: &GrayImage) -> bool {
        img.pixels().all(|p| p[0] == 0 || p[0] == 255)
    }

    #[test]
    fn kernels_have_the_requested_width() {
        assert_eq!(gaussian_kernel(BLUR_KERNEL_SIZE).len(), 5);
        assert_eq!(gaussian_kernel(THRESHOLD_BLOCK_SIZE).len(), 11);
        assert_eq!(
            gaussian_kernel(5),
            vec![0.0625, 0.25, 0.375, 0.25, 0.0625]
        );
    }

    #[test]
    fn long_kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel(11);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        for i in 0..5 {
            assert!((k[i] - k[10 - i]).abs() < 1e-7);
            assert!(k[i] < k[i + 1]);
        }
        // sigma 2.0: the outermost tap sits at exp(-25 / 8) relative to the center
        assert!((k[0] / k[5] - (-25.0f32 / 8.0).exp()).abs() < 1e-5);
    }

    #[test]
    fn threshold_neighbourhood_reaches_five_pixels() {
        let mut img = GrayImage::new(31, 9);
        for y in 0..9 {
            img.put_pixel(15, y, Luma([255]));
        }

        let out = adaptive_gaussian_threshold(&img, THRESHOLD_BLOCK_SIZE, 1);

        // Within five pixels of the bright column the local mean rises above
        // zero and the dark pixel falls below threshold; one step further out
        // the column is outside the block.
        assert_eq!(out.get_pixel(10, 4)[0], 0);
        assert_eq!(out.get_pixel(20, 4)[0], 0);
        assert_eq!(out.get_pixel(9, 4)[0], 255);
        assert_eq!(out.get_pixel(21, 4)[0], 255);
    }

    #[test]
    fn grayscale_uses_bt601_weights() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(2, 0, Rgb([0, 0, 255]));

        let gray = to_luma_bt601(&img);

        assert_eq!(gray.get_pixel(0, 0)[0], 76);
        assert_eq!(gray.get_pixel(1, 0)[0], 150);
        assert_eq!(gray.get_pixel(2, 0)[0], 29);
    }

    #[test]
    fn uniform_image_turns_white() {
        let img = RgbImage::from_pixel(32, 32, Rgb([128, 128, 128]));
        let out = preprocess(&img);
        assert_eq!(out.dimensions(), (32, 32));
        assert!(out.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn thin_dark_stroke_turns_black() {
        let mut img = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
        for x in 5..35 {
            for y in 19..21 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }

        let out = preprocess(&img);

        assert!(is_binary(&out));
        assert_eq!(out.get_pixel(20, 19)[0], 0);
        assert_eq!(out.get_pixel(20, 20)[0], 0);
        assert_eq!(out.get_pixel(20, 2)[0], 255);
        assert_eq!(out.get_pixel(2, 38)[0], 255);
    }

    #[test]
    fn original_is_left_untouched() {
        let mut img = RgbImage::from_pixel(16, 16, Rgb([10, 200, 90]));
        img.put_pixel(8, 8, Rgb([0, 0, 0]));
        let before = img.clone();

        let _ = preprocess(&img);

        assert_eq!(img, before);
    }

    #[test]
    fn threshold_constant_shifts_cutoff() {
        let img = GrayImage::from_pixel(12, 12, Luma([100]));
        let strict = adaptive_gaussian_threshold(&img, THRESHOLD_BLOCK_SIZE, -5);
        let lenient = adaptive_gaussian_threshold(&img, THRESHOLD_BLOCK_SIZE, THRESHOLD_C);
        assert!(strict.pixels().all(|p| p[0] == 0));
        assert!(lenient.pixels().all(|p| p[0] == 255));
    }
}
