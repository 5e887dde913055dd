use std::path::Path;

use image::RgbImage;

use crate::error::{RedactError, Result};

/// Decodes the file at `path` into an 8-bit RGB image.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| RedactError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.into_rgb8())
}

/// Writes `image` to `path`, picking the encoder from the extension.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|source| RedactError::Save {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, RedactError::Load { .. }));
    }

    #[test]
    fn undecodable_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, RedactError::Load { .. }));
        assert!(err.to_string().contains("broken.png"));
    }

    #[test]
    fn saved_png_loads_back_with_same_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        let mut img = RgbImage::from_pixel(7, 5, Rgb([200, 10, 30]));
        img.put_pixel(3, 2, Rgb([0, 0, 0]));

        save_image(&img, &path).unwrap();
        let loaded = load_image(&path).unwrap();

        assert_eq!(loaded.dimensions(), (7, 5));
        assert_eq!(loaded, img);
    }

    #[test]
    fn unknown_extension_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.unknownext");
        let img = RgbImage::new(2, 2);

        let err = save_image(&img, &path).unwrap_err();
        assert!(matches!(err, RedactError::Save { .. }));
    }
}
