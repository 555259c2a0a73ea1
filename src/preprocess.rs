use image::{imageops::FilterType, ImageError, ImageReader};
use ndarray::{Array, Array4, ShapeError};
use std::io::Cursor;
use thiserror::Error;

pub const INPUT_SIZE: u32 = 512;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Could not decode the uploaded image")]
    Decode(#[from] ImageError),
    #[error("Could not normalize the uploaded image")]
    Shape(#[from] ShapeError),
}

/// Decodes an uploaded image into the model input: RGB, 512x512, values
/// scaled to `[0, 1]`, laid out as `(1, height, width, channel)`.
pub fn normalize_image(image_data: &[u8]) -> Result<Array4<f32>, PreprocessError> {
    let original_img = ImageReader::new(Cursor::new(image_data))
        .with_guessed_format()
        .map_err(ImageError::from)?
        .decode()?;

    let rgb = original_img.to_rgb8();
    let resized = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);

    // RGB8 rows are already height, width, channel ordered.
    let pixels = resized
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.)
        .collect::<Vec<_>>();
    let size = INPUT_SIZE as usize;

    Ok(Array::from_shape_vec((1, size, size, 3), pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb, Rgba};

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut image_data: Vec<u8> = Vec::new();
        img.write_to(&mut Cursor::new(&mut image_data), format)
            .unwrap();
        image_data
    }

    fn assert_normalized(input: &Array4<f32>) {
        assert_eq!(input.shape(), &[1, 512, 512, 3]);
        assert!(input.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_normalize_red_png() {
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(100, 100, Rgb([255, 0, 0]));
        let input = normalize_image(&encode(img.into(), ImageFormat::Png)).unwrap();

        assert_normalized(&input);
        assert!((input[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
        assert!(input[[0, 256, 256, 1]].abs() < 1e-6);
        assert!(input[[0, 511, 511, 2]].abs() < 1e-6);
    }

    #[test]
    fn test_normalize_red_jpeg() {
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(100, 100, Rgb([255, 0, 0]));
        let input = normalize_image(&encode(img.into(), ImageFormat::Jpeg)).unwrap();

        assert_normalized(&input);
    }

    #[test]
    fn test_normalize_non_square_grayscale() {
        let img = ImageBuffer::<Luma<u8>, Vec<u8>>::from_fn(700, 30, |x, _| Luma([(x % 256) as u8]));
        let input = normalize_image(&encode(img.into(), ImageFormat::Png)).unwrap();

        assert_normalized(&input);
        // Gray pixels expand to identical channels.
        assert_eq!(input[[0, 10, 10, 0]], input[[0, 10, 10, 1]]);
        assert_eq!(input[[0, 10, 10, 1]], input[[0, 10, 10, 2]]);
    }

    #[test]
    fn test_normalize_drops_alpha() {
        let img = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_pixel(8, 1024, Rgba([0, 0, 255, 10]));
        let input = normalize_image(&encode(img.into(), ImageFormat::Png)).unwrap();

        assert_normalized(&input);
        assert!((input[[0, 100, 100, 2]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let result = normalize_image(b"definitely not an image");
        assert!(matches!(result, Err(PreprocessError::Decode(_))));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(normalize_image(&[]).is_err());
    }
}
