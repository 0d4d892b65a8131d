//! Tone mapping and image file output.

use crate::{Color, ImageBuffer, RenderError};
use image::{ImageFormat, RgbImage};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Map linear radiance to 8-bit RGB: clamp to `[0, 1]`, raise to `gamma`,
/// scale to 255 and truncate.
#[inline]
pub fn tone_map(color: Color, gamma: f32) -> [u8; 3] {
    let channel = |v: f32| (255.0 * v.clamp(0.0, 1.0).powf(gamma)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Write `image` as a binary PPM (P6): the header
/// `P6\n{width} {height}\n255\n` followed by 3 bytes per pixel, row-major.
pub fn encode_ppm<W: Write>(image: &ImageBuffer, gamma: f32, mut writer: W) -> io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.to_rgb8(gamma))?;
    writer.flush()
}

/// Save `image` to `path`: PNG when the extension is `png`, PPM otherwise.
///
/// The file is written next to its target under a `.partial` name and
/// renamed into place once complete, so a failed write never leaves a
/// truncated image at `path`.
pub fn save_image(image: &ImageBuffer, path: &Path, gamma: f32) -> Result<(), RenderError> {
    let partial = partial_path(path);

    let written = if is_png(path) {
        write_png(image, &partial, gamma)
    } else {
        write_ppm(image, &partial, gamma)
    };

    if let Err(err) = written {
        let _ = fs::remove_file(&partial);
        return Err(err);
    }

    fs::rename(&partial, path)?;
    log::info!("Wrote {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

fn write_ppm(image: &ImageBuffer, path: &Path, gamma: f32) -> Result<(), RenderError> {
    let file = File::create(path)?;
    encode_ppm(image, gamma, BufWriter::new(file))?;
    Ok(())
}

fn write_png(image: &ImageBuffer, path: &Path, gamma: f32) -> Result<(), RenderError> {
    let rgb = RgbImage::from_raw(image.width, image.height, image.to_rgb8(gamma)).ok_or_else(
        || RenderError::InvalidConfig("framebuffer size does not match image size".into()),
    )?;
    rgb.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_map_clamps_and_applies_gamma() {
        assert_eq!(tone_map(Color::ZERO, 0.6), [0, 0, 0]);
        assert_eq!(tone_map(Color::ONE, 0.6), [255, 255, 255]);
        assert_eq!(tone_map(Color::new(-1.0, 7.0, f32::NAN), 0.6), [0, 255, 0]);

        // 0.25^0.5 = 0.5 -> 127.5 truncated
        assert_eq!(tone_map(Color::splat(0.25), 0.5), [127, 127, 127]);
    }

    #[test]
    fn test_ppm_header_and_size() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(0, 0, Color::ONE);
        image.set(2, 1, Color::new(1.0, 0.0, 0.0));

        let mut bytes = Vec::new();
        encode_ppm(&image, 0.6, &mut bytes).unwrap();

        let header = b"P6\n3 2\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(bytes.len(), header.len() + 3 * 2 * 3);

        let body = &bytes[header.len()..];
        assert_eq!(&body[0..3], &[255, 255, 255]);
        assert_eq!(&body[15..18], &[255, 0, 0]);
    }

    #[test]
    fn test_save_image_ppm_and_png() {
        let dir = std::env::temp_dir().join(format!("glint-output-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let buffer = ImageBuffer::new(4, 4);

        let ppm = dir.join("out.ppm");
        save_image(&buffer, &ppm, 0.6).unwrap();
        let bytes = fs::read(&ppm).unwrap();
        assert!(bytes.starts_with(b"P6\n4 4\n255\n"));
        assert!(!partial_path(&ppm).exists());

        assert!(is_png(Path::new("render.PNG")));
        let png = dir.join("out.png");
        save_image(&buffer, &png, 0.6).unwrap();
        let decoded = image::open(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_image_into_missing_dir_fails() {
        let path = std::env::temp_dir()
            .join("glint-no-such-dir")
            .join("nested")
            .join("out.ppm");
        let result = save_image(&ImageBuffer::new(1, 1), &path, 0.6);

        assert!(matches!(result, Err(RenderError::Io(_))));
        assert!(!path.exists());
    }
}
