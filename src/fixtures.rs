//! Image files for tests, generated in memory

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn pixels() -> RgbImage {
    RgbImage::from_pixel(4, 4, Rgb([200, 120, 40]))
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    pixels().write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

fn encode_with_exif(mut encoder: impl ImageEncoder, fields: &[(Tag, &str)]) {
    encoder.set_exif_metadata(exif_block(fields)).unwrap();
    let img = pixels();
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
}

/// JPEG without any metadata segment
pub fn plain_jpeg() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

/// PNG without an eXIf chunk
pub fn plain_png() -> Vec<u8> {
    encode(ImageFormat::Png)
}

/// JPEG cut off before its frame header
pub fn truncated_jpeg() -> Vec<u8> {
    plain_jpeg()[..24].to_vec()
}

/// TIFF-structured EXIF block holding the given ASCII fields
pub fn exif_block(fields: &[(Tag, &str)]) -> Vec<u8> {
    let fields: Vec<Field> = fields
        .iter()
        .map(|(tag, text)| Field {
            tag: *tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![text.as_bytes().to_vec()]),
        })
        .collect();

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

/// JPEG carrying an APP1 EXIF segment with the given ASCII fields
pub fn jpeg_with_exif(fields: &[(Tag, &str)]) -> Vec<u8> {
    let tiff = exif_block(fields);
    let jpeg = plain_jpeg();

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let segment_len = u16::try_from(payload.len() + 2).unwrap();

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// PNG carrying an eXIf chunk with the given ASCII fields
pub fn png_with_exif(fields: &[(Tag, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_with_exif(PngEncoder::new(&mut buf), fields);
    buf
}

/// Lossless WebP carrying an EXIF chunk with the given ASCII fields
pub fn webp_with_exif(fields: &[(Tag, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_with_exif(WebPEncoder::new_lossless(&mut buf), fields);
    buf
}

fn bmff_box(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let size = u32::try_from(body.len() + 8).unwrap();
    let mut out = size.to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
    out
}

/// Minimal HEIF holding only an Exif item stored in the meta box
///
/// There is no coded image, which is enough for the container sniffing and
/// the metadata reader. The `image` crate has no HEIF decoder to object.
pub fn heif_with_exif(fields: &[(Tag, &str)]) -> Vec<u8> {
    // Exif item payload: offset to the TIFF header, then the header itself
    let mut item = 0u32.to_be_bytes().to_vec();
    item.extend(exif_block(fields));
    let item_len = u32::try_from(item.len()).unwrap();

    let ftyp = bmff_box(b"ftyp", b"heic\0\0\0\0mif1heic");

    // infe version 2: item 1, no protection, type Exif, empty name
    let infe = bmff_box(b"infe", b"\x02\0\0\0\0\x01\0\0Exif\0");
    let mut iinf = vec![0, 0, 0, 0, 0, 1];
    iinf.extend(infe);

    // iloc version 1: 4-byte offsets and lengths, item 1 read from idat
    let mut iloc = vec![1, 0, 0, 0, 0x44, 0x00, 0, 1, 0, 1, 0, 1, 0, 0, 0, 1];
    iloc.extend(0u32.to_be_bytes());
    iloc.extend(item_len.to_be_bytes());

    let mut meta = vec![0, 0, 0, 0];
    meta.extend(bmff_box(b"iinf", &iinf));
    meta.extend(bmff_box(b"iloc", &iloc));
    meta.extend(bmff_box(b"idat", &item));

    let mut out = ftyp;
    out.extend(bmff_box(b"meta", &meta));
    out
}

/// Write `bytes` to `dir/name`, creating parent directories
pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}
