//! Kitty Graphics Protocol
//!
//! Textures are transmitted once as PNG and then placed by id.
//! Protocol documentation: https://sw.kovidgoyal.net/kitty/graphics-protocol/

use std::collections::HashSet;
use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{DynamicImage, RgbaImage};

/// Payload bytes per escape sequence
const CHUNK_SIZE: usize = 4096;

/// Kitty graphics handler
pub struct KittyGraphics {
    /// Ids the terminal currently holds
    uploaded: HashSet<u32>,
    next_id: u32,
}

impl KittyGraphics {
    pub fn new() -> Self {
        Self {
            uploaded: HashSet::new(),
            next_id: 1,
        }
    }

    /// Transmit an image and return its id
    pub fn upload_image<W: Write>(&mut self, out: &mut W, image: &DynamicImage) -> io::Result<u32> {
        let id = self.next_id;
        self.next_id += 1;

        let png = encode_png(&image.to_rgba8())?;
        for command in transmit_commands(id, &png) {
            out.write_all(command.as_bytes())?;
        }
        out.flush()?;

        self.uploaded.insert(id);
        Ok(id)
    }

    /// Place an uploaded image at a cell position, scaled to `cols` x `rows`
    pub fn display_image_at<W: Write>(
        &self,
        out: &mut W,
        image_id: u32,
        col: u16,
        row: u16,
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        write!(out, "\x1b7\x1b[{};{}H", row + 1, col + 1)?;
        write!(out, "\x1b_Ga=p,i={},c={},r={},C=1,q=2\x1b\\", image_id, cols, rows)?;
        write!(out, "\x1b8")?;
        out.flush()
    }

    /// Remove every placement but keep the uploaded data
    pub fn clear_placements<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "\x1b_Ga=d,d=a,q=2\x1b\\")?;
        out.flush()
    }

    /// Delete all uploaded images
    pub fn clear_all<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        write!(out, "\x1b_Ga=d,d=A,q=2\x1b\\")?;
        out.flush()?;
        self.uploaded.clear();
        Ok(())
    }

    pub fn is_uploaded(&self, image_id: u32) -> bool {
        self.uploaded.contains(&image_id)
    }
}

impl Default for KittyGraphics {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape sequences that transmit PNG data under `id`, chunked
fn transmit_commands(id: u32, png: &[u8]) -> Vec<String> {
    let encoded = BASE64.encode(png);
    // Base64 output is ASCII, so byte chunks are char boundaries
    let chunks: Vec<&str> = encoded.as_bytes()
        .chunks(CHUNK_SIZE)
        .filter_map(|c| std::str::from_utf8(c).ok())
        .collect();

    let last = chunks.len().saturating_sub(1);
    chunks.iter()
        .enumerate()
        .map(|(i, chunk)| {
            let more = u8::from(i != last);
            if i == 0 {
                format!("\x1b_Ga=t,t=d,f=100,i={},q=2,m={};{}\x1b\\", id, more, chunk)
            } else {
                format!("\x1b_Gm={};{}\x1b\\", more, chunk)
            }
        })
        .collect()
}

/// Encode an RGBA image as PNG bytes
fn encode_png(image: &RgbaImage) -> io::Result<Vec<u8>> {
    use image::ImageEncoder;
    use std::io::Cursor;

    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(Cursor::new(&mut buffer))
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(buffer)
}
