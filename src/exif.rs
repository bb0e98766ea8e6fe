//! Minimal EXIF orientation reader for JPEG byte streams.
//!
//! Extracts exactly one field: the Orientation tag (0x0112) from IFD0 of the
//! APP1 Exif segment. Nothing else in the metadata is touched.
//!
//! The reader never fails: any malformed, truncated, or non-JPEG input
//! resolves to the default orientation (1, "no transform"). It inspects at
//! most the first 64 KiB of the stream — the Exif segment must appear before
//! entropy-coded data, so reading further is never required.
//!
//! Zero external dependencies — pure byte scanning, ~100 lines.

/// Camera orientation code per the EXIF convention (1–8).
///
/// 1 = upright, 3 = 180°, 6 = 90° CW, 8 = 270° CW. The mirrored variants
/// (2, 4, 5, 7) are treated as their non-mirrored rotation equivalents —
/// this pipeline does not apply flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation(u8);

impl Orientation {
    /// Build from a raw tag value. Out-of-range values collapse to 1.
    pub fn from_code(code: u16) -> Self {
        match code {
            1..=8 => Self(code as u8),
            _ => Self(1),
        }
    }

    /// The raw orientation code (1–8).
    pub fn code(self) -> u8 {
        self.0
    }

    /// Clockwise rotation in degrees needed to display the image upright.
    pub fn degrees(self) -> u16 {
        match self.0 {
            3 | 4 => 180,
            5 | 6 => 90,
            7 | 8 => 270,
            _ => 0,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self(1)
    }
}

/// Exif never appears past this point in a camera JPEG.
const SCAN_LIMIT: usize = 64 * 1024;

const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";
const ORIENTATION_TAG: u16 = 0x0112;

/// Read the EXIF orientation from the leading bytes of a JPEG stream.
///
/// Walks marker segments from SOI. APP1 is parsed for the Exif signature;
/// other APPn segments are skipped. The walk stops at the first structural
/// (non-APPn) segment, since Exif cannot appear after it.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let data = &bytes[..bytes.len().min(SCAN_LIMIT)];

    // SOI marker (0xFF 0xD8)
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return Orientation::default();
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return Orientation::default();
        }
        let marker = data[pos + 1];

        // Fill bytes before a marker are legal padding
        if marker == 0xFF {
            pos += 1;
            continue;
        }

        // First structural segment: metadata can no longer appear
        if !(0xE0..=0xEF).contains(&marker) {
            return Orientation::default();
        }

        // Segment length is big-endian and includes its own two bytes
        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if seg_len < 2 || pos + 2 + seg_len > data.len() {
            return Orientation::default();
        }

        if marker == 0xE1 {
            return parse_exif_segment(&data[pos + 4..pos + 2 + seg_len]);
        }

        pos += 2 + seg_len;
    }

    Orientation::default()
}

/// Parse the body of an APP1 segment: Exif signature, TIFF header, IFD0 scan.
fn parse_exif_segment(segment: &[u8]) -> Orientation {
    if !segment.starts_with(EXIF_SIGNATURE) {
        return Orientation::default();
    }
    let tiff = &segment[EXIF_SIGNATURE.len()..];
    if tiff.len() < 8 {
        return Orientation::default();
    }

    // Byte order mark: "MM" = big-endian, "II" = little-endian
    let big_endian = match &tiff[0..2] {
        b"MM" => true,
        b"II" => false,
        _ => return Orientation::default(),
    };

    let read_u16 = |offset: usize| -> Option<u16> {
        let b = tiff.get(offset..offset + 2)?;
        Some(if big_endian {
            u16::from_be_bytes([b[0], b[1]])
        } else {
            u16::from_le_bytes([b[0], b[1]])
        })
    };
    let read_u32 = |offset: usize| -> Option<u32> {
        let b = tiff.get(offset..offset + 4)?;
        Some(if big_endian {
            u32::from_be_bytes([b[0], b[1], b[2], b[3]])
        } else {
            u32::from_le_bytes([b[0], b[1], b[2], b[3]])
        })
    };

    // TIFF magic (42), then IFD0 offset relative to the TIFF header
    if read_u16(2) != Some(42) {
        return Orientation::default();
    }
    let Some(ifd_offset) = read_u32(4) else {
        return Orientation::default();
    };
    let ifd_offset = ifd_offset as usize;

    let Some(entry_count) = read_u16(ifd_offset) else {
        return Orientation::default();
    };
    let entries_start = ifd_offset + 2;

    // Each IFD entry is a fixed 12-byte record:
    //   tag (2) + type (2) + count (4) + value/offset (4)
    // Orientation is a SHORT with count 1, so the value sits inline in the
    // first two bytes of the value field, in the detected byte order.
    for i in 0..entry_count as usize {
        let entry = entries_start + i * 12;
        let Some(tag) = read_u16(entry) else {
            return Orientation::default();
        };
        if tag == ORIENTATION_TAG {
            return match read_u16(entry + 8) {
                Some(code) => Orientation::from_code(code),
                None => Orientation::default(),
            };
        }
    }

    Orientation::default()
}
