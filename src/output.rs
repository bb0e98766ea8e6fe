//! CLI output formatting.
//!
//! One report line per normalized image: source identity first, then the
//! size transformation and payload cost. Format functions are pure — no
//! I/O, no side effects — so main.rs stays a thin printer.
//!
//! ```text
//! batman-423.jpg: 4000x3000 -> 1800x2400 q90 3.2 MiB
//! action-1.png: 900x600 -> 800x1200 q95 1.1 MiB (fallback)
//! ```

use crate::encode::EncodeResult;

/// Format one normalize report line.
///
/// `source_dims` is `None` when the source header could not be read for the
/// report (the payload itself is unaffected).
pub fn format_result_line(
    name: &str,
    source_dims: Option<(u32, u32)>,
    result: &EncodeResult,
) -> String {
    let source = match source_dims {
        Some((w, h)) => format!("{w}x{h}"),
        None => "?".to_string(),
    };
    let tag = if result.fallback { " (fallback)" } else { "" };
    format!(
        "{name}: {source} -> {}x{} q{} {}{tag}",
        result.width,
        result.height,
        result.quality,
        format_bytes(result.data.len()),
    )
}

/// Format one failure line.
pub fn format_failure_line(name: &str, error: &impl std::fmt::Display) -> String {
    format!("{name}: FAILED - {error}")
}

/// Human-readable byte count (B / KiB / MiB, one decimal).
fn format_bytes(n: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let n = n as f64;
    if n >= MIB {
        format!("{:.1} MiB", n / MIB)
    } else if n >= KIB {
        format!("{:.1} KiB", n / KIB)
    } else {
        format!("{n} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(fallback: bool) -> EncodeResult {
        EncodeResult {
            data: "A".repeat(2048),
            media_type: crate::encode::MEDIA_TYPE,
            width: 1800,
            height: 2400,
            quality: 90,
            fallback,
        }
    }

    #[test]
    fn formats_success_line() {
        let line = format_result_line("comic.jpg", Some((4000, 3000)), &result(false));
        assert_eq!(line, "comic.jpg: 4000x3000 -> 1800x2400 q90 2.0 KiB");
    }

    #[test]
    fn fallback_is_tagged() {
        let line = format_result_line("comic.jpg", Some((4000, 3000)), &result(true));
        assert!(line.ends_with("(fallback)"));
    }

    #[test]
    fn unknown_source_dims_show_placeholder() {
        let line = format_result_line("comic.jpg", None, &result(false));
        assert!(line.contains("comic.jpg: ? ->"));
    }

    #[test]
    fn formats_failure_line() {
        let line = format_failure_line("comic.jpg", &"failed to decode image");
        assert_eq!(line, "comic.jpg: FAILED - failed to decode image");
    }

    #[test]
    fn byte_units_scale() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(4_718_592), "4.5 MiB");
    }
}
