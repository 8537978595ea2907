//! Signature table for content sniffing (WHATWG MIME Sniffing subset, same
//! table and order as Go's `net/http` sniffer).

/// One entry of the sniffing table.
pub(super) enum Signature {
    /// Case-insensitive HTML tag prefix followed by a space or `>`.
    Html(&'static [u8]),
    /// `data[i] & mask[i] == pattern[i]` for every byte of `pattern`.
    Masked {
        mask: &'static [u8],
        pattern: &'static [u8],
        skip_ws: bool,
        mime: &'static str,
    },
    /// Plain prefix.
    Exact(&'static [u8], &'static str),
    /// ISO base media `ftyp` box with an `mp4` brand.
    Mp4,
    /// No binary control bytes.
    Text,
}

const HTML: &str = "text/html; charset=utf-8";
pub(super) const TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// Byte after an HTML tag name must be one of these.
fn is_tag_terminating(b: u8) -> bool {
    b == b' ' || b == b'>'
}

impl Signature {
    /// `data` is the full prefix; `first_non_ws` is the index of its first
    /// non-whitespace byte.
    pub(super) fn matches(&self, data: &[u8], first_non_ws: usize) -> Option<&'static str> {
        match self {
            Signature::Html(tag) => {
                let data = &data[first_non_ws..];
                if data.len() < tag.len() + 1 {
                    return None;
                }
                for (i, &b) in tag.iter().enumerate() {
                    let mut db = data[i];
                    if b.is_ascii_uppercase() {
                        db &= 0xDF;
                    }
                    if b != db {
                        return None;
                    }
                }
                is_tag_terminating(data[tag.len()]).then_some(HTML)
            }
            Signature::Masked {
                mask,
                pattern,
                skip_ws,
                mime,
            } => {
                let data = if *skip_ws { &data[first_non_ws..] } else { data };
                if mask.len() != pattern.len() || data.len() < pattern.len() {
                    return None;
                }
                let hit = pattern
                    .iter()
                    .zip(mask.iter())
                    .zip(data.iter())
                    .all(|((p, m), d)| d & m == *p);
                hit.then_some(*mime)
            }
            Signature::Exact(prefix, mime) => data.starts_with(prefix).then_some(*mime),
            Signature::Mp4 => match_mp4(data),
            Signature::Text => {
                let binary = data[first_non_ws..].iter().any(|&b| {
                    b <= 0x08
                        || b == 0x0B
                        || (0x0E..=0x1A).contains(&b)
                        || (0x1C..=0x1F).contains(&b)
                });
                (!binary).then_some(TEXT_UTF8)
            }
        }
    }
}

fn match_mp4(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }
    let box_size = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if data.len() < box_size || box_size % 4 != 0 {
        return None;
    }
    if &data[4..8] != b"ftyp" {
        return None;
    }
    // Brands start at 8; offset 12 holds the minor version.
    let mut st = 8;
    while st < box_size {
        if st != 12 && data.get(st..st + 3) == Some(b"mp4".as_slice()) {
            return Some("video/mp4");
        }
        st += 4;
    }
    None
}

const fn masked(
    mask: &'static [u8],
    pattern: &'static [u8],
    mime: &'static str,
) -> Signature {
    Signature::Masked {
        mask,
        pattern,
        skip_ws: false,
        mime,
    }
}

const RIFF_MASK: &[u8] = b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF";

/// Checked in order; the first match wins.
pub(super) const SIGNATURES: &[Signature] = &[
    Signature::Html(b"<!DOCTYPE HTML"),
    Signature::Html(b"<HTML"),
    Signature::Html(b"<HEAD"),
    Signature::Html(b"<SCRIPT"),
    Signature::Html(b"<IFRAME"),
    Signature::Html(b"<H1"),
    Signature::Html(b"<DIV"),
    Signature::Html(b"<FONT"),
    Signature::Html(b"<TABLE"),
    Signature::Html(b"<A"),
    Signature::Html(b"<STYLE"),
    Signature::Html(b"<TITLE"),
    Signature::Html(b"<B"),
    Signature::Html(b"<BODY"),
    Signature::Html(b"<BR"),
    Signature::Html(b"<P"),
    Signature::Html(b"<!--"),
    Signature::Masked {
        mask: b"\xFF\xFF\xFF\xFF\xFF",
        pattern: b"<?xml",
        skip_ws: true,
        mime: "text/xml; charset=utf-8",
    },
    Signature::Exact(b"%PDF-", "application/pdf"),
    Signature::Exact(b"%!PS-Adobe-", "application/postscript"),
    // UTF BOMs
    masked(b"\xFF\xFF\x00\x00", b"\xFE\xFF\x00\x00", "text/plain; charset=utf-16be"),
    masked(b"\xFF\xFF\x00\x00", b"\xFF\xFE\x00\x00", "text/plain; charset=utf-16le"),
    masked(b"\xFF\xFF\xFF\x00", b"\xEF\xBB\xBF\x00", TEXT_UTF8),
    // Images
    Signature::Exact(b"\x00\x00\x01\x00", "image/x-icon"),
    Signature::Exact(b"\x00\x00\x02\x00", "image/x-icon"),
    Signature::Exact(b"BM", "image/bmp"),
    Signature::Exact(b"GIF87a", "image/gif"),
    Signature::Exact(b"GIF89a", "image/gif"),
    masked(
        b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
        b"RIFF\x00\x00\x00\x00WEBPVP",
        "image/webp",
    ),
    Signature::Exact(b"\x89PNG\x0D\x0A\x1A\x0A", "image/png"),
    Signature::Exact(b"\xFF\xD8\xFF", "image/jpeg"),
    // Audio and video
    masked(RIFF_MASK, b"FORM\x00\x00\x00\x00AIFF", "audio/aiff"),
    masked(b"\xFF\xFF\xFF", b"ID3", "audio/mpeg"),
    masked(b"\xFF\xFF\xFF\xFF\xFF", b"OggS\x00", "application/ogg"),
    masked(
        b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF",
        b"MThd\x00\x00\x00\x06",
        "audio/midi",
    ),
    masked(RIFF_MASK, b"RIFF\x00\x00\x00\x00AVI ", "video/avi"),
    masked(RIFF_MASK, b"RIFF\x00\x00\x00\x00WAVE", "audio/wave"),
    Signature::Mp4,
    Signature::Exact(b"\x1A\x45\xDF\xA3", "video/webm"),
    // Fonts
    masked(
        b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\xFF\xFF",
        b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00LP",
        "application/vnd.ms-fontobject",
    ),
    Signature::Exact(b"\x00\x01\x00\x00", "font/ttf"),
    Signature::Exact(b"OTTO", "font/otf"),
    Signature::Exact(b"ttcf", "font/collection"),
    Signature::Exact(b"wOFF", "font/woff"),
    Signature::Exact(b"wOF2", "font/woff2"),
    // Archives
    Signature::Exact(b"\x1F\x8B\x08", "application/x-gzip"),
    Signature::Exact(b"PK\x03\x04", "application/zip"),
    Signature::Exact(b"Rar!\x1A\x07\x00", "application/x-rar-compressed"),
    Signature::Exact(b"Rar!\x1A\x07\x01\x00", "application/x-rar-compressed"),
    Signature::Exact(b"\x00\x61\x73\x6D", "application/wasm"),
    Signature::Text,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_requires_terminator() {
        let sig = Signature::Html(b"<HTML");
        assert_eq!(sig.matches(b"<html>", 0), Some(HTML));
        assert_eq!(sig.matches(b"<HtMl lang=en>", 0), Some(HTML));
        assert_eq!(sig.matches(b"<htmlx>", 0), None);
        assert_eq!(sig.matches(b"<html", 0), None);
    }

    #[test]
    fn mp4_brand_scan_skips_minor_version() {
        let mut data = Vec::new();
        data.extend_from_slice(&16u32.to_be_bytes());
        data.extend_from_slice(b"ftypisom");
        data.extend_from_slice(b"mp41");
        assert_eq!(match_mp4(&data), None);

        let mut data = Vec::new();
        data.extend_from_slice(&20u32.to_be_bytes());
        data.extend_from_slice(b"ftypisom");
        data.extend_from_slice(&[0, 0, 2, 0]);
        data.extend_from_slice(b"mp42");
        assert_eq!(match_mp4(&data), Some("video/mp4"));
    }

    #[test]
    fn masked_length_mismatch_never_matches() {
        let sig = masked(b"\xFF", b"ab", "x/y");
        assert_eq!(sig.matches(b"abc", 0), None);
    }
}
