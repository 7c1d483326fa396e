use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::Encoding;
use tracing::debug;

use crate::catalog::error::CatalogError;

/// Encodings tried in order when none is known up front. Files of unknown
/// provenance from classroom machines are usually UTF-8, sometimes with a
/// BOM, occasionally legacy EUC-KR.
pub const DEFAULT_ENCODINGS: &[&str] = &["utf-8", "utf-8-sig", "euc-kr"];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// The catalog file as parsed, before any column inference or validation.
/// Headers are exactly what the file claims; every row has the same number
/// of cells as there are headers. Discarded once normalization produces
/// `ProductRecord`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read `path` once and try each candidate encoding in order until one both
/// decodes the bytes cleanly and parses them into a well-formed table.
/// First success wins. If every candidate fails, `DecodeFailed` carries the
/// attempted list and the last underlying error.
pub fn decode(path: &Path, encodings: &[&str]) -> Result<RawTable, CatalogError> {
    let fail = |last: String| CatalogError::DecodeFailed {
        path: path.to_path_buf(),
        attempted: encodings.iter().map(|e| e.to_string()).collect(),
        last,
    };

    let bytes = fs::read(path).map_err(|e| fail(format!("reading {:?}: {}", path, e)))?;

    let mut last = String::from("no encodings attempted");
    for &encoding in encodings {
        match decode_bytes(&bytes, encoding) {
            Ok(text) => match parse_table(&text) {
                Ok(table) => {
                    debug!(encoding, rows = table.rows.len(), "decoded catalog");
                    return Ok(table);
                }
                Err(e) => {
                    debug!(encoding, error = %e, "candidate parsed as text but table is malformed");
                    last = format!("{}: {}", encoding, e);
                }
            },
            Err(e) => {
                debug!(encoding, error = %e, "candidate failed to decode");
                last = format!("{}: {}", encoding, e);
            }
        }
    }
    Err(fail(last))
}

/// Decode raw bytes under one named encoding, strictly: any malformed
/// sequence fails the candidate rather than being replaced.
fn decode_bytes(bytes: &[u8], encoding: &str) -> Result<String, String> {
    match encoding {
        // Plain UTF-8 rejects a leading BOM so the sig-aware candidate can
        // claim those files and strip it.
        "utf-8" => {
            if bytes.starts_with(UTF8_BOM) {
                return Err("leading UTF-8 BOM present".into());
            }
            std::str::from_utf8(bytes)
                .map(|s| s.to_string())
                .map_err(|e| e.to_string())
        }
        "utf-8-sig" => {
            let stripped = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            std::str::from_utf8(stripped)
                .map(|s| s.to_string())
                .map_err(|e| e.to_string())
        }
        label => {
            let enc = Encoding::for_label(label.as_bytes())
                .ok_or_else(|| format!("unknown encoding label {:?}", label))?;
            let (text, had_errors) = enc.decode_without_bom_handling(bytes);
            if had_errors {
                Err(format!("malformed {} byte sequence", enc.name()))
            } else {
                Ok(text.into_owned())
            }
        }
    }
}

/// Parse decoded text as a headed CSV. The reader is deliberately not
/// flexible: a row whose cell count differs from the header count is a
/// malformed table, which fails this encoding candidate. Only headers are
/// trimmed here; cells pass through verbatim and normalization does its
/// own trimming.
fn parse_table(text: &str) -> Result<RawTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_catalog(bytes: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        fs::write(&path, bytes).unwrap();
        (dir, path)
    }

    #[test]
    fn utf8_round_trips_headers_and_cells() -> anyhow::Result<()> {
        let (_dir, path) = write_catalog("name,price,image_url\n연필,500,http://x/p.png\n".as_bytes());
        let table = decode(&path, DEFAULT_ENCODINGS)?;
        assert_eq!(table.headers, vec!["name", "price", "image_url"]);
        assert_eq!(table.rows, vec![vec!["연필", "500", "http://x/p.png"]]);
        Ok(())
    }

    #[test]
    fn cell_whitespace_survives_decode() -> anyhow::Result<()> {
        let (_dir, path) =
            write_catalog(b"name , price ,image\n Pencil ,500, p.png \n");
        let table = decode(&path, DEFAULT_ENCODINGS)?;
        // headers are trimmed, cells are not
        assert_eq!(table.headers, vec!["name", "price", "image"]);
        assert_eq!(table.rows, vec![vec![" Pencil ", "500", " p.png "]]);
        Ok(())
    }

    #[test]
    fn bom_is_stripped_by_sig_candidate() -> anyhow::Result<()> {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"name,price,image\nPencil,500,p.png\n");
        let (_dir, path) = write_catalog(&bytes);
        let table = decode(&path, DEFAULT_ENCODINGS)?;
        // the BOM must not leak into the first header
        assert_eq!(table.headers[0], "name");
        Ok(())
    }

    #[test]
    fn euc_kr_catalog_decodes() -> anyhow::Result<()> {
        let text = "품명,가격,이미지\n연필,500,p.png\n";
        let (bytes, _, had_errors) = encoding_rs::EUC_KR.encode(text);
        assert!(!had_errors);
        let (_dir, path) = write_catalog(&bytes);
        let table = decode(&path, DEFAULT_ENCODINGS)?;
        assert_eq!(table.headers, vec!["품명", "가격", "이미지"]);
        assert_eq!(table.rows[0][0], "연필");
        Ok(())
    }

    #[test]
    fn inconsistent_column_count_fails_the_candidate() {
        let (_dir, path) = write_catalog(b"name,price,image\nPencil,500\n");
        let err = decode(&path, DEFAULT_ENCODINGS).unwrap_err();
        match err {
            CatalogError::DecodeFailed { attempted, .. } => {
                assert_eq!(attempted, vec!["utf-8", "utf-8-sig", "euc-kr"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn undecodable_bytes_exhaust_all_candidates() {
        // 0xFF is an invalid lead byte in both UTF-8 and EUC-KR.
        let (_dir, path) = write_catalog(&[0xFF, 0xFF, 0xFF, 0xFF]);
        let err = decode(&path, DEFAULT_ENCODINGS).unwrap_err();
        match err {
            CatalogError::DecodeFailed { last, .. } => {
                assert!(!last.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_encoding_label_is_reported() {
        let (_dir, path) = write_catalog(b"name,price,image\n");
        let err = decode(&path, &["no-such-encoding"]).unwrap_err();
        match err {
            CatalogError::DecodeFailed { last, .. } => {
                assert!(last.contains("no-such-encoding"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
