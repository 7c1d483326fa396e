use std::fmt;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::catalog::error::CatalogError;

/// The three columns every catalog must supply, whatever the file calls them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticKey {
    Name,
    Price,
    Image,
}

impl fmt::Display for SemanticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SemanticKey::Name => "name",
            SemanticKey::Price => "price",
            SemanticKey::Image => "image",
        };
        f.write_str(s)
    }
}

/// Accepted header spellings for each semantic key, all lowercase.
/// Matching is exact (no substring matching) to avoid false positives on
/// unrelated columns.
pub struct Lexicon {
    pub name: &'static [&'static str],
    pub price: &'static [&'static str],
    pub image: &'static [&'static str],
}

impl Lexicon {
    fn aliases(&self, key: SemanticKey) -> &'static [&'static str] {
        match key {
            SemanticKey::Name => self.name,
            SemanticKey::Price => self.price,
            SemanticKey::Image => self.image,
        }
    }
}

/// Korean and English spellings seen in classroom catalogs.
pub static LEXICON: Lazy<Lexicon> = Lazy::new(|| Lexicon {
    name: &[
        "name",
        "product",
        "product_name",
        "title",
        "item",
        "품명",
        "상품명",
        "제품명",
        "상품",
    ],
    price: &[
        "price",
        "cost",
        "amount",
        "unit_price",
        "가격",
        "단가",
        "금액",
    ],
    image: &[
        "image",
        "image_url",
        "img",
        "img_url",
        "photo",
        "picture",
        "이미지",
        "사진",
    ],
});

/// One resolved column: the header exactly as the file spells it, plus its
/// left-to-right position in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedColumn {
    pub header: String,
    pub index: usize,
}

/// Which original headers supply name/price/image. Valid by construction:
/// every header here came from the table that was inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub name: MappedColumn,
    pub price: MappedColumn,
    pub image: MappedColumn,
}

/// Guess which columns carry name/price/image by comparing lowercased
/// headers against the fixed alias sets. The leftmost matching column wins
/// for each key; aliases have no priority among themselves. Fails with
/// `MissingColumns` listing every key that found no match.
pub fn infer_mapping(headers: &[String]) -> Result<ColumnMapping, CatalogError> {
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let find = |key: SemanticKey| -> Option<MappedColumn> {
        let aliases = LEXICON.aliases(key);
        lowered
            .iter()
            .position(|h| aliases.contains(&h.as_str()))
            .map(|index| MappedColumn {
                header: headers[index].clone(),
                index,
            })
    };

    let name = find(SemanticKey::Name);
    let price = find(SemanticKey::Price);
    let image = find(SemanticKey::Image);

    match (name, price, image) {
        (Some(name), Some(price), Some(image)) => {
            debug!(
                name = %name.header,
                price = %price.header,
                image = %image.header,
                "inferred column mapping"
            );
            Ok(ColumnMapping { name, price, image })
        }
        (name, price, image) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push(SemanticKey::Name);
            }
            if price.is_none() {
                missing.push(SemanticKey::Price);
            }
            if image.is_none() {
                missing.push(SemanticKey::Image);
            }
            Err(CatalogError::MissingColumns {
                missing,
                headers: headers.to_vec(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(hs: &[&str]) -> Vec<String> {
        hs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn maps_english_aliases() {
        let m = infer_mapping(&headers(&["product_name", "cost", "img"])).unwrap();
        assert_eq!(m.name.header, "product_name");
        assert_eq!(m.price.header, "cost");
        assert_eq!(m.image.header, "img");
        assert_eq!((m.name.index, m.price.index, m.image.index), (0, 1, 2));
    }

    #[test]
    fn maps_korean_aliases_case_insensitively() {
        let m = infer_mapping(&headers(&["품명", "가격", "IMAGE_URL"])).unwrap();
        assert_eq!(m.name.header, "품명");
        assert_eq!(m.price.header, "가격");
        assert_eq!(m.image.header, "IMAGE_URL");
    }

    #[test]
    fn leftmost_column_wins_on_ties() {
        // Both "name" and "title" are name aliases; the leftmost column
        // must win regardless of alias order in the lexicon.
        let m = infer_mapping(&headers(&["title", "name", "price", "image"])).unwrap();
        assert_eq!(m.name.header, "title");
        assert_eq!(m.name.index, 0);
    }

    #[test]
    fn no_substring_matching() {
        // "nickname" contains "name" but must not match.
        let err = infer_mapping(&headers(&["nickname", "price", "image"])).unwrap_err();
        match err {
            CatalogError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec![SemanticKey::Name]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_image_is_reported() {
        let err = infer_mapping(&headers(&["title", "price"])).unwrap_err();
        match err {
            CatalogError::MissingColumns { missing, headers } => {
                assert_eq!(missing, vec![SemanticKey::Image]);
                assert_eq!(headers, vec!["title", "price"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn all_keys_missing_are_listed() {
        let err = infer_mapping(&headers(&["a", "b"])).unwrap_err();
        match err {
            CatalogError::MissingColumns { missing, .. } => {
                assert_eq!(
                    missing,
                    vec![SemanticKey::Name, SemanticKey::Price, SemanticKey::Image]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mapped_headers_belong_to_input() {
        let hs = headers(&["상품명", "단가", "사진", "etc"]);
        let m = infer_mapping(&hs).unwrap();
        for col in [&m.name, &m.price, &m.image] {
            assert!(hs.contains(&col.header));
            assert_eq!(hs[col.index], col.header);
        }
    }
}
