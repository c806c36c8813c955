use std::sync::LazyLock;

use regex::Regex;

use pullboard_types::models::{AttrCode, Attributes};

// Anchored at the start only: the upstream site sometimes glues a suffix
// onto a semantic token ("get2x") and the leading part still counts.
static CLASS_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(zo|bu|ca|sk|sw|get)(\d+)").expect("class token pattern is valid")
});

static IMAGE_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([^/]+)\.jpg$").expect("image stem pattern is valid"));

/// Decode attribute codes from a row's class tokens.
///
/// Tokens that are not `code + digits` are styling noise and are skipped.
/// When a code repeats, the last token wins.
pub fn parse_tokens<'a, I>(tokens: I) -> Attributes
where
    I: IntoIterator<Item = &'a str>,
{
    let mut attrs = Attributes::new();

    for token in tokens {
        let Some(caps) = CLASS_TOKEN.captures(token) else {
            continue;
        };
        let (Ok(code), Ok(value)) = (caps[1].parse::<AttrCode>(), caps[2].parse::<u32>()) else {
            continue;
        };
        attrs.insert(code, value);
    }

    attrs
}

/// Item id: the filename stem of a `.jpg` image url.
pub fn item_id_from_url(url: &str) -> Option<&str> {
    IMAGE_STEM
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_tokens_become_attributes() {
        let attrs = parse_tokens(["get2", "zo5", "bu3", "somestyle"]);

        let expected: Attributes = [(AttrCode::Get, 2), (AttrCode::Zo, 5), (AttrCode::Bu, 3)]
            .into_iter()
            .collect();
        assert_eq!(attrs, expected);
    }

    #[test]
    fn every_code_is_recognised() {
        let attrs = parse_tokens(["zo1", "bu2", "ca3", "sk4", "sw5", "get6"]);
        assert_eq!(attrs.len(), 6);
        assert_eq!(attrs[&AttrCode::Sw], 5);
    }

    #[test]
    fn tokens_without_digits_are_ignored() {
        assert!(parse_tokens(["zo", "get", "sword", "tr-odd", ""]).is_empty());
    }

    #[test]
    fn trailing_text_after_digits_is_tolerated() {
        let attrs = parse_tokens(["get2x"]);
        assert_eq!(attrs.get(&AttrCode::Get), Some(&2));
    }

    #[test]
    fn overflowing_values_are_skipped() {
        assert!(parse_tokens(["zo99999999999999"]).is_empty());
    }

    #[test]
    fn repeated_code_keeps_last_value() {
        let attrs = parse_tokens(["ca1", "ca4"]);
        assert_eq!(attrs.get(&AttrCode::Ca), Some(&4));
    }

    #[test]
    fn id_is_the_jpg_stem() {
        assert_eq!(
            item_id_from_url("https://img.example.jp/item/1234abc.jpg"),
            Some("1234abc")
        );
    }

    #[test]
    fn non_jpg_urls_have_no_id() {
        assert_eq!(item_id_from_url("https://img.example.jp/item/1234abc.png"), None);
        assert_eq!(item_id_from_url("https://img.example.jp/item/1234abc.jpg?v=2"), None);
        assert_eq!(item_id_from_url("1234abc.jpg"), None);
    }
}
