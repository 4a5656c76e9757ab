//! Query assembly: registry pairs to a percent-encoded query string.

use url::form_urlencoded;

/// Encode pairs as `name=value&name=value...`, preserving pair order.
/// Multi-valued parameters arrive here already flattened to repeated keys.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Append an encoded query to a path, respecting a query the path may
/// already carry.
pub fn append_query(path: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, encode_query(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn encodes_in_pair_order() {
        let encoded = encode_query(&pairs(&[("region", "eu"), ("year", "2021")]));
        assert_eq!(encoded, "region=eu&year=2021");
    }

    #[test]
    fn repeats_keys_for_multi_values() {
        let encoded = encode_query(&pairs(&[("tags", "b"), ("tags", "a"), ("year", "2021")]));
        assert_eq!(encoded, "tags=b&tags=a&year=2021");
    }

    #[test]
    fn escapes_reserved_characters() {
        let encoded = encode_query(&pairs(&[("q", "a&b=c"), ("note", "hi there")]));
        assert_eq!(encoded, "q=a%26b%3Dc&note=hi+there");
    }

    #[test]
    fn empty_sentinel_still_emits_the_key() {
        let encoded = encode_query(&pairs(&[("tags", "")]));
        assert_eq!(encoded, "tags=");
    }

    #[test]
    fn append_handles_existing_query() {
        assert_eq!(append_query("/data", &pairs(&[("a", "1")])), "/data?a=1");
        assert_eq!(append_query("/data?v=2", &pairs(&[("a", "1")])), "/data?v=2&a=1");
        assert_eq!(append_query("/data", &[]), "/data");
    }
}
