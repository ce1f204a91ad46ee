//! Accept-header negotiation for the root path.
//!
//! Only two representations exist, `text/html` for people and
//! `application/json` for agents. The default is machine-first: no header,
//! an empty header, or a dead tie all resolve to JSON. HTML is served only
//! when the client's best-matching media range strictly prefers it.

/// Representation chosen for the root path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Json,
    Html,
}

pub const JSON_TYPE: (&str, &str) = ("application", "json");
pub const HTML_TYPE: (&str, &str) = ("text", "html");

#[derive(Debug, Clone)]
struct MediaRange {
    main_type: String,
    sub_type: String,
    quality: f64,
}

/// Specificity of a range against a concrete media type: exact match = 2,
/// `type/*` = 1, `*/*` = 0, no match = None.
fn specificity(range: &MediaRange, candidate: (&str, &str)) -> Option<u8> {
    let (main, sub) = candidate;
    if range.main_type == main && range.sub_type == sub {
        Some(2)
    } else if range.main_type == main && range.sub_type == "*" {
        Some(1)
    } else if range.main_type == "*" && range.sub_type == "*" {
        Some(0)
    } else {
        None
    }
}

fn parse_quality(params: &[&str]) -> f64 {
    for param in params {
        let mut parts = param.splitn(2, '=');
        let key = parts.next().unwrap_or("").trim();
        if !key.eq_ignore_ascii_case("q") {
            continue;
        }
        let value = parts.next().unwrap_or("").trim();
        if let Ok(quality) = value.parse::<f64>() {
            return quality.clamp(0.0, 1.0);
        }
    }
    1.0
}

fn parse_accept(header: &str) -> Vec<MediaRange> {
    header
        .split(',')
        .filter_map(|token| {
            let mut parts = token.split(';');
            let media = parts.next()?.trim();
            if media.is_empty() {
                return None;
            }
            let params: Vec<&str> = parts.collect();
            let mut type_parts = media.splitn(2, '/');
            let main_type = type_parts.next()?.trim().to_ascii_lowercase();
            let sub_type = type_parts.next()?.trim().to_ascii_lowercase();
            if main_type.is_empty() || sub_type.is_empty() {
                return None;
            }
            Some(MediaRange {
                main_type,
                sub_type,
                quality: parse_quality(&params),
            })
        })
        .collect()
}

/// Best `(quality, specificity)` over all ranges matching the candidate.
/// Ranges with quality 0 are explicit refusals and never match.
fn best_match(ranges: &[MediaRange], candidate: (&str, &str)) -> Option<(f64, u8)> {
    let mut best: Option<(f64, u8)> = None;
    for range in ranges {
        if range.quality <= 0.0 {
            continue;
        }
        let Some(spec) = specificity(range, candidate) else {
            continue;
        };
        let score = (range.quality, spec);
        if best.map_or(true, |current| score > current) {
            best = Some(score);
        }
    }
    best
}

/// Pick the root representation for an optional Accept header value.
pub fn negotiate_root(accept: Option<&str>) -> Representation {
    let Some(header) = accept else {
        return Representation::Json;
    };
    let ranges = parse_accept(header);
    if ranges.is_empty() {
        return Representation::Json;
    }

    let html = best_match(&ranges, HTML_TYPE);
    let json = best_match(&ranges, JSON_TYPE);

    match (json, html) {
        (_, None) => Representation::Json,
        (None, Some(_)) => Representation::Html,
        (Some(json_score), Some(html_score)) => {
            // Lexicographic on (quality, specificity); JSON takes ties.
            if html_score > json_score {
                Representation::Html
            } else {
                Representation::Json
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_header_gets_html() {
        assert_eq!(
            negotiate_root(Some("text/html,application/xhtml+xml;q=0.9")),
            Representation::Html
        );
    }

    #[test]
    fn explicit_json_gets_json() {
        assert_eq!(negotiate_root(Some("application/json")), Representation::Json);
    }

    #[test]
    fn wildcard_and_missing_header_default_to_json() {
        assert_eq!(negotiate_root(Some("*/*")), Representation::Json);
        assert_eq!(negotiate_root(None), Representation::Json);
        assert_eq!(negotiate_root(Some("")), Representation::Json);
    }

    #[test]
    fn quality_outweighs_listing_order() {
        assert_eq!(
            negotiate_root(Some("text/html;q=0.3,application/json;q=0.9")),
            Representation::Json
        );
    }

    #[test]
    fn exact_match_beats_wildcard_at_equal_quality() {
        assert_eq!(
            negotiate_root(Some("*/*;q=0.4,text/html;q=0.4")),
            Representation::Html
        );
    }

    #[test]
    fn exact_tie_resolves_machine_first() {
        assert_eq!(
            negotiate_root(Some("text/html;q=0.7,application/json;q=0.7")),
            Representation::Json
        );
    }

    #[test]
    fn zero_quality_html_is_a_refusal() {
        assert_eq!(
            negotiate_root(Some("text/html;q=0,*/*")),
            Representation::Json
        );
    }

    #[test]
    fn type_wildcard_counts_as_partial_specificity() {
        // text/* matches html at specificity 1, */* matches json at 0.
        assert_eq!(negotiate_root(Some("text/*,*/*")), Representation::Html);
    }

    #[test]
    fn malformed_quality_defaults_to_one() {
        assert_eq!(
            negotiate_root(Some("text/html;q=banana,application/json;q=0.8")),
            Representation::Html
        );
    }

    #[test]
    fn quality_above_one_is_clamped() {
        assert_eq!(
            negotiate_root(Some("text/html;q=7,application/json")),
            Representation::Json
        );
    }
}
