//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapses identifiers in a request path so spans and metric labels stay
/// low-cardinality, e.g. `/carts/<uuid>/items/<uuid>` becomes
/// `/carts/{uuid}/items/{uuid}`.
pub(super) fn normalise_route(path: &str) -> String {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    if segments.iter().all(|segment| segment.is_empty()) {
        return "/".to_owned();
    }

    let mut normalised = String::new();
    let mut previous = "";

    for segment in segments {
        normalised.push('/');

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if previous == "codes" {
            normalised.push_str("{code}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}
