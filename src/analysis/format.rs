//! Human-readable rendering of listing collections.

use crate::analysis::listing::ListingCollection;

/// Placeholder for a record field that is absent.
pub const MISSING: &str = "N/A";

/// Header used by [`format_listing_collection`].
///
/// Says "listings" rather than naming a rental platform, since the listing
/// key is configurable and payloads may come from any source. Use
/// [`format_listing_collection_with_title`] for a different header.
pub const DEFAULT_TITLE: &str = "Top listings in Dublin:";

/// Render `collection` under the default header.
///
/// # Example
/// ```rust
/// use agentdeck::analysis::{format::format_listing_collection, listing::validate_schema};
///
/// let collection = validate_schema(r#"{"airbnbs": []}"#, "airbnbs").unwrap();
/// assert_eq!(format_listing_collection(&collection), "Top listings in Dublin:\n");
/// ```
pub fn format_listing_collection(collection: &ListingCollection) -> String {
    format_listing_collection_with_title(collection, DEFAULT_TITLE)
}

/// Render `collection` as a numbered block per record.
///
/// Absent fields render as [`MISSING`]; this never fails, even for payloads
/// that skipped validation.
pub fn format_listing_collection_with_title(collection: &ListingCollection, title: &str) -> String {
    let mut output = vec![format!("{}\n", title)];

    for (idx, record) in collection.records().enumerate() {
        let field = |name: &str| {
            record
                .field(name)
                .map(|v| v.into_owned())
                .unwrap_or_else(|| MISSING.to_string())
        };
        output.push(format!("\n{}. {}", idx + 1, field("name")));
        output.push(format!("   Location: {}", field("location")));
        output.push(format!("   Price: {}", field("price")));
        output.push(format!("   Description: {}", field("description")));
        output.push(format!("   Recommended because: {}", field("reason")));
    }

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::listing::validate_schema;
    use serde_json::json;

    #[test]
    fn empty_collection_renders_header_only() {
        let collection = validate_schema(r#"{"airbnbs": []}"#, "airbnbs").unwrap();
        assert_eq!(format_listing_collection(&collection), "Top listings in Dublin:\n");
    }

    #[test]
    fn records_are_numbered_in_order() {
        let payload = json!({ "airbnbs": [
            { "name": "Canal Loft", "description": "Loft by the canal", "reason": "New listing",
              "price": "€180", "location": "Portobello" },
            { "name": "Howth Cottage", "description": "Sea views", "reason": "Top rated",
              "price": "€150", "location": "Howth" }
        ]});
        let collection = validate_schema(&payload.to_string(), "airbnbs").unwrap();
        let text = format_listing_collection_with_title(&collection, "Stays:");

        let expected = "Stays:\n\n\
            \n1. Canal Loft\n   Location: Portobello\n   Price: €180\n   Description: Loft by the canal\n   Recommended because: New listing\n\
            \n2. Howth Cottage\n   Location: Howth\n   Price: €150\n   Description: Sea views\n   Recommended because: Top rated";
        assert_eq!(text, expected);
    }

    #[test]
    fn missing_price_renders_placeholder() {
        let collection = ListingCollection::unchecked(
            "airbnbs",
            json!({ "airbnbs": [{ "name": "A", "description": "d", "reason": "r", "location": "l" }] }),
        );
        let text = format_listing_collection(&collection);
        assert!(text.contains("   Price: N/A"));
        assert!(text.contains("1. A"));
    }

    #[test]
    fn absent_key_renders_header_only() {
        let collection = ListingCollection::unchecked("airbnbs", json!({ "trends": [] }));
        assert_eq!(format_listing_collection(&collection), "Top listings in Dublin:\n");
    }
}
