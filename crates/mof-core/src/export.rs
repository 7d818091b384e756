//! Export: schema.org `ItemList` of the directory as JSON-LD.
//!
//! Each record becomes a `LocalBusiness` item; `geo` and `url` are emitted
//! only when the record has them.

use crate::types::Record;
use serde_json::{json, Map, Value};

/// Build the `ItemList` document for `records`, positions starting at 1.
pub fn item_list(records: &[Record]) -> Value {
    let items: Vec<Value> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": local_business(r),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": "Meilleurs Ouvriers de France - Métiers de bouche",
        "numberOfItems": records.len(),
        "itemListElement": items,
    })
}

fn local_business(r: &Record) -> Value {
    let description = match r.year {
        Some(year) => format!("{} - Meilleur Ouvrier de France {year}", r.specialty),
        None => format!("{} - Meilleur Ouvrier de France", r.specialty),
    };

    let mut item = Map::new();
    item.insert("@type".into(), json!("LocalBusiness"));
    item.insert("name".into(), json!(r.name));
    item.insert("description".into(), json!(description));
    item.insert(
        "address".into(),
        json!({
            "@type": "PostalAddress",
            "streetAddress": r.address.as_deref().unwrap_or(""),
            "addressCountry": "FR",
        }),
    );
    if let Some(c) = r.coordinates {
        item.insert(
            "geo".into(),
            json!({
                "@type": "GeoCoordinates",
                "latitude": c.lat,
                "longitude": c.lon,
            }),
        );
    }
    if let Some(ref url) = r.website {
        item.insert("url".into(), json!(url));
    }
    Value::Object(item)
}
