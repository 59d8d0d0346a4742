use serde_json::{Value, json};
use trellis::StyleDescriptor;

/// Builds a descriptor from a camelCase JSON object.
pub fn style(value: Value) -> StyleDescriptor {
    StyleDescriptor::from_value(value).unwrap_or_else(|e| panic!("invalid test style: {}", e))
}

pub fn empty() -> StyleDescriptor {
    StyleDescriptor::default()
}

pub fn grid_container(columns: &str) -> StyleDescriptor {
    style(json!({ "display": "grid", "gridTemplateColumns": columns }))
}

pub fn flex_container(direction: &str, gap: f32) -> StyleDescriptor {
    style(json!({ "display": "flex", "flexDirection": direction, "gap": gap }))
}

pub fn absolute_at(left: Value, top: Value) -> StyleDescriptor {
    style(json!({ "position": "absolute", "left": left, "top": top }))
}
