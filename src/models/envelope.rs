use serde_json::Value;

use crate::{
    error::Error,
    models::raindrop::{to_raindrop, Raindrop},
    result::Result,
};

fn field<'a>(reply: &'a Value, key: &str) -> Result<&'a Value> {
    reply
        .get(key)
        .ok_or_else(|| Error::mapping(format!("response is missing `{key}`")))
}

/// Decodes `{"item": {...}}`.
pub(crate) fn item(reply: &Value) -> Result<Raindrop> {
    to_raindrop(field(reply, "item")?)
}

/// Decodes `{"items": [...]}`, keeping the server's order.
pub(crate) fn items(reply: &Value) -> Result<Vec<Raindrop>> {
    field(reply, "items")?
        .as_array()
        .ok_or_else(|| Error::mapping("`items` is not an array"))?
        .iter()
        .map(to_raindrop)
        .collect()
}

/// Decodes `{"result": bool}`.
pub(crate) fn result(reply: &Value) -> Result<bool> {
    field(reply, "result")?
        .as_bool()
        .ok_or_else(|| Error::mapping("`result` is not a boolean"))
}

/// Decodes a bulk update reply into a modified count.
///
/// The service answers with either `{"modified": n}` or `{"result": bool}`.
/// A bare `true` counts every id sent in the chunk.
pub(crate) fn modified(reply: &Value, sent: usize) -> Result<u64> {
    if let Some(modified) = reply.get("modified") {
        return modified
            .as_u64()
            .ok_or_else(|| Error::mapping("`modified` is not a count"));
    }
    Ok(if result(reply)? { sent as u64 } else { 0 })
}
