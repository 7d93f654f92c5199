//! Mapping management API payloads onto PRTG channels.
//!
//! The management API leaves out whole sub-objects (notably `message_stats`)
//! until a resource has seen traffic, so every lookup here falls back to 0
//! instead of failing. The channel set and order for each resource kind is
//! fixed.

use serde_json::Value;

use crate::report::{Channel, ChannelUnit};
use crate::{ResourceKind, SensorError};

const MSGS: &str = "msgs";
const MSG_PER_SEC: &str = "msg/sec";
const COUNT: &str = "#";

/// Extract the channels for `kind` from a management API payload.
///
/// `kind` is matched case-insensitively; only an unknown kind is an error.
///
/// # Example
///
/// ```rust
/// use prtg_rabbitmq::extract::extract;
/// use serde_json::json;
///
/// let channels = extract(&json!({ "messages": 4 }), "QUEUE").unwrap();
/// assert_eq!(channels[0].name, "Total");
/// assert_eq!(channels[0].value, 4.0);
///
/// assert!(extract(&json!({}), "topic").is_err());
/// ```
pub fn extract(payload: &Value, kind: &str) -> Result<Vec<Channel>, SensorError> {
    let kind: ResourceKind = kind.parse()?;
    Ok(extract_kind(payload, kind))
}

/// Extract the channels for an already parsed resource kind.
pub fn extract_kind(payload: &Value, kind: ResourceKind) -> Vec<Channel> {
    match kind {
        ResourceKind::Queue => queue_channels(payload),
        ResourceKind::Exchange => exchange_channels(payload),
    }
}

/// Channels for `GET /api/queues/{vhost}/{name}`.
pub fn queue_channels(queue: &Value) -> Vec<Channel> {
    vec![
        Channel::new("Total", number_at(queue, &["messages"])).custom_unit(MSGS),
        Channel::new("Unacknowledged", number_at(queue, &["messages_unacknowledged"]))
            .custom_unit(MSGS),
        Channel::new("Rate", number_at(queue, &["messages_details", "rate"]))
            .custom_unit(MSG_PER_SEC),
        // Lives under message_stats, unlike "Rate" above.
        Channel::new(
            "Publish Rate",
            number_at(queue, &["message_stats", "publish_details", "rate"]),
        )
        .custom_unit(MSG_PER_SEC),
        Channel::new("Consumers", number_at(queue, &["consumers"]))
            .custom_unit(COUNT)
            .hide_chart(),
        Channel::new("Memory", number_at(queue, &["memory"]))
            .unit_of(ChannelUnit::BytesMemory)
            .hide_chart()
            .hide_table(),
        Channel::new(
            "Acknowledge",
            number_at(queue, &["message_stats", "ack_details", "rate"]),
        )
        .custom_unit(MSG_PER_SEC),
    ]
}

/// Channels for `GET /api/exchanges/{vhost}/{name}`.
pub fn exchange_channels(exchange: &Value) -> Vec<Channel> {
    vec![
        Channel::new(
            "Out",
            number_at(exchange, &["message_stats", "publish_out_details", "rate"]),
        )
        .custom_unit(MSG_PER_SEC),
        Channel::new(
            "In",
            number_at(exchange, &["message_stats", "publish_in_details", "rate"]),
        )
        .custom_unit(MSG_PER_SEC),
        Channel::new("Destinations", count_at(exchange, &["outgoing"]) as f64)
            .custom_unit(COUNT)
            .hide_chart(),
        Channel::new("Total in", number_at(exchange, &["message_stats", "publish_in"]))
            .custom_unit(MSGS)
            .hide_chart()
            .hide_table(),
        Channel::new("Total out", number_at(exchange, &["message_stats", "publish_out"]))
            .custom_unit(MSGS)
            .hide_chart()
            .hide_table(),
    ]
}

/// Walk `path` through nested objects and read a number.
///
/// Returns 0 if any segment is missing, an intermediate value is not an
/// object, or the leaf is not a number.
pub fn number_at(value: &Value, path: &[&str]) -> f64 {
    lookup(value, path).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Walk `path` and return the length of the array found there, or 0.
pub fn count_at(value: &Value, path: &[&str]) -> usize {
    lookup(value, path)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |node, segment| node.as_object()?.get(*segment))
}
