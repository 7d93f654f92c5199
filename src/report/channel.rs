//! A single PRTG result channel.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ChannelUnit;

/// One named value in a result document.
///
/// A channel has either a well-known [`ChannelUnit`] or a free-text custom
/// unit. Setting a custom unit switches the well-known unit to
/// [`ChannelUnit::Custom`], and setting a well-known unit drops any custom
/// one, so exactly one of them is in effect.
///
/// # Example
///
/// ```rust
/// use prtg_rabbitmq::{Channel, ChannelUnit};
///
/// let consumers = Channel::new("Consumers", 3.0).custom_unit("#").hide_chart();
/// assert_eq!(consumers.unit(), ChannelUnit::Custom);
/// assert_eq!(consumers.unit_label(), "#");
/// assert!(!consumers.show_chart);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name, unique within one report.
    #[serde(rename = "Channel")]
    pub name: String,

    #[serde(rename = "Value")]
    pub value: f64,

    #[serde(rename = "Unit", default)]
    unit: ChannelUnit,

    #[serde(
        rename = "CustomUnit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    custom_unit: Option<String>,

    /// Whether PRTG treats the value as a float rather than an integer.
    #[serde(rename = "Float", with = "flag", default = "flag::on")]
    pub float: bool,

    #[serde(rename = "ShowChart", with = "flag", default = "flag::on")]
    pub show_chart: bool,

    #[serde(rename = "ShowTable", with = "flag", default = "flag::on")]
    pub show_table: bool,
}

impl Channel {
    /// Create a channel with all display flags on and no unit set.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            unit: ChannelUnit::Custom,
            custom_unit: None,
            float: true,
            show_chart: true,
            show_table: true,
        }
    }

    /// Use a free-text unit such as `msgs` or `msg/sec`.
    pub fn custom_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = ChannelUnit::Custom;
        self.custom_unit = Some(unit.into());
        self
    }

    /// Use one of PRTG's well-known units.
    pub fn unit_of(mut self, unit: ChannelUnit) -> Self {
        self.unit = unit;
        self.custom_unit = None;
        self
    }

    /// Hide the channel from graphs.
    pub fn hide_chart(mut self) -> Self {
        self.show_chart = false;
        self
    }

    /// Hide the channel from tables.
    pub fn hide_table(mut self) -> Self {
        self.show_table = false;
        self
    }

    /// The well-known unit in effect.
    pub fn unit(&self) -> ChannelUnit {
        self.unit
    }

    /// The custom unit, if one is set.
    pub fn custom_unit_str(&self) -> Option<&str> {
        self.custom_unit.as_deref()
    }

    /// The unit as a reader would see it: the custom unit if set,
    /// otherwise the well-known token.
    pub fn unit_label(&self) -> &str {
        self.custom_unit.as_deref().unwrap_or(self.unit.as_str())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} {}", self.name, self.value, self.unit_label())
    }
}

/// PRTG display flags are `1`/`0` on the wire.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn on() -> bool {
        true
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let c = Channel::new("Total", 5.0);
        assert_eq!(c.name, "Total");
        assert_eq!(c.value, 5.0);
        assert_eq!(c.unit(), ChannelUnit::Custom);
        assert!(c.custom_unit_str().is_none());
        assert!(c.float);
        assert!(c.show_chart);
        assert!(c.show_table);
    }

    #[test]
    fn test_custom_unit_overrides_well_known() {
        let c = Channel::new("Memory", 1.0)
            .unit_of(ChannelUnit::BytesMemory)
            .custom_unit("msgs");
        assert_eq!(c.unit(), ChannelUnit::Custom);
        assert_eq!(c.unit_label(), "msgs");
    }

    #[test]
    fn test_well_known_unit_drops_custom() {
        let c = Channel::new("Memory", 1.0)
            .custom_unit("msgs")
            .unit_of(ChannelUnit::BytesMemory);
        assert_eq!(c.unit(), ChannelUnit::BytesMemory);
        assert!(c.custom_unit_str().is_none());
        assert_eq!(c.unit_label(), "BytesMemory");
    }

    #[test]
    fn test_hidden_flags() {
        let c = Channel::new("Total in", 0.0).hide_chart().hide_table();
        assert!(!c.show_chart);
        assert!(!c.show_table);
        assert!(c.float);
    }

    #[test]
    fn test_display() {
        let c = Channel::new("Rate", 12.5).custom_unit("msg/sec");
        assert_eq!(c.to_string(), "Rate : 12.5 msg/sec");

        let m = Channel::new("Memory", 2048.0).unit_of(ChannelUnit::BytesMemory);
        assert_eq!(m.to_string(), "Memory : 2048 BytesMemory");
    }
}
