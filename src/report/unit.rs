//! Well-known PRTG channel units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A unit PRTG understands natively.
///
/// `Custom` means the channel carries a free-text unit in `CustomUnit`
/// instead. The token of each variant is what PRTG expects in `<Unit>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelUnit {
    #[default]
    Custom,
    BytesBandwidth,
    BytesMemory,
    BytesDisk,
    Temperature,
    Percent,
    TimeResponse,
    TimeSeconds,
    Count,
    Cpu,
    BytesFile,
    SpeedDisk,
    SpeedNet,
    TimeHours,
}

impl ChannelUnit {
    /// All units, in PRTG's documented order.
    pub const ALL: [ChannelUnit; 14] = [
        ChannelUnit::Custom,
        ChannelUnit::BytesBandwidth,
        ChannelUnit::BytesMemory,
        ChannelUnit::BytesDisk,
        ChannelUnit::Temperature,
        ChannelUnit::Percent,
        ChannelUnit::TimeResponse,
        ChannelUnit::TimeSeconds,
        ChannelUnit::Count,
        ChannelUnit::Cpu,
        ChannelUnit::BytesFile,
        ChannelUnit::SpeedDisk,
        ChannelUnit::SpeedNet,
        ChannelUnit::TimeHours,
    ];

    /// The token written to the result document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelUnit::Custom => "Custom",
            ChannelUnit::BytesBandwidth => "BytesBandwidth",
            ChannelUnit::BytesMemory => "BytesMemory",
            ChannelUnit::BytesDisk => "BytesDisk",
            ChannelUnit::Temperature => "Temperature",
            ChannelUnit::Percent => "Percent",
            ChannelUnit::TimeResponse => "TimeResponse",
            ChannelUnit::TimeSeconds => "TimeSeconds",
            ChannelUnit::Count => "Count",
            ChannelUnit::Cpu => "CPU (*)",
            ChannelUnit::BytesFile => "BytesFile",
            ChannelUnit::SpeedDisk => "SpeedDisk",
            ChannelUnit::SpeedNet => "SpeedNet",
            ChannelUnit::TimeHours => "TimeHours",
        }
    }
}

impl fmt::Display for ChannelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| format!("unknown channel unit '{}'", s))
    }
}

impl Serialize for ChannelUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChannelUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_parse_back() {
        for unit in ChannelUnit::ALL {
            assert_eq!(unit.as_str().parse::<ChannelUnit>(), Ok(unit));
        }
    }

    #[test]
    fn test_cpu_token() {
        assert_eq!(ChannelUnit::Cpu.to_string(), "CPU (*)");
    }

    #[test]
    fn test_unknown_token() {
        assert!("Bananas".parse::<ChannelUnit>().is_err());
    }
}
