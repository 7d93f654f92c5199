//! PRTG result documents.
//!
//! A [`Report`] is what the sensor prints: either an ordered list of
//! [`Channel`]s, or an error flag with a message. Channel order matters, it
//! is the order PRTG shows the channels in.
//!
//! ```text
//! <prtg>
//!   <result>
//!     <Channel>Total</Channel>
//!     <Value>42</Value>
//!     <Unit>Custom</Unit>
//!     <CustomUnit>msgs</CustomUnit>
//!     <Float>1</Float>
//!     <ShowChart>1</ShowChart>
//!     <ShowTable>1</ShowTable>
//!   </result>
//! </prtg>
//! ```

mod channel;
mod unit;

pub use channel::Channel;
pub use unit::ChannelUnit;

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::SensorError;

/// Exit code for a report without an error.
pub const EXIT_OK: u8 = 0;

/// Exit code for argument errors and any failure while collecting.
///
/// PRTG also reserves 1 (warning), 3 (protocol error) and 4 (content error);
/// the sensor never produces those.
pub const EXIT_SYSTEM_ERROR: u8 = 2;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// A complete PRTG result document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename = "prtg")]
pub struct Report {
    /// Channels in display order.
    #[serde(rename = "result", default)]
    pub channels: Vec<Channel>,

    /// Non-zero when the sensor failed; PRTG then ignores the channels.
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<u8>,

    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Report {
    /// Wrap extracted channels into a successful report.
    pub fn success(channels: Vec<Channel>) -> Self {
        Self {
            channels,
            error: None,
            text: None,
        }
    }

    /// Build a failed report carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            channels: Vec::new(),
            error: Some(1),
            text: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some_and(|e| e != 0)
    }

    /// Process exit code matching this report.
    pub fn exit_code(&self) -> u8 {
        if self.is_error() {
            EXIT_SYSTEM_ERROR
        } else {
            EXIT_OK
        }
    }

    /// Look up a channel by name.
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Render the `<prtg>` element, without the XML declaration.
    pub fn to_xml(&self) -> Result<String, SensorError> {
        let mut xml = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut xml, Some("prtg"))?;
        serializer.indent(' ', 2);
        self.serialize(serializer)?;
        Ok(xml)
    }

    /// Parse a document produced by [`Report::to_xml`].
    pub fn from_xml(xml: &str) -> Result<Self, SensorError> {
        quick_xml::de::from_str(xml).map_err(|e| SensorError::Parse(e.to_string()))
    }

    /// Write the full document, declaration included, to `writer`.
    pub fn write_document<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        let xml = self.to_xml()?;
        writeln!(writer, "{}", XML_DECLARATION)?;
        writeln!(writer, "{}", xml)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.text.as_deref().filter(|_| self.is_error()) {
            return write!(f, "Error: {}", text);
        }
        for (i, channel) in self.channels.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", channel)?;
        }
        Ok(())
    }
}
