use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Channel – one of the six named data slots
// ---------------------------------------------------------------------------

/// A named input channel. Declaration order is the canonical order used for
/// layout, iteration and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Channel {
    #[serde(rename = "DARK_ref")]
    DarkRef,
    #[serde(rename = "DARK_sig")]
    DarkSig,
    #[serde(rename = "ref")]
    Ref,
    #[serde(rename = "sig")]
    Sig,
    #[serde(rename = "ref_p")]
    RefP,
    #[serde(rename = "sig_p")]
    SigP,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::DarkRef,
        Channel::DarkSig,
        Channel::Ref,
        Channel::Sig,
        Channel::RefP,
        Channel::SigP,
    ];

    /// The name used in labels and saved documents.
    pub fn name(self) -> &'static str {
        match self {
            Channel::DarkRef => "DARK_ref",
            Channel::DarkSig => "DARK_sig",
            Channel::Ref => "ref",
            Channel::Sig => "sig",
            Channel::RefP => "ref_p",
            Channel::SigP => "sig_p",
        }
    }

    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Dark channels hold the baseline subtracted from the measurements.
    pub fn is_dark(self) -> bool {
        matches!(self, Channel::DarkRef | Channel::DarkSig)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ChannelTexts – raw editor contents
// ---------------------------------------------------------------------------

/// Raw text of every channel. All six channels are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTexts {
    texts: BTreeMap<Channel, String>,
}

impl Default for ChannelTexts {
    fn default() -> Self {
        Self {
            texts: Channel::ALL.into_iter().map(|c| (c, String::new())).collect(),
        }
    }
}

impl ChannelTexts {
    pub fn get(&self, channel: Channel) -> &str {
        self.texts.get(&channel).map(String::as_str).unwrap_or("")
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut String {
        self.texts.entry(channel).or_default()
    }

    pub fn set(&mut self, channel: Channel, text: impl Into<String>) {
        self.texts.insert(channel, text.into());
    }

    /// Iterate `(channel, text)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &str)> {
        self.texts.iter().map(|(c, t)| (*c, t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_name(channel.name()), Some(channel));
        }
        assert_eq!(Channel::from_name("dark_ref"), None);
        assert_eq!(Channel::from_name(""), None);
    }

    #[test]
    fn only_first_two_are_dark() {
        let dark: Vec<Channel> = Channel::ALL.into_iter().filter(|c| c.is_dark()).collect();
        assert_eq!(dark, vec![Channel::DarkRef, Channel::DarkSig]);
    }

    #[test]
    fn texts_start_empty_and_iterate_in_order() {
        let mut texts = ChannelTexts::default();
        texts.set(Channel::SigP, "1 2");
        texts.get_mut(Channel::DarkRef).push_str("0 0");

        let order: Vec<Channel> = texts.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Channel::ALL.to_vec());
        assert_eq!(texts.get(Channel::SigP), "1 2");
        assert_eq!(texts.get(Channel::DarkRef), "0 0");
        assert_eq!(texts.get(Channel::Ref), "");
    }

    #[test]
    fn serializes_as_channel_name() {
        let json = serde_json::to_string(&Channel::RefP).unwrap();
        assert_eq!(json, "\"ref_p\"");
    }
}
