use std::ops::Deref;

use serde::Deserialize;

/// A duration written as whitespace separated parts like `"1d 2h 3m 4s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("Invalid duration"))
    }
}

fn parse(s: &str) -> Option<std::time::Duration> {
    let mut out = std::time::Duration::ZERO;
    for part in s.split_whitespace() {
        let (digits, factor) = match part.char_indices().last()? {
            (i, 's') => (&part[..i], 1),
            (i, 'm') => (&part[..i], 60),
            (i, 'h') => (&part[..i], 3600),
            (i, 'd') => (&part[..i], 24 * 3600),
            _ => (part, 1),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = digits.parse::<u64>().ok()?;
        let seconds = value.checked_mul(factor)?;
        out = out.checked_add(std::time::Duration::from_secs(seconds))?;
    }
    Some(out)
}
