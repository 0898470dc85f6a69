use crate::constants::{ANALYTICS, NOTIFICATIONS, USERS};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Which modules the host mounts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ModuleSet: u32 {
        const USERS = 1 << 0;
        const ANALYTICS = 1 << 1;
        const NOTIFICATIONS = 1 << 2;

        const ALL = Self::USERS.bits() | Self::ANALYTICS.bits() | Self::NOTIFICATIONS.bits();
    }
}

impl ModuleSet {
    /// Module names in mount order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        [(Self::USERS, USERS), (Self::ANALYTICS, ANALYTICS), (Self::NOTIFICATIONS, NOTIFICATIONS)]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl Default for ModuleSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Unknown names map to the empty set.
impl From<&str> for ModuleSet {
    fn from(s: &str) -> Self {
        s.split(',').map(str::trim).fold(Self::empty(), |set, name| {
            set | match name {
                USERS => Self::USERS,
                ANALYTICS => Self::ANALYTICS,
                NOTIFICATIONS => Self::NOTIFICATIONS,
                "all" | "*" => Self::ALL,
                _ => Self::empty(),
            }
        })
    }
}

impl From<u32> for ModuleSet {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for ModuleSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.names())
    }
}

/// Accepts raw bits, a list of names, or one comma separated string
/// (the form environment overrides arrive in).
impl<'de> Deserialize<'de> for ModuleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bits(u32),
            Names(Vec<String>),
            Joined(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bits(bits) => Self::from(bits),
            Repr::Names(names) => names.iter().map(|n| Self::from(n.as_str())).collect(),
            Repr::Joined(joined) => Self::from(joined.as_str()),
        })
    }
}
