//! Common type definitions and newtype wrappers for domain modeling.

use std::fmt;

/// Defines a Discord snowflake newtype with `Display` and `From<u64>`.
macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Whether this id is the unset sentinel value `0`.
            #[must_use]
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

snowflake!(
    /// A Discord channel ID.
    ChannelId
);
snowflake!(
    /// A Discord guild ID.
    GuildId
);
snowflake!(
    /// A Discord user ID.
    UserId
);
snowflake!(
    /// A Discord role ID.
    RoleId
);

impl ChannelId {
    /// Renders the channel as a clickable mention.
    #[must_use]
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}

impl GuildId {
    /// The id of the guild's default (`@everyone`) role, which shares the guild's id.
    #[must_use]
    pub const fn everyone_role(self) -> RoleId {
        RoleId(self.0)
    }
}

/// A guild role as seen by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    /// Role id.
    pub id: RoleId,
    /// Display name.
    pub name: String,
    /// Position in the guild's role hierarchy, lowest first.
    pub position: u16,
}

/// A guild text channel as seen by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Channel id.
    pub id: ChannelId,
    /// Channel name, without the leading `#`.
    pub name: String,
    /// Sort position in the channel list.
    pub position: u16,
}

/// The fields shown by `/serverinfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    /// Guild id.
    pub id: GuildId,
    /// Guild name.
    pub name: String,
    /// Approximate member count.
    pub member_count: u64,
    /// Icon URL, if the guild has one.
    pub icon_url: Option<String>,
}

/// The fields shown by `/userinfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// User id.
    pub id: UserId,
    /// Username.
    pub name: String,
    /// Legacy four-digit discriminator; `None` for migrated usernames.
    pub discriminator: Option<u16>,
    /// Avatar URL, falling back to the default avatar.
    pub avatar_url: String,
}

impl UserSummary {
    /// The discriminator as Discord clients display it (`"0"` once migrated).
    #[must_use]
    pub fn discriminator_display(&self) -> String {
        self.discriminator
            .map_or_else(|| "0".to_string(), |d| format!("{d:04}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_mention_format() {
        assert_eq!(ChannelId(42).mention(), "<#42>");
    }

    #[test]
    fn everyone_role_shares_guild_id() {
        assert_eq!(GuildId(7).everyone_role(), RoleId(7));
    }

    #[test]
    fn discriminator_display() {
        let mut user = UserSummary {
            id: UserId(1),
            name: "alice".into(),
            discriminator: Some(7),
            avatar_url: String::new(),
        };
        assert_eq!(user.discriminator_display(), "0007");

        user.discriminator = None;
        assert_eq!(user.discriminator_display(), "0");
    }

    #[test]
    fn unset_ids() {
        assert!(GuildId::default().is_unset());
        assert!(!GuildId(1).is_unset());
    }
}
