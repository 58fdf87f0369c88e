//! Test utilities and shared test helpers for Sentinel.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::io;
use std::sync::{Arc, Mutex, Once};
use tracing_subscriber::{fmt, fmt::MakeWriter, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Collects formatted log output in memory so tests can assert on it.
///
/// Install with `tracing::subscriber::set_default(capture.subscriber())` inside a
/// single-threaded test; the returned guard scopes the capture.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// A subscriber that writes every event, at any level, into this capture.
    #[must_use]
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish()
    }

    /// Everything captured so far.
    #[must_use]
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Whether any captured line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

/// Writer handed out by [`LogCapture`].
#[derive(Debug)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::{ChannelId, ChannelInfo, GuildId, RoleId, RoleInfo, UserId};

    /// Create a test guild ID.
    pub fn test_guild_id() -> GuildId {
        GuildId(111_111_111_111_111_111)
    }

    /// Create a test channel ID.
    pub fn test_channel_id() -> ChannelId {
        ChannelId(123_456_789_012_345_678)
    }

    /// Create a test user ID.
    pub fn test_user_id() -> UserId {
        UserId(987_654_321_098_765_432)
    }

    /// Roles of the test guild in platform order, default role first.
    pub fn test_roles() -> Vec<RoleInfo> {
        let guild = test_guild_id();
        vec![
            RoleInfo {
                id: guild.everyone_role(),
                name: "@everyone".to_string(),
                position: 0,
            },
            RoleInfo {
                id: RoleId(200),
                name: "Member".to_string(),
                position: 1,
            },
            RoleInfo {
                id: RoleId(300),
                name: "Moderator".to_string(),
                position: 2,
            },
        ]
    }

    /// Text channels of the test guild in platform order.
    pub fn test_channels() -> Vec<ChannelInfo> {
        ["general", "bot-logs", "announcements"]
            .iter()
            .zip(0u16..)
            .map(|(name, position)| ChannelInfo {
                id: ChannelId(500 + u64::from(position)),
                name: (*name).to_string(),
                position,
            })
            .collect()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    use std::collections::HashMap;

    /// The minimal variable set for a valid configuration.
    pub fn minimal_env() -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("BOT_TOKEN".to_string(), "test_token".to_string());
        env
    }

    /// A fully populated variable set.
    pub fn full_env() -> HashMap<String, String> {
        let mut env = minimal_env();
        for (key, value) in [
            ("GUILD_ID", "111111111111111111"),
            ("OWNER_ID", "987654321098765432"),
            ("AUDIT_ENABLED", "true"),
            ("AUDIT_CHANNEL", "mod-log"),
            ("AUDIT_EXCLUDE_OWNER", "yes"),
            ("ERROR_RELAY_ENABLED", "off"),
            ("ERROR_CHANNEL", "bot-errors"),
            ("LOG_LEVEL", "debug"),
            ("LOG_DIR", "logs"),
        ] {
            env.insert(key.to_string(), value.to_string());
        }
        env
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::{ChannelId, UserId};
    use proptest::prelude::*;

    /// Strategy for generating valid Discord channel IDs.
    pub fn channel_id_strategy() -> impl Strategy<Value = ChannelId> {
        (100_000_000_000_000_000u64..=999_999_999_999_999_999u64).prop_map(ChannelId)
    }

    /// Strategy for generating valid Discord user IDs.
    pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
        (100_000_000_000_000_000u64..=999_999_999_999_999_999u64).prop_map(UserId)
    }

    /// Strategy for generating valid username strings.
    pub fn username_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9_.]{2,32}"
    }
}
