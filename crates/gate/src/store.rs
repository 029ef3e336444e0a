use {anyhow::Result, async_trait::async_trait};

/// Duty state of a single channel.
///
/// `Unset` means the channel was never toggled. The gate treats it as on
/// duty, but the variant is kept distinct so "no record" stays observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DutyState {
    /// No record exists for the channel.
    #[default]
    Unset,
    /// A record exists with the off-duty flag cleared.
    Active,
    /// A record exists with the off-duty flag set.
    OffDuty,
}

impl DutyState {
    /// State recorded by an existing record with the given flag.
    #[must_use]
    pub fn from_flag(off_duty: bool) -> Self {
        if off_duty {
            Self::OffDuty
        } else {
            Self::Active
        }
    }

    /// Collapse to the effective flag: only `OffDuty` suppresses.
    #[must_use]
    pub fn is_off_duty(self) -> bool {
        matches!(self, Self::OffDuty)
    }
}

/// Persistent storage for per-channel duty state, keyed by
/// `(platform, channel_id)`.
///
/// At most one record per channel ever exists; writes are upserts. A missing
/// record is a valid state, not a failure.
#[async_trait]
pub trait DutyStore: Send + Sync {
    /// Write or overwrite the record for a channel. Idempotent.
    async fn set_off_duty(&self, platform: &str, channel_id: &str, off_duty: bool) -> Result<()>;

    /// Read the current state. A missing record reads as [`DutyState::Unset`].
    async fn get(&self, platform: &str, channel_id: &str) -> Result<DutyState>;
}
