use {anyhow::Result, async_trait::async_trait};

/// One channel visible to the current connection, as returned by the host's
/// directory lookup.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
}

/// Directory of channels known to the current connection. The host runtime
/// provides the concrete implementation.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    async fn list_channels(&self) -> Result<Vec<DirectoryEntry>>;
}

/// Send messages into a channel.
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<()>;
}
