use std::sync::Arc;

use {
    anyhow::Result,
    tracing::{debug, info, warn},
};

use offduty_config::OffdutyConfig;

use crate::{
    host::{ChannelDirectory, ChannelOutbound},
    store::DutyStore,
};

/// Handlers for the four duty commands.
///
/// The host registers the configured trigger phrases with its dispatcher and
/// routes invocations here; each handler returns the reply text for the
/// invoking channel.
pub struct DutyCommands {
    config: OffdutyConfig,
    store: Arc<dyn DutyStore>,
    directory: Arc<dyn ChannelDirectory>,
    outbound: Arc<dyn ChannelOutbound>,
}

impl DutyCommands {
    pub fn new(
        config: OffdutyConfig,
        store: Arc<dyn DutyStore>,
        directory: Arc<dyn ChannelDirectory>,
        outbound: Arc<dyn ChannelOutbound>,
    ) -> Self {
        Self {
            config,
            store,
            directory,
            outbound,
        }
    }

    /// Put the invoking channel back on duty.
    pub async fn clock_in(&self, platform: &str, channel_id: &str) -> Result<String> {
        self.toggle(platform, channel_id, false).await
    }

    /// Take the invoking channel off duty.
    pub async fn clock_out(&self, platform: &str, channel_id: &str) -> Result<String> {
        self.toggle(platform, channel_id, true).await
    }

    async fn toggle(&self, platform: &str, channel_id: &str, off_duty: bool) -> Result<String> {
        self.store
            .set_off_duty(platform, channel_id, off_duty)
            .await?;
        info!(platform, channel_id, off_duty, "duty state updated");
        let reply = if off_duty {
            &self.config.replies.clock_out
        } else {
            &self.config.replies.clock_in
        };
        Ok(reply.clone())
    }

    /// Put the listed channels back on duty.
    pub async fn clock_in_at(&self, platform: &str, args: &[String]) -> Result<String> {
        self.bulk(platform, args, false).await
    }

    /// Take the listed channels off duty.
    pub async fn clock_out_at(&self, platform: &str, args: &[String]) -> Result<String> {
        self.bulk(platform, args, true).await
    }

    /// Shared bulk algorithm: resolve each identifier against one directory
    /// snapshot, toggle the matches, and report per identifier in input
    /// order. Unresolved identifiers are reported and skipped; they never
    /// abort the rest of the batch, and duplicates are processed
    /// independently.
    async fn bulk(&self, platform: &str, args: &[String], off_duty: bool) -> Result<String> {
        if args.is_empty() {
            let trigger = if off_duty {
                &self.config.commands.clock_out_at
            } else {
                &self.config.commands.clock_in_at
            };
            return Ok(format!("Usage: {trigger} <channel-id> [<channel-id> ...]"));
        }

        // One directory fetch shared across the whole batch.
        let channels = self.directory.list_channels().await?;
        debug!(count = channels.len(), "fetched channel directory");

        let text = if off_duty {
            self.config.replies.clock_out.clone()
        } else {
            self.config.replies.clock_in.clone()
        };

        let mut lines = Vec::with_capacity(args.len());
        for id in args {
            match channels.iter().find(|entry| entry.id == *id) {
                Some(entry) => {
                    // Delivery is unconfirmed; the report reflects resolution
                    // success only.
                    let outbound = Arc::clone(&self.outbound);
                    let (channel_id, notice) = (id.clone(), text.clone());
                    tokio::spawn(async move {
                        if let Err(e) = outbound.send_text(&channel_id, &notice).await {
                            warn!(channel_id = %channel_id, "failed to send duty notice: {e}");
                        }
                    });
                    self.store.set_off_duty(platform, id, off_duty).await?;
                    info!(platform, channel_id = %id, off_duty, "duty state updated");
                    lines.push(format!("In \"{}\": {}", entry.name, text));
                },
                None => {
                    lines.push(format!("No channel matching \"{id}\""));
                },
            }
        }
        Ok(lines.join("\n"))
    }
}
