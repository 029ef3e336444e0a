use std::sync::Arc;

use {anyhow::Result, tracing::debug};

use offduty_config::{EnforcementMode, OffdutyConfig};

use crate::store::DutyStore;

/// One inbound event offered to the gate before normal processing.
#[derive(Debug, Clone, Copy)]
pub enum InboundEvent<'a> {
    /// A raw message as delivered by the platform. `body` is the plain-text
    /// payload, if any.
    Message {
        platform: &'a str,
        channel_id: &'a str,
        body: Option<&'a str>,
    },
    /// A recognized command about to execute.
    Command {
        platform: &'a str,
        channel_id: &'a str,
        name: &'a str,
    },
}

/// Gate decision for one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Let normal processing continue.
    Pass,
    /// Drop the event. `reply` replaces normal handling; `None` means
    /// suppress silently.
    Suppress { reply: Option<String> },
}

/// Per-channel duty gate. Reads the duty store on every event; never writes
/// it. Transitions happen only through [`crate::commands::DutyCommands`].
///
/// The enforcement strategy is fixed at construction, and each strategy
/// ignores the other's event kind, so the two interception points are never
/// active at once.
pub struct GateEnforcer {
    store: Arc<dyn DutyStore>,
    mode: Mode,
}

enum Mode {
    Strict(StrictGate),
    Lenient(LenientGate),
}

/// Full message interception: while a channel is off duty nothing reaches
/// downstream handlers except the toggle triggers themselves.
struct StrictGate {
    clock_in: String,
    clock_out: String,
    command_prefix: String,
    suppression_text: String,
}

/// Command-only interception: passive observers of raw message traffic keep
/// seeing everything; only recognized commands are vetoed.
struct LenientGate {
    clock_in: String,
    clock_out: String,
    suppression_text: String,
}

impl GateEnforcer {
    pub fn new(config: &OffdutyConfig, store: Arc<dyn DutyStore>) -> Self {
        let mode = match config.enforcement.mode {
            EnforcementMode::Strict => Mode::Strict(StrictGate {
                clock_in: config.commands.clock_in.clone(),
                clock_out: config.commands.clock_out.clone(),
                command_prefix: config.enforcement.command_prefix.clone(),
                suppression_text: config.enforcement.suppression_text.clone(),
            }),
            EnforcementMode::Lenient => Mode::Lenient(LenientGate {
                clock_in: config.commands.clock_in.clone(),
                clock_out: config.commands.clock_out.clone(),
                suppression_text: config.enforcement.suppression_text.clone(),
            }),
        };
        Self { store, mode }
    }

    /// Decide whether `event` may proceed.
    pub async fn evaluate(&self, event: InboundEvent<'_>) -> Result<Verdict> {
        match (&self.mode, event) {
            (
                Mode::Strict(gate),
                InboundEvent::Message {
                    platform,
                    channel_id,
                    body,
                },
            ) => {
                let off_duty = self.store.get(platform, channel_id).await?.is_off_duty();
                let verdict = gate.decide(off_duty, body);
                if matches!(verdict, Verdict::Suppress { .. }) {
                    debug!(platform, channel_id, "message swallowed while off duty");
                }
                Ok(verdict)
            },
            (
                Mode::Lenient(gate),
                InboundEvent::Command {
                    platform,
                    channel_id,
                    name,
                },
            ) => {
                let off_duty = self.store.get(platform, channel_id).await?.is_off_duty();
                let verdict = gate.decide(off_duty, name);
                if matches!(verdict, Verdict::Suppress { .. }) {
                    debug!(platform, channel_id, command = name, "command vetoed while off duty");
                }
                Ok(verdict)
            },
            // The other strategy's event kind is never intercepted.
            _ => Ok(Verdict::Pass),
        }
    }
}

impl StrictGate {
    fn decide(&self, off_duty: bool, body: Option<&str>) -> Verdict {
        if !off_duty {
            return Verdict::Pass;
        }
        // Strip a single leading trigger character and the host's command
        // prefix, then leading-match against the toggle triggers.
        let content = body.unwrap_or("");
        let content = content.strip_prefix('/').unwrap_or(content);
        let content = content
            .strip_prefix(self.command_prefix.as_str())
            .unwrap_or(content);
        if content.starts_with(self.clock_in.as_str())
            || content.starts_with(self.clock_out.as_str())
        {
            return Verdict::Pass;
        }
        let reply = if self.suppression_text.is_empty() {
            None
        } else {
            Some(self.suppression_text.clone())
        };
        Verdict::Suppress { reply }
    }
}

impl LenientGate {
    fn decide(&self, off_duty: bool, name: &str) -> Verdict {
        if !off_duty || name == self.clock_in || name == self.clock_out {
            Verdict::Pass
        } else {
            // The veto reply is substituted for the command result even when
            // it is empty.
            Verdict::Suppress {
                reply: Some(self.suppression_text.clone()),
            }
        }
    }
}
