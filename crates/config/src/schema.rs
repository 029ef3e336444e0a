use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OffdutyConfig {
    pub commands: CommandsConfig,
    pub replies: RepliesConfig,
    pub enforcement: EnforcementConfig,
}

/// Trigger phrases for the four duty commands.
///
/// A trigger is the exact leading text that identifies a message as invoking
/// the command; the host registers these with its dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Puts the invoking channel back on duty. Defaults to "clockin".
    pub clock_in: String,
    /// Takes the invoking channel off duty. Defaults to "clockout".
    pub clock_out: String,
    /// Puts the listed channels on duty. Defaults to "clockin-at".
    pub clock_in_at: String,
    /// Takes the listed channels off duty. Defaults to "clockout-at".
    pub clock_out_at: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            clock_in: "clockin".into(),
            clock_out: "clockout".into(),
            clock_in_at: "clockin-at".into(),
            clock_out_at: "clockout-at".into(),
        }
    }
}

/// Reply texts announced on a duty transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepliesConfig {
    /// Announced when a channel goes back on duty. Defaults to "Back on duty!".
    pub clock_in: String,
    /// Announced when a channel goes off duty. Defaults to "Off duty now!".
    pub clock_out: String,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            clock_in: "Back on duty!".into(),
            clock_out: "Off duty now!".into(),
        }
    }
}

/// How the gate intercepts inbound activity while a channel is off duty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Interception strategy. Defaults to lenient (command-only).
    pub mode: EnforcementMode,
    /// Sent as the reply (strict) or substituted as the command result
    /// (lenient) when an event is suppressed. Empty means suppress silently.
    pub suppression_text: String,
    /// The host's command prefix, stripped from message payloads before
    /// trigger matching in strict mode.
    pub command_prefix: String,
}

/// Enforcement strategy flag. Exactly one strategy is active per process.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementMode {
    /// Intercept every inbound message, recognized command or not. Strongest
    /// guarantee, but disturbs anything else that inspects raw messages.
    Strict,
    /// Intercept recognized commands only; raw message traffic (and whatever
    /// observes it) is untouched.
    #[default]
    Lenient,
}
