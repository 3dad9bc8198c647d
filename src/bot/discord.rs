//! Discord `/ironroll` slash command.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::roll::{DiceSource, RollEngine, RollResult};

/// Name of the slash command.
pub const COMMAND_NAME: &str = "ironroll";
/// Name of the optional modifier option.
const MODIFIER_OPTION: &str = "modifier";

/// Application command option type for integers.
const OPTION_TYPE_INTEGER: u8 = 4;
/// Interaction response type that posts a message in the channel.
const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

/// A slash command definition, as registered with Discord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationCommand {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

/// One option of a slash command definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// The `/ironroll` command definition.
pub fn command() -> ApplicationCommand {
    ApplicationCommand {
        name: COMMAND_NAME.to_string(),
        description: "Perform an Ironsworn roll".to_string(),
        options: vec![CommandOption {
            kind: OPTION_TYPE_INTEGER,
            name: MODIFIER_OPTION.to_string(),
            description: "Optional action modifier (Z)".to_string(),
            required: false,
        }],
    }
}

/// The command data of an incoming interaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandInteraction {
    pub name: String,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

/// A single option value supplied with an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    pub value: serde_json::Value,
}

/// Response to an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    pub data: InteractionResponseData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponseData {
    pub content: String,
}

impl CommandInteraction {
    /// The modifier supplied with the command, 0 if absent.
    pub fn modifier(&self) -> i64 {
        self.options
            .iter()
            .filter(|opt| opt.name == MODIFIER_OPTION)
            .find_map(|opt| opt.value.as_i64())
            .unwrap_or(0)
    }
}

/// Handle a slash command interaction.
///
/// Returns `None` for commands other than `/ironroll`.
pub fn handle_interaction<S: DiceSource>(
    engine: &RollEngine<S>,
    interaction: &CommandInteraction,
) -> Option<InteractionResponse> {
    if interaction.name != COMMAND_NAME {
        return None;
    }

    let modifier = interaction.modifier();
    let result = engine.roll(modifier);
    debug!(modifier = modifier, outcome = %result.outcome, "Discord roll");

    Some(InteractionResponse {
        kind: CHANNEL_MESSAGE_WITH_SOURCE,
        data: InteractionResponseData {
            content: format_result(&result),
        },
    })
}

/// Render a roll as a multi-line Discord message.
pub fn format_result(r: &RollResult) -> String {
    format!(
        "**Ironsworn Roll**\n\n\
         🎲 Action Die: `{}`\n\
         ➕ Modifier: `{:+}`\n\
         🎯 Challenge Dice: `{}`, `{}`\n\n\
         📊 **Total**: `{}`\n\
         ✅ **Outcome**: **{}**",
        r.action_die,
        r.modifier,
        r.challenge_dice[0],
        r.challenge_dice[1],
        r.total,
        r.outcome,
    )
}
