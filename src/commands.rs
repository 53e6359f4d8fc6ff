// Command table: every menu entry with its endpoint and the function that
// builds its request. Builders may ask for one extra choice; an answer
// outside the offered set aborts the command before anything is sent.

use thiserror::Error;
use tracing::info;

use crate::api::{paths, ApiResponse, Transport, TransportError};
use crate::config::{Config, OutputPreset};
use crate::request::{
    to_body, AddNewInputStream, AddNewOutput, AudioMixMuteUnMute, CloseOneInputStream,
    CloseOneOutput, CreateRoom, GetOneInputStreamInfo, GetOneOutputStreamInfo, LayoutUpdate,
    MixLayout, OutputStreamInfo, VideoMixChangeLayout, VideoMixUpdateBackgroud,
};
use crate::ui::Prompter;

/// Why a command did not produce a response.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The user's sub-choice was not one of the offered options.
    #[error("{0}")]
    Validation(String),

    #[error("failed to encode request")]
    Encode(#[from] serde_json::Error),

    #[error("failed to read input")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Builds the request body for one command; `None` means an empty POST.
pub type BuildFn = fn(&Config, &mut dyn Prompter) -> Result<Option<String>, CommandError>;

pub struct Command {
    /// What the user types at the menu.
    pub token: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    build: BuildFn,
}

impl Command {
    /// Build the request and send it. At most one POST per call.
    pub fn run(
        &self,
        config: &Config,
        prompter: &mut dyn Prompter,
        transport: &dyn Transport,
    ) -> Result<ApiResponse, CommandError> {
        let body = (self.build)(config, prompter)?;
        info!(command = self.description, path = self.path, "request built");
        Ok(transport.post(self.path, body)?)
    }
}

pub const COMMANDS: &[Command] = &[
    Command {
        token: "1",
        description: "create room",
        path: paths::CREATE_ROOM,
        build: create_room,
    },
    Command {
        token: "2",
        description: "add new input",
        path: paths::ADD_NEW_INPUT,
        build: add_new_input,
    },
    Command {
        token: "3",
        description: "add new output",
        path: paths::ADD_NEW_OUTPUT,
        build: add_new_output,
    },
    Command {
        token: "4",
        description: "close one input",
        path: paths::CLOSE_ONE_INPUT,
        build: close_one_input,
    },
    Command {
        token: "5",
        description: "close one output",
        path: paths::CLOSE_ONE_OUTPUT,
        build: close_one_output,
    },
    Command {
        token: "6",
        description: "mute/unmute",
        path: paths::MUTE_UNMUTE,
        build: mute_unmute,
    },
    Command {
        token: "7",
        description: "layout change",
        path: paths::MIX_LAYOUT_CHANGE,
        build: layout_change,
    },
    Command {
        token: "8",
        description: "mix background update",
        path: paths::MIX_BACKGROUD_UPDATE,
        build: background_update,
    },
    Command {
        token: "10",
        description: "stop",
        path: paths::STOP,
        build: stop,
    },
    Command {
        token: "11",
        description: "query input stream info",
        path: paths::QUERY_INPUT_INFO,
        build: query_input_info,
    },
    Command {
        token: "12",
        description: "query output stream info",
        path: paths::QUERY_OUTPUT_INFO,
        build: query_output_info,
    },
];

/// Look up a menu token such as `"10"`.
pub fn find(token: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.token == token)
}

/// The menu text printed before every prompt.
pub fn usage() -> String {
    let mut text = String::new();
    for c in COMMANDS {
        text.push_str(&format!("    {:>2} -> {}\n", c.token, c.description));
    }
    text
}

fn ask(prompter: &mut dyn Prompter, prompt: &str) -> Result<String, CommandError> {
    let line = prompter.read_line(prompt).map_err(CommandError::Prompt)?;
    Ok(line.unwrap_or_default().trim().to_string())
}

fn invalid(choice: &str) -> CommandError {
    CommandError::Validation(format!("not a valid choice {choice:?}, nothing sent"))
}

/// Resolve a 1-based input choice against the configured inputs.
fn pick_input(config: &Config, prompter: &mut dyn Prompter, verb: &str) -> Result<String, CommandError> {
    let n = config.inputs.len();
    let choice = ask(
        prompter,
        &format!("Enter choice 1-{n} to {verb} one of {}", config.inputs.join(", ")),
    )?;
    choice
        .parse::<usize>()
        .ok()
        .and_then(|idx| config.input(idx))
        .map(str::to_string)
        .ok_or_else(|| invalid(&choice))
}

/// 1 -> 720p, 2 -> 1080p, 3 -> udp 720p.
fn pick_output_preset<'a>(
    config: &'a Config,
    prompter: &mut dyn Prompter,
    verb: &str,
) -> Result<&'a OutputPreset, CommandError> {
    let presets = &config.outputs;
    let choice = ask(
        prompter,
        &format!(
            "Enter choice 1, 2 or 3 to {verb} output {}, {} or {}",
            presets.hd720.setting_id, presets.hd1080.setting_id, presets.udp720.setting_id
        ),
    )?;
    match choice.as_str() {
        "1" => Ok(&presets.hd720),
        "2" => Ok(&presets.hd1080),
        "3" => Ok(&presets.udp720),
        _ => Err(invalid(&choice)),
    }
}

fn create_room(config: &Config, _: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let first_input = config
        .input(1)
        .ok_or_else(|| CommandError::Validation("no input configured for the room".into()))?;
    let hd720 = &config.outputs.hd720;
    let req = CreateRoom {
        room_id: config.room_id.clone(),
        input_urls: vec![first_input.to_string()],
        room_output_base_url: config.output_base_url.clone(),
        output_stream_infos: vec![OutputStreamInfo {
            output_setting_id: hd720.setting_id.clone(),
            output_urls: hd720.urls(),
        }],
    };
    Ok(Some(to_body(&req)?))
}

fn add_new_input(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let input_url = pick_input(config, prompter, "add")?;
    Ok(Some(to_body(&AddNewInputStream { input_url })?))
}

fn add_new_output(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let presets = &config.outputs;
    let choice = ask(
        prompter,
        &format!(
            "Enter choice 1 for {} output setting, 2 for {} setting",
            presets.hd1080.setting_id, presets.udp720.setting_id
        ),
    )?;
    let preset = match choice.as_str() {
        "1" => &presets.hd1080,
        "2" => &presets.udp720,
        _ => return Err(invalid(&choice)),
    };
    let req = AddNewOutput {
        output_setting_id: preset.setting_id.clone(),
        output_urls: preset.urls(),
    };
    Ok(Some(to_body(&req)?))
}

fn close_one_input(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let input_url = pick_input(config, prompter, "close")?;
    Ok(Some(to_body(&CloseOneInputStream { input_url })?))
}

fn close_one_output(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let preset = pick_output_preset(config, prompter, "close")?;
    let req = CloseOneOutput {
        output_setting_id: preset.setting_id.clone(),
    };
    Ok(Some(to_body(&req)?))
}

fn mute_unmute(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    if config.inputs.len() < 2 {
        return Err(CommandError::Validation(
            "mute/unmute needs at least two configured inputs, nothing sent".into(),
        ));
    }
    let targets: Vec<String> = config.inputs.iter().take(2).cloned().collect();
    let choice = ask(
        prompter,
        &format!("Enter choice 1 to mute, 2 to unmute {}", targets.join(" & ")),
    )?;
    let req = match choice.as_str() {
        "1" => AudioMixMuteUnMute {
            mute_input_urls: targets,
            ..Default::default()
        },
        "2" => AudioMixMuteUnMute {
            unmute_input_urls: targets,
            ..Default::default()
        },
        _ => return Err(invalid(&choice)),
    };
    Ok(Some(to_body(&req)?))
}

fn layout_change(_: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let choice = ask(
        prompter,
        "Enter choice 1, 2 or 3 to choose eSingle_1, eEqual_4, eEqual_9",
    )?;
    let layout = match choice.as_str() {
        "1" => MixLayout::Single1,
        "2" => MixLayout::Equal4,
        "3" => MixLayout::Equal9,
        _ => return Err(invalid(&choice)),
    };
    let req = VideoMixChangeLayout {
        new_layout: LayoutUpdate { layout },
    };
    Ok(Some(to_body(&req)?))
}

fn background_update(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let choice = ask(
        prompter,
        &format!(
            "Enter new background image url (1 for {})",
            config.background_image_url
        ),
    )?;
    let backgroud_image_url = match choice.as_str() {
        "" => return Err(invalid(&choice)),
        "1" => config.background_image_url.clone(),
        other => other.to_string(),
    };
    Ok(Some(to_body(&VideoMixUpdateBackgroud {
        backgroud_image_url,
    })?))
}

fn stop(_: &Config, _: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    Ok(None)
}

fn query_input_info(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let input_url = pick_input(config, prompter, "query")?;
    Ok(Some(to_body(&GetOneInputStreamInfo { input_url })?))
}

fn query_output_info(config: &Config, prompter: &mut dyn Prompter) -> Result<Option<String>, CommandError> {
    let preset = pick_output_preset(config, prompter, "query")?;
    let req = GetOneOutputStreamInfo {
        output_setting_id: preset.setting_id.clone(),
    };
    Ok(Some(to_body(&req)?))
}
