// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) wires these modules together into the interactive tool.
//
// Module responsibilities:
// - `config`: test constants (server url, inputs, output presets) with
//   defaults and JSON/env overrides.
// - `request`: the request payloads and their JSON wire shape.
// - `api`: blocking HTTP transport and the service endpoint paths.
// - `commands`: the menu's command table and per-command request builders.
// - `ui`: the prompt loop that ties input, commands and output together.
pub mod api;
pub mod commands;
pub mod config;
pub mod request;
pub mod ui;

#[cfg(test)]
mod testing;
