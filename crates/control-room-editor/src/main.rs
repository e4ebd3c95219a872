// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Drives the Control Room against a sample in-memory scene.

use anyhow::{Context, Result};
use clap::Parser;
use control_room_core::{AttributePath, HostContext};
use control_room_editor::sample::sample_scene;
use control_room_editor::{ControlRoom, ControlRoomConfig, DialogPrefs};
use control_room_parts::nodes::RENDER_OPTIONS;
use control_room_parts::{FieldInput, PartId};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "control-room", about = "Render settings dialog with presets")]
struct Args {
    /// Directory of bundled default presets.
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Preferences file. Defaults to the user config directory.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Print the dialog views as JSON.
    #[arg(long)]
    json: bool,
}

fn print_views(room: &ControlRoom, json: bool) -> Result<()> {
    let views = room.describe()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        println!("{}", serde_json::to_string_pretty(&room.panel())?);
        return Ok(());
    }
    for view in &views {
        println!("[{}]", view.title);
        for field in &view.fields {
            let marker = field.decoration.color_hint().unwrap_or("");
            println!("  {:<28} {:>10} {}", field.label, field.text, marker);
        }
        for note in &view.notes {
            println!("  ! {note}");
        }
    }
    let panel = room.panel();
    let names: Vec<_> = panel.slots.iter().map(|s| s.name.as_str()).collect();
    println!("Presets: {names:?} (defaults: {:?})", panel.defaults);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scene = sample_scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    let config = ControlRoomConfig {
        defaults_dir: args.defaults.clone(),
        ..Default::default()
    };

    let prefs_path = args.prefs.clone().unwrap_or_else(DialogPrefs::path);
    let prefs = DialogPrefs::load_from(&prefs_path);
    let mut room = ControlRoom::from_scene(ctx.clone(), scene.clone(), &config)
        .context("Failed to open the Control Room")?
        .with_prefs(prefs, Some(prefs_path));
    scene.connect_events(room.events().sender());

    let name = room.new_preset()?;
    log::info!("Captured the scene into '{name}'.");

    room.edit(PartId::Sampling, "camera_aa", FieldInput::Text("6".to_string()))?;
    room.edit(PartId::MotionBlur, "enable", FieldInput::from(true))?;
    room.pump_events()?;

    room.hover_preset(&name)?;
    print_views(&room, args.json)?;
    room.clear_hover();

    room.apply_preset(&name)?;
    let aa = ctx.get(&AttributePath::new(RENDER_OPTIONS, "AASamples"))?;
    log::info!("Camera AA back to {aa} after applying '{name}'.");

    scene.open_scene(Default::default());
    room.pump_events()?;
    log::info!("Dialog open after scene change: {}", room.is_open());
    Ok(())
}
