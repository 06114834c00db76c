/*
 *  display/mod.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Display subsystem - ports, policies and the transition sequencer
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

// Core types and port traits
pub mod types;
pub mod modes;
pub mod error;
pub mod traits;

// Port implementations (sunxi, fbdev, fbset, mock)
pub mod drivers;

// Per-invocation context
pub mod context;

// Snapshot of the "before" state
pub mod state;

// Policies used by the sequencer
pub mod capacity;
pub mod console;
pub mod scaler;

// Transition sequencer
pub mod sequencer;

// Read-only reports
pub mod info;

// Re-exports for convenience
pub use context::DisplayContext;
pub use error::DisplayError;
pub use modes::Mode;
pub use sequencer::{HdmiRequest, ModeSequencer};
pub use state::ScreenConfig;
pub use traits::{ConsoleRequest, ConsoleTool, DisplayControl, FramebufferQuery};
pub use types::{
    LayerFramebuffer, LayerHandle, LayerParams, LayerWorkMode, OutputKind, OutputType, PixelDepth, Rect, ScalerWindow, Screen,
};
