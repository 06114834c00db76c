/*
 *  display/modes.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  TV/HDMI timing mode table
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

use std::fmt;

use crate::display::error::DisplayError;

/// Geometry of a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeGeometry {
    Fixed { width: u32, height: u32 },
    /// Timing read from the sink's EDID; dimensions only known once applied
    Edid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeInfo {
    pub label: &'static str,
    pub geometry: ModeGeometry,
}

const fn fixed(label: &'static str, width: u32, height: u32) -> Option<ModeInfo> {
    Some(ModeInfo { label, geometry: ModeGeometry::Fixed { width, height } })
}

const EDID_INFO: ModeInfo = ModeInfo { label: "EDID (auto)", geometry: ModeGeometry::Edid };

/// Number of mode numbers the driver understands, including the EDID entry
pub const MODE_COUNT: usize = 29;

/// Indexed by driver mode number; `None` marks numbers the driver reserves
static MODE_TABLE: [Option<ModeInfo>; MODE_COUNT] = [
    fixed("480i", 640, 480),
    fixed("576i", 720, 576),
    fixed("480p", 640, 480),
    fixed("576p", 720, 576),
    fixed("720p 50Hz", 1280, 720),
    fixed("720p 60Hz", 1280, 720),
    fixed("1080i 50 Hz", 1920, 1080),
    fixed("1080i 60 Hz", 1920, 1080),
    fixed("1080p 24 Hz", 1920, 1080),
    fixed("1080p 50 Hz", 1920, 1080),
    fixed("1080p 60 Hz", 1920, 1080),
    fixed("PAL", 720, 576),
    fixed("PAL SVIDEO", 720, 576),
    None,
    fixed("NTSC", 640, 480),
    fixed("NTSC SVIDEO", 640, 480),
    None,
    fixed("PAL_M", 720, 576),
    fixed("PAL_M SVIDEO", 720, 576),
    None,
    fixed("PAL_NC", 720, 576),
    fixed("PAL_NC SVIDEO", 720, 576),
    None,
    fixed("1080p 24 Hz 3D", 1920, 1080),
    fixed("720p 50 Hz 3D", 1280, 720),
    fixed("720p 60 Hz 3D", 1280, 720),
    fixed("1360x768 60 Hz", 1360, 768),
    fixed("1280x1024 60 Hz", 1280, 1024),
    Some(EDID_INFO),
];

/// A validated driver mode number together with its table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode {
    number: u32,
    info: &'static ModeInfo,
}

impl Mode {
    /// The auto-negotiated entry, always last in the table
    pub const EDID: Mode = Mode { number: MODE_COUNT as u32 - 1, info: &EDID_INFO };

    pub fn from_number(number: u32) -> Result<Self, DisplayError> {
        MODE_TABLE
            .get(number as usize)
            .and_then(Option::as_ref)
            .map(|info| Mode { number, info })
            .ok_or(DisplayError::InvalidMode(number))
    }

    pub fn number(self) -> u32 {
        self.number
    }

    pub fn info(self) -> &'static ModeInfo {
        self.info
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn is_edid(self) -> bool {
        matches!(self.info().geometry, ModeGeometry::Edid)
    }

    /// Table dimensions; `None` for the EDID mode
    pub fn dimensions(self) -> Option<(u32, u32)> {
        match self.info().geometry {
            ModeGeometry::Fixed { width, height } => Some((width, height)),
            ModeGeometry::Edid => None,
        }
    }

    pub fn pixel_count(self) -> Option<u64> {
        self.dimensions().map(|(w, h)| u64::from(w) * u64::from(h))
    }

    /// Every populated entry in table order
    pub fn all() -> impl Iterator<Item = Mode> {
        MODE_TABLE
            .iter()
            .enumerate()
            .filter_map(|(n, entry)| entry.as_ref().map(|info| Mode { number: n as u32, info }))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count_matches_dimensions() {
        for mode in Mode::all() {
            match mode.dimensions() {
                Some((w, h)) => assert_eq!(mode.pixel_count(), Some(u64::from(w) * u64::from(h))),
                None => {
                    assert!(mode.is_edid());
                    assert_eq!(mode.pixel_count(), None);
                }
            }
        }
    }

    #[test]
    fn test_edid_is_last_entry() {
        assert_eq!(Mode::EDID.number() as usize, MODE_COUNT - 1);
        assert!(Mode::EDID.is_edid());
        assert_eq!(Mode::all().last(), Some(Mode::EDID));
    }

    #[test]
    fn test_reserved_and_out_of_range_numbers_rejected() {
        for n in [13, 16, 19, 22, MODE_COUNT as u32, 255] {
            assert!(matches!(Mode::from_number(n), Err(DisplayError::InvalidMode(m)) if m == n));
        }
    }

    #[test]
    fn test_1080p_24() {
        let mode = Mode::from_number(8).unwrap();
        assert_eq!(mode.label(), "1080p 24 Hz");
        assert_eq!(mode.dimensions(), Some((1920, 1080)));
        assert_eq!(mode.pixel_count(), Some(2_073_600));
    }

    #[test]
    fn test_lookup_carries_table_entry() {
        for mode in Mode::all() {
            let again = Mode::from_number(mode.number()).unwrap();
            assert_eq!(again.info(), MODE_TABLE[mode.number() as usize].as_ref().unwrap());
        }
        assert_eq!(Mode::from_number(28).unwrap().label(), "EDID (auto)");
    }

    #[test]
    fn test_table_size() {
        assert_eq!(Mode::all().count(), MODE_COUNT - 4);
    }
}
