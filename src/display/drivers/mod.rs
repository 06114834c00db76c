/*
 *  display/drivers/mod.rs
 *
 *  dispswitch - sunxi display mode switcher
 *  (c) 2026 dispswitch authors
 *
 *  Port implementations
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

// sunxi /dev/disp control channel
pub mod sunxi;

// Linux /dev/fbN devices
pub mod fbdev;

// console reconciliation through fbset
pub mod fbset;

// Mock hardware for testing
#[cfg(test)]
pub mod mock;
