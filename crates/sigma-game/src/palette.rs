//! Terminal-green palette shared by the screens.

use sigma_types::Color;

/// Screen background.
pub const BG: Color = Color::rgb(2, 8, 2);
/// Primary phosphor green.
pub const GREEN: Color = Color::rgb(0, 255, 70);
/// Dimmed green for secondary text.
pub const GREEN_DIM: Color = Color::rgb(0, 140, 40);
/// Disabled/inactive entries.
pub const GRAY: Color = Color::rgb(90, 100, 90);
/// Selection highlight fill.
pub const HIGHLIGHT: Color = Color::rgba(0, 255, 70, 40);
/// Warning amber.
pub const AMBER: Color = Color::rgb(255, 180, 0);
/// Failure red.
pub const RED: Color = Color::rgb(255, 60, 60);
/// Modal backdrop dim.
pub const BACKDROP: Color = Color::rgba(0, 0, 0, 180);
/// Modal panel fill.
pub const PANEL: Color = Color::rgb(8, 24, 8);
