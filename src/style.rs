use ratatui::style::Color;

pub const HELP_LINE_BG: Color = Color::from_u32(0x1a60b5);
/// Row backgrounds: Color1, Color2, Selected
pub const ROW_BG: [Color; 3] = [
	Color::from_u32(0x322b44),
	Color::from_u32(0x241f31),
	Color::from_u32(0x5d507f),
];
/// Low, Medium, High
pub const PRIORITY_FG: [Color; 3] = [
	Color::from_u32(0x6fbf73),
	Color::from_u32(0xdea13b),
	Color::from_u32(0xdf5f5f),
];
pub const MUTED_FG: Color = Color::from_u32(0x7f7f9f);
pub const OVERDUE_FG: Color = Color::from_u32(0xdf5f5f);
