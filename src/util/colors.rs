use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00fa586a);
pub const SECONDARY: Color = Color::from_u32(0x00a83246);
pub const NEUTRAL: Color = Color::from_u32(0x00505050);
pub const MUTED: Color = Color::from_u32(0x00909090);
pub const BACKGROUND: Color = Color::from_u32(0x00101012);
pub const ERROR: Color = Color::from_u32(0x00e5484d);
pub const SKELETON: Color = Color::from_u32(0x002a2a2e);
