// Font definitions for the 128x64 panel

// Bold title line ("[ Status ]"), 7px advance fits 17 characters
pub use u8g2_fonts::fonts::u8g2_font_7x13B_tf as FONT_TITLE;

// Menu rows, 6px advance fits "label...........>" in 18 cells
pub use u8g2_fonts::fonts::u8g2_font_6x12_tf as FONT_MENU;

// Table rows, 20 characters per line
pub use u8g2_fonts::fonts::u8g2_font_6x10_tf as FONT_TABLE;

// Nav-button labels along the bottom edge
pub use u8g2_fonts::fonts::u8g2_font_5x8_tf as FONT_NAV;

// Dialog messages and the home page address line
pub use u8g2_fonts::fonts::u8g2_font_7x14B_tf as FONT_DIALOG;

// Clock page
pub use u8g2_fonts::fonts::u8g2_font_7x14_tf as FONT_CLOCK;
pub use u8g2_fonts::fonts::u8g2_font_helvB18_tf as FONT_CLOCK_LARGE;
