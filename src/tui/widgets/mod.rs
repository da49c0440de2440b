// Widget rendering for each console zone.

pub mod depth_chart;
pub mod help_bar;
pub mod playoffs;
pub mod settings;
pub mod sidebar;
pub mod status_bar;
