pub(super) mod dashboard;
pub(super) mod landing;

pub(in crate::tui_shell) use dashboard::DashboardView;
pub(in crate::tui_shell) use landing::LandingView;
