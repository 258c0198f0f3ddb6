pub mod app;
pub mod choice_select;
pub mod confetti;
pub mod dashboard_view;
pub mod error_modal;
pub mod message_overlay;
pub mod settings;
pub mod theme;
pub mod top_bar;
pub mod wizard_view;

pub use app::CardioApp;
