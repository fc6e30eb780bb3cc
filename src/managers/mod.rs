// Sitewright state managers
// Managers hold state: the persisted generation history and the live generation session.

pub mod history_manager;
pub mod session_manager;
