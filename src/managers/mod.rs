// WebShell state managers
// Managers own the shell's mutable state: the navigation coordinator, the
// popup session, the picker bridge's pending request, and download records.

pub mod coordinator;
pub mod download_manager;
pub mod picker_bridge;
pub mod popup_manager;
