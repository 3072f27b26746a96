// WebShell services
// Services provide leaf functionality consumed by the coordinator:
// configuration loading, external-link routing, launch permissions.

pub mod config_provider;
pub mod link_router;
pub mod permissions;
