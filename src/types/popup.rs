/// Lifecycle state of the transient authentication popup.
///
/// `Closed -> Open` on a popup request; `Open -> Completing -> Closed` on
/// either the allowed-host redirect or a self-close notification. No other
/// transitions are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Closed,
    Open,
    Completing,
}
