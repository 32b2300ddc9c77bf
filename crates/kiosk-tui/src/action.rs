/// Everything the user can ask for. Keys and mouse events are mapped to
/// these in `input`; what an action means depends on which overlay is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ForceQuit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Enter: focus the record under the grid cursor, or pick a date.
    Select,
    /// Esc: leave whatever overlay is on top.
    Back,
    /// The close button (`x`) of the viewer.
    Close,
    ToggleHelp,
    ToggleDevice,
    OpenCalendar,
    PrevMonth,
    NextMonth,
    ToggleVersus,
    ToggleControls,
    SwitchSide,
    PrevSite,
    NextSite,
    ToggleSourcesBar,
    /// Toggle the n-th source chip (0-based).
    ToggleSource(usize),
    Reload,
    ClickAt(u16, u16),
    Resize(u16, u16),
    Tick,
    None,
}
