use crate::game::GameTier;

/// Every mutation the operator console can request on the session.
///
/// `DrawFinished` and `WheelSpinFinished` are dispatched by the store's
/// cosmetic timers, never by a UI control.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    StartGame(GameTier),
    DrawNumber,
    DrawFinished,
    DrawManualNumber(u8),
    EndGame,
    SetWinning(bool),
    ResumeGame,
    ResetAll,
    ToggleManualMode,
    ToggleBingoMode,
    ToggleDemarque,
    ToggleQuinesDuSud,
    SetPrizeDescription(String),
    SetPrizeDescriptions {
        quine: String,
        double_quine: String,
        carton_plein: String,
    },
    ToggleWheelMode,
    SetWheelNumberCount(u32),
    SetWheelPrize(String),
    SpinWheel,
    WheelSpinFinished,
    AddImage {
        id: String,
        name: String,
        data_url: String,
    },
    SelectImage(Option<String>),
    DeleteAllImages,
    ToggleImageDisplay,
}
