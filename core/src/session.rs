use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::action::SessionAction;
use crate::game::{self, GameTier, BINGO_POOL, LOTO_POOL};
use crate::snapshot::lenient_seq;
use crate::wheel;

pub const DEFAULT_WHEEL_NUMBER_COUNT: u32 = 20;

/// One archived loto round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "type")]
    pub tier: GameTier,
    pub numbers: Vec<u8>,
}

/// One archived wheel result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelRecord {
    pub number: u32,
    pub prize: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrizeDescriptions {
    #[serde(default)]
    pub quine: String,
    #[serde(rename = "double-quine", default)]
    pub double_quine: String,
    #[serde(rename = "carton-plein", default)]
    pub carton_plein: String,
}

impl PrizeDescriptions {
    pub fn for_tier(&self, tier: GameTier) -> &str {
        match tier {
            GameTier::Quine => &self.quine,
            GameTier::DoubleQuine => &self.double_quine,
            GameTier::CartonPlein => &self.carton_plein,
        }
    }
}

/// A locally loaded announcement slide. The data URL can be megabytes of
/// base64, which is why images never ride in the primary storage blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalImage {
    pub id: String,
    pub name: String,
    pub data_url: String,
}

/// The whole operator-owned session: loto round, wheel mode and image
/// announcements. Field names serialize in camelCase; this is the shape every
/// propagation channel carries (plus a timestamp, see [`crate::StateSnapshot`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSession {
    pub current_game: Option<GameTier>,
    #[serde(deserialize_with = "lenient_seq")]
    pub drawn_numbers: Vec<u8>,
    pub is_drawing: bool,
    #[serde(deserialize_with = "lenient_seq")]
    pub game_history: Vec<GameRecord>,
    pub is_manual_mode: bool,
    pub is_bingo_mode: bool,
    pub with_demarque: bool,
    pub prize_description: String,
    pub is_quines_du_sud_mode: bool,
    pub prize_descriptions: PrizeDescriptions,
    pub is_winning: bool,

    pub is_wheel_mode: bool,
    pub wheel_number_count: u32,
    pub wheel_prize: String,
    pub wheel_active_prize: String,
    pub wheel_winning_number: Option<u32>,
    pub is_wheel_spinning: bool,
    #[serde(deserialize_with = "lenient_seq")]
    pub wheel_draw_history: Vec<WheelRecord>,
    pub wheel_target_rotation: f64,
    pub wheel_current_rotation: f64,

    #[serde(deserialize_with = "lenient_seq")]
    pub local_images: Vec<LocalImage>,
    pub selected_image_id: Option<String>,
    pub is_image_display_mode: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            current_game: None,
            drawn_numbers: Vec::new(),
            is_drawing: false,
            game_history: Vec::new(),
            is_manual_mode: true,
            is_bingo_mode: false,
            with_demarque: true,
            prize_description: String::new(),
            is_quines_du_sud_mode: false,
            prize_descriptions: PrizeDescriptions::default(),
            is_winning: false,
            is_wheel_mode: false,
            wheel_number_count: DEFAULT_WHEEL_NUMBER_COUNT,
            wheel_prize: String::new(),
            wheel_active_prize: String::new(),
            wheel_winning_number: None,
            is_wheel_spinning: false,
            wheel_draw_history: Vec::new(),
            wheel_target_rotation: 0.0,
            wheel_current_rotation: 0.0,
            local_images: Vec::new(),
            selected_image_id: None,
            is_image_display_mode: false,
        }
    }
}

impl GameSession {
    /// 90 for Loto, 75 for Bingo.
    pub fn max_pool(&self) -> u8 {
        if self.is_bingo_mode {
            BINGO_POOL
        } else {
            LOTO_POOL
        }
    }

    pub fn selected_image(&self) -> Option<&LocalImage> {
        let id = self.selected_image_id.as_deref()?;
        self.local_images.iter().find(|image| image.id == id)
    }

    /// Clear flags that only make sense while their timer is pending.
    /// Called after restoring a persisted session, where no timer exists.
    pub fn settle_transients(&mut self) {
        self.is_drawing = false;
        if self.is_wheel_spinning {
            self.is_wheel_spinning = false;
            self.wheel_current_rotation = self.wheel_target_rotation;
        }
    }

    /// Apply one operator action. Returns whether anything changed; an
    /// unchanged session must not be re-persisted or re-broadcast.
    pub fn apply<R: Rng + CryptoRng>(&mut self, action: SessionAction, rng: &mut R) -> bool {
        match action {
            SessionAction::StartGame(tier) => {
                self.current_game = Some(tier);
                self.drawn_numbers.clear();
                self.is_drawing = false;
                self.is_winning = false;
                true
            }
            SessionAction::DrawNumber => {
                // Machine draws need an active round; the manual grid is the
                // operator transcribing a physical device and stays open.
                if self.is_drawing || self.current_game.is_none() {
                    return false;
                }
                let Some(number) = game::draw_remaining(self.max_pool(), &self.drawn_numbers, rng)
                else {
                    return false;
                };
                self.drawn_numbers.push(number);
                self.is_drawing = true;
                true
            }
            SessionAction::DrawFinished => {
                if !self.is_drawing {
                    return false;
                }
                self.is_drawing = false;
                true
            }
            SessionAction::DrawManualNumber(number) => {
                if number == 0 || number > self.max_pool() {
                    return false;
                }
                if let Some(position) = self.drawn_numbers.iter().position(|n| *n == number) {
                    self.drawn_numbers.remove(position);
                } else {
                    self.drawn_numbers.push(number);
                    self.is_drawing = true;
                }
                true
            }
            SessionAction::EndGame => {
                if let Some(tier) = self.current_game.take() {
                    self.game_history.push(GameRecord {
                        tier,
                        numbers: self.drawn_numbers.clone(),
                    });
                }
                self.drawn_numbers.clear();
                self.is_drawing = false;
                self.is_winning = false;
                true
            }
            SessionAction::SetWinning(value) => {
                if self.is_winning == value {
                    return false;
                }
                self.is_winning = value;
                true
            }
            SessionAction::ResumeGame => {
                let next = if self.is_quines_du_sud_mode {
                    Some(GameTier::Quine)
                } else {
                    self.current_game.and_then(game::next_tier)
                };
                let keep_numbers = !self.with_demarque || self.is_quines_du_sud_mode;
                self.is_winning = false;
                self.current_game = next;
                if !keep_numbers {
                    self.drawn_numbers.clear();
                }
                true
            }
            SessionAction::ResetAll => {
                // Progress is wiped; configuration (mode flags, prize texts,
                // wheel setup, loaded images) survives so a mid-event reset
                // never costs the operator their preparation.
                self.current_game = None;
                self.drawn_numbers.clear();
                self.is_drawing = false;
                self.game_history.clear();
                self.is_winning = false;
                self.is_wheel_mode = false;
                self.wheel_active_prize.clear();
                self.wheel_winning_number = None;
                self.is_wheel_spinning = false;
                self.wheel_draw_history.clear();
                self.wheel_target_rotation = 0.0;
                self.wheel_current_rotation = 0.0;
                self.is_image_display_mode = false;
                true
            }
            SessionAction::ToggleManualMode => {
                self.is_manual_mode = !self.is_manual_mode;
                true
            }
            SessionAction::ToggleBingoMode => {
                // The pool is only selectable between games; clearing the
                // draws keeps every recorded number inside the new range.
                if self.current_game.is_some() {
                    return false;
                }
                self.is_bingo_mode = !self.is_bingo_mode;
                self.drawn_numbers.clear();
                true
            }
            SessionAction::ToggleDemarque => {
                self.with_demarque = !self.with_demarque;
                true
            }
            SessionAction::ToggleQuinesDuSud => {
                self.is_quines_du_sud_mode = !self.is_quines_du_sud_mode;
                true
            }
            SessionAction::SetPrizeDescription(description) => {
                if self.prize_description == description {
                    return false;
                }
                self.prize_description = description;
                true
            }
            SessionAction::SetPrizeDescriptions {
                quine,
                double_quine,
                carton_plein,
            } => {
                let next = PrizeDescriptions {
                    quine,
                    double_quine,
                    carton_plein,
                };
                if self.prize_descriptions == next {
                    return false;
                }
                self.prize_descriptions = next;
                true
            }
            SessionAction::ToggleWheelMode => {
                self.is_wheel_mode = !self.is_wheel_mode;
                self.wheel_winning_number = None;
                self.is_wheel_spinning = false;
                if self.is_wheel_mode {
                    self.is_image_display_mode = false;
                }
                true
            }
            SessionAction::SetWheelNumberCount(count) => {
                let count = count.max(1);
                if self.wheel_number_count == count {
                    return false;
                }
                self.wheel_number_count = count;
                self.wheel_winning_number = None;
                true
            }
            SessionAction::SetWheelPrize(prize) => {
                if self.wheel_prize == prize {
                    return false;
                }
                self.wheel_prize = prize;
                true
            }
            SessionAction::SpinWheel => {
                if self.is_wheel_spinning {
                    return false;
                }
                let outcome = wheel::spin(self.wheel_number_count, self.wheel_current_rotation, rng);
                // The result on screen moves to the history only once the
                // next spin replaces it.
                if let Some(previous) = self.wheel_winning_number {
                    self.wheel_draw_history.push(WheelRecord {
                        number: previous,
                        prize: self.wheel_active_prize.clone(),
                    });
                }
                self.is_wheel_spinning = true;
                self.wheel_winning_number = Some(outcome.winning_number);
                self.wheel_active_prize = self.wheel_prize.clone();
                self.wheel_target_rotation = outcome.target_rotation;
                true
            }
            SessionAction::WheelSpinFinished => {
                if !self.is_wheel_spinning {
                    return false;
                }
                self.is_wheel_spinning = false;
                self.wheel_current_rotation = self.wheel_target_rotation;
                true
            }
            SessionAction::AddImage { id, name, data_url } => {
                self.local_images.push(LocalImage { id, name, data_url });
                true
            }
            SessionAction::SelectImage(id) => {
                if self.selected_image_id == id {
                    return false;
                }
                self.selected_image_id = id;
                true
            }
            SessionAction::DeleteAllImages => {
                if self.local_images.is_empty() && !self.is_image_display_mode {
                    return false;
                }
                self.local_images.clear();
                self.selected_image_id = None;
                self.is_image_display_mode = false;
                true
            }
            SessionAction::ToggleImageDisplay => {
                self.is_image_display_mode = !self.is_image_display_mode;
                if self.is_image_display_mode {
                    self.is_wheel_mode = false;
                }
                true
            }
        }
    }
}
