use serde::{Deserialize, Serialize};

use crate::cards::{parse_board, parse_hand, Card, HoleCards};
use crate::error::{CoachError, CoachResult};
use crate::ev::Label;
use crate::table::{Action, Stage};

fn default_true() -> bool {
    true
}

fn generated_hand_id() -> String {
    format!("hand-{:08x}", rand::random::<u32>())
}

/// Codec for the player hand: exported compact ("AhKs"), imported either
/// compact or as a structured card pair.
mod hand_codec {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_hand, Card, HoleCards};

    pub fn serialize<S: Serializer>(hand: &HoleCards, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&format!("{}{}", hand[0], hand[1]))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Compact(String),
        Pair([Card; 2]),
        List(Vec<Card>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<HoleCards, D::Error> {
        match Repr::deserialize(de)? {
            Repr::Compact(s) => parse_hand(&s).map_err(D::Error::custom),
            Repr::Pair(cards) => Ok(cards),
            Repr::List(cards) if cards.len() == 2 => Ok([cards[0], cards[1]]),
            Repr::List(cards) => Err(D::Error::custom(format!(
                "hand must be 2 cards, got {}",
                cards.len()
            ))),
        }
    }
}

/// Same flexibility for the board: "Ks7d2c" or a card list.
mod board_codec {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_board, Card};

    pub fn serialize<S: Serializer>(board: &[Card], ser: S) -> Result<S::Ok, S::Error> {
        let compact: String = board.iter().map(|c| c.to_string()).collect();
        ser.serialize_str(&compact)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Compact(String),
        List(Vec<Card>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<Card>, D::Error> {
        match Repr::deserialize(de)? {
            Repr::Compact(s) => parse_board(&s).map_err(D::Error::custom),
            Repr::List(cards) => Ok(cards),
        }
    }
}

/// Immutable snapshot of one scored decision, shaped for bulk JSON
/// export and re-import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    #[serde(default = "generated_hand_id")]
    pub hand_id: String,
    #[serde(with = "hand_codec")]
    pub player_hand: HoleCards,
    pub position: String,
    pub num_players: usize,
    pub stage: Stage,
    #[serde(default, with = "board_codec")]
    pub community_cards: Vec<Card>,
    pub pot: f64,
    pub current_bet: f64,
    pub stack: f64,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet_size: Option<f64>,
    #[serde(default)]
    pub optimal_actions: Vec<Action>,
    #[serde(default)]
    pub ev_loss: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default = "default_true")]
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<serde_json::Value>,
}

/// Append-only store for decision records. `add` is fire-and-forget;
/// export/import round-trips through JSON arrays.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<DecisionRecord>,
}

impl RecordStore {
    pub fn new() -> RecordStore {
        RecordStore::default()
    }

    pub fn add(&mut self, record: DecisionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    pub fn export_json(&self) -> CoachResult<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Imports an array of records, appending to the store. Returns the
    /// number imported.
    pub fn import_json(&mut self, json: &str) -> CoachResult<usize> {
        let imported: Vec<DecisionRecord> = serde_json::from_str(json)
            .map_err(|e| CoachError::RecordImport(e.to_string()))?;
        let n = imported.len();
        self.records.extend(imported);
        Ok(n)
    }
}
