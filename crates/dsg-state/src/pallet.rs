//! # Pallet Lifecycle State Machine
//!
//! ```text
//! Assembling ──assemble──▶ QaPending ──pass──▶ QaPassed (terminal)
//!                                    └──fail──▶ QaFailed (terminal)
//! ```
//!
//! Cartons are staged while the pallet is assembling. `assemble` freezes the
//! carton list and snapshots [`PalletStats`]. QA then passes only when every
//! checklist item is ticked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dsg_core::pallet::{check_brick_layer, check_overhang};
use dsg_core::{
    CartonProfile, CartonRecordId, PalletId, PalletStats, QaChecklist, Sscc, Timestamp,
    TrailerGuidance,
};

use crate::carton::{Carton, CartonState};

// ─── Pallet State ────────────────────────────────────────────────────

/// Lifecycle state of a pallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalletState {
    /// Cartons are being staged.
    Assembling,
    /// Carton list frozen; awaiting QA.
    QaPending,
    /// QA passed.
    QaPassed,
    /// QA failed.
    QaFailed,
}

impl PalletState {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::QaPassed | Self::QaFailed)
    }
}

impl std::fmt::Display for PalletState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Assembling => "ASSEMBLING",
            Self::QaPending => "QA_PENDING",
            Self::QaPassed => "QA_PASSED",
            Self::QaFailed => "QA_FAILED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from pallet operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PalletError {
    /// The operation is not valid from the current state.
    #[error("invalid pallet transition for {pallet_id}: {from} -> {to}")]
    InvalidTransition {
        /// Pallet identifier.
        pallet_id: PalletId,
        /// Current state.
        from: PalletState,
        /// Attempted state.
        to: PalletState,
    },

    /// Cartons can only be changed while the pallet is assembling.
    #[error("pallet {pallet_id} is {state}; cartons can only change while ASSEMBLING")]
    NotAssembling {
        /// Pallet identifier.
        pallet_id: PalletId,
        /// Current state.
        state: PalletState,
    },

    /// QA has been recorded; the pallet can no longer change.
    #[error("pallet {pallet_id} is {state}; QA is already recorded")]
    Closed {
        /// Pallet identifier.
        pallet_id: PalletId,
        /// Terminal state.
        state: PalletState,
    },

    /// The carton has not been placed yet.
    #[error("carton {carton_id} is {state}; only PLACED cartons can be palletized")]
    CartonNotPlaced {
        /// User-assigned carton ID.
        carton_id: String,
        /// The carton's current state.
        state: CartonState,
    },

    /// The carton is already on this pallet.
    #[error("carton {carton_id} is already on the pallet")]
    DuplicateCarton {
        /// User-assigned carton ID.
        carton_id: String,
    },

    /// The carton is not on this pallet.
    #[error("carton record {0} is not on the pallet")]
    UnknownCarton(CartonRecordId),

    /// A pallet with no cartons cannot go to QA.
    #[error("pallet {0} has no cartons")]
    Empty(PalletId),

    /// QA cannot pass with unticked checklist items.
    #[error("QA checklist incomplete: {}", .outstanding.join(", "))]
    QaIncomplete {
        /// Names of the unticked items.
        outstanding: Vec<&'static str>,
    },
}

// ─── Transition Log ──────────────────────────────────────────────────

/// Record of one pallet state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletTransitionRecord {
    /// State before the transition.
    pub from_state: PalletState,
    /// State after the transition.
    pub to_state: PalletState,
    /// When the transition happened.
    pub timestamp: Timestamp,
}

// ─── Pallet ──────────────────────────────────────────────────────────

/// A carton as staged on a pallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletCarton {
    /// Record identifier of the source carton.
    pub id: CartonRecordId,
    /// User-assigned carton ID.
    pub carton_id: String,
    /// The carton's shipping container code.
    pub sscc: Sscc,
    /// Dimensions and weight.
    pub profile: CartonProfile,
}

impl From<&Carton> for PalletCarton {
    fn from(carton: &Carton) -> Self {
        Self {
            id: carton.id,
            carton_id: carton.carton_id.clone(),
            sscc: carton.sscc.clone(),
            profile: carton.profile,
        }
    }
}

/// A pallet under assembly or QA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pallet {
    /// Pallet identifier.
    pub id: PalletId,
    /// Staged cartons, in the order added.
    pub cartons: Vec<PalletCarton>,
    /// Loader QA attestations.
    pub qa: QaChecklist,
    /// Trailer loading acknowledgements.
    pub trailer: TrailerGuidance,
    /// Current lifecycle state.
    pub state: PalletState,
    /// Statistics frozen at assembly. `None` while assembling.
    pub stats: Option<PalletStats>,
    /// When the pallet was opened.
    pub created_at: Timestamp,
    /// Ordered log of state changes.
    pub transitions: Vec<PalletTransitionRecord>,
}

impl Pallet {
    /// Open an empty pallet.
    pub fn new() -> Self {
        Self {
            id: PalletId::new(),
            cartons: Vec::new(),
            qa: QaChecklist::default(),
            trailer: TrailerGuidance::default(),
            state: PalletState::Assembling,
            stats: None,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
        }
    }

    /// Stage a placed carton.
    pub fn add_carton(&mut self, carton: &Carton) -> Result<(), PalletError> {
        self.require_assembling()?;
        if carton.state != CartonState::Placed {
            return Err(PalletError::CartonNotPlaced {
                carton_id: carton.carton_id.clone(),
                state: carton.state,
            });
        }
        if self.cartons.iter().any(|c| c.id == carton.id) {
            return Err(PalletError::DuplicateCarton {
                carton_id: carton.carton_id.clone(),
            });
        }
        self.cartons.push(PalletCarton::from(carton));
        tracing::debug!(pallet_id = %self.id, carton_id = %carton.carton_id, "carton staged");
        Ok(())
    }

    /// Remove a staged carton by record ID.
    pub fn remove_carton(&mut self, id: CartonRecordId) -> Result<PalletCarton, PalletError> {
        self.require_assembling()?;
        let idx = self
            .cartons
            .iter()
            .position(|c| c.id == id)
            .ok_or(PalletError::UnknownCarton(id))?;
        Ok(self.cartons.remove(idx))
    }

    /// Replace the QA checklist. Allowed until QA completes.
    pub fn set_qa_checklist(&mut self, qa: QaChecklist) -> Result<(), PalletError> {
        self.require_open()?;
        self.qa = qa;
        Ok(())
    }

    /// Replace the trailer guidance acknowledgements. Allowed until QA completes.
    pub fn set_trailer_guidance(&mut self, trailer: TrailerGuidance) -> Result<(), PalletError> {
        self.require_open()?;
        self.trailer = trailer;
        Ok(())
    }

    /// Current statistics: the snapshot once assembled, otherwise live.
    pub fn stats(&self) -> PalletStats {
        self.stats
            .unwrap_or_else(|| PalletStats::compute(self.profiles()))
    }

    /// Every staged carton fits the pallet footprint.
    pub fn overhang_ok(&self) -> bool {
        check_overhang(self.profiles())
    }

    /// The pallet has cartons to brick-layer.
    pub fn brick_layer_ok(&self) -> bool {
        check_brick_layer(self.profiles())
    }

    /// Freeze the carton list and move to QA (ASSEMBLING → QA_PENDING).
    pub fn assemble(&mut self) -> Result<PalletStats, PalletError> {
        self.require_state(PalletState::Assembling, PalletState::QaPending)?;
        if self.cartons.is_empty() {
            return Err(PalletError::Empty(self.id));
        }
        let stats = PalletStats::compute(self.profiles());
        self.stats = Some(stats);
        self.do_transition(PalletState::QaPending);
        Ok(stats)
    }

    /// Record the QA outcome (QA_PENDING → QA_PASSED | QA_FAILED).
    ///
    /// # Errors
    ///
    /// [`PalletError::QaIncomplete`] when `passed` is requested with
    /// unticked checklist items; the pallet stays in QA_PENDING.
    pub fn complete_qa(&mut self, passed: bool) -> Result<PalletState, PalletError> {
        let to = if passed {
            PalletState::QaPassed
        } else {
            PalletState::QaFailed
        };
        self.require_state(PalletState::QaPending, to)?;
        if passed {
            let outstanding = self.qa.outstanding();
            if !outstanding.is_empty() {
                return Err(PalletError::QaIncomplete { outstanding });
            }
        } else {
            tracing::warn!(
                pallet_id = %self.id,
                outstanding = ?self.qa.outstanding(),
                "pallet failed QA"
            );
        }
        self.do_transition(to);
        Ok(to)
    }

    fn profiles(&self) -> impl Iterator<Item = &CartonProfile> {
        self.cartons.iter().map(|c| &c.profile)
    }

    fn require_open(&self) -> Result<(), PalletError> {
        if self.state.is_terminal() {
            return Err(PalletError::Closed {
                pallet_id: self.id,
                state: self.state,
            });
        }
        Ok(())
    }

    fn require_assembling(&self) -> Result<(), PalletError> {
        if self.state != PalletState::Assembling {
            return Err(PalletError::NotAssembling {
                pallet_id: self.id,
                state: self.state,
            });
        }
        Ok(())
    }

    fn require_state(&self, expected: PalletState, to: PalletState) -> Result<(), PalletError> {
        if self.state != expected {
            return Err(PalletError::InvalidTransition {
                pallet_id: self.id,
                from: self.state,
                to,
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, to: PalletState) {
        self.transitions.push(PalletTransitionRecord {
            from_state: self.state,
            to_state: to,
            timestamp: Timestamp::now(),
        });
        tracing::debug!(
            pallet_id = %self.id,
            from = %self.state,
            to = %to,
            "pallet transition"
        );
        self.state = to;
    }
}

impl Default for Pallet {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
