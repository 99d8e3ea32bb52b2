//! # Carton Lifecycle State Machine
//!
//! ```text
//! Created ──print──▶ Printed ──place──▶ Placed (terminal)
//! ```
//!
//! A carton is registered from a validated form. Registration assigns an
//! SSCC, classifies conveyability, and fixes the label placement. None of
//! these change afterwards; only the lifecycle state advances.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dsg_core::carton::{validate_carton_form, CartonForm};
use dsg_core::{
    CartonProfile, CartonRecordId, ConveyabilityResult, DsgError, LabelPlacement, SerialSource,
    Sscc, SsccGenerator, Timestamp,
};

// ─── Carton State ────────────────────────────────────────────────────

/// Lifecycle state of a carton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartonState {
    /// Registered with an SSCC; label not yet printed.
    Created,
    /// Label printed.
    Printed,
    /// Label applied and carton placed for palletizing.
    Placed,
}

impl CartonState {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Placed)
    }
}

impl std::fmt::Display for CartonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::Printed => "PRINTED",
            Self::Placed => "PLACED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from carton registration and lifecycle transitions.
#[derive(Error, Debug)]
pub enum CartonError {
    /// The carton form failed field validation.
    #[error(transparent)]
    Validation(#[from] DsgError),

    /// The user did not attest to label placement.
    #[error("label placement must be attested before a carton is created")]
    PlacementNotAttested,

    /// The transition is not valid from the current state.
    #[error("invalid carton transition for {carton_id}: {from} -> {to}")]
    InvalidTransition {
        /// User-assigned carton ID.
        carton_id: String,
        /// Current state.
        from: CartonState,
        /// Attempted state.
        to: CartonState,
    },
}

// ─── Transition Log ──────────────────────────────────────────────────

/// Record of one carton state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartonTransitionRecord {
    /// State before the transition.
    pub from_state: CartonState,
    /// State after the transition.
    pub to_state: CartonState,
    /// When the transition happened.
    pub timestamp: Timestamp,
}

// ─── Carton ──────────────────────────────────────────────────────────

/// A registered carton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carton {
    /// Internal record identifier.
    pub id: CartonRecordId,
    /// User-assigned carton ID.
    pub carton_id: String,
    /// Shipping container code printed on the label.
    pub sscc: Sscc,
    /// Measured dimensions and weight.
    pub profile: CartonProfile,
    /// Classification at registration time.
    pub conveyability: ConveyabilityResult,
    /// Current lifecycle state.
    pub state: CartonState,
    /// When the carton was registered.
    pub created_at: Timestamp,
    /// Ordered log of state changes.
    pub transitions: Vec<CartonTransitionRecord>,
}

impl Carton {
    /// Register a carton from form input, drawing its SSCC from `generator`.
    ///
    /// # Errors
    ///
    /// [`CartonError::PlacementNotAttested`] if the form lacks the placement
    /// attestation, otherwise [`CartonError::Validation`] wrapping
    /// [`DsgError::CartonValidation`] with every failing field.
    pub fn register<S: SerialSource>(
        form: &CartonForm,
        generator: &mut SsccGenerator<S>,
    ) -> Result<Self, CartonError> {
        if !form.placement_attested {
            return Err(CartonError::PlacementNotAttested);
        }
        let profile = validate_carton_form(form).map_err(DsgError::CartonValidation)?;
        let sscc = generator.next_sscc();
        let conveyability = profile.classify();

        tracing::debug!(
            carton_id = %form.carton_id,
            sscc = %sscc,
            conveyable = conveyability.is_conveyable,
            warnings = conveyability.warnings.len(),
            "registered carton"
        );

        Ok(Self {
            id: CartonRecordId::new(),
            carton_id: form.carton_id.trim().to_string(),
            sscc,
            profile,
            conveyability,
            state: CartonState::Created,
            created_at: Timestamp::now(),
            transitions: Vec::new(),
        })
    }

    /// Mark the label printed (CREATED → PRINTED).
    pub fn print(&mut self) -> Result<(), CartonError> {
        self.transition(CartonState::Created, CartonState::Printed)
    }

    /// Mark the carton placed (PRINTED → PLACED).
    pub fn place(&mut self) -> Result<(), CartonError> {
        self.transition(CartonState::Printed, CartonState::Placed)
    }

    /// Where the label goes on this carton.
    pub fn placement(&self) -> LabelPlacement {
        self.conveyability.placement()
    }

    /// When the carton entered `state`, if it has.
    pub fn entered_at(&self, state: CartonState) -> Option<Timestamp> {
        if state == CartonState::Created {
            return Some(self.created_at);
        }
        self.transitions
            .iter()
            .find(|t| t.to_state == state)
            .map(|t| t.timestamp)
    }

    fn transition(&mut self, expected: CartonState, to: CartonState) -> Result<(), CartonError> {
        if self.state != expected {
            return Err(CartonError::InvalidTransition {
                carton_id: self.carton_id.clone(),
                from: self.state,
                to,
            });
        }
        self.transitions.push(CartonTransitionRecord {
            from_state: self.state,
            to_state: to,
            timestamp: Timestamp::now(),
        });
        tracing::debug!(
            carton_id = %self.carton_id,
            from = %self.state,
            to = %to,
            "carton transition"
        );
        self.state = to;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
