//! # dsg-state: Carton and Pallet Lifecycles
//!
//! Explicit state machines for the records the routing workflow creates.
//! Each record holds its current state and an ordered transition log;
//! transitions are methods that validate the current state and return a
//! structured error naming both ends when the move is not allowed.
//!
//! ## State Machines
//!
//! - **Carton** (`carton.rs`): `Created → Printed → Placed`.
//!
//! - **Pallet** (`pallet.rs`): `Assembling → QaPending → QaPassed | QaFailed`.
//!   Only placed cartons can be staged, and only while assembling.
//!
//! ## Design
//!
//! Both machines are small enums with runtime-checked transitions rather
//! than typestate types: records are created from user input at runtime
//! and are stored side by side in one collection regardless of state.

pub mod carton;
pub mod pallet;

pub use carton::{Carton, CartonError, CartonState, CartonTransitionRecord};
pub use pallet::{Pallet, PalletCarton, PalletError, PalletState, PalletTransitionRecord};
