//! # dsg-cli: Command-Line Interface for the DSG Routing Stack
//!
//! Provides the `dsg` binary. Each subcommand lives in its own module and
//! exposes an `Args` struct plus a `run_*` handler returning the process
//! exit code.
//!
//! ## Subcommands
//!
//! - `dsg sscc generate|verify|format`: SSCC-18 codes and label text.
//! - `dsg classify`: Conveyability of a single carton.
//! - `dsg pallet <FILE>`: Evaluate a pallet description.
//! - `dsg shipment <FILE>`: Check a booking, its ASN window and parcel limits.
//! - `dsg bol <FILE>`: Score and validate a bill of lading.
//!
//! ```bash
//! dsg sscc generate --count 5
//! dsg sscc verify 000123451234567898
//! dsg classify --length 24 --width 18 --height 12 --weight 25
//! dsg --config label.yaml pallet pallet.yaml
//! dsg shipment shipment.yaml --at 2026-03-02T08:30:00Z
//! dsg bol bol.yaml
//! ```

pub mod bol;
pub mod classify;
pub mod config;
pub mod pallet;
pub mod shipment;
pub mod sscc;
