//! # dsg-core: Foundational Types for the DSG Routing Stack
//!
//! This crate is the leaf of the DSG routing workspace. It holds the pieces
//! of carton and pallet handling that have a precise input/output contract:
//! SSCC-18 generation and verification, conveyability classification, and
//! the numeric and field validation that feeds them. Shipment booking
//! checks (parcel limits, the ASN window) and bill of lading validation
//! live here too.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for SSCC components.** `ExtensionDigit`,
//!    `CompanyPrefix`, `SerialReference` validate at construction. An `Sscc`
//!    can only exist with a correct check digit.
//!
//! 2. **Injected randomness.** Serial references come from a `SerialSource`.
//!    Deterministic callers pass a closure; the default draws from `rand`.
//!
//! 3. **Total classifier.** `classify()` never fails. Out-of-range input
//!    produces warnings and `is_conveyable == false`, never an error.
//!
//! 4. **Fixed carrier policy.** `DSG_CONVEYABLE_POLICY` is a constant, not
//!    configuration.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dsg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Pure functions here do not log; logging happens in the callers.

pub mod carton;
pub mod config;
pub mod conveyability;
pub mod error;
pub mod identity;
pub mod measure;
pub mod pallet;
pub mod paperwork;
pub mod shipment;
pub mod sscc;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use carton::{validate_carton_form, CartonForm};
pub use config::LabelConfig;
pub use conveyability::{
    classify, classify_raw, CartonProfile, ConveyabilityResult, ConveyabilityWarning,
    ConveyablePolicy, LabelPlacement, DSG_CONVEYABLE_POLICY,
};
pub use error::{DsgError, FieldError, SsccComponent, SsccError};
pub use identity::{CartonRecordId, CompanyPrefix, ExtensionDigit, PalletId, SerialReference};
pub use measure::{parse_count, parse_measure};
pub use pallet::{PalletStats, QaChecklist, TrailerGuidance};
pub use paperwork::{completeness_percent, validate_bol, BolForm, BolType, PoLine};
pub use shipment::{
    check_parcel_eligibility, validate_shipment_form, ParcelEligibility, ParcelWarning,
    ShipmentForm, ShippingMode, DSG_PARCEL_POLICY,
};
pub use sscc::{
    check_digit, generate, RandomSerialSource, SerialSource, Sscc, SsccGenerator, SsccSegments,
};
pub use temporal::Timestamp;
