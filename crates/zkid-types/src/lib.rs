pub mod contract;
pub mod field;
pub mod proof;
pub mod role;

pub use contract::{CircuitProofs, ContractProofData, PublicInputs, ShapeViolation, VerificationKeys};
pub use field::{FieldElement, ParseFieldError};
pub use proof::{FormattedCircuitProof, ProofResult};
pub use role::{CircuitRole, ProofKind};

/// Field elements per verification key, as the verifier contract expects.
pub const VKEY_SIZE: usize = 128;

/// Field elements per proof.
pub const PROOF_SIZE: usize = 459;

/// Public inputs per sub-circuit.
pub const PUBLIC_INPUT_COUNT: usize = 2;

/// Sub-proofs in a complete chain (A → B → C → D).
pub const PROOF_COUNT: usize = 4;
