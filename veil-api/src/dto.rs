//! DTOs for API requests and responses.
//!
//! Field names follow the web client: camelCase, `pSpend`/`pView` for the
//! meta-address keys, `R` for the ephemeral value and `aStealth` for the
//! derived secret.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use veil_core::error::{Result, VeilError};
use veil_core::types::{
    Announcement, Hash32, MetaAddress, NoteView, PoolState, Proof, SweepOutcome, Transfer,
};

/// Meta-address as exchanged with clients.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MetaAddressDto {
    /// Spend key (hex)
    #[serde(rename = "pSpend", default)]
    pub p_spend: String,
    /// View key (hex)
    #[serde(rename = "pView", default)]
    pub p_view: String,
}

impl From<&MetaAddress> for MetaAddressDto {
    fn from(meta: &MetaAddress) -> Self {
        Self {
            p_spend: meta.spend_key.to_hex(),
            p_view: meta.view_key.to_hex(),
        }
    }
}

impl MetaAddressDto {
    /// Parses and validates both keys.
    pub fn parse(&self) -> Result<MetaAddress> {
        MetaAddress::from_hex_parts(&self.p_spend, &self.p_view)
    }
}

/// Response for name resolution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    /// Name that was resolved
    pub ens_name: String,
    /// Resolved meta-address
    pub meta_address: MetaAddressDto,
}

/// Request to derive a stealth address.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeriveRequest {
    /// Name the meta-address was resolved from
    #[serde(default)]
    pub ens_name: String,
    /// Recipient meta-address
    pub meta_address: Option<MetaAddressDto>,
}

/// A recorded announcement.
#[derive(Debug, Serialize)]
pub struct AnnouncementDto {
    /// Announcement ID
    pub id: u64,
    /// Name the meta-address was resolved from
    #[serde(rename = "ensName")]
    pub ens_name: String,
    /// Meta-address the payment was derived for
    #[serde(rename = "metaAddress")]
    pub meta_address: MetaAddressDto,
    /// Derived secret (hex)
    #[serde(rename = "aStealth")]
    pub a_stealth: String,
    /// One-time address (0x-prefixed)
    #[serde(rename = "stealthAddress")]
    pub stealth_address: String,
    /// Ephemeral value (hex)
    #[serde(rename = "R")]
    pub r: String,
    /// View tag (2 hex chars)
    #[serde(rename = "viewTag")]
    pub view_tag: String,
}

impl From<&Announcement> for AnnouncementDto {
    fn from(ann: &Announcement) -> Self {
        Self {
            id: ann.id,
            ens_name: ann.subject_name.clone(),
            meta_address: MetaAddressDto::from(&ann.meta_address),
            a_stealth: ann.derived_secret.to_hex(),
            stealth_address: ann.address.to_hex_string(),
            r: ann.ephemeral_public.to_hex(),
            view_tag: ann.view_tag.to_hex(),
        }
    }
}

/// Optional statement for proof generation. Any other body is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRequest {
    /// Announcement the proof is about
    pub announcement_id: Option<u64>,
}

/// Response wrapping a proof.
#[derive(Debug, Serialize)]
pub struct ProofResponse {
    /// The proof
    pub proof: Proof,
}

/// Request to deposit into the pool.
///
/// Both fields are kept as raw JSON so that wrong types map onto the
/// protocol errors instead of a body rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// Announcement to deposit against
    #[serde(default)]
    pub announcement_id: Value,
    /// Amount, as a JSON integer
    #[serde(default)]
    pub value: Value,
}

impl DepositRequest {
    /// Extracts the announcement id.
    pub fn announcement_id(&self) -> Result<u64> {
        match &self.announcement_id {
            Value::Null => Err(VeilError::MissingParameters("announcementId is required".into())),
            v if v.as_u64() == Some(0) => {
                Err(VeilError::MissingParameters("announcementId is required".into()))
            }
            v => v.as_u64().ok_or_else(|| {
                VeilError::InvalidEncoding(format!("announcementId must be an integer, got {}", v))
            }),
        }
    }

    /// Extracts the amount. Sign is preserved so the pool can reject it.
    pub fn amount(&self) -> Result<i128> {
        match &self.value {
            Value::Null => Err(VeilError::MissingParameters("value is required".into())),
            Value::Number(n) => n
                .as_u64()
                .map(i128::from)
                .or_else(|| n.as_i64().map(i128::from))
                .ok_or_else(|| {
                    VeilError::InvalidAmount(format!("value must be an integer, got {}", n))
                }),
            v => Err(VeilError::InvalidAmount(format!(
                "value must be an integer, got {}",
                v
            ))),
        }
    }
}

/// A note as shown to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    /// Note ID
    pub id: u64,
    /// Commitment (hex)
    pub commitment: Hash32,
    /// Stealth address the note is held at
    pub stealth_address: String,
    /// Amount
    pub value: u64,
    /// Whether a sweep spent it
    pub spent: bool,
}

impl From<&NoteView> for NoteDto {
    fn from(note: &NoteView) -> Self {
        Self {
            id: note.id,
            commitment: note.commitment,
            stealth_address: note.address.to_hex_string(),
            value: note.amount,
            spent: note.spent,
        }
    }
}

/// Response for a deposit.
#[derive(Debug, Serialize)]
pub struct DepositResponse {
    /// The created note
    pub note: NoteDto,
}

/// Response for pool state.
#[derive(Debug, Serialize)]
pub struct PoolStateResponse {
    /// Sum of unspent amounts
    pub total: u128,
    /// Every note
    pub commitments: Vec<NoteDto>,
    /// Nullifiers of spent notes
    pub nullifiers: Vec<Hash32>,
}

impl From<PoolState> for PoolStateResponse {
    fn from(state: PoolState) -> Self {
        Self {
            total: state.total,
            commitments: state.commitments.iter().map(NoteDto::from).collect(),
            nullifiers: state.nullifiers,
        }
    }
}

/// Request to sweep the pool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepRequest {
    /// View key (hex)
    #[serde(default)]
    pub p_view: String,
    /// Destination address
    #[serde(default)]
    pub main_address: String,
}

/// Response for a sweep.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    /// Total value moved
    pub swept: u128,
    /// Aggregate transfers (zero or one)
    pub transfers: Vec<Transfer>,
    /// Notes spent by this sweep
    pub spent_note_ids: Vec<u64>,
    /// Set when nothing was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SweepOutcome> for SweepResponse {
    fn from(outcome: SweepOutcome) -> Self {
        let message = outcome
            .is_empty()
            .then(|| veil_core::constants::EMPTY_SWEEP_MESSAGE.to_string());
        Self {
            swept: outcome.swept_total,
            transfers: outcome.transfers,
            spent_note_ids: outcome.spent_note_ids,
            message,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Announcements recorded
    pub announcements: u64,
    /// Notes deposited
    pub notes: u64,
    /// Digest backend
    pub digest: String,
}
