use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Length of a validator BLS public key.
pub const PUBKEY_LEN: usize = 48;
/// Nominal length of the withdrawal credentials field.
pub const WITHDRAWAL_CREDENTIALS_LEN: usize = 32;
/// Nominal length of a BLS deposit signature.
pub const SIGNATURE_LEN: usize = 96;

fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], ParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|_| ParseError::InvalidHex(input.to_string()))?;
    if bytes.len() != N {
        return Err(ParseError::InvalidLength {
            expected: N,
            found: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Token amounts travel as decimal strings so `u128` survives any JSON reader.
pub(crate) mod amount_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 20-byte account identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Test/demo helper: an address whose every byte is `byte`.
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.to_hex()).finish()
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_fixed::<20>(s).map(Address)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Width of the reserved discriminator prefix at the head of a [`RoleId`].
pub const ROLE_PREFIX_LEN: usize = 12;

const fn well_known_role(tag: [u8; 3]) -> [u8; 32] {
    let mut bytes = [0xffu8; 32];
    let mut i = 0;
    while i < ROLE_PREFIX_LEN {
        bytes[i] = 0;
        i += 1;
    }
    bytes[0] = tag[0];
    bytes[1] = tag[1];
    bytes[2] = tag[2];
    bytes
}

/// 32-byte role identifier.
///
/// The first [`ROLE_PREFIX_LEN`] bytes are the role tag (the reserved
/// discriminator prefix); the remaining 20 bytes scope the role, with
/// all-`0xff` meaning unscoped. A role whose tag is all zero is never valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub [u8; 32]);

impl RoleId {
    /// Administrators: may grant/revoke roles, mint, and configure policy.
    pub const DEFAULT_ADMIN: RoleId = RoleId(well_known_role([0xac, 0xce, 0x55]));

    /// The deposit pipeline; the only caller allowed into `check_deposit`.
    pub const DEPOSIT_CALLER: RoleId = RoleId(well_known_role([0xde, 0x90, 0x51]));

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_parts(prefix: [u8; ROLE_PREFIX_LEN], scope: [u8; 20]) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..ROLE_PREFIX_LEN].copy_from_slice(&prefix);
        bytes[ROLE_PREFIX_LEN..].copy_from_slice(&scope);
        Self(bytes)
    }

    pub fn prefix(&self) -> &[u8] {
        &self.0[..ROLE_PREFIX_LEN]
    }

    pub fn scope(&self) -> &[u8] {
        &self.0[ROLE_PREFIX_LEN..]
    }

    pub fn has_valid_prefix(&self) -> bool {
        self.prefix().iter().any(|b| *b != 0)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short operator-facing name for the well-known roles.
    pub fn label(&self) -> Option<&'static str> {
        match *self {
            Self::DEFAULT_ADMIN => Some("admin"),
            Self::DEPOSIT_CALLER => Some("deposit-caller"),
            _ => None,
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => f.write_str(&self.to_hex()),
        }
    }
}

impl fmt::Debug for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoleId").field(&self.to_hex()).finish()
    }
}

impl FromStr for RoleId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::DEFAULT_ADMIN),
            "deposit-caller" => Ok(Self::DEPOSIT_CALLER),
            _ => decode_fixed::<32>(s).map(RoleId),
        }
    }
}

impl Serialize for RoleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 16-bit deposit category derived from the credential bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DepositType(pub u16);

impl DepositType {
    pub const BLS: DepositType = DepositType(0x00);
    pub const EXECUTION: DepositType = DepositType(0x01);
    pub const COMPOUNDING: DepositType = DepositType(0x02);
    pub const BUILDER: DepositType = DepositType(0x03);
    /// Reserved sentinel for top-ups (all-zero signature and credentials).
    pub const TOP_UP: DepositType = DepositType(0xffff);

    /// The conventional categories, in display order.
    pub const KNOWN: [DepositType; 5] = [
        Self::BLS,
        Self::EXECUTION,
        Self::COMPOUNDING,
        Self::BUILDER,
        Self::TOP_UP,
    ];

    pub const fn code(&self) -> u16 {
        self.0
    }

    pub fn label(&self) -> Option<&'static str> {
        match *self {
            Self::BLS => Some("BLS withdrawal credentials"),
            Self::EXECUTION => Some("Execution withdrawal credentials"),
            Self::COMPOUNDING => Some("Compounding credentials"),
            Self::BUILDER => Some("ePBS builder credentials"),
            Self::TOP_UP => Some("Top-up deposits"),
            _ => None,
        }
    }
}

impl From<u16> for DepositType {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for DepositType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl FromStr for DepositType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        match input.as_str() {
            "bls" | "0x00" | "0" => return Ok(Self::BLS),
            "execution" | "eth1" | "0x01" | "1" => return Ok(Self::EXECUTION),
            "compounding" | "0x02" | "2" => return Ok(Self::COMPOUNDING),
            "builder" | "0x03" | "3" => return Ok(Self::BUILDER),
            "topup" | "top-up" | "0xffff" => return Ok(Self::TOP_UP),
            _ => {}
        }

        let parsed = match input.strip_prefix("0x") {
            Some(digits) => u16::from_str_radix(digits, 16),
            None => input.parse::<u16>(),
        };
        parsed
            .map(DepositType)
            .map_err(|_| ParseError::InvalidDepositType(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for DepositType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u16),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => Ok(DepositType(code)),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Administrator-configured policy for one deposit category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPolicy {
    /// Deposits of this category are rejected outright.
    pub blocked: bool,
    /// Deposits of this category do not consume a permission unit.
    pub no_token: bool,
}

impl DepositPolicy {
    pub const fn new(blocked: bool, no_token: bool) -> Self {
        Self { blocked, no_token }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Arguments of one deposit attempt, as forwarded by the deposit pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    pub sender: Address,
    pub pubkey: Vec<u8>,
    pub withdrawal_credentials: Vec<u8>,
    pub signature: Vec<u8>,
    /// Deposit amount in gwei.
    pub amount: u64,
}

impl DepositRequest {
    pub fn new(
        sender: Address,
        pubkey: impl Into<Vec<u8>>,
        withdrawal_credentials: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
        amount: u64,
    ) -> Self {
        Self {
            sender,
            pubkey: pubkey.into(),
            withdrawal_credentials: withdrawal_credentials.into(),
            signature: signature.into(),
            amount,
        }
    }

    /// A top-up for an existing validator: zeroed credentials and signature.
    pub fn top_up(sender: Address, pubkey: impl Into<Vec<u8>>, amount: u64) -> Self {
        Self::new(
            sender,
            pubkey,
            vec![0u8; WITHDRAWAL_CREDENTIALS_LEN],
            vec![0u8; SIGNATURE_LEN],
            amount,
        )
    }
}

/// Descriptive metadata of the permission token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Deposit Token".into(),
            symbol: "DEPOSIT".into(),
        }
    }
}
