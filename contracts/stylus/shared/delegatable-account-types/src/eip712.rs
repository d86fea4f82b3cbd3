//! Schema-driven EIP-712 typed structured data hashing.
//!
//! Off-chain signers (`eth_signTypedData_v4`) and the account compute this digest
//! independently, so the encoding follows EIP-712 exactly:
//! - `encodeType` lists the primary type followed by every referenced struct type, sorted by name.
//! - atomic values are encoded as one 32-byte word, `bytes`/`string` as the keccak of their contents.
//! - arrays hash the concatenation of their encoded elements; nested structs use their `hashStruct`.

use alloc::{
    borrow::ToOwned,
    collections::{BTreeMap, BTreeSet},
    string::String,
    vec::Vec,
};

use alloy_primitives::{keccak256, Address, B256, I256, U256};

/// Errors while hashing a typed value against a schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedDataError {
    /// A referenced struct type has no definition in the schema.
    UnknownType(String),
    /// A type string that is neither a struct nor a supported atomic/dynamic type.
    InvalidType(String),
    /// The value does not have the shape the type requires.
    TypeMismatch(String),
    FieldCount {
        ty: String,
        expected: usize,
        found: usize,
    },
    ArrayLength {
        ty: String,
        expected: usize,
        found: usize,
    },
    /// An unsigned integer does not fit the declared width.
    ValueOutOfRange(String),
}

/// A value conforming to some EIP-712 type.
///
/// Struct members are positional: they follow the field order of the struct definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedValue {
    Address(Address),
    Bool(bool),
    Uint(U256),
    Int(I256),
    /// `bytes1`..`bytes32`.
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<TypedValue>),
    Struct(Vec<TypedValue>),
}

impl From<Address> for TypedValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<U256> for TypedValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<B256> for TypedValue {
    fn from(value: B256) -> Self {
        Self::FixedBytes(value.to_vec())
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// One member of a struct definition, e.g. `address delegate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedField {
    pub name: String,
    pub ty: String,
}

/// A set of named struct definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Types {
    structs: BTreeMap<String, Vec<TypedField>>,
}

impl Types {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Types::insert`]. Fields are `(name, type)` pairs in declaration order.
    pub fn with(mut self, name: &str, fields: &[(&str, &str)]) -> Self {
        self.insert(name, fields);
        self
    }

    pub fn insert(&mut self, name: &str, fields: &[(&str, &str)]) {
        let fields = fields
            .iter()
            .map(|(field, ty)| TypedField {
                name: (*field).to_owned(),
                ty: (*ty).to_owned(),
            })
            .collect();
        self.structs.insert(name.to_owned(), fields);
    }

    pub fn fields(&self, name: &str) -> Option<&[TypedField]> {
        self.structs.get(name).map(Vec::as_slice)
    }

    /// `encodeType(primary)`: the primary definition followed by its dependencies sorted by name.
    pub fn encode_type(&self, primary: &str) -> Result<String, TypedDataError> {
        let mut deps = BTreeSet::new();
        self.collect_dependencies(primary, &mut deps)?;
        deps.remove(primary);

        let mut out = String::new();
        self.write_definition(primary, &mut out)?;
        for dep in &deps {
            self.write_definition(dep, &mut out)?;
        }
        Ok(out)
    }

    pub fn type_hash(&self, primary: &str) -> Result<B256, TypedDataError> {
        Ok(keccak256(self.encode_type(primary)?.as_bytes()))
    }

    /// `hashStruct(value) = keccak256(typeHash || encodeData(value))`.
    pub fn hash_struct(&self, name: &str, value: &TypedValue) -> Result<B256, TypedDataError> {
        let fields = self
            .fields(name)
            .ok_or_else(|| TypedDataError::UnknownType(name.to_owned()))?;
        let TypedValue::Struct(members) = value else {
            return Err(TypedDataError::TypeMismatch(name.to_owned()));
        };
        if members.len() != fields.len() {
            return Err(TypedDataError::FieldCount {
                ty: name.to_owned(),
                expected: fields.len(),
                found: members.len(),
            });
        }

        let mut buf = Vec::with_capacity(32 * (fields.len() + 1));
        buf.extend_from_slice(self.type_hash(name)?.as_slice());
        for (field, member) in fields.iter().zip(members) {
            buf.extend_from_slice(self.encode_field(&field.ty, member)?.as_slice());
        }
        Ok(keccak256(buf))
    }

    /// Final digest: `keccak256("\x19\x01" || domainSeparator || hashStruct(message))`.
    pub fn signing_hash(
        &self,
        domain: &Eip712Domain,
        primary: &str,
        value: &TypedValue,
    ) -> Result<B256, TypedDataError> {
        let struct_hash = self.hash_struct(primary, value)?;

        let mut buf = [0u8; 2 + 32 + 32];
        buf[0] = 0x19;
        buf[1] = 0x01;
        buf[2..34].copy_from_slice(domain.separator().as_slice());
        buf[34..66].copy_from_slice(struct_hash.as_slice());
        Ok(keccak256(buf))
    }

    fn collect_dependencies(
        &self,
        name: &str,
        found: &mut BTreeSet<String>,
    ) -> Result<(), TypedDataError> {
        let fields = self
            .fields(name)
            .ok_or_else(|| TypedDataError::UnknownType(name.to_owned()))?;
        for field in fields {
            let base = base_type(&field.ty);
            if self.structs.contains_key(base) && found.insert(base.to_owned()) {
                self.collect_dependencies(base, found)?;
            }
        }
        Ok(())
    }

    fn write_definition(&self, name: &str, out: &mut String) -> Result<(), TypedDataError> {
        let fields = self
            .fields(name)
            .ok_or_else(|| TypedDataError::UnknownType(name.to_owned()))?;
        out.push_str(name);
        out.push('(');
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&field.ty);
            out.push(' ');
            out.push_str(&field.name);
        }
        out.push(')');
        Ok(())
    }

    fn encode_field(&self, ty: &str, value: &TypedValue) -> Result<B256, TypedDataError> {
        if let Some((element, fixed_len)) = split_array(ty)? {
            let TypedValue::Array(items) = value else {
                return Err(TypedDataError::TypeMismatch(ty.to_owned()));
            };
            if let Some(expected) = fixed_len {
                if items.len() != expected {
                    return Err(TypedDataError::ArrayLength {
                        ty: ty.to_owned(),
                        expected,
                        found: items.len(),
                    });
                }
            }
            let mut buf = Vec::with_capacity(32 * items.len());
            for item in items {
                buf.extend_from_slice(self.encode_field(element, item)?.as_slice());
            }
            return Ok(keccak256(buf));
        }

        if self.structs.contains_key(ty) {
            return self.hash_struct(ty, value);
        }

        match (ty, value) {
            ("address", TypedValue::Address(address)) => Ok(address.into_word()),
            ("bool", TypedValue::Bool(flag)) => Ok(word(U256::from(*flag as u8))),
            ("string", TypedValue::String(text)) => Ok(keccak256(text.as_bytes())),
            ("bytes", TypedValue::Bytes(bytes)) => Ok(keccak256(bytes)),
            _ => encode_sized(ty, value),
        }
    }
}

/// EIP-712 domain. Absent fields are left out of both the domain type and its encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: Option<String>,
    pub version: Option<String>,
    pub chain_id: Option<U256>,
    pub verifying_contract: Option<Address>,
    pub salt: Option<B256>,
}

impl Eip712Domain {
    pub fn new(name: &str, version: &str, chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: Some(name.to_owned()),
            version: Some(version.to_owned()),
            chain_id: Some(U256::from(chain_id)),
            verifying_contract: Some(verifying_contract),
            salt: None,
        }
    }

    /// `hashStruct(eip712Domain)`.
    pub fn separator(&self) -> B256 {
        let mut members: Vec<&str> = Vec::with_capacity(5);
        let mut words: Vec<B256> = Vec::with_capacity(5);

        if let Some(name) = &self.name {
            members.push("string name");
            words.push(keccak256(name.as_bytes()));
        }
        if let Some(version) = &self.version {
            members.push("string version");
            words.push(keccak256(version.as_bytes()));
        }
        if let Some(chain_id) = self.chain_id {
            members.push("uint256 chainId");
            words.push(word(chain_id));
        }
        if let Some(verifying_contract) = self.verifying_contract {
            members.push("address verifyingContract");
            words.push(verifying_contract.into_word());
        }
        if let Some(salt) = self.salt {
            members.push("bytes32 salt");
            words.push(salt);
        }

        let mut encoded_type = String::from("EIP712Domain(");
        encoded_type.push_str(&members.join(","));
        encoded_type.push(')');

        let mut buf = Vec::with_capacity(32 * (words.len() + 1));
        buf.extend_from_slice(keccak256(encoded_type.as_bytes()).as_slice());
        for w in &words {
            buf.extend_from_slice(w.as_slice());
        }
        keccak256(buf)
    }
}

fn word(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}

/// `Caveat[]` -> `Caveat`, `address[3][]` -> `address[3]`.
fn base_type(ty: &str) -> &str {
    match ty.find('[') {
        Some(i) => &ty[..i],
        None => ty,
    }
}

/// Split the outermost array dimension: `T[]` -> `(T, None)`, `T[4]` -> `(T, Some(4))`.
fn split_array(ty: &str) -> Result<Option<(&str, Option<usize>)>, TypedDataError> {
    if !ty.ends_with(']') {
        return Ok(None);
    }
    let open = ty
        .rfind('[')
        .ok_or_else(|| TypedDataError::InvalidType(ty.to_owned()))?;
    let inner = &ty[open + 1..ty.len() - 1];
    let fixed_len = if inner.is_empty() {
        None
    } else {
        Some(
            inner
                .parse::<usize>()
                .map_err(|_| TypedDataError::InvalidType(ty.to_owned()))?,
        )
    };
    Ok(Some((&ty[..open], fixed_len)))
}

fn encode_sized(ty: &str, value: &TypedValue) -> Result<B256, TypedDataError> {
    if let Some(width) = ty.strip_prefix("uint") {
        let bits = int_width(ty, width)?;
        let TypedValue::Uint(v) = value else {
            return Err(TypedDataError::TypeMismatch(ty.to_owned()));
        };
        if v.bit_len() > bits {
            return Err(TypedDataError::ValueOutOfRange(ty.to_owned()));
        }
        return Ok(word(*v));
    }

    if let Some(width) = ty.strip_prefix("int") {
        let bits = int_width(ty, width)?;
        let TypedValue::Int(v) = value else {
            return Err(TypedDataError::TypeMismatch(ty.to_owned()));
        };
        // Magnitude bits of a two's complement value, excluding the sign bit.
        let magnitude = if v.is_negative() {
            (!v.into_raw()).bit_len()
        } else {
            v.into_raw().bit_len()
        };
        if magnitude >= bits {
            return Err(TypedDataError::ValueOutOfRange(ty.to_owned()));
        }
        return Ok(word(v.into_raw()));
    }

    if let Some(width) = ty.strip_prefix("bytes") {
        let len = width
            .parse::<usize>()
            .map_err(|_| TypedDataError::InvalidType(ty.to_owned()))?;
        if len == 0 || len > 32 {
            return Err(TypedDataError::InvalidType(ty.to_owned()));
        }
        let TypedValue::FixedBytes(bytes) = value else {
            return Err(TypedDataError::TypeMismatch(ty.to_owned()));
        };
        if bytes.len() != len {
            return Err(TypedDataError::TypeMismatch(ty.to_owned()));
        }
        let mut out = [0u8; 32];
        out[..len].copy_from_slice(bytes);
        return Ok(B256::from(out));
    }

    Err(TypedDataError::InvalidType(ty.to_owned()))
}

fn int_width(ty: &str, width: &str) -> Result<usize, TypedDataError> {
    let bits = width
        .parse::<usize>()
        .map_err(|_| TypedDataError::InvalidType(ty.to_owned()))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(TypedDataError::InvalidType(ty.to_owned()));
    }
    Ok(bits)
}
