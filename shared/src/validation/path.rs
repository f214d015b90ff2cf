//! Addressable field paths
//!
//! A path is either a top-level field name (`firstName`) or a one-level dotted
//! name into the contact sub-record (`contactInfo.email`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every field a draft exposes, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    FirstName,
    LastName,
    Department,
    Position,
    Status,
    Salary,
    HireDate,
    LeaveBalance,
    ContactEmail,
    ContactPhone,
}

impl FieldPath {
    pub const ALL: [FieldPath; 10] = [
        FieldPath::FirstName,
        FieldPath::LastName,
        FieldPath::Department,
        FieldPath::Position,
        FieldPath::Status,
        FieldPath::Salary,
        FieldPath::HireDate,
        FieldPath::LeaveBalance,
        FieldPath::ContactEmail,
        FieldPath::ContactPhone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Department => "department",
            Self::Position => "position",
            Self::Status => "status",
            Self::Salary => "salary",
            Self::HireDate => "hireDate",
            Self::LeaveBalance => "leaveBalance",
            Self::ContactEmail => "contactInfo.email",
            Self::ContactPhone => "contactInfo.phone",
        }
    }

    /// True for the leaves of `contactInfo`
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::ContactEmail | Self::ContactPhone)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Path that names no field of the record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field path: {0}")]
pub struct UnknownFieldPath(pub String);

impl FromStr for FieldPath {
    type Err = UnknownFieldPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownFieldPath(s.to_string());
        match s.split_once('.') {
            None => match s {
                "firstName" => Ok(Self::FirstName),
                "lastName" => Ok(Self::LastName),
                "department" => Ok(Self::Department),
                "position" => Ok(Self::Position),
                "status" => Ok(Self::Status),
                "salary" => Ok(Self::Salary),
                "hireDate" => Ok(Self::HireDate),
                "leaveBalance" => Ok(Self::LeaveBalance),
                _ => Err(unknown()),
            },
            Some(("contactInfo", "email")) => Ok(Self::ContactEmail),
            Some(("contactInfo", "phone")) => Ok(Self::ContactPhone),
            Some(_) => Err(unknown()),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
