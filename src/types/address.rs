//! Street address — the key used for every external lookup.

use serde::{Deserialize, Serialize};

/// FIPS geographic identifier triple, used to key Census/ACS lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FipsCode {
    pub state: String,
    pub county: String,
    pub tract: String,
}

/// Immutable street address. Used to key external lookups (geocoding,
/// neighborhood data, comps); carries no derived behavior of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub county: Option<String>,
    pub lat: Option<rust_decimal::Decimal>,
    pub lon: Option<rust_decimal::Decimal>,
    pub fips: Option<FipsCode>,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>, state: impl Into<String>, zip: impl Into<String>) -> Self {
        Address {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            county: None,
            lat: None,
            lon: None,
            fips: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_new_has_no_optional_fields() {
        let a = Address::new("1 Main St", "Springfield", "CA", "90001");
        assert!(a.county.is_none());
        assert!(a.fips.is_none());
    }
}
