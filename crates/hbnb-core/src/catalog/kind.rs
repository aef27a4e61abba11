//! Record kinds.

use super::field::DefaultValue::{EmptyList, EmptyString, Zero, ZeroFloat};
use super::field::FieldDef;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// The closed set of record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

const USER_FIELDS: &[FieldDef] = &[
    FieldDef::new("email", EmptyString),
    FieldDef::new("password", EmptyString),
    FieldDef::new("first_name", EmptyString),
    FieldDef::new("last_name", EmptyString),
];

const STATE_FIELDS: &[FieldDef] = &[FieldDef::new("name", EmptyString)];

const CITY_FIELDS: &[FieldDef] = &[FieldDef::new("state_id", EmptyString)];

const AMENITY_FIELDS: &[FieldDef] = &[FieldDef::new("name", EmptyString)];

const PLACE_FIELDS: &[FieldDef] = &[
    FieldDef::new("city_id", EmptyString),
    FieldDef::new("user_id", EmptyString),
    FieldDef::new("name", EmptyString),
    FieldDef::new("description", EmptyString),
    FieldDef::new("number_rooms", Zero),
    FieldDef::new("number_bathrooms", Zero),
    FieldDef::new("max_guest", Zero),
    FieldDef::new("price_by_night", Zero),
    FieldDef::new("latitude", ZeroFloat),
    FieldDef::new("longitude", ZeroFloat),
    FieldDef::new("amenity_ids", EmptyList),
];

const REVIEW_FIELDS: &[FieldDef] = &[
    FieldDef::new("place_id", EmptyString),
    FieldDef::new("user_id", EmptyString),
    FieldDef::new("text", EmptyString),
];

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 7] = [
        Kind::BaseModel,
        Kind::User,
        Kind::State,
        Kind::City,
        Kind::Amenity,
        Kind::Place,
        Kind::Review,
    ];

    /// The kind's name as it appears in keys and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Kind::BaseModel => "BaseModel",
            Kind::User => "User",
            Kind::State => "State",
            Kind::City => "City",
            Kind::Amenity => "Amenity",
            Kind::Place => "Place",
            Kind::Review => "Review",
        }
    }

    /// Look up a kind by exact name.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Default attributes declared for this kind.
    pub fn fields(self) -> &'static [FieldDef] {
        match self {
            Kind::BaseModel => &[],
            Kind::User => USER_FIELDS,
            Kind::State => STATE_FIELDS,
            Kind::City => CITY_FIELDS,
            Kind::Amenity => AMENITY_FIELDS,
            Kind::Place => PLACE_FIELDS,
            Kind::Review => REVIEW_FIELDS,
        }
    }

    /// Get a default field by name.
    pub fn field(self, name: &str) -> Option<&'static FieldDef> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_name(s).ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    #[test]
    fn test_name_roundtrip() {
        for kind in Kind::ALL {
            assert_eq!(kind.name().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(Kind::from_name("user").is_none());
        assert!(Kind::from_name("Users").is_none());
        assert!(matches!("Nope".parse::<Kind>(), Err(Error::UnknownKind(n)) if n == "Nope"));
    }

    #[test]
    fn test_place_field_types() {
        assert_eq!(Kind::Place.field("number_rooms").unwrap().value_type(), ValueType::Int);
        assert_eq!(Kind::Place.field("latitude").unwrap().value_type(), ValueType::Float);
        assert_eq!(Kind::Place.field("amenity_ids").unwrap().value_type(), ValueType::List);
        assert!(Kind::BaseModel.fields().is_empty());
        assert!(Kind::User.field("number_rooms").is_none());
    }
}
