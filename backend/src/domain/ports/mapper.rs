//! Bidirectional conversion between domain values and persistence rows.
//!
//! Mappers are pure: no I/O, no clock, no defaults for missing data. Reading
//! a row that cannot represent a valid domain value fails with
//! [`MappingError`]. For every valid domain value `d`,
//! `to_domain(to_orm(&d)) == Ok(d)`.

use std::str::FromStr;

use super::define_port_error;

define_port_error! {
    /// Raised when a persisted row does not describe a valid domain value.
    pub enum MappingError {
        /// Text column holds a value outside the known set.
        UnknownVariant { field: String, value: String } =>
            "unknown {field} value {value:?}",
        /// Numeric column holds a value outside the accepted range.
        OutOfRange { field: String, value: i64 } =>
            "{field} value {value} is out of range",
        /// Columns disagree with each other.
        Inconsistent { message: String } =>
            "inconsistent record: {message}",
    }
}

/// Pure converter between a domain type and its persistence shape.
pub trait OrmMapper: Send + Sync {
    /// Domain representation.
    type Domain;
    /// Persistence representation.
    type Orm;

    /// Build a domain value from a stored row.
    fn to_domain(&self, orm: Self::Orm) -> Result<Self::Domain, MappingError>;

    /// Build the stored row for a domain value.
    fn to_orm(&self, domain: &Self::Domain) -> Self::Orm;

    /// Element-wise [`Self::to_domain`], preserving order and length.
    ///
    /// Stops at the first failing row.
    fn to_domain_list(&self, rows: Vec<Self::Orm>) -> Result<Vec<Self::Domain>, MappingError> {
        rows.into_iter().map(|row| self.to_domain(row)).collect()
    }

    /// Element-wise [`Self::to_orm`], preserving order and length.
    fn to_orm_list(&self, values: &[Self::Domain]) -> Vec<Self::Orm> {
        values.iter().map(|value| self.to_orm(value)).collect()
    }
}

/// Convert a database integer into a narrower domain integer.
pub fn narrow<T, S>(field: &str, value: S) -> Result<T, MappingError>
where
    T: TryFrom<S>,
    S: Copy + Into<i64>,
{
    T::try_from(value).map_err(|_| MappingError::out_of_range(field, value.into()))
}

/// [`narrow`], also rejecting values outside the domain range `min..=max`.
pub fn narrow_within<T, S>(field: &str, value: S, min: T, max: T) -> Result<T, MappingError>
where
    T: TryFrom<S> + PartialOrd,
    S: Copy + Into<i64>,
{
    let narrowed: T = narrow(field, value)?;
    if narrowed < min || narrowed > max {
        return Err(MappingError::out_of_range(field, value.into()));
    }
    Ok(narrowed)
}

/// Parse a text column into a closed enumeration.
pub fn parse_variant<T: FromStr>(field: &str, value: &str) -> Result<T, MappingError> {
    value
        .parse()
        .map_err(|_| MappingError::unknown_variant(field, value))
}
