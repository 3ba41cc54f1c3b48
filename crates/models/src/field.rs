//! Tri-state attribute storage.
//!
//! A model attribute is either never assigned, explicitly assigned `null`, or
//! assigned a value. Marshaling omits the first, emits `null` for the second
//! and projects the third, so `Option<T>` alone cannot carry it.

/// Storage for one model attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// Never assigned. Omitted from the wire projection.
    Unset,
    /// Explicitly assigned an empty value. Emitted as `null`.
    Null,
    /// Assigned a value.
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Whether the attribute was assigned, including an explicit null.
    pub fn is_assigned(&self) -> bool {
        !self.is_unset()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn set(&mut self, value: T) {
        *self = Self::Value(value);
    }

    pub fn set_null(&mut self) {
        *self = Self::Null;
    }

    /// Forget any assignment.
    pub fn clear(&mut self) {
        *self = Self::Unset;
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Self::Unset => Field::Unset,
            Self::Null => Field::Null,
            Self::Value(v) => Field::Value(f(v)),
        }
    }

    /// `None` becomes [`Field::Unset`].
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Value)
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let field: Field<String> = Field::default();
        assert!(field.is_unset());
        assert!(!field.is_assigned());
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_null_is_assigned_without_value() {
        let mut field = Field::Value(3_i64);
        field.set_null();
        assert!(field.is_assigned());
        assert_eq!(field.value(), None);

        field.clear();
        assert!(field.is_unset());
    }

    #[test]
    fn test_map_preserves_state() {
        assert_eq!(Field::<i64>::Unset.map(|v| v + 1), Field::Unset);
        assert_eq!(Field::<i64>::Null.map(|v| v + 1), Field::Null);
        assert_eq!(Field::Value(1_i64).map(|v| v + 1), Field::Value(2));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Field::from_option(Some("x")), Field::Value("x"));
        assert_eq!(Field::<&str>::from_option(None), Field::Unset);
        assert_eq!(Field::from("x"), Field::Value("x"));
    }
}
