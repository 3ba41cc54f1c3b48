//! Declarative macros that generate the per-type boilerplate of the model layer.
//!
//! - [`wire_enum!`] declares a closed enum with its wire strings. The generated
//!   type is strict everywhere it is used directly; wrap it in
//!   [`Lenient`](crate::enums::Lenient) for the lenient policy.
//! - [`impl_model!`] wires a [`Model`](crate::marshal::Model) implementation into
//!   the value codec, `Hash`, and serde.
//! - [`polymorphic_model!`] declares a dispatch enum over the concrete subtypes
//!   of one base model, selected by the discriminator field.
//!
//! # Example Usage
//!
//! ```ignore
//! wire_enum! {
//!     /// Kind of schedule.
//!     pub enum ScheduleType {
//!         FixedFrequency => "FIXED_FREQUENCY",
//!         Cron => "CRON",
//!     }
//! }
//!
//! impl_model!(Schedule, CronSchedule);
//!
//! polymorphic_model! {
//!     pub enum AnySchedule: Schedule, discriminator = "type" {
//!         Cron(CronSchedule) => "CRON",
//!     }
//! }
//! ```

/// Declare an enum whose variants map one-to-one onto wire strings.
///
/// Generates `WireEnum`, `Display`, a strict `FromStr`, strict `FromWire`,
/// `ToWire`, and serde impls.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $crate::enums::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[ $( Self::$variant, )+ ];

            fn as_wire_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enums::WireEnum::as_wire_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::ModelError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $crate::enums::assign_strict(stringify!($name), "value", s)
            }
        }

        impl $crate::codec::FromWire for $name {
            fn from_wire(
                value: &::serde_json::Value,
                ctx: &mut $crate::codec::DecodeContext<'_>,
            ) -> $crate::error::Result<Self> {
                $crate::enums::decode_strict(value, ctx)
            }
        }

        impl $crate::codec::ToWire for $name {
            fn to_wire(&self, _config: &$crate::CodecConfig) -> ::serde_json::Value {
                ::serde_json::Value::String(
                    $crate::enums::WireEnum::as_wire_str(self).to_string(),
                )
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::enums::WireEnum::as_wire_str(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse::<$name>()
                    .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

/// Connect `Model` implementations to the value codec, `Hash`, and serde.
macro_rules! impl_model {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::codec::FromWire for $model {
                fn from_wire(
                    value: &::serde_json::Value,
                    ctx: &mut $crate::codec::DecodeContext<'_>,
                ) -> $crate::error::Result<Self> {
                    $crate::marshal::decode_model(value, ctx)
                }
            }

            impl $crate::codec::ToWire for $model {
                fn to_wire(&self, config: &$crate::CodecConfig) -> ::serde_json::Value {
                    $crate::marshal::Model::marshal_with(self, config)
                }
            }

            impl ::std::hash::Hash for $model {
                fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                    $crate::hashing::hash_model(self, state);
                }
            }

            impl ::serde::Serialize for $model {
                fn serialize<S: ::serde::Serializer>(
                    &self,
                    serializer: S,
                ) -> ::std::result::Result<S::Ok, S::Error> {
                    ::serde::Serialize::serialize(&$crate::marshal::Model::marshal(self), serializer)
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $model {
                fn deserialize<D: ::serde::Deserializer<'de>>(
                    deserializer: D,
                ) -> ::std::result::Result<Self, D::Error> {
                    let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                    <$model as $crate::marshal::Model>::unmarshal(&value)
                        .map_err(<D::Error as ::serde::de::Error>::custom)
                }
            }
        )+
    };
}

/// Declare a dispatch enum over the concrete subtypes of a base model.
///
/// Decoding reads the discriminator under its wire key and picks the matching
/// subtype. Absent or unrecognized discriminators decode as the base model.
macro_rules! polymorphic_model {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $base:ty, discriminator = $disc:literal {
            $( $variant:ident($ty:ty) => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant($ty), )+
            /// Discriminator absent or not recognized.
            Base($base),
        }

        impl $name {
            /// Wire key of the discriminator field.
            pub const DISCRIMINATOR: &'static str = $disc;

            /// Fixed discriminator value of the concrete subtype, `None` for the base.
            pub fn discriminator(&self) -> Option<&'static str> {
                match self {
                    $( Self::$variant(_) => Some($wire), )+
                    Self::Base(_) => None,
                }
            }

            pub fn unmarshal(value: &::serde_json::Value) -> $crate::error::Result<Self> {
                Self::unmarshal_configured(value, &$crate::CodecConfig::default(), None)
            }

            pub fn unmarshal_with(
                value: &::serde_json::Value,
                sink: &mut dyn $crate::diagnostics::DiagnosticSink,
            ) -> $crate::error::Result<Self> {
                Self::unmarshal_configured(value, &$crate::CodecConfig::default(), Some(sink))
            }

            pub fn unmarshal_configured(
                value: &::serde_json::Value,
                config: &$crate::CodecConfig,
                sink: Option<&mut dyn $crate::diagnostics::DiagnosticSink>,
            ) -> $crate::error::Result<Self> {
                let mut ctx = $crate::codec::DecodeContext::new(config, sink);
                <Self as $crate::codec::FromWire>::from_wire(value, &mut ctx)
            }

            pub fn marshal(&self) -> ::serde_json::Value {
                self.marshal_with(&$crate::CodecConfig::default())
            }

            pub fn marshal_with(&self, config: &$crate::CodecConfig) -> ::serde_json::Value {
                <Self as $crate::codec::ToWire>::to_wire(self, config)
            }
        }

        impl $crate::codec::FromWire for $name {
            fn from_wire(
                value: &::serde_json::Value,
                ctx: &mut $crate::codec::DecodeContext<'_>,
            ) -> $crate::error::Result<Self> {
                match value.get($disc).and_then(::serde_json::Value::as_str) {
                    $( Some($wire) => $crate::marshal::decode_model(value, ctx).map(Self::$variant), )+
                    _ => $crate::marshal::decode_model(value, ctx).map(Self::Base),
                }
            }
        }

        impl $crate::codec::ToWire for $name {
            fn to_wire(&self, config: &$crate::CodecConfig) -> ::serde_json::Value {
                match self {
                    $( Self::$variant(inner) => $crate::marshal::Model::marshal_with(inner, config), )+
                    Self::Base(inner) => $crate::marshal::Model::marshal_with(inner, config),
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        impl From<$base> for $name {
            fn from(value: $base) -> Self {
                Self::Base(value)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.marshal(), serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::unmarshal(&value).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}
