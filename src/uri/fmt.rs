use super::Uri;
use borrow_or_share::Bos;
use core::fmt;

impl<T: Bos<str>> fmt::Debug for Uri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for Uri<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Uri;
    use alloc::string::{String, ToString};
    use borrow_or_share::Bos;
    use core::{fmt, marker::PhantomData};
    use serde::{
        de::{self, Visitor},
        Deserialize, Deserializer, Serialize, Serializer,
    };

    impl<T: Bos<str>> Serialize for Uri<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    fn invalid<E: de::Error>(s: &str, e: impl fmt::Display) -> E {
        E::custom(format_args!("failed to parse {s:?} as URI reference: {e}"))
    }

    struct UriVisitor<T>(PhantomData<T>);

    impl<'de> Visitor<'de> for UriVisitor<&'de str> {
        type Value = Uri<&'de str>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a borrowed URI reference string")
        }

        fn visit_borrowed_str<E: de::Error>(self, s: &'de str) -> Result<Self::Value, E> {
            Uri::parse(s).map_err(|e| invalid(s, e))
        }
    }

    impl<'de> Visitor<'de> for UriVisitor<String> {
        type Value = Uri<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a URI reference string")
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
            self.visit_string(s.to_string())
        }

        fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
            Uri::parse(s).map_err(|(e, s)| invalid(&s, e))
        }
    }

    impl<'de> Deserialize<'de> for Uri<&'de str> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(UriVisitor::<&'de str>(PhantomData))
        }
    }

    impl<'de> Deserialize<'de> for Uri<String> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_string(UriVisitor::<String>(PhantomData))
        }
    }
}
